//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};

use dx::defaults::{DEFAULT_COMPOSE, DEFAULT_EXECUTOR_NAME, DEFAULT_PACKAGE_MANAGER, DEFAULT_SHELL};
use dx::layout::Layout;
use dx::output::{OutputConfig, Printer};
use dx::process::SystemExecutor;
use dx::registry::Registry;
use dx::runner::Operation;
use dx::settings::Settings;

use crate::commands::{self, Context};

/// dx - Developer experience tooling for multi-service repositories
#[derive(Parser, Debug)]
#[command(name = "dx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Show external commands before running them, and extra detail in listings
    #[arg(
        short,
        long,
        global = true,
        env = "VERBOSE",
        value_parser = FalseyValueParser::new()
    )]
    verbose: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Project root holding compose.yml, services/ and modules/
    #[arg(long, global = true, value_name = "DIR", env = "DX_ROOT")]
    root: Option<PathBuf>,

    /// Directory scanned for services (default: <root>/services)
    #[arg(long, global = true, value_name = "DIR", env = "DX_SERVICES_DIR")]
    services_dir: Option<PathBuf>,

    /// Directory scanned for modules (default: <root>/modules)
    #[arg(long, global = true, value_name = "DIR", env = "DX_MODULES_DIR")]
    modules_dir: Option<PathBuf>,

    /// Interpreter for lifecycle scripts
    #[arg(long, hide = true, env = "DX_SHELL", default_value = DEFAULT_SHELL)]
    shell: String,

    /// Package manager command line
    #[arg(long, hide = true, env = "DX_PACKAGE_MANAGER", default_value = DEFAULT_PACKAGE_MANAGER)]
    package_manager: String,

    /// Compose tool command line
    #[arg(long, hide = true, env = "DX_COMPOSE", default_value = DEFAULT_COMPOSE)]
    compose: String,

    /// Name shown in usage hints
    #[arg(long, hide = true, env = "DX_EXECUTOR", default_value = DEFAULT_EXECUTOR_NAME)]
    executor: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install dependencies for all services, a module, or a service
    Install(commands::lifecycle::LifecycleArgs),

    /// Build all services, a module, or a service
    Build(commands::lifecycle::LifecycleArgs),

    /// Run tests for all services, a module, or a service
    Test(commands::lifecycle::LifecycleArgs),

    /// Install dependencies, build, and start services
    Dev(commands::dev::DevArgs),

    /// Start services
    Up(commands::up::UpArgs),

    /// Stop services
    Down(commands::down::DownArgs),

    /// List running services
    Ps(commands::ps::PsArgs),

    /// View service logs
    Logs(commands::logs::LogsArgs),

    /// Show resolved compose configuration
    Config(commands::config::ConfigArgs),

    /// List all available services
    Services,

    /// List all deployment modules
    Modules,

    /// Show detailed information about a service
    Service(commands::service::ServiceArgs),

    /// Show detailed information about a module
    Module(commands::module::ModuleArgs),

    /// Display modules and the services they include
    Tree,

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// The printer used for this invocation, honouring `--color`.
    pub fn printer(&self) -> Printer {
        Printer::new(OutputConfig::from_env_and_flag(&self.color))
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        match self.color.to_lowercase().as_str() {
            "always" => console::set_colors_enabled(true),
            "never" => console::set_colors_enabled(false),
            _ => {}
        }

        let printer = self.printer();
        let layout = Layout::resolve(self.root, self.services_dir, self.modules_dir);
        log::debug!("Using layout {:?}", layout);

        let settings = Settings::default()
            .with_verbose(self.verbose)
            .with_shell(self.shell)
            .with_package_manager(&self.package_manager)
            .with_compose(&self.compose)
            .with_executor_name(self.executor);

        let ctx = Context {
            registry: Registry::new(layout),
            settings,
            printer,
            executor: Box::new(SystemExecutor),
        };

        match self.command {
            Commands::Install(args) => commands::lifecycle::execute(&ctx, args, Operation::install()),
            Commands::Build(args) => commands::lifecycle::execute(&ctx, args, Operation::build()),
            Commands::Test(args) => commands::lifecycle::execute(&ctx, args, Operation::test()),
            Commands::Dev(args) => commands::dev::execute(&ctx, args),
            Commands::Up(args) => commands::up::execute(&ctx, args),
            Commands::Down(args) => commands::down::execute(&ctx, args),
            Commands::Ps(args) => commands::ps::execute(&ctx, args),
            Commands::Logs(args) => commands::logs::execute(&ctx, args),
            Commands::Config(args) => commands::config::execute(&ctx, args),
            Commands::Services => commands::services::execute(&ctx),
            Commands::Modules => commands::modules::execute(&ctx),
            Commands::Service(args) => commands::service::execute(&ctx, args),
            Commands::Module(args) => commands::module::execute(&ctx, args),
            Commands::Tree => commands::tree::execute(&ctx),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Initialise `env_logger` from `--log-level`; `RUST_LOG` takes precedence.
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder
        .parse_filters(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false);
    // Only fails when a logger is already installed (e.g. under a test harness).
    if let Err(e) = builder.try_init() {
        log::debug!("Keeping existing logger: {}", e);
    }
}
