//! # Dispatcher
//!
//! Runs a lifecycle operation (install, build, test) against services.
//!
//! ## Per-service resolution
//!
//! For each service the first match wins:
//!
//! 1. A lifecycle script (e.g. `build.sh`) in the service directory is run
//!    with the configured shell, from the service directory. This wins even
//!    when the service also has a `package.json`.
//! 2. Otherwise, a `package.json` makes the package manager run the
//!    subcommand filtered to the manifest's package name (the directory name
//!    when the manifest has none), with extra arguments after `--`.
//! 3. Otherwise, in strict mode, [`Error::NoOperationSteps`].
//! 4. Otherwise the service is skipped with an informational message.
//!
//! ## Targets
//!
//! - No target (or `.`): every service, non-strict. Services marked with
//!   `.dxskip` are left out.
//! - A module name: the module's member services, non-strict. A module wins
//!   over a service with the same name.
//! - A service name: that service, strict.
//! - Anything else: [`Error::UnknownTarget`].
//!
//! Services run one after another. The first failure stops the run; work
//! already done is not undone.

use log::info;

use crate::defaults::MANIFEST_FILENAME;
use crate::discovery::{is_skipped, Service};
use crate::error::{Error, Result};
use crate::metadata::read_package_name;
use crate::output::Printer;
use crate::process::{CommandSpec, Executor};
use crate::registry::{Registry, Target};
use crate::settings::Settings;

/// A lifecycle operation to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Script filename looked up in the service directory.
    pub script: String,
    /// Package manager subcommand used when there is no script.
    pub package_subcommand: String,
    /// Human label, e.g. `Building`.
    pub label: String,
    /// Arguments forwarded to the script or package manager.
    pub extra_args: Vec<String>,
    /// Fail instead of skipping when a service has nothing to run.
    pub strict: bool,
}

impl Operation {
    pub fn new(
        script: impl Into<String>,
        package_subcommand: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            script: script.into(),
            package_subcommand: package_subcommand.into(),
            label: label.into(),
            extra_args: Vec::new(),
            strict: false,
        }
    }

    pub fn install() -> Self {
        Self::new("install.sh", "install", "Installing")
    }

    pub fn build() -> Self {
        Self::new("build.sh", "build", "Building")
    }

    pub fn test() -> Self {
        Self::new("test.sh", "test", "Testing")
    }

    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// What an operation resolves to for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Run the operation's lifecycle script.
    Script,
    /// Run the package manager filtered to `package`.
    PackageManager { package: String },
    /// Nothing to run.
    Nothing,
}

/// Resolve which step `operation` takes for `service`.
///
/// The script wins over a manifest. A manifest without a `name` filters on
/// the directory name.
pub fn resolve_step(service: &Service, operation: &Operation) -> Step {
    if service.path.join(&operation.script).is_file() {
        Step::Script
    } else if service.path.join(MANIFEST_FILENAME).exists() {
        Step::PackageManager {
            package: read_package_name(&service.path).unwrap_or_else(|| service.name.clone()),
        }
    } else {
        Step::Nothing
    }
}

/// Dispatches operations to services.
pub struct Runner<'a> {
    registry: &'a Registry,
    settings: &'a Settings,
    executor: &'a dyn Executor,
    printer: &'a Printer,
}

impl<'a> Runner<'a> {
    pub fn new(
        registry: &'a Registry,
        settings: &'a Settings,
        executor: &'a dyn Executor,
        printer: &'a Printer,
    ) -> Self {
        Self {
            registry,
            settings,
            executor,
            printer,
        }
    }

    /// Run `operation` for the service called `name`.
    pub fn run_for_service(&self, name: &str, operation: &Operation) -> Result<()> {
        let service = self.registry.get_service(name)?;
        match resolve_step(&service, operation) {
            Step::Script => {
                self.printer.log(&format!(
                    "{} {} ({})...",
                    operation.label, name, operation.script
                ));
                let spec = CommandSpec::new(self.settings.shell.clone())
                    .arg(operation.script.clone())
                    .args(operation.extra_args.iter().cloned())
                    .current_dir(&service.path);
                self.execute(&spec)
            }
            Step::PackageManager { package } => {
                let manager = &self.settings.package_manager;
                self.printer.log(&format!(
                    "{} {} ({})...",
                    operation.label, name, manager.program
                ));

                let mut spec = CommandSpec::new(manager.program.clone())
                    .args(manager.args.iter().cloned())
                    .arg(format!("--filter={package}"))
                    .arg(operation.package_subcommand.clone())
                    .current_dir(&self.registry.layout().root);
                if !operation.extra_args.is_empty() {
                    spec = spec.arg("--").args(operation.extra_args.iter().cloned());
                }
                self.execute(&spec)
            }
            Step::Nothing if operation.strict => Err(Error::NoOperationSteps {
                service: name.to_string(),
                label: operation.label.clone(),
                script: operation.script.clone(),
            }),
            Step::Nothing => {
                let message = format!("Skipping {} (no {} steps)", name, operation.label);
                info!("{}", message);
                self.printer.info(&message);
                Ok(())
            }
        }
    }

    /// Run `operation` for a target: nothing (all services), a module, or a
    /// service.
    pub fn run_for_target(&self, target: Option<&str>, operation: &Operation) -> Result<()> {
        let relaxed = operation.clone().with_strict(false);

        let target = match target {
            None => Target::Application,
            Some(name) => self.registry.classify(name),
        };

        match target {
            Target::Application => {
                for (name, service) in self.registry.services() {
                    if is_skipped(&service.path) {
                        let message = format!("Skipping {} (.dxskip)", name);
                        info!("{}", message);
                        self.printer.info(&message);
                        continue;
                    }
                    self.run_for_service(&name, &relaxed)?;
                }
                Ok(())
            }
            Target::Module(module) => {
                let services = self.registry.get_module_services(&module)?;
                self.printer.section(&format!(
                    "{} {} service(s) for module \"{}\"",
                    operation.label,
                    services.len(),
                    module
                ));
                for name in &services {
                    self.run_for_service(name, &relaxed)?;
                }
                Ok(())
            }
            Target::Service(name) => {
                self.run_for_service(&name, &operation.clone().with_strict(true))
            }
            Target::Unknown(name) => Err(Error::UnknownTarget { name }),
        }
    }

    fn execute(&self, spec: &CommandSpec) -> Result<()> {
        if self.settings.verbose {
            self.printer.info(&format!("$ {}", spec));
        }
        self.executor.run(spec)
    }
}
