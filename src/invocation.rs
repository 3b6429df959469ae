//! # Compose Command Builder
//!
//! Turns a module selector and passthrough arguments into a compose tool
//! invocation:
//!
//! ```text
//! <compose> -f <compose file> [--env-file <file>]... [args]...
//! ```
//!
//! The selector is either the whole-application sentinel (`.`), which picks
//! the root `compose.yml`, or a module name, which picks that module's
//! `compose.yml`. The compose file must exist. Env files come from
//! [`crate::env::build_env_chain`]. Passthrough arguments are appended
//! verbatim; they reach the tool as separate argv entries, never through a
//! shell.
//!
//! Invocations are built fresh on every call from the current filesystem.

use std::path::PathBuf;

use log::debug;

use crate::defaults::WHOLE_APPLICATION;
use crate::env::build_env_chain;
use crate::error::{EntityKind, Error, Result};
use crate::output::Printer;
use crate::process::{shell_quote, CommandSpec, Executor};
use crate::registry::{ModuleDetails, Registry};
use crate::settings::{Settings, ToolCommand};

/// A fully resolved compose invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeInvocation {
    pub tool: ToolCommand,
    pub compose_file: PathBuf,
    pub env_files: Vec<PathBuf>,
    pub args: Vec<String>,
}

impl ComposeInvocation {
    /// The command to execute.
    pub fn to_spec(&self) -> CommandSpec {
        let mut spec = CommandSpec::new(self.tool.program.clone())
            .args(self.tool.args.iter().cloned())
            .arg("-f")
            .arg(self.compose_file.to_string_lossy());
        for env_file in &self.env_files {
            spec = spec.arg("--env-file").arg(env_file.to_string_lossy());
        }
        spec.args(self.args.iter().cloned())
    }

    /// Shell-ready command line with every path and argument quoted.
    pub fn command_line(&self) -> String {
        let mut line = std::iter::once(self.tool.program.as_str())
            .chain(self.tool.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        line.push_str(&format!(
            " -f {}",
            shell_quote(&self.compose_file.to_string_lossy())
        ));
        for env_file in &self.env_files {
            line.push_str(&format!(
                " --env-file {}",
                shell_quote(&env_file.to_string_lossy())
            ));
        }
        for arg in &self.args {
            line.push(' ');
            line.push_str(&shell_quote(arg));
        }
        line
    }
}

/// Build the invocation for `module` with passthrough `args`.
pub fn build_invocation(
    registry: &Registry,
    module: &str,
    args: &[String],
    settings: &Settings,
) -> Result<ComposeInvocation> {
    let layout = registry.layout();
    let application = module == WHOLE_APPLICATION;

    let compose_file = if application {
        layout.root_compose_file()
    } else {
        let modules = registry.modules();
        match modules.get(module) {
            Some(m) => m.compose_file.clone(),
            None => {
                return Err(Error::NotFound {
                    kind: EntityKind::Module,
                    name: module.to_string(),
                    available: modules.into_keys().collect(),
                })
            }
        }
    };

    if !compose_file.exists() {
        return Err(Error::MissingComposeFile {
            path: compose_file,
            application,
        });
    }

    let env_files = build_env_chain(layout, module);
    debug!("Env chain for {}: {:?}", module, env_files);

    Ok(ComposeInvocation {
        tool: settings.compose.clone(),
        compose_file,
        env_files,
        args: args.to_vec(),
    })
}

/// Result of splitting compose command arguments.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Module selector; `.` when none was given.
    pub module: String,
    /// Arguments for the compose tool.
    pub compose_args: Vec<String>,
    /// The resolved module, or the lookup failure for the caller to report.
    pub module_config: Result<ModuleDetails>,
}

/// Split raw arguments into a module selector and compose arguments.
///
/// The first argument selects the module when it is not a flag and is either
/// `.` or a known module name; otherwise every argument is passed through and
/// the whole application is selected.
pub fn parse_command_args(registry: &Registry, args: &[String]) -> ParsedArgs {
    let (module, compose_args) = match args.first() {
        Some(first)
            if !first.starts_with('-')
                && (first == WHOLE_APPLICATION || registry.has_module(first)) =>
        {
            (first.clone(), args[1..].to_vec())
        }
        _ => (WHOLE_APPLICATION.to_string(), args.to_vec()),
    };

    let module_config = registry.get_module_or_application(&module);

    ParsedArgs {
        module,
        compose_args,
        module_config,
    }
}

/// Split `logs` arguments: the first non-flag argument naming a module, at
/// any position, selects it and is removed; everything else is passed
/// through.
pub fn parse_logs_args(registry: &Registry, args: &[String]) -> (String, Vec<String>) {
    let modules = registry.list_modules();
    let position = args
        .iter()
        .position(|a| !a.starts_with('-') && modules.contains(a));

    match position {
        Some(i) => {
            let mut rest = args.to_vec();
            let module = rest.remove(i);
            (module, rest)
        }
        None => (WHOLE_APPLICATION.to_string(), args.to_vec()),
    }
}

/// Builds and runs compose invocations.
pub struct Compose<'a> {
    registry: &'a Registry,
    settings: &'a Settings,
    executor: &'a dyn Executor,
    printer: &'a Printer,
}

impl<'a> Compose<'a> {
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

    /// Build the invocation for `command` (e.g. `up`) on `module`, echoing it
    /// when verbose.
    pub fn build(&self, module: &str, command: &str, args: &[String]) -> Result<ComposeInvocation> {
        let mut full_args = Vec::with_capacity(args.len() + 1);
        full_args.push(command.to_string());
        full_args.extend_from_slice(args);

        let invocation = build_invocation(self.registry, module, &full_args, self.settings)?;
        if self.settings.verbose {
            self.printer
                .info(&format!("$ {}", invocation.command_line()));
        }
        Ok(invocation)
    }

    /// Run `command` with inherited standard streams.
    pub fn run(&self, module: &str, command: &str, args: &[String]) -> Result<()> {
        let invocation = self.build(module, command, args)?;
        self.executor.run(&invocation.to_spec())
    }

    /// Run `command` and return its standard output.
    pub fn capture(&self, module: &str, command: &str, args: &[String]) -> Result<String> {
        let invocation = self.build(module, command, args)?;
        self.executor.capture(&invocation.to_spec())
    }
}
