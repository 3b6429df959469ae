//! Runtime settings threaded through the command builder and the runner.
//!
//! Verbosity and the names of the external tools are explicit values here
//! rather than process-wide state, so every call that depends on them takes a
//! `&Settings`.

use crate::defaults::{DEFAULT_COMPOSE, DEFAULT_EXECUTOR_NAME, DEFAULT_PACKAGE_MANAGER, DEFAULT_SHELL};

/// An external tool given as a program plus leading arguments, e.g.
/// `docker compose` is program `docker` with leading argument `compose`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Split a command line on whitespace. An empty line falls back to
    /// `fallback`.
    pub fn parse(line: &str, fallback: &str) -> Self {
        let mut parts = line.split_whitespace().map(str::to_string);
        match parts.next() {
            Some(program) => Self {
                program,
                args: parts.collect(),
            },
            None if !fallback.trim().is_empty() => Self::parse(fallback, ""),
            None => Self {
                program: String::new(),
                args: Vec::new(),
            },
        }
    }
}

/// Settings for one dx invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Echo each external command line before running it.
    pub verbose: bool,
    /// Interpreter for lifecycle scripts.
    pub shell: String,
    /// Package manager command.
    pub package_manager: ToolCommand,
    /// Compose tool command.
    pub compose: ToolCommand,
    /// Name shown in usage hints.
    pub executor_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbose: false,
            shell: DEFAULT_SHELL.to_string(),
            package_manager: ToolCommand::parse(DEFAULT_PACKAGE_MANAGER, ""),
            compose: ToolCommand::parse(DEFAULT_COMPOSE, ""),
            executor_name: DEFAULT_EXECUTOR_NAME.to_string(),
        }
    }
}

impl Settings {
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn with_package_manager(mut self, line: &str) -> Self {
        self.package_manager = ToolCommand::parse(line, DEFAULT_PACKAGE_MANAGER);
        self
    }

    pub fn with_compose(mut self, line: &str) -> Self {
        self.compose = ToolCommand::parse(line, DEFAULT_COMPOSE);
        self
    }

    pub fn with_executor_name(mut self, name: impl Into<String>) -> Self {
        self.executor_name = name.into();
        self
    }
}
