//! External process execution.
//!
//! Every external tool dx drives (lifecycle scripts, the package manager, the
//! compose tool) is described by a [`CommandSpec`] and run through an
//! [`Executor`]. Execution is synchronous: the caller blocks until the child
//! exits. There is no timeout and no retry.

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// One external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory; `None` inherits the current one.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Build the `std::process::Command`. Arguments are passed as-is, never
    /// through a shell.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_if_needed(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote_if_needed(arg))?;
        }
        Ok(())
    }
}

/// Double-quote `arg` for display in a POSIX shell, escaping the characters
/// that stay special inside double quotes.
pub fn shell_quote(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn quote_if_needed(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@%+,".contains(c));
    if plain {
        arg.to_string()
    } else {
        shell_quote(arg)
    }
}

/// Runs external commands.
pub trait Executor {
    /// Run with inherited standard streams and environment.
    fn run(&self, spec: &CommandSpec) -> Result<()>;

    /// Run and return standard output; standard error is inherited.
    fn capture(&self, spec: &CommandSpec) -> Result<String>;
}

/// [`Executor`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, spec: &CommandSpec) -> Result<()> {
        debug!("Running {}", spec);
        let status = spec.to_command().status().map_err(|e| failed(spec, e))?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(spec, status))
        }
    }

    fn capture(&self, spec: &CommandSpec) -> Result<String> {
        debug!("Capturing {}", spec);
        let output = spec
            .to_command()
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| failed(spec, e))?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(failed(spec, output.status))
        }
    }
}

fn failed(spec: &CommandSpec, cause: impl fmt::Display) -> Error {
    Error::CommandFailed {
        command: spec.to_string(),
        message: cause.to_string(),
    }
}
