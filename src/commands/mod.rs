//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `dx`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the shared [`Context`] and the parsed
//!   `Args` and performs the command's logic.
//!
//! Compose passthrough commands accept arbitrary trailing arguments, including
//! flags, and hand them to the compose tool unchanged.
//!
//! ## Failure policy
//!
//! Commands that start or build things (`install`, `build`, `test`, `dev`,
//! `up`, `service`) fail the process. Read-mostly commands (`down`, `ps`,
//! `logs`, `config`, `module`) report the error and exit successfully.

pub mod completions;
pub mod config;
pub mod dev;
pub mod down;
pub mod lifecycle;
pub mod logs;
pub mod module;
pub mod modules;
pub mod ps;
pub mod service;
pub mod services;
pub mod tree;
pub mod up;

use anyhow::Result;

use dx::invocation::Compose;
use dx::output::Printer;
use dx::process::Executor;
use dx::registry::Registry;
use dx::runner::Runner;
use dx::settings::Settings;

/// Everything a command needs, built once per invocation.
pub struct Context {
    pub registry: Registry,
    pub settings: Settings,
    pub printer: Printer,
    pub executor: Box<dyn Executor>,
}

impl Context {
    pub fn compose(&self) -> Compose<'_> {
        Compose::new(
            &self.registry,
            &self.settings,
            self.executor.as_ref(),
            &self.printer,
        )
    }

    pub fn runner(&self) -> Runner<'_> {
        Runner::new(
            &self.registry,
            &self.settings,
            self.executor.as_ref(),
            &self.printer,
        )
    }

    /// Report a failure without failing the process.
    pub fn report(&self, result: dx::error::Result<()>) -> Result<()> {
        if let Err(err) = result {
            self.printer.error(&err.to_string());
        }
        Ok(())
    }
}
