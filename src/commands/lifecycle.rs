//! # Lifecycle Command Implementation
//!
//! This module implements the `install`, `build` and `test` subcommands. All
//! three take the same arguments and differ only in the [`Operation`] they
//! dispatch:
//!
//! | Command   | Script       | Package manager subcommand |
//! |-----------|--------------|----------------------------|
//! | `install` | `install.sh` | `install`                  |
//! | `build`   | `build.sh`   | `build`                    |
//! | `test`    | `test.sh`    | `test`                     |
//!
//! ## Example
//!
//! ```bash
//! dx build                  # every service
//! dx build reader           # every service of the reader module
//! dx build feed -- --prod   # the feed service, forwarding --prod
//! dx build -- --prod        # every service, forwarding --prod
//! ```

use anyhow::Result;
use clap::Args;

use dx::runner::Operation;

use super::Context;

/// Run a lifecycle operation
#[derive(Args, Debug)]
pub struct LifecycleArgs {
    /// Service or module name (default: every service)
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// Arguments forwarded to the script or package manager
    #[arg(value_name = "ARGS", last = true)]
    pub extra: Vec<String>,
}

/// Execute a lifecycle command.
///
/// Errors are fatal: an unknown target, a service with nothing to run, or a
/// failing script all end the process with a non-zero status.
pub fn execute(ctx: &Context, args: LifecycleArgs, operation: Operation) -> Result<()> {
    let operation = operation.with_extra_args(args.extra);

    ctx.runner().run_for_target(args.target.as_deref(), &operation)?;
    Ok(())
}
