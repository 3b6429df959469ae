//! # Logs Command Implementation
//!
//! This module implements the `logs` subcommand. Unlike the other compose
//! commands, the module name may appear anywhere among the arguments: the
//! first non-flag argument that names a module selects it. Without one, the
//! whole application's logs are shown.
//!
//! ## Example
//!
//! ```bash
//! dx logs reader        # logs for the reader module
//! dx logs -f reader     # follow logs for the reader module
//! dx logs --tail 20     # last 20 lines of the whole application
//! ```

use anyhow::Result;
use clap::Args;

use dx::invocation::parse_logs_args;

use super::Context;

/// View service logs
#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Arguments for `compose logs`, optionally including a module name
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Execute the `logs` command.
pub fn execute(ctx: &Context, args: LogsArgs) -> Result<()> {
    let (module, log_args) = parse_logs_args(&ctx.registry, &args.args);
    ctx.report(ctx.compose().run(&module, "logs", &log_args))
}
