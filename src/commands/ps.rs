//! # Ps Command Implementation
//!
//! Lists running containers of a module (or the whole application). Failures
//! are reported but do not fail the process.

use anyhow::Result;
use clap::Args;

use dx::invocation::parse_command_args;

use super::Context;

/// List running services
#[derive(Args, Debug)]
pub struct PsArgs {
    /// Optional module name followed by arguments for `compose ps`
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Execute the `ps` command.
pub fn execute(ctx: &Context, args: PsArgs) -> Result<()> {
    let parsed = parse_command_args(&ctx.registry, &args.args);
    ctx.report(
        ctx.compose()
            .run(&parsed.module, "ps", &parsed.compose_args),
    )
}
