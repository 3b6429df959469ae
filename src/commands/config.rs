//! # Config Command Implementation
//!
//! Prints the compose tool's resolved configuration (`compose config`) for a
//! module or the whole application, under a header naming it. Failures are
//! reported but do not fail the process.

use anyhow::Result;
use clap::Args;

use dx::invocation::parse_command_args;

use super::Context;

/// Show resolved compose configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Optional module name followed by arguments for `compose config`
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Execute the `config` command.
pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    ctx.report(show(ctx, &args.args))
}

fn show(ctx: &Context, args: &[String]) -> dx::error::Result<()> {
    let parsed = parse_command_args(&ctx.registry, args);
    let details = parsed.module_config?;

    let output = ctx
        .compose()
        .capture(&parsed.module, "config", &parsed.compose_args)?;

    ctx.printer
        .section(&format!("Configuration for {}", details.module.description));
    ctx.printer.log(output.trim_end());
    Ok(())
}
