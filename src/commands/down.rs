//! # Down Command Implementation
//!
//! This module implements the `down` subcommand, which stops a module (or the
//! whole application) through the compose tool. Failures are reported but do
//! not fail the process.

use anyhow::Result;
use clap::Args;

use dx::defaults::WHOLE_APPLICATION;
use dx::invocation::parse_command_args;

use super::Context;

/// Stop services
#[derive(Args, Debug)]
pub struct DownArgs {
    /// Optional module name followed by arguments for `compose down`
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Execute the `down` command.
pub fn execute(ctx: &Context, args: DownArgs) -> Result<()> {
    ctx.report(stop(ctx, &args.args))
}

fn stop(ctx: &Context, args: &[String]) -> dx::error::Result<()> {
    let parsed = parse_command_args(&ctx.registry, args);
    let details = parsed.module_config?;
    let printer = &ctx.printer;

    if parsed.module == WHOLE_APPLICATION {
        printer.section("Stopping all modules");
    } else {
        printer.section(&format!("Stopping {}", details.module.description));
        printer.pair("Module:", &parsed.module);
    }

    ctx.compose()
        .run(&parsed.module, "down", &parsed.compose_args)?;
    printer.success("Services stopped");
    Ok(())
}
