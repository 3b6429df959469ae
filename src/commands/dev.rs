//! # Dev Command Implementation
//!
//! This module implements the `dev` subcommand: install dependencies, build,
//! then start the selected module (or the whole application) with compose
//! `up`. Each step must succeed before the next one starts.
//!
//! ## Example
//!
//! ```bash
//! dx dev reader       # reader module
//! dx dev reader -d    # reader module, detached
//! ```

use anyhow::Result;
use clap::Args;

use dx::defaults::WHOLE_APPLICATION;
use dx::invocation::parse_command_args;
use dx::runner::Operation;

use super::Context;

/// Install dependencies, build, and start services
#[derive(Args, Debug)]
pub struct DevArgs {
    /// Optional module name followed by arguments for `compose up`
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Execute the `dev` command.
pub fn execute(ctx: &Context, args: DevArgs) -> Result<()> {
    let parsed = parse_command_args(&ctx.registry, &args.args);
    let details = parsed.module_config?;
    let printer = &ctx.printer;

    let target = (parsed.module != WHOLE_APPLICATION).then_some(parsed.module.as_str());

    printer.section("Development Setup");
    match target {
        Some(module) => {
            printer.pair("Module:", module);
            printer.pair("Services:", &details.services.join(", "));
        }
        None => printer.pair("Module:", "(all)"),
    }

    let runner = ctx.runner();

    printer.log("\n→ Installing dependencies...");
    runner.run_for_target(target, &Operation::install())?;
    printer.success("Dependencies installed");

    printer.log("\n→ Building services...");
    runner.run_for_target(target, &Operation::build())?;
    printer.success("Build complete");

    printer.log("\n→ Starting services...");
    ctx.compose()
        .run(&parsed.module, "up", &parsed.compose_args)?;
    printer.success("Services started");

    Ok(())
}
