//! # Up Command Implementation
//!
//! This module implements the `up` subcommand, which starts a module (or the
//! whole application) through the compose tool.
//!
//! When exactly one positional compose argument is given and it names a
//! member service of the module, the header describes a single-service start.
//!
//! ## Example
//!
//! ```bash
//! dx up                    # whole application
//! dx up reader -d          # reader module, detached
//! dx up reader rabbitmq    # one service of the reader module
//! ```

use anyhow::Result;
use clap::Args;

use dx::defaults::WHOLE_APPLICATION;
use dx::invocation::parse_command_args;

use super::Context;

/// Start services
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Optional module name followed by arguments for `compose up`
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Positional compose arguments: neither flags nor `key=value` pairs.
fn requested_services(compose_args: &[String]) -> Vec<&str> {
    compose_args
        .iter()
        .filter(|a| !a.starts_with('-') && !a.contains('='))
        .map(String::as_str)
        .collect()
}

/// Execute the `up` command.
pub fn execute(ctx: &Context, args: UpArgs) -> Result<()> {
    let parsed = parse_command_args(&ctx.registry, &args.args);
    let details = parsed.module_config?;
    let printer = &ctx.printer;
    let module = parsed.module.as_str();

    match requested_services(&parsed.compose_args).as_slice() {
        [service] if details.services.iter().any(|s| s.as_str() == *service) => {
            printer.section(&format!("Starting single service from module: {}", module));
            printer.pair("Module:", module);
            printer.pair("Service:", service);
        }
        _ => {
            printer.section(&format!("Starting {}", details.module.description));
            let label = if module == WHOLE_APPLICATION {
                "(full app)"
            } else {
                module
            };
            printer.pair("Module:", label);
            printer.pair("Services:", &details.services.join(", "));
        }
    }

    ctx.compose().run(module, "up", &parsed.compose_args)?;
    Ok(())
}
