//! # Service Command Implementation
//!
//! Shows the details discovered for one service. An unknown name is fatal.
//!
//! With `--verbose`, also shows which lifecycle step each of `install`,
//! `build` and `test` would use: the script, the package manager, or
//! nothing.

use anyhow::Result;
use clap::Args;

use dx::discovery::Service;
use dx::runner::{resolve_step, Operation, Step};
use dx::settings::Settings;

use super::Context;

/// Show detailed information about a service
#[derive(Args, Debug)]
pub struct ServiceArgs {
    /// Service name
    pub name: String,
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Execute the `service` command.
pub fn execute(ctx: &Context, args: ServiceArgs) -> Result<()> {
    let service = ctx.registry.get_service(&args.name)?;
    let printer = &ctx.printer;

    printer.section(&format!("Service: {}", args.name));
    printer.pair("Description:", &service.description);
    printer.pair("Image:", service.image.as_deref().unwrap_or("(unknown)"));
    printer.pair(
        "Port:",
        &service
            .port
            .map_or_else(|| "(unknown)".to_string(), |p| p.to_string()),
    );
    printer.pair(
        "Type:",
        if service.infrastructure {
            "Infrastructure"
        } else {
            "Application"
        },
    );
    printer.pair("Path:", &service.path.display().to_string());

    if ctx.settings.verbose {
        printer.pair("Has compose:", yes_no(service.has_compose));
        printer.pair("Has package.json:", yes_no(service.has_package_manifest));
        for operation in [Operation::install(), Operation::build(), Operation::test()] {
            printer.pair(
                &format!("{}:", operation.package_subcommand),
                &lifecycle_step(&ctx.settings, &service, &operation),
            );
        }
    }

    Ok(())
}

/// What `operation` would run for `service`.
fn lifecycle_step(settings: &Settings, service: &Service, operation: &Operation) -> String {
    match resolve_step(service, operation) {
        Step::Script => operation.script.clone(),
        Step::PackageManager { package } => {
            let manager = &settings.package_manager;
            let mut words = vec![manager.program.clone()];
            words.extend(manager.args.iter().cloned());
            words.push(format!("--filter={package}"));
            words.push(operation.package_subcommand.clone());
            words.join(" ")
        }
        Step::Nothing => "-".to_string(),
    }
}
