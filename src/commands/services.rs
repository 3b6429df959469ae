//! # Services Command Implementation
//!
//! Lists every discovered service with its description. Infrastructure
//! services carry an `[infra]` tag; `--verbose` adds port and image.

use anyhow::Result;

use super::Context;

/// Width of the name column.
pub(crate) const NAME_WIDTH: usize = 15;

/// Execute the `services` command.
pub fn execute(ctx: &Context) -> Result<()> {
    let printer = &ctx.printer;
    let services = ctx.registry.services();

    if services.is_empty() {
        printer.warn("No services found");
        return Ok(());
    }

    printer.section("Available Services");

    for (name, service) in &services {
        let tag = if service.infrastructure { " [infra]" } else { "" };
        printer.log(&format!(
            "  {:<width$} {}{}",
            name,
            service.description,
            tag,
            width = NAME_WIDTH
        ));

        if ctx.settings.verbose {
            printer.log(&format!(
                "  {:<width$} Port: {}, Image: {}",
                "",
                service
                    .port
                    .map_or_else(|| "(unknown)".to_string(), |p| p.to_string()),
                service.image.as_deref().unwrap_or("(unknown)"),
                width = NAME_WIDTH
            ));
        }
    }

    printer.log("");
    printer.log(&format!(
        "Use: {} service <NAME>  # Get details about a service",
        ctx.settings.executor_name
    ));
    Ok(())
}
