//! # Modules Command Implementation
//!
//! Lists every discovered module with its description; `--verbose` adds the
//! module path and compose file.

use anyhow::Result;

use super::services::NAME_WIDTH;
use super::Context;

/// Execute the `modules` command.
pub fn execute(ctx: &Context) -> Result<()> {
    let printer = &ctx.printer;
    let modules = ctx.registry.modules();

    if modules.is_empty() {
        printer.warn("No modules found");
        return Ok(());
    }

    printer.section("Available Modules");

    for (name, module) in &modules {
        printer.pair(&format!("{:<width$}", name, width = NAME_WIDTH), &module.description);

        if ctx.settings.verbose {
            printer.log(&format!(
                "  {:<width$} Path: {}",
                "",
                module.path.display(),
                width = NAME_WIDTH
            ));
            printer.log(&format!(
                "  {:<width$} Compose: {}",
                "",
                module.compose.display(),
                width = NAME_WIDTH
            ));
        }
    }

    printer.log("");
    printer.log(&format!(
        "Use: {} up <MODULE>     # Start a module",
        ctx.settings.executor_name
    ));
    Ok(())
}
