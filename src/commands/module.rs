//! # Module Command Implementation
//!
//! This module implements the `module` subcommand, which shows a module's
//! description, its member services and its README rendered as plain text.
//! With `--verbose` it also shows the module's effective environment (the
//! merged `.env` chain).
//!
//! An unknown module name is reported but does not fail the process.

use anyhow::Result;
use clap::Args;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use dx::env::load_env_chain;
use dx::metadata::read_readme;

use super::Context;

/// Show detailed information about a module
#[derive(Args, Debug)]
pub struct ModuleArgs {
    /// Module name
    pub name: String,
}

/// Execute the `module` command.
pub fn execute(ctx: &Context, args: ModuleArgs) -> Result<()> {
    ctx.report(show(ctx, &args.name))
}

fn show(ctx: &Context, name: &str) -> dx::error::Result<()> {
    let details = ctx.registry.get_module(name)?;
    let printer = &ctx.printer;

    printer.section(name);
    printer.log(&details.module.description);

    if !details.services.is_empty() {
        printer.section("Services");
        for service in &details.services {
            printer.log(&format!("  • {}", service));
        }
    }

    if let Some(readme) = read_readme(&details.module.path) {
        printer.section("README");
        printer.log(&render_markdown(&readme));
    }

    if ctx.settings.verbose {
        let env = load_env_chain(ctx.registry.layout(), name);
        if !env.is_empty() {
            printer.section("Environment");
            for (key, value) in &env {
                printer.log(&format!("  {key}={value}"));
            }
        }
    }

    Ok(())
}

/// Render Markdown as plain terminal text.
///
/// Block elements are separated by blank lines, list items are bulleted, and
/// inline markup is dropped.
fn render_markdown(source: &str) -> String {
    let mut out = String::new();

    for event in Parser::new(source) {
        match event {
            Event::Start(Tag::Item) => out.push_str("  • "),
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock) => {
                out.push_str("\n\n")
            }
            Event::End(TagEnd::Item) => out.push('\n'),
            Event::End(TagEnd::List(_)) => out.push('\n'),
            Event::Rule => out.push_str("---\n\n"),
            _ => {}
        }
    }

    out.trim_end().to_string()
}
