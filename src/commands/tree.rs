//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays every module
//! with the services its compose file includes, as a tree rooted at the
//! project directory.
//!
//! Member services that have no directory under `services/` are marked
//! `(missing)`; they would fail as soon as a command looked them up.
//!
//! This command is a safe, read-only operation that does not modify any files.

use std::borrow::Cow;
use std::io::{self, Write};

use anyhow::Result;
use ptree::{print_tree, Style, TreeItem};

use dx::registry::Registry;

use super::Context;

/// Execute the `tree` command.
pub fn execute(ctx: &Context) -> Result<()> {
    if ctx.registry.modules().is_empty() {
        ctx.printer.warn("No modules found");
        return Ok(());
    }

    let tree = build_tree(&ctx.registry)?;
    print_tree(&tree).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
    Ok(())
}

/// Build the module → service tree.
fn build_tree(registry: &Registry) -> Result<TreeNode> {
    let root = &registry.layout().root;
    let label = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let services = registry.services();
    let mut children = Vec::new();

    for name in registry.list_modules() {
        let details = registry.get_module(&name)?;
        let members = details
            .services
            .iter()
            .map(|service| {
                let label = if services.contains_key(service) {
                    service.clone()
                } else {
                    format!("{} (missing)", service)
                };
                TreeNode::leaf(label)
            })
            .collect();

        children.push(TreeNode {
            label: format!("{} - {}", name, details.module.description),
            children: members,
        });
    }

    Ok(TreeNode { label, children })
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
