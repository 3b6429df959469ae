//! Human-facing metadata for service and module directories.
//!
//! Descriptions come from the first prose paragraph of `README.md`, falling
//! back to the `description` field of `package.json`. Every reader returns
//! `None` when the file is missing, unreadable, or malformed.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::defaults::{MANIFEST_FILENAME, README_FILENAME};

/// The parts of a `package.json` manifest dx cares about.
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Read and parse `package.json` in `dir`.
pub fn read_manifest(dir: &Path) -> Option<Manifest> {
    let path = dir.join(MANIFEST_FILENAME);
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            debug!("Ignoring unparseable manifest {}: {}", path.display(), e);
            None
        }
    }
}

/// Full `README.md` content.
pub fn read_readme(dir: &Path) -> Option<String> {
    fs::read_to_string(dir.join(README_FILENAME)).ok()
}

/// First paragraph of `README.md` that is not a heading.
pub fn read_readme_description(dir: &Path) -> Option<String> {
    let content = read_readme(dir)?.replace("\r\n", "\n");
    content
        .split("\n\n")
        .find(|p| !p.trim().is_empty() && !p.starts_with('#'))
        .map(|p| p.trim().to_string())
}

/// `description` from `package.json`.
pub fn read_package_description(dir: &Path) -> Option<String> {
    read_manifest(dir)?
        .description
        .filter(|d| !d.trim().is_empty())
}

/// `name` from `package.json`.
pub fn read_package_name(dir: &Path) -> Option<String> {
    read_manifest(dir)?.name.filter(|n| !n.trim().is_empty())
}

/// Description from the README, else from the manifest.
pub fn read_description(dir: &Path) -> Option<String> {
    read_readme_description(dir).or_else(|| read_package_description(dir))
}
