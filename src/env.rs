//! # Environment Layering
//!
//! `.env` files are layered root → module → module profile:
//!
//! 1. `<root>/.env`, when present.
//! 2. `<modules>/<module>/.env`, when present and a named module is selected.
//! 3. `<modules>/<module>/.env.<profile>`, where `<profile>` is the `APP_ENV`
//!    value of the root `.env`, when that file exists and defines the key.
//!
//! Later layers override earlier keys. Missing files contribute nothing.
//! The compose tool receives each present file as its own `--env-file` flag,
//! in the same order, so it applies the same override rule.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::defaults::{ENV_FILENAME, PROFILE_KEY, WHOLE_APPLICATION};
use crate::layout::Layout;

/// Key/value pairs from one or more env files.
pub type EnvMap = BTreeMap<String, String>;

/// Parse the env file at `path`. A missing file yields an empty map.
pub fn parse_env_file(path: &Path) -> EnvMap {
    if !path.exists() {
        return EnvMap::new();
    }
    match fs::read_to_string(path) {
        Ok(content) => parse_env_str(&content),
        Err(e) => {
            warn!("Cannot read env file {}: {}", path.display(), e);
            EnvMap::new()
        }
    }
}

/// Parse env file content.
///
/// Blank lines and lines starting with `#` are skipped. Each remaining line
/// is split on its first `=`; key and value are trimmed, and the value may
/// itself contain `=`. A line without `=` defines its key with an empty
/// value.
pub fn parse_env_str(content: &str) -> EnvMap {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_once('=').unwrap_or((line, ""));
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Merge layers in order; later layers win.
pub fn merge_layers<I>(layers: I) -> EnvMap
where
    I: IntoIterator<Item = EnvMap>,
{
    layers.into_iter().fold(EnvMap::new(), |mut merged, layer| {
        merged.extend(layer);
        merged
    })
}

/// The ordered env files that apply to `module`.
pub fn build_env_chain(layout: &Layout, module: &str) -> Vec<PathBuf> {
    let mut chain = Vec::new();

    let root_env = layout.root_env_file();
    let root_exists = root_env.exists();
    if root_exists {
        chain.push(root_env.clone());
    }

    if module != WHOLE_APPLICATION {
        let module_dir = layout.modules_dir.join(module);

        let module_env = module_dir.join(ENV_FILENAME);
        if module_env.exists() {
            chain.push(module_env);
        }

        if root_exists {
            if let Some(profile) = parse_env_file(&root_env)
                .remove(PROFILE_KEY)
                .filter(|p| !p.is_empty())
            {
                let profile_env = module_dir.join(format!("{ENV_FILENAME}.{profile}"));
                if profile_env.exists() {
                    chain.push(profile_env);
                } else {
                    debug!("No {} profile file for module {}", profile, module);
                }
            }
        }
    }

    chain
}

/// The effective environment for `module`: every file of the chain, merged.
pub fn load_env_chain(layout: &Layout, module: &str) -> EnvMap {
    merge_layers(
        build_env_chain(layout, module)
            .iter()
            .map(|p| parse_env_file(p)),
    )
}
