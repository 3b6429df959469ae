//! Default values for dx.
//!
//! This module provides centralized names and defaults used across the
//! library and the commands, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Selector meaning "the whole application" (the root compose file).
pub const WHOLE_APPLICATION: &str = ".";

/// Directory under the project root holding services.
pub const SERVICES_DIRNAME: &str = "services";

/// Directory under the project root holding modules.
pub const MODULES_DIRNAME: &str = "modules";

/// Compose file name, both at the project root and inside a module.
pub const COMPOSE_FILENAME: &str = "compose.yml";

/// Location of a service's own compose file, relative to the service.
pub const SERVICE_COMPOSE_PATH: [&str; 2] = ["docker", COMPOSE_FILENAME];

/// Package manifest marking an application service.
pub const MANIFEST_FILENAME: &str = "package.json";

/// README consulted for descriptions.
pub const README_FILENAME: &str = "README.md";

/// Sentinel file excluding a directory from default enumeration.
pub const SKIP_FILENAME: &str = ".dxskip";

/// Environment file name at the root and in each module.
pub const ENV_FILENAME: &str = ".env";

/// Key in the root env file naming the active profile.
pub const PROFILE_KEY: &str = "APP_ENV";

/// Default shell used to run lifecycle scripts.
pub const DEFAULT_SHELL: &str = "bash";

/// Default package manager command line.
pub const DEFAULT_PACKAGE_MANAGER: &str = "pnpm";

/// Default compose command line.
pub const DEFAULT_COMPOSE: &str = "docker compose";

/// Default name used when printing usage hints.
pub const DEFAULT_EXECUTOR_NAME: &str = "dx";

/// Returns the default project root.
///
/// This is the current working directory, falling back to `.` if it cannot be
/// determined. It can be overridden by the `--root` CLI flag or the `DX_ROOT`
/// environment variable.
pub fn default_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
