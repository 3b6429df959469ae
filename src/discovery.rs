//! # Discovery Engine
//!
//! Scans the `services/` and `modules/` directories of a [`Layout`] and
//! describes every immediate subdirectory whose name does not start with `.`.
//!
//! ## Classification
//!
//! A service is an *application* when it has a `package.json`, a `src/`
//! directory or an `app/` directory; anything else is *infrastructure*. This
//! is a heuristic: an infrastructure service that ships a manifest for
//! tooling reasons is classified as an application.
//!
//! ## Ordering
//!
//! Entries are returned sorted by name, so two scans of an unchanged tree
//! always agree.
//!
//! Nothing is cached: every call reads the filesystem again. A missing root
//! directory yields an empty map.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::compose::parse_compose_file;
use crate::defaults::{COMPOSE_FILENAME, MANIFEST_FILENAME, SERVICE_COMPOSE_PATH, SKIP_FILENAME};
use crate::layout::Layout;
use crate::metadata::read_description;

/// A deployable unit backed by a directory under `services/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub path: PathBuf,
    pub description: String,
    pub image: Option<String>,
    pub port: Option<u16>,
    /// True when no application markers were found.
    pub infrastructure: bool,
    pub has_compose: bool,
    pub has_package_manifest: bool,
}

impl Service {
    /// The service's own compose file (`docker/compose.yml`).
    pub fn compose_file(&self) -> PathBuf {
        service_compose_file(&self.path)
    }
}

/// A named group of services defined by `modules/<name>/compose.yml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub path: PathBuf,
    pub description: String,
    /// Compose file path relative to the project root, for display.
    pub compose: PathBuf,
    /// Absolute compose file path.
    pub compose_file: PathBuf,
    pub has_compose: bool,
}

/// Services keyed by name.
pub type ServiceMap = BTreeMap<String, Service>;

/// Modules keyed by name.
pub type ModuleMap = BTreeMap<String, Module>;

/// Whether `dir` carries the `.dxskip` sentinel.
///
/// Discovery itself never filters on this; callers that enumerate "all"
/// services or modules by default decide whether to honour it.
pub fn is_skipped(dir: &Path) -> bool {
    dir.join(SKIP_FILENAME).exists()
}

/// Discover every service under the layout's services directory.
pub fn discover_services(layout: &Layout) -> ServiceMap {
    subdirectories(&layout.services_dir)
        .into_iter()
        .map(|(name, path)| {
            let service = describe_service(name, path);
            (service.name.clone(), service)
        })
        .collect()
}

/// Discover every module under the layout's modules directory.
pub fn discover_modules(layout: &Layout) -> ModuleMap {
    subdirectories(&layout.modules_dir)
        .into_iter()
        .map(|(name, path)| {
            let module = describe_module(layout, name, path);
            (module.name.clone(), module)
        })
        .collect()
}

fn describe_service(name: String, path: PathBuf) -> Service {
    let manifest = path.join(MANIFEST_FILENAME);
    let has_package_manifest = manifest.exists();
    let is_application =
        has_package_manifest || path.join("src").exists() || path.join("app").exists();

    let compose_file = service_compose_file(&path);
    let info = parse_compose_file(&compose_file);

    let description = read_description(&path).unwrap_or_else(|| format!("{name} service"));

    debug!(
        "Discovered service {} ({})",
        name,
        if is_application {
            "application"
        } else {
            "infrastructure"
        }
    );

    Service {
        description,
        image: info.image,
        port: info.port,
        infrastructure: !is_application,
        has_compose: compose_file.exists(),
        has_package_manifest,
        name,
        path,
    }
}

fn describe_module(layout: &Layout, name: String, path: PathBuf) -> Module {
    let compose_file = path.join(COMPOSE_FILENAME);
    let description = read_description(&path).unwrap_or_else(|| format!("{name} module"));

    debug!("Discovered module {}", name);

    Module {
        description,
        compose: layout.relative_to_root(&compose_file),
        has_compose: compose_file.exists(),
        compose_file,
        name,
        path,
    }
}

fn service_compose_file(dir: &Path) -> PathBuf {
    SERVICE_COMPOSE_PATH
        .iter()
        .fold(dir.to_path_buf(), |p, part| p.join(part))
}

/// Immediate, non-hidden subdirectories of `root`, sorted by name.
fn subdirectories(root: &Path) -> Vec<(String, PathBuf)> {
    if !root.exists() {
        debug!("Discovery root {} does not exist", root.display());
        return Vec::new();
    }

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read {}: {}", root.display(), e);
            return Vec::new();
        }
    };

    let mut dirs: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let path = entry.path();
            (!name.starts_with('.') && path.is_dir()).then_some((name, path))
        })
        .collect();

    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> (TempDir, Layout) {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        write(
            &root.join("services/feed/package.json"),
            r#"{"name": "@acme/feed", "description": "Feed poller"}"#,
        );
        fs::create_dir_all(root.join("services/archivist/src")).unwrap();
        write(
            &root.join("services/postgres/docker/compose.yml"),
            "services:\n  postgres:\n    image: postgres:16\n    ports:\n      - \"${PG_PORT:-5432}:5432\"\n",
        );
        fs::create_dir_all(root.join("services/web/app")).unwrap();
        fs::create_dir_all(root.join("services/.hidden")).unwrap();
        write(&root.join("services/not-a-dir"), "");

        write(
            &root.join("modules/reader/compose.yml"),
            "include:\n  - ../../services/feed/docker/compose.yml\n",
        );
        write(&root.join("modules/reader/README.md"), "# Reader\n\nReads feeds.\n");
        fs::create_dir_all(root.join("modules/empty")).unwrap();

        let layout = Layout::new(root);
        (temp, layout)
    }

    #[test]
    fn test_discover_services_classifies() {
        let (_temp, layout) = fixture();
        let services = discover_services(&layout);

        let names: Vec<&str> = services.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["archivist", "feed", "postgres", "web"]);

        assert!(!services["feed"].infrastructure);
        assert!(services["feed"].has_package_manifest);
        assert_eq!(services["feed"].description, "Feed poller");

        assert!(!services["archivist"].infrastructure);
        assert!(!services["web"].infrastructure);

        let postgres = &services["postgres"];
        assert!(postgres.infrastructure);
        assert!(postgres.has_compose);
        assert!(!postgres.has_package_manifest);
        assert_eq!(postgres.image.as_deref(), Some("postgres:16"));
        assert_eq!(postgres.port, Some(5432));
        assert_eq!(postgres.description, "postgres service");
        assert_eq!(postgres.compose_file(), layout.services_dir.join("postgres/docker/compose.yml"));
    }

    #[test]
    fn test_discover_modules() {
        let (_temp, layout) = fixture();
        let modules = discover_modules(&layout);

        assert_eq!(modules.len(), 2);
        let reader = &modules["reader"];
        assert!(reader.has_compose);
        assert_eq!(reader.description, "Reads feeds.");
        assert_eq!(reader.compose, PathBuf::from("modules/reader/compose.yml"));
        assert_eq!(reader.compose_file, layout.modules_dir.join("reader/compose.yml"));

        let empty = &modules["empty"];
        assert!(!empty.has_compose);
        assert_eq!(empty.description, "empty module");
    }

    #[test]
    fn test_missing_roots_yield_empty_maps() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path());
        assert!(discover_services(&layout).is_empty());
        assert!(discover_modules(&layout).is_empty());
    }

    #[test]
    fn test_discovery_is_idempotent() {
        let (_temp, layout) = fixture();
        assert_eq!(discover_services(&layout), discover_services(&layout));
        assert_eq!(discover_modules(&layout), discover_modules(&layout));
    }

    #[test]
    fn test_is_skipped() {
        let (temp, layout) = fixture();
        write(&temp.path().join("services/web/.dxskip"), "");
        assert!(is_skipped(&layout.services_dir.join("web")));
        assert!(!is_skipped(&layout.services_dir.join("feed")));
        // Skipped services are still discovered.
        assert!(discover_services(&layout).contains_key("web"));
    }

    #[test]
    fn test_relocated_services_dir() {
        let (temp, _) = fixture();
        let other = temp.path().join("elsewhere");
        fs::create_dir_all(other.join("solo")).unwrap();
        let layout = Layout::new(temp.path()).with_services_dir(&other);
        let services = discover_services(&layout);
        assert_eq!(services.keys().collect::<Vec<_>>(), vec!["solo"]);
        assert!(services["solo"].infrastructure);
    }
}
