//! # Compose Inspector
//!
//! Shallow, pattern-based extraction from compose files. The compose files in
//! a dx project follow a narrow, self-authored convention, so full YAML
//! semantics are not needed:
//!
//! - A service's image comes from the first `image:` scalar, with any
//!   `${...}` braces stripped.
//! - A service's port comes from the first `ports:` entry written with a
//!   default-value substitution, e.g. `- "${FEED_PORT:-8080}:8080"`.
//! - A module's member services come from `include:` entries containing a
//!   `/services/<name>/` path fragment, followed by `file:` entries (inside
//!   `extends:` blocks) pointing at `../../services/<name>/`. Names are
//!   deduplicated, keeping first-seen order.
//!
//! Missing or unreadable files produce empty results, never errors.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"image:\s*\$?\{?([^}$\n]+)\}?").expect("valid image regex"));

static PORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"ports:\s*\n\s*-\s*['"]*\$?\{[^}]*:-(\d+)\}"#).expect("valid port regex")
});

static INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)include:[ \t]*\r?\n").expect("valid include regex"));

static SERVICE_FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/services/([^/]+)/").expect("valid service fragment regex"));

static EXTENDS_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"file:\s*['"]?\.\./\.\./services/([^/'"\s]+)/"#).expect("valid extends regex")
});

/// Image and port declared by a service compose file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeInfo {
    pub image: Option<String>,
    pub port: Option<u16>,
}

/// Extract the image and port from the compose file at `path`.
pub fn parse_compose_file(path: &Path) -> ComposeInfo {
    read_compose_file(path)
        .map(|content| parse_compose_str(&content))
        .unwrap_or_default()
}

/// Extract the image and port from compose file content.
pub fn parse_compose_str(content: &str) -> ComposeInfo {
    let image = IMAGE_RE
        .captures(content)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty());
    let port = PORT_RE
        .captures(content)
        .and_then(|c| c[1].parse::<u16>().ok());

    ComposeInfo { image, port }
}

/// Member service names declared by the module compose file at `path`.
pub fn parse_module_services(path: &Path) -> Vec<String> {
    read_compose_file(path)
        .map(|content| parse_module_services_str(&content))
        .unwrap_or_default()
}

/// Member service names declared by module compose file content.
pub fn parse_module_services_str(content: &str) -> Vec<String> {
    let mut services = Vec::new();
    let mut add = |name: &str| {
        if !services.iter().any(|s| s == name) {
            services.push(name.to_string());
        }
    };

    if let Some(block) = include_block(content) {
        for line in block {
            if let Some(caps) = SERVICE_FRAGMENT_RE.captures(line) {
                add(&caps[1]);
            }
        }
    }

    for caps in EXTENDS_FILE_RE.captures_iter(content) {
        add(&caps[1]);
    }

    services
}

/// Lines of the first `include:` block: everything after the key up to the
/// next line that starts with a letter in column zero.
fn include_block(content: &str) -> Option<Vec<&str>> {
    let start = INCLUDE_RE.find(content)?.end();
    Some(
        content[start..]
            .lines()
            .take_while(|line| !line.starts_with(|c: char| c.is_ascii_alphabetic()))
            .collect(),
    )
}

fn read_compose_file(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            debug!("Cannot read compose file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SERVICE_COMPOSE: &str = r#"services:
  postgres:
    image: ${POSTGRES_IMAGE:-postgres:16}
    ports:
      - "${POSTGRES_PORT:-5432}:5432"
"#;

    const READER_MODULE: &str = r#"include:
  - path: ../../services/feed/docker/compose.yml
  - path: ../../services/postgres/docker/compose.yml

services:
  archivist:
    extends:
      file: ../../services/archivist/docker/compose.yml
      service: archivist
  feed-worker:
    extends:
      file: ../../services/feed/docker/compose.yml
      service: feed
"#;

    #[test]
    fn test_parse_compose_image_and_port() {
        let info = parse_compose_str(SERVICE_COMPOSE);
        assert_eq!(info.image.as_deref(), Some("POSTGRES_IMAGE:-postgres:16"));
        assert_eq!(info.port, Some(5432));
    }

    #[test]
    fn test_parse_compose_plain_image() {
        let info = parse_compose_str("services:\n  redis:\n    image: redis:7\n");
        assert_eq!(info.image.as_deref(), Some("redis:7"));
        assert_eq!(info.port, None);
    }

    #[test]
    fn test_parse_compose_port_without_default_is_ignored() {
        let info = parse_compose_str("ports:\n  - \"8080:8080\"\n");
        assert_eq!(info.port, None);
    }

    #[test]
    fn test_parse_compose_missing_file() {
        let info = parse_compose_file(Path::new("/nonexistent/compose.yml"));
        assert_eq!(info, ComposeInfo::default());
    }

    #[test]
    fn test_module_services_include_then_extends_order() {
        let services = parse_module_services_str(READER_MODULE);
        assert_eq!(services, vec!["feed", "postgres", "archivist"]);
    }

    #[test]
    fn test_module_services_example_reader() {
        let content = "include:\n  - ../../services/feed/docker/compose.yml\nservices:\n  archivist:\n    extends:\n      file: ../../services/archivist/docker/compose.yml\n";
        assert_eq!(
            parse_module_services_str(content),
            vec!["feed".to_string(), "archivist".to_string()]
        );
    }

    #[test]
    fn test_module_services_include_block_stops_at_top_level_key() {
        let content = "include:\n  - ../../services/a/compose.yml\nnetworks:\n  x: /services/b/\n";
        assert_eq!(parse_module_services_str(content), vec!["a"]);
    }

    #[test]
    fn test_module_services_quoted_extends() {
        let content = "services:\n  x:\n    extends:\n      file: \"../../services/quoted/docker/compose.yml\"\n";
        assert_eq!(parse_module_services_str(content), vec!["quoted"]);
    }

    #[test]
    fn test_module_services_none_declared() {
        assert!(parse_module_services_str("services:\n  web:\n    image: nginx\n").is_empty());
    }

    #[test]
    fn test_module_services_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("compose.yml");
        fs::write(&path, READER_MODULE).unwrap();
        assert_eq!(parse_module_services(&path).len(), 3);
        assert!(parse_module_services(&temp.path().join("missing.yml")).is_empty());
    }
}
