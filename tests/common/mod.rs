//! Shared test utilities for E2E tests.
//!
//! This module provides a fixture that builds a dx project on disk (root
//! compose file, `services/` and `modules/`) and a command helper that points
//! the `dx` binary at it.
//!
//! External tools are replaced by `echo`: the compose tool prints
//! `compose <args>` and the package manager prints `pnpm <args>`, so tests can
//! assert on the exact command dx would have run.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::sample();
//!     fixture.command().arg("services").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::files;
    pub use super::TestFixture;
}

/// File contents used by the sample project.
#[allow(dead_code)]
pub mod files {
    /// Compose file of an application service with a defaulted port.
    pub const FEED_COMPOSE: &str = r#"services:
  feed:
    image: ${FEED_IMAGE}
    ports:
      - ${FEED_PORT:-3000}:3000
"#;

    /// Compose file of an infrastructure service.
    pub const RABBITMQ_COMPOSE: &str = r#"services:
  rabbitmq:
    image: rabbitmq:3-management
    ports:
      - "${RABBITMQ_PORT:-5672}:5672"
"#;

    /// README of the reader module.
    pub const READER_README: &str = "# Reader\n\nReads and stores feeds.\n\n## Usage\n\n- Run `dx up reader`\n";

    /// A lifecycle script that echoes its name and arguments.
    pub const ECHO_SCRIPT: &str = "echo \"script $0 $*\"\n";
}

/// A temporary dx project.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_service("cache")
///     .with_module("backend", &["cache"]);
///
/// fixture.command().arg("tree").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// A project with three services and one module:
    ///
    /// - `feed`: application (`package.json` named `@acme/feed`), port 3000
    /// - `rabbitmq`: infrastructure, image `rabbitmq:3-management`
    /// - `worker`: application (`src/`) with `build.sh` and `install.sh`
    /// - module `reader`: includes `feed` and `rabbitmq`, has `.env` and
    ///   `.env.dev`; the root `.env` selects the `dev` profile
    pub fn sample() -> Self {
        Self::new()
            .with_file("compose.yml", "services: {}\n")
            .with_file(".env", "APP_ENV=dev\nLOG_LEVEL=info\n")
            .with_file(
                "services/feed/package.json",
                r#"{"name": "@acme/feed", "description": "Feed poller"}"#,
            )
            .with_file("services/feed/docker/compose.yml", files::FEED_COMPOSE)
            .with_file("services/rabbitmq/README.md", "Message broker\n")
            .with_file("services/rabbitmq/docker/compose.yml", files::RABBITMQ_COMPOSE)
            .with_file("services/worker/README.md", "# Worker\n\nBackground jobs.\n")
            .with_file("services/worker/src/index.js", "")
            .with_file("services/worker/build.sh", files::ECHO_SCRIPT)
            .with_file("services/worker/install.sh", files::ECHO_SCRIPT)
            .with_module("reader", &["feed", "rabbitmq"])
            .with_file("modules/reader/README.md", files::READER_README)
            .with_file("modules/reader/.env", "LOG_LEVEL=debug\n")
            .with_file("modules/reader/.env.dev", "FEED_PORT=3100\n")
    }

    /// Add an empty service directory.
    pub fn with_service(self, name: &str) -> Self {
        self.temp_dir
            .child("services")
            .child(name)
            .create_dir_all()
            .expect("Failed to create service directory");
        self
    }

    /// Add a module whose compose file includes the given services.
    pub fn with_module(self, name: &str, services: &[&str]) -> Self {
        let mut compose = String::from("include:\n");
        for service in services {
            compose.push_str(&format!("  - ../../services/{service}/docker/compose.yml\n"));
        }
        self.with_file(&format!("modules/{name}/compose.yml"), &compose)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a `dx` command rooted at this fixture, with `echo` standing in
    /// for the compose tool and the package manager.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dx");
        cmd.current_dir(self.path())
            .env("DX_ROOT", self.path())
            .env("DX_COMPOSE", "echo compose")
            .env("DX_PACKAGE_MANAGER", "echo pnpm")
            .env("DX_SHELL", "sh")
            .env("NO_COLOR", "1")
            .env_remove("DX_SERVICES_DIR")
            .env_remove("DX_MODULES_DIR")
            .env_remove("DX_EXECUTOR")
            .env_remove("VERBOSE")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
