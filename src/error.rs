//! # Error Handling
//!
//! This module defines the centralized error type for `dx`. It uses the
//! `thiserror` library to describe every failure the resolution and dispatch
//! layer can report, with messages that are ready to show to a user.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failures. Each variant carries the context a
//!   user needs to recover (for example, the list of available names when a
//!   lookup fails).
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Variants:
//!
//! - `NotFound`: a service or module name did not resolve.
//! - `MissingComposeFile`: the resolved compose file is absent on disk.
//! - `NoOperationSteps`: an explicitly requested service has nothing to run.
//! - `UnknownTarget`: a dispatch target is neither a module nor a service.
//! - `CommandFailed`: an external process failed to start or exited non-zero.
//!
//! Errors propagate unmodified to the CLI boundary; only the binary decides
//! whether a failure is fatal or downgraded to a clean exit.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::suggestions;

/// What kind of entity a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Service,
    Module,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Service => write!(f, "service"),
            EntityKind::Module => write!(f, "module"),
        }
    }
}

/// Main error type for dx operations
#[derive(Error, Debug)]
pub enum Error {
    /// A service or module name did not match anything on disk.
    ///
    /// Includes every name that was available so the user can pick one, and a
    /// "did you mean" hint when one of them is close to the requested name.
    #[error(
        "Unknown {kind}: {name}\nAvailable: {}{}",
        suggestions::format_available(available),
        suggestions::did_you_mean(name, available)
    )]
    NotFound {
        kind: EntityKind,
        name: String,
        available: Vec<String>,
    },

    /// The compose file for the selected module (or the whole application)
    /// does not exist.
    #[error("{}", suggestions::missing_compose_message(path, *application))]
    MissingComposeFile {
        path: PathBuf,
        /// True when the whole-application compose file was requested.
        application: bool,
    },

    /// A service was requested explicitly but has neither a lifecycle script
    /// nor a package manifest.
    #[error("Service \"{service}\" has no {label} steps (no {script} or package.json)")]
    NoOperationSteps {
        service: String,
        label: String,
        script: String,
    },

    /// A dispatch target matched neither a module nor a service.
    #[error("Unknown service or module: \"{name}\"")]
    UnknownTarget { name: String },

    /// An external process could not be spawned or exited unsuccessfully.
    #[error("Command failed: {command}: {message}")]
    CommandFailed { command: String, message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found_lists_available() {
        let error = Error::NotFound {
            kind: EntityKind::Module,
            name: "missing".to_string(),
            available: vec!["reader".to_string(), "socket".to_string()],
        };
        let display = format!("{}", error);
        assert!(display.starts_with("Unknown module: missing"));
        assert!(display.contains("Available: reader, socket"));
        assert!(!display.contains("hint:"));
    }

    #[test]
    fn test_error_display_not_found_with_suggestion() {
        let error = Error::NotFound {
            kind: EntityKind::Service,
            name: "fead".to_string(),
            available: vec!["feed".to_string(), "archivist".to_string()],
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown service: fead"));
        assert!(display.contains("hint: Did you mean 'feed'?"));
    }

    #[test]
    fn test_error_display_not_found_empty() {
        let error = Error::NotFound {
            kind: EntityKind::Service,
            name: "feed".to_string(),
            available: vec![],
        };
        assert!(format!("{}", error).contains("Available: (none)"));
    }

    #[test]
    fn test_error_display_missing_compose_application_has_hint() {
        let error = Error::MissingComposeFile {
            path: PathBuf::from("/repo/compose.yml"),
            application: true,
        };
        let display = format!("{}", error);
        assert!(display.contains("No app-level compose file found"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn test_error_display_missing_compose_module() {
        let error = Error::MissingComposeFile {
            path: PathBuf::from("/repo/modules/reader/compose.yml"),
            application: false,
        };
        let display = format!("{}", error);
        assert!(display.contains("Compose file not found: /repo/modules/reader/compose.yml"));
        assert!(!display.contains("hint:"));
    }

    #[test]
    fn test_error_display_no_operation_steps() {
        let error = Error::NoOperationSteps {
            service: "postgres".to_string(),
            label: "Building".to_string(),
            script: "build.sh".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Service \"postgres\" has no Building steps (no build.sh or package.json)"
        );
    }

    #[test]
    fn test_error_display_unknown_target() {
        let error = Error::UnknownTarget {
            name: "nope".to_string(),
        };
        assert_eq!(format!("{}", error), "Unknown service or module: \"nope\"");
    }

    #[test]
    fn test_error_display_command_failed() {
        let error = Error::CommandFailed {
            command: "bash build.sh".to_string(),
            message: "exit status: 2".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Command failed"));
        assert!(display.contains("bash build.sh"));
        assert!(display.contains("exit status: 2"));
    }
}
