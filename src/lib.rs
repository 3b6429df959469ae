//! # dx Library
//!
//! This library provides the core of the `dx` developer-experience tool: it
//! discovers the services and modules of a multi-service repository,
//! assembles compose tool invocations with layered environment files, and
//! dispatches lifecycle operations (install, build, test) to services.
//!
//! ## Quick Example
//!
//! ```no_run
//! use dx::layout::Layout;
//! use dx::registry::Registry;
//!
//! let registry = Registry::new(Layout::new("/path/to/project"));
//!
//! for name in registry.list_services() {
//!     println!("{}", name);
//! }
//!
//! let reader = registry.get_module("reader").unwrap();
//! println!("{} uses {:?}", reader.module.name, reader.services);
//! ```
//!
//! ## Project Layout
//!
//! ```text
//! <root>/
//!   compose.yml            whole-application compose file
//!   .env                   root environment (may set APP_ENV)
//!   services/<name>/       one directory per service
//!     docker/compose.yml   image and port
//!     package.json         marks an application service
//!     build.sh, ...        lifecycle scripts
//!   modules/<name>/        one directory per module
//!     compose.yml          includes service compose files
//!     .env, .env.<APP_ENV> module environment layers
//! ```
//!
//! ## Core Concepts
//!
//! - **Discovery (`discovery`, `compose`, `metadata`)**: Scans `services/` and
//!   `modules/` and derives descriptions, images and ports from the files in
//!   each directory.
//! - **Registry (`registry`)**: Validated lookups with "did you mean"
//!   suggestions, module membership and target classification.
//! - **Environment (`env`)**: The root → module → profile `.env` chain.
//! - **Invocation (`invocation`)**: Compose command construction and the
//!   argument conventions shared by the compose commands.
//! - **Runner (`runner`)**: Script-or-package-manager dispatch for lifecycle
//!   operations.
//! - **Process (`process`)**: The [`process::Executor`] seam every external
//!   command goes through.
//!
//! Nothing is cached: every query reads the filesystem again.

pub mod compose;
pub mod defaults;
pub mod discovery;
pub mod env;
pub mod error;
pub mod invocation;
pub mod layout;
pub mod metadata;
pub mod output;
pub mod process;
pub mod registry;
pub mod runner;
pub mod settings;
pub mod suggestions;
