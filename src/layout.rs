//! # Project Layout
//!
//! A [`Layout`] names the directories dx works against: the project root
//! (holding the whole-application `compose.yml` and root `.env`), the
//! `services/` tree and the `modules/` tree. The services and modules roots
//! can be relocated independently, which is how the `DX_SERVICES_DIR` and
//! `DX_MODULES_DIR` overrides are expressed.
//!
//! A layout is a plain value; nothing here reads the filesystem.

use std::path::{Path, PathBuf};

use crate::defaults::{COMPOSE_FILENAME, ENV_FILENAME, MODULES_DIRNAME, SERVICES_DIRNAME};

/// Directories that make up a dx project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Project root.
    pub root: PathBuf,
    /// Directory scanned for services.
    pub services_dir: PathBuf,
    /// Directory scanned for modules.
    pub modules_dir: PathBuf,
}

impl Layout {
    /// Create a layout with the conventional `services/` and `modules/`
    /// directories under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            services_dir: root.join(SERVICES_DIRNAME),
            modules_dir: root.join(MODULES_DIRNAME),
            root,
        }
    }

    /// Relocate the services directory. Relative paths are resolved against
    /// the current working directory.
    pub fn with_services_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.services_dir = absolutize(dir.as_ref());
        self
    }

    /// Relocate the modules directory. Relative paths are resolved against
    /// the current working directory.
    pub fn with_modules_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.modules_dir = absolutize(dir.as_ref());
        self
    }

    /// Build a layout from optional overrides, as supplied by the CLI.
    pub fn resolve(
        root: Option<PathBuf>,
        services_dir: Option<PathBuf>,
        modules_dir: Option<PathBuf>,
    ) -> Self {
        let root = root
            .map(|r| absolutize(&r))
            .unwrap_or_else(crate::defaults::default_root);
        let mut layout = Self::new(root);
        if let Some(dir) = services_dir {
            layout = layout.with_services_dir(dir);
        }
        if let Some(dir) = modules_dir {
            layout = layout.with_modules_dir(dir);
        }
        layout
    }

    /// The whole-application compose file.
    pub fn root_compose_file(&self) -> PathBuf {
        self.root.join(COMPOSE_FILENAME)
    }

    /// The root `.env` file.
    pub fn root_env_file(&self) -> PathBuf {
        self.root.join(ENV_FILENAME)
    }

    /// Render `path` relative to the project root when it lives under it.
    pub fn relative_to_root(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        crate::defaults::default_root().join(path)
    }
}
