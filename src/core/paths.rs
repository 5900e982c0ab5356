//! core::paths
//!
//! Centralized path routing for a project bundle.
//!
//! # Architecture
//!
//! Commands accept either the `.xcodeproj` bundle directory or the
//! `project.pbxproj` file inside it. Everything that needs a location on
//! disk (the project file, the workspace stub, the project-scope config,
//! file moves relative to the project) goes through [`ProjectPaths`].
//!
//! **Hard rule:** no code outside this module joins `project.pbxproj` or
//! `.xcodeproj` onto a path.
//!
//! # Layout
//!
//! - `<dir>/<Name>.xcodeproj/project.pbxproj` - the project file
//! - `<dir>/<Name>.xcodeproj/project.xcworkspace/contents.xcworkspacedata`
//! - `<dir>/.xcodeproj.toml` - project-scope configuration
//!
//! # Example
//!
//! ```
//! use xcodeproj::core::paths::ProjectPaths;
//! use std::path::PathBuf;
//!
//! let paths = ProjectPaths::resolve("/work/App.xcodeproj");
//! assert_eq!(paths.name(), "App");
//! assert_eq!(
//!     paths.pbxproj(),
//!     PathBuf::from("/work/App.xcodeproj/project.pbxproj")
//! );
//! assert_eq!(paths.source_root(), PathBuf::from("/work"));
//! ```

use std::path::{Path, PathBuf};

/// Bundle extension.
pub const BUNDLE_EXTENSION: &str = "xcodeproj";

/// Project file name inside the bundle.
pub const PBXPROJ: &str = "project.pbxproj";

/// Project-scope config file name, next to the bundle.
pub const PROJECT_CONFIG: &str = ".xcodeproj.toml";

/// Locations derived from a project bundle path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    bundle: PathBuf,
}

impl ProjectPaths {
    /// Resolve a user-supplied path to the bundle it denotes.
    ///
    /// A path ending in `project.pbxproj` resolves to its parent.
    pub fn resolve(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let bundle = if path.file_name().map(|n| n == PBXPROJ).unwrap_or(false) {
            path.parent().map(Path::to_path_buf).unwrap_or_default()
        } else {
            path.to_path_buf()
        };
        Self { bundle }
    }

    /// The `.xcodeproj` directory.
    pub fn bundle(&self) -> &Path {
        &self.bundle
    }

    /// Bundle name without extension.
    pub fn name(&self) -> String {
        self.bundle
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn pbxproj(&self) -> PathBuf {
        self.bundle.join(PBXPROJ)
    }

    /// Directory containing the bundle; file paths are relative to it.
    pub fn source_root(&self) -> PathBuf {
        match self.bundle.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn workspace_data(&self) -> PathBuf {
        self.bundle
            .join("project.xcworkspace")
            .join("contents.xcworkspacedata")
    }

    pub fn project_config(&self) -> PathBuf {
        self.source_root().join(PROJECT_CONFIG)
    }

    /// Resolve a project-relative file path against the source root.
    pub fn on_disk(&self, relative: &str) -> PathBuf {
        let path = Path::new(relative);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.source_root().join(path)
        }
    }
}
