//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Two configuration scopes:
//! - **Global**: user-level defaults
//! - **Project**: overrides stored next to a project bundle
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$XCODEPROJ_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/xcodeproj/config.toml`
//! 3. `~/.xcodeproj/config.toml` (canonical write location)
//!
//! # Project Config Location
//!
//! `.xcodeproj.toml` in the directory containing the `.xcodeproj` bundle.
//!
//! # Example
//!
//! ```no_run
//! use xcodeproj::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/work/App.xcodeproj"))).unwrap();
//! let config = result.config;
//! println!("Swift: {}", config.swift_version());
//! println!("Prefix: {}", config.bundle_identifier_prefix());
//! ```

pub mod schema;

pub use schema::ConfigFile;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::paths::ProjectPaths;
use super::types::Platform;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: project file, then global file, then the
/// built-in default.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: ConfigFile,
    /// Project configuration (if present next to the bundle)
    pub project: Option<ConfigFile>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    pub const DEFAULT_SWIFT_VERSION: &'static str = "5.0";
    pub const DEFAULT_BUNDLE_PREFIX: &'static str = "com.example";
    pub const DEFAULT_SHELL: &'static str = "/bin/sh";

    /// Load configuration from default locations.
    ///
    /// If `project` is provided (bundle or `project.pbxproj` path), also
    /// loads the project-scope file next to it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(project: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let (global, global_path) = Self::load_global()?;

        let (project_config, project_path) = match project {
            Some(path) => {
                let candidate = ProjectPaths::resolve(path).project_config();
                if candidate.exists() {
                    (Some(Self::read_config(&candidate)?), Some(candidate))
                } else {
                    (None, None)
                }
            }
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref p) = project_config {
            p.validate()?;
        }

        tracing::debug!(
            global = ?global_path,
            project = ?project_path,
            "configuration loaded"
        );

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project: project_config,
                global_path,
                project_path,
            },
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(ConfigFile, Option<PathBuf>), ConfigError> {
        if let Ok(path) = std::env::var("XCODEPROJ_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("xcodeproj/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".xcodeproj/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((ConfigFile::default(), None))
    }

    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Canonical path for the global config: `~/.xcodeproj/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".xcodeproj/config.toml"))
    }

    /// Write global config atomically.
    ///
    /// Creates parent directories if needed.
    pub fn write_global(config: &ConfigFile) -> Result<PathBuf, ConfigError> {
        let path = Self::global_config_path()?;
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write a project config atomically next to the given bundle.
    pub fn write_project(project: &Path, config: &ConfigFile) -> Result<PathBuf, ConfigError> {
        let path = ProjectPaths::resolve(project).project_config();
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    fn write_config_atomic(path: &Path, config: &ConfigFile) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;
        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn lookup<'a, T: ?Sized>(&'a self, get: impl Fn(&'a ConfigFile) -> Option<&'a T>) -> Option<&'a T> {
        self.project
            .as_ref()
            .and_then(&get)
            .or_else(|| get(&self.global))
    }

    /// Defaults to "5.0".
    pub fn swift_version(&self) -> &str {
        self.lookup(|c| c.swift_version.as_deref())
            .unwrap_or(Self::DEFAULT_SWIFT_VERSION)
    }

    /// Defaults to an empty name.
    pub fn organization_name(&self) -> &str {
        self.lookup(|c| c.organization_name.as_deref())
            .unwrap_or("")
    }

    /// Defaults to "com.example".
    pub fn bundle_identifier_prefix(&self) -> &str {
        self.lookup(|c| c.bundle_identifier_prefix.as_deref())
            .unwrap_or(Self::DEFAULT_BUNDLE_PREFIX)
    }

    /// Defaults to iOS.
    pub fn default_platform(&self) -> Platform {
        self.lookup(|c| c.default_platform.as_deref())
            .map(Platform::from_name_or_default)
            .unwrap_or_default()
    }

    /// Defaults to "/bin/sh".
    pub fn shell_path(&self) -> &str {
        self.lookup(|c| c.shell_path.as_deref())
            .unwrap_or(Self::DEFAULT_SHELL)
    }

    /// Defaults to `true`.
    pub fn verify(&self) -> bool {
        self.project
            .as_ref()
            .and_then(|p| p.verify)
            .or(self.global.verify)
            .unwrap_or(true)
    }

    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
