//! core::config::schema
//!
//! Configuration schema types.
//!
//! Both scopes (global and project) share one schema; every key is
//! optional so a file only needs to mention what it overrides.
//!
//! # Validation
//!
//! Values are validated after parsing: the platform must be a known
//! platform name, the Swift version and bundle prefix must be non-empty,
//! and the shell path must be absolute.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::Platform;

/// One configuration file.
///
/// # Example
///
/// ```toml
/// swift_version = "5.9"
/// organization_name = "Acme"
/// bundle_identifier_prefix = "com.acme"
/// default_platform = "macOS"
/// shell_path = "/bin/zsh"
/// verify = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// `SWIFT_VERSION` written into new targets
    pub swift_version: Option<String>,

    /// `ORGANIZATIONNAME` for new projects
    pub organization_name: Option<String>,

    /// Prefix of generated bundle identifiers
    pub bundle_identifier_prefix: Option<String>,

    /// Platform used when a command does not name one
    pub default_platform: Option<String>,

    /// Shell of new run-script phases
    pub shell_path: Option<String>,

    /// Verify graph invariants around each mutation
    pub verify: Option<bool>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(platform) = &self.default_platform {
            if Platform::from_name(platform).is_none() {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid platform '{}', must be one of: iOS, macOS, tvOS, watchOS",
                    platform
                )));
            }
        }

        if let Some(version) = &self.swift_version {
            if version.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "swift_version cannot be empty".to_string(),
                ));
            }
        }

        if let Some(prefix) = &self.bundle_identifier_prefix {
            if prefix.trim().is_empty() || prefix.ends_with('.') {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid bundle_identifier_prefix '{}'",
                    prefix
                )));
            }
        }

        if let Some(shell) = &self.shell_path {
            if !shell.starts_with('/') {
                return Err(ConfigError::InvalidValue(format!(
                    "shell_path must be absolute, got '{}'",
                    shell
                )));
            }
        }

        Ok(())
    }
}
