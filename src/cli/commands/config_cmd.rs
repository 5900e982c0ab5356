//! config command - Get, set, or list configuration values
//!
//! Without `--project` the global file is used; with it, the project file
//! next to that bundle. `get` and `list` show merged values.

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use super::{load_config, verbosity};
use crate::core::config::{Config, ConfigFile};
use crate::engine::Context;
use crate::ui::output;

/// Keys accepted by `config get` and `config set`.
pub const KEYS: [&str; 6] = [
    "swift_version",
    "organization_name",
    "bundle_identifier_prefix",
    "default_platform",
    "shell_path",
    "verify",
];

/// Get a configuration value.
pub fn get(_ctx: &Context, key: &str, project: Option<&Path>) -> Result<()> {
    let config = load_config(project)?;
    println!("{}", effective(&config, key)?);
    Ok(())
}

/// Set a configuration value.
pub fn set(ctx: &Context, key: &str, value: &str, project: Option<&Path>) -> Result<()> {
    let config = load_config(project)?;
    let mut file = match project {
        Some(_) => config.project.clone().unwrap_or_default(),
        None => config.global.clone(),
    };
    assign(&mut file, key, value)?;
    file.validate().context("Invalid configuration value")?;

    let written = match project {
        Some(project) => Config::write_project(project, &file),
        None => Config::write_global(&file),
    }
    .context("Failed to write config")?;

    let verbosity = verbosity(ctx);
    output::debug(format!("Wrote {}", written.display()), verbosity);
    output::print(format!("Set {} = {}", key, value), verbosity);
    Ok(())
}

/// List all configuration values.
pub fn list(_ctx: &Context, project: Option<&Path>) -> Result<()> {
    let config = load_config(project)?;

    println!("# Configuration");
    if let Some(path) = config.global_config_loaded_from() {
        println!("# global: {}", path.display());
    }
    if let Some(path) = config.project_config_loaded_from() {
        println!("# project: {}", path.display());
    }
    for key in KEYS {
        println!("{} = {}", key, effective(&config, key)?);
    }
    Ok(())
}

fn effective(config: &Config, key: &str) -> Result<String> {
    let value = match key {
        "swift_version" => config.swift_version().to_string(),
        "organization_name" => config.organization_name().to_string(),
        "bundle_identifier_prefix" => config.bundle_identifier_prefix().to_string(),
        "default_platform" => config.default_platform().to_string(),
        "shell_path" => config.shell_path().to_string(),
        "verify" => config.verify().to_string(),
        _ => bail!("Unknown configuration key: {}", key),
    };
    Ok(value)
}

fn assign(file: &mut ConfigFile, key: &str, value: &str) -> Result<()> {
    let value = value.to_string();
    match key {
        "swift_version" => file.swift_version = Some(value),
        "organization_name" => file.organization_name = Some(value),
        "bundle_identifier_prefix" => file.bundle_identifier_prefix = Some(value),
        "default_platform" => file.default_platform = Some(value),
        "shell_path" => file.shell_path = Some(value),
        "verify" => {
            let flag = value
                .parse::<bool>()
                .with_context(|| format!("verify must be true or false, got '{}'", value))?;
            file.verify = Some(flag);
        }
        _ => bail!("Unknown configuration key: {}", key),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_known_keys() {
        let mut file = ConfigFile::default();
        assign(&mut file, "swift_version", "5.9").unwrap();
        assign(&mut file, "verify", "false").unwrap();
        assert_eq!(file.swift_version.as_deref(), Some("5.9"));
        assert_eq!(file.verify, Some(false));
    }

    #[test]
    fn assign_rejects_unknown_key() {
        let mut file = ConfigFile::default();
        assert!(assign(&mut file, "trunk", "main").is_err());
    }

    #[test]
    fn assign_rejects_bad_bool() {
        let mut file = ConfigFile::default();
        assert!(assign(&mut file, "verify", "maybe").is_err());
        assert_eq!(file.verify, None);
    }

    #[test]
    fn effective_uses_defaults() {
        let config = Config::default();
        assert_eq!(effective(&config, "swift_version").unwrap(), "5.0");
        assert_eq!(effective(&config, "shell_path").unwrap(), "/bin/sh");
        assert_eq!(effective(&config, "verify").unwrap(), "true");
    }

    #[test]
    fn every_key_is_listable() {
        let config = Config::default();
        for key in KEYS {
            assert!(effective(&config, key).is_ok(), "{}", key);
        }
    }
}
