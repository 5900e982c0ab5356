//! read-only commands - list-*, get-build-settings
//!
//! These never write the project. Output is data, so it is printed even
//! with `--quiet`.

use std::path::Path;

use anyhow::{Context as _, Result};

use super::inspect;
use crate::ops::query;
use crate::ui::output;

pub fn list_targets(project: &Path, json: bool) -> Result<()> {
    let rows = inspect(project, |graph| Ok(query::list_targets(graph)))?;
    output::rows(&rows, json).context("Failed to print targets")
}

pub fn list_build_configurations(project: &Path, json: bool) -> Result<()> {
    let rows = inspect(project, query::list_build_configurations)?;
    output::rows(&rows, json).context("Failed to print configurations")
}

/// Files of one target; an unknown target is an error.
pub fn list_files(project: &Path, target: &str, json: bool) -> Result<()> {
    let rows = inspect(project, |graph| query::list_files(graph, target))?;
    output::rows(&rows, json).context("Failed to print files")
}

pub fn list_swift_packages(project: &Path, json: bool) -> Result<()> {
    let rows = inspect(project, query::list_swift_packages)?;
    output::rows(&rows, json).context("Failed to print packages")
}

pub fn list_groups(project: &Path, json: bool) -> Result<()> {
    let rows = inspect(project, |graph| Ok(query::list_groups(graph)))?;
    output::rows(&rows, json).context("Failed to print groups")
}

/// Sorted settings of one configuration of a target.
pub fn get_build_settings(
    project: &Path,
    target: &str,
    configuration: &str,
    json: bool,
) -> Result<()> {
    let settings = inspect(project, |graph| {
        query::get_build_settings(graph, target, Some(configuration))
    })?;
    output::value(&settings, json).context("Failed to print build settings")
}
