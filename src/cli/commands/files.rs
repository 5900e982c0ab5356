//! file commands - add-file, remove-file, move-file, create-group

use std::path::Path;

use anyhow::{Context as _, Result};

use super::{apply, load_config, verbosity};
use crate::core::paths::ProjectPaths;
use crate::engine::Context;
use crate::ops::disk::{self, DiskStatus};
use crate::ops::files::{self as file_ops, AddFile};
use crate::ops::groups::{self, CreateGroup};
use crate::ui::output;

/// Add a file reference, optionally building it in a target.
pub fn add_file(
    ctx: &Context,
    project: &Path,
    file: &str,
    group: Option<String>,
    target: Option<String>,
) -> Result<()> {
    let config = load_config(Some(project))?;
    let request = AddFile {
        path: file.to_string(),
        group,
        target,
    };
    apply(ctx, &config, project, |graph| file_ops::add_file(graph, &request))?;
    Ok(())
}

/// Remove a file from the project, then optionally from disk.
///
/// Disk deletion is best-effort: failures are warnings.
pub fn remove_file(ctx: &Context, project: &Path, file: &str, remove_from_disk: bool) -> Result<()> {
    let config = load_config(Some(project))?;
    let outcome = apply(ctx, &config, project, |graph| file_ops::remove_file(graph, file))?;

    if remove_from_disk && outcome.is_applied() {
        let path = ProjectPaths::resolve(project).on_disk(file);
        match disk::remove_from_disk(&path) {
            Ok(status @ DiskStatus::Missing(_)) => output::warn(status, verbosity(ctx)),
            Ok(status) => output::print(status, verbosity(ctx)),
            Err(e) => output::warn(e, verbosity(ctx)),
        }
    }
    Ok(())
}

/// Rename a file in the project, then optionally move it on disk.
pub fn move_file(
    ctx: &Context,
    project: &Path,
    old_path: &str,
    new_path: &str,
    move_on_disk: bool,
) -> Result<()> {
    let config = load_config(Some(project))?;
    let outcome = apply(ctx, &config, project, |graph| {
        file_ops::move_file(graph, old_path, new_path)
    })?;

    if move_on_disk && outcome.is_applied() {
        let paths = ProjectPaths::resolve(project);
        let status = disk::move_on_disk(&paths.on_disk(old_path), &paths.on_disk(new_path))
            .context("Project was updated but the file could not be moved")?;
        match status {
            DiskStatus::Missing(_) => output::warn(status, verbosity(ctx)),
            _ => output::print(status, verbosity(ctx)),
        }
    }
    Ok(())
}

/// Create a navigator group.
pub fn create_group(
    ctx: &Context,
    project: &Path,
    name: &str,
    parent: Option<String>,
    path: Option<String>,
) -> Result<()> {
    let config = load_config(Some(project))?;
    let request = CreateGroup {
        name: name.to_string(),
        parent,
        path,
    };
    apply(ctx, &config, project, |graph| groups::create_group(graph, &request))?;
    Ok(())
}
