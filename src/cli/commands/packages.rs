//! package commands - add-swift-package, add-local-package, remove-swift-package

use std::path::Path;

use anyhow::Result;

use super::{apply, load_config};
use crate::engine::Context;
use crate::ops::packages::{self, AddLocalPackage, AddSwiftPackage};

/// Add a remote package, optionally linking a product into a target.
///
/// The requirement is parsed by the operation; a malformed requirement
/// fails before the project is touched.
pub fn add_swift_package(
    ctx: &Context,
    project: &Path,
    url: &str,
    requirement: &str,
    target: Option<String>,
    product: Option<String>,
) -> Result<()> {
    let config = load_config(Some(project))?;
    let request = AddSwiftPackage {
        url: url.to_string(),
        requirement: requirement.to_string(),
        target,
        product,
    };
    apply(ctx, &config, project, |graph| {
        packages::add_swift_package(graph, &request)
    })?;
    Ok(())
}

/// Add a local package, optionally linking a product into a target.
pub fn add_local_package(
    ctx: &Context,
    project: &Path,
    path: &str,
    target: Option<String>,
    product: Option<String>,
) -> Result<()> {
    let config = load_config(Some(project))?;
    let request = AddLocalPackage {
        path: path.to_string(),
        target,
        product,
    };
    apply(ctx, &config, project, |graph| {
        packages::add_local_package(graph, &request)
    })?;
    Ok(())
}

/// Remove a package and every product linked from it.
pub fn remove_swift_package(ctx: &Context, project: &Path, url: &str) -> Result<()> {
    let config = load_config(Some(project))?;
    apply(ctx, &config, project, |graph| {
        packages::remove_swift_package(graph, url)
    })?;
    Ok(())
}
