//! target commands - add-target, remove-target, duplicate-target,
//! add-dependency, add-framework

use std::path::Path;

use anyhow::{Context as _, Result};

use super::{apply, load_config};
use crate::core::types::{Platform, ProductType};
use crate::engine::Context;
use crate::ops::dependencies;
use crate::ops::frameworks::{self, AddFramework};
use crate::ops::targets::{self as target_ops, AddTarget, DuplicateTarget};

/// Add a native target.
///
/// # Arguments
///
/// * `product_type` - Product type name, e.g. `application` or `unitTestBundle`
/// * `bundle_identifier` - Defaults to `<configured prefix>.<name>`
/// * `platform` - Platform name; unknown names fall back to the configured default
pub fn add_target(
    ctx: &Context,
    project: &Path,
    name: &str,
    product_type: &str,
    bundle_identifier: Option<String>,
    platform: Option<&str>,
    deployment_target: Option<String>,
) -> Result<()> {
    let product_type: ProductType = product_type
        .parse()
        .with_context(|| format!("Invalid product type '{}'", product_type))?;
    let config = load_config(Some(project))?;

    let request = AddTarget {
        platform: platform
            .map(Platform::from_name_or_default)
            .unwrap_or_else(|| config.default_platform()),
        deployment_target,
        swift_version: config.swift_version().to_string(),
        ..AddTarget::new(
            name,
            product_type,
            bundle_identifier.unwrap_or_else(|| {
                format!("{}.{}", config.bundle_identifier_prefix(), name)
            }),
        )
    };
    apply(ctx, &config, project, |graph| target_ops::add_target(graph, &request))?;
    Ok(())
}

/// Remove a target and everything it owns.
pub fn remove_target(ctx: &Context, project: &Path, name: &str) -> Result<()> {
    let config = load_config(Some(project))?;
    apply(ctx, &config, project, |graph| target_ops::remove_target(graph, name))?;
    Ok(())
}

/// Copy a target under a new name.
pub fn duplicate_target(
    ctx: &Context,
    project: &Path,
    source: &str,
    new_name: &str,
    bundle_identifier: Option<String>,
) -> Result<()> {
    let config = load_config(Some(project))?;
    let request = DuplicateTarget {
        source: source.to_string(),
        new_name: new_name.to_string(),
        bundle_identifier,
    };
    apply(ctx, &config, project, |graph| {
        target_ops::duplicate_target(graph, &request)
    })?;
    Ok(())
}

/// Make one target depend on another.
pub fn add_dependency(ctx: &Context, project: &Path, target: &str, dependency: &str) -> Result<()> {
    let config = load_config(Some(project))?;
    apply(ctx, &config, project, |graph| {
        dependencies::add_dependency(graph, target, dependency)
    })?;
    Ok(())
}

/// Link (and optionally embed) a framework.
pub fn add_framework(
    ctx: &Context,
    project: &Path,
    target: &str,
    framework: &str,
    embed: bool,
) -> Result<()> {
    let config = load_config(Some(project))?;
    let request = AddFramework {
        target: target.to_string(),
        framework: framework.to_string(),
        embed,
    };
    apply(ctx, &config, project, |graph| {
        frameworks::add_framework(graph, &request)
    })?;
    Ok(())
}
