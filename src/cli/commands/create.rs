//! create command - Create a new Xcode project

use std::path::Path;

use anyhow::{Context as _, Result};

use super::{load_config, report, verbosity};
use crate::codec::PbxprojCodec;
use crate::core::paths::{ProjectPaths, BUNDLE_EXTENSION};
use crate::core::types::Platform;
use crate::engine::{self, Context};
use crate::ops::create::{create_project, CreateProject};
use crate::ops::disk;
use crate::ui::output;

/// Command-line values that override the configuration.
#[derive(Debug, Default)]
pub struct Overrides {
    pub organization_name: Option<String>,
    pub bundle_identifier: Option<String>,
    pub platform: Option<String>,
    pub deployment_target: Option<String>,
    pub swift_version: Option<String>,
}

/// Create `<dir>/<name>.xcodeproj`.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `name` - Project name, also the name of the default target
/// * `dir` - Directory to create the bundle in
/// * `overrides` - Values that win over the configuration files
pub fn create(ctx: &Context, name: &str, dir: &Path, overrides: Overrides) -> Result<()> {
    let bundle = dir.join(format!("{}.{}", name, BUNDLE_EXTENSION));
    let config = load_config(Some(&bundle))?;

    let request = CreateProject {
        name: name.to_string(),
        organization_name: overrides
            .organization_name
            .unwrap_or_else(|| config.organization_name().to_string()),
        bundle_identifier_prefix: overrides
            .bundle_identifier
            .unwrap_or_else(|| config.bundle_identifier_prefix().to_string()),
        swift_version: overrides
            .swift_version
            .unwrap_or_else(|| config.swift_version().to_string()),
        platform: overrides
            .platform
            .as_deref()
            .map(Platform::from_name_or_default)
            .unwrap_or_else(|| config.default_platform()),
        deployment_target: overrides.deployment_target,
    };

    let ctx = Context {
        verify: ctx.verify && config.verify(),
        ..ctx.clone()
    };
    let outcome = engine::run_create(&PbxprojCodec, &bundle, &ctx, || create_project(&request))
        .with_context(|| format!("Failed to create project '{}'", bundle.display()))?;

    let workspace = disk::write_workspace_data(&ProjectPaths::resolve(&bundle))
        .context("Failed to write workspace data")?;
    output::debug(
        format!("wrote {}", workspace.display()),
        verbosity(&ctx),
    );

    report(&ctx, &outcome);
    Ok(())
}
