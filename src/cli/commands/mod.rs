//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Hands one operation to the engine runner
//! 3. Prints the outcome
//!
//! Handlers do NOT load, mutate or save project graphs themselves. Disk
//! side effects (moving or deleting files) run in the handler after the
//! runner has saved the project.

mod build_phases;
mod completion;
mod config_cmd;
mod create;
mod files;
mod packages;
mod query;
mod settings;
mod targets;

// Re-export command functions for testing and direct invocation
pub use build_phases::add_build_phase;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use create::create;
pub use files::{add_file, create_group, move_file, remove_file};
pub use packages::{add_local_package, add_swift_package, remove_swift_package};
pub use query::{
    get_build_settings, list_build_configurations, list_files, list_groups, list_swift_packages,
    list_targets,
};
pub use settings::set_build_setting;
pub use targets::{add_dependency, add_framework, add_target, duplicate_target, remove_target};

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, ConfigAction};
use crate::codec::PbxprojCodec;
use crate::core::config::Config;
use crate::core::graph::ProjectGraph;
use crate::engine::{self, Context, Outcome};
use crate::ops::OpError;
use crate::ui::output::{self, Verbosity};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        // Project
        Command::Create {
            name,
            path,
            organization_name,
            bundle_identifier,
            platform,
            deployment_target,
            swift_version,
        } => create::create(
            ctx,
            &name,
            &path,
            create::Overrides {
                organization_name,
                bundle_identifier,
                platform,
                deployment_target,
                swift_version,
            },
        ),

        // Files and groups
        Command::AddFile {
            project,
            file,
            group,
            target,
        } => files::add_file(ctx, &project, &file, group, target),
        Command::RemoveFile {
            project,
            file,
            remove_from_disk,
        } => files::remove_file(ctx, &project, &file, remove_from_disk),
        Command::MoveFile {
            project,
            old_path,
            new_path,
            move_on_disk,
        } => files::move_file(ctx, &project, &old_path, &new_path, move_on_disk),
        Command::CreateGroup {
            project,
            name,
            parent,
            path,
        } => files::create_group(ctx, &project, &name, parent, path),

        // Targets
        Command::AddTarget {
            project,
            name,
            product_type,
            bundle_identifier,
            platform,
            deployment_target,
        } => targets::add_target(
            ctx,
            &project,
            &name,
            &product_type,
            bundle_identifier,
            platform.as_deref(),
            deployment_target,
        ),
        Command::RemoveTarget { project, name } => targets::remove_target(ctx, &project, &name),
        Command::DuplicateTarget {
            project,
            source,
            new_name,
            bundle_identifier,
        } => targets::duplicate_target(ctx, &project, &source, &new_name, bundle_identifier),
        Command::AddDependency {
            project,
            target,
            dependency,
        } => targets::add_dependency(ctx, &project, &target, &dependency),
        Command::AddFramework {
            project,
            target,
            framework,
            embed,
        } => targets::add_framework(ctx, &project, &target, &framework, embed),

        // Packages
        Command::AddSwiftPackage {
            project,
            url,
            requirement,
            target,
            product,
        } => packages::add_swift_package(ctx, &project, &url, &requirement, target, product),
        Command::AddLocalPackage {
            project,
            path,
            target,
            product,
        } => packages::add_local_package(ctx, &project, &path, target, product),
        Command::RemoveSwiftPackage { project, url } => {
            packages::remove_swift_package(ctx, &project, &url)
        }

        // Build phases and settings
        Command::AddBuildPhase {
            project,
            target,
            phase_type,
            name,
            script,
            shell_path,
            destination,
            files,
        } => build_phases::add_build_phase(
            ctx,
            &project,
            build_phases::PhaseArgs {
                target,
                phase_type,
                name,
                script,
                shell_path,
                destination,
                files,
            },
        ),
        Command::SetBuildSetting {
            project,
            target,
            configuration,
            key,
            value,
            list,
        } => settings::set_build_setting(ctx, &project, &target, &configuration, &key, &value, list),
        Command::GetBuildSettings {
            project,
            target,
            configuration,
            json,
        } => query::get_build_settings(&project, &target, &configuration, json),

        // Listing
        Command::ListTargets { project, json } => query::list_targets(&project, json),
        Command::ListBuildConfigurations { project, json } => {
            query::list_build_configurations(&project, json)
        }
        Command::ListFiles {
            project,
            target,
            json,
        } => query::list_files(&project, &target, json),
        Command::ListSwiftPackages { project, json } => query::list_swift_packages(&project, json),
        Command::ListGroups { project, json } => query::list_groups(&project, json),

        // Setup
        Command::Config { action } => match action {
            ConfigAction::Get { key, project } => config_cmd::get(ctx, &key, project.as_deref()),
            ConfigAction::Set {
                key,
                value,
                project,
            } => config_cmd::set(ctx, &key, &value, project.as_deref()),
            ConfigAction::List { project } => config_cmd::list(ctx, project.as_deref()),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Load configuration for a command on `project`.
pub(crate) fn load_config(project: Option<&Path>) -> Result<Config> {
    let loaded = Config::load(project).context("Failed to load configuration")?;
    Ok(loaded.config)
}

/// Run one mutation on the project and print its outcome.
pub(crate) fn apply<F>(ctx: &Context, config: &Config, project: &Path, op: F) -> Result<Outcome>
where
    F: FnOnce(&mut ProjectGraph) -> Result<Outcome, OpError>,
{
    let ctx = Context {
        verify: ctx.verify && config.verify(),
        ..ctx.clone()
    };
    let outcome = engine::run_mutation(&PbxprojCodec, project, &ctx, op)
        .with_context(|| format!("Failed to update project '{}'", project.display()))?;
    report(&ctx, &outcome);
    Ok(outcome)
}

/// Run a read-only query on the project.
pub(crate) fn inspect<F, T>(project: &Path, op: F) -> Result<T>
where
    F: FnOnce(&ProjectGraph) -> Result<T, OpError>,
{
    engine::run_query(&PbxprojCodec, project, op)
        .with_context(|| format!("Failed to read project '{}'", project.display()))
}

/// Print the single status line of an outcome.
pub(crate) fn report(ctx: &Context, outcome: &Outcome) {
    let verbosity = verbosity(ctx);
    match outcome {
        Outcome::Applied(message) => output::success(message, verbosity),
        Outcome::Reported(notice) => output::print(notice, verbosity),
    }
}

pub(crate) fn verbosity(ctx: &Context) -> Verbosity {
    Verbosity::from_flags(ctx.quiet, ctx.debug)
}
