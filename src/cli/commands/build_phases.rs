//! add-build-phase command

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use super::{apply, load_config};
use crate::core::types::{BuildPhaseType, CopyFilesDestination};
use crate::engine::Context;
use crate::ops::build_phases::{self, AddCopyFiles, AddRunScript};

/// Arguments of `add-build-phase`, before validation.
#[derive(Debug)]
pub struct PhaseArgs {
    pub target: String,
    pub phase_type: String,
    pub name: String,
    pub script: Option<String>,
    pub shell_path: Option<String>,
    pub destination: Option<String>,
    pub files: Vec<String>,
}

/// Add a run-script or copy-files phase.
///
/// An unknown phase type or destination is an argument error.
pub fn add_build_phase(ctx: &Context, project: &Path, args: PhaseArgs) -> Result<()> {
    let phase_type: BuildPhaseType = args
        .phase_type
        .parse()
        .with_context(|| format!("Invalid build phase type '{}'", args.phase_type))?;

    match phase_type {
        BuildPhaseType::RunScript => {
            let Some(script) = args.script else {
                bail!("--script is required for run-script phases");
            };
            let config = load_config(Some(project))?;
            let request = AddRunScript {
                target: args.target,
                name: args.name,
                script,
                shell_path: args
                    .shell_path
                    .unwrap_or_else(|| config.shell_path().to_string()),
            };
            apply(ctx, &config, project, |graph| {
                build_phases::add_run_script_phase(graph, &request)
            })?;
        }
        BuildPhaseType::CopyFiles => {
            let Some(destination) = args.destination else {
                bail!("--destination is required for copy-files phases");
            };
            let destination: CopyFilesDestination = destination
                .parse()
                .with_context(|| format!("Invalid destination '{}'", destination))?;
            let config = load_config(Some(project))?;
            let request = AddCopyFiles {
                target: args.target,
                name: args.name,
                destination,
                files: args.files,
            };
            apply(ctx, &config, project, |graph| {
                build_phases::add_copy_files_phase(graph, &request)
            })?;
        }
    }
    Ok(())
}
