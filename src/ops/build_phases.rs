//! ops::build_phases
//!
//! Run-script and copy-files phases added from the command line.

use crate::core::graph::ProjectGraph;
use crate::core::model::{BuildFile, BuildPhase, CopyFiles, Object, PhaseKind, ShellScript};
use crate::core::types::{CopyFilesDestination, ObjectId};
use crate::engine::{Notice, Outcome};

use super::OpError;

/// Shell used by run-script phases unless configured otherwise.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Request for [`add_run_script_phase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRunScript {
    pub target: String,
    pub name: String,
    pub script: String,
    pub shell_path: String,
}

/// Request for [`add_copy_files_phase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCopyFiles {
    pub target: String,
    pub name: String,
    pub destination: CopyFilesDestination,
    /// Paths of files already in the project.
    pub files: Vec<String>,
}

/// Append a run-script phase to a target.
pub fn add_run_script_phase(
    graph: &mut ProjectGraph,
    req: &AddRunScript,
) -> Result<Outcome, OpError> {
    let Some(target) = graph.target_named(&req.target) else {
        return Ok(Outcome::Reported(Notice::TargetNotFound(req.target.clone())));
    };
    let shell_path = if req.shell_path.trim().is_empty() {
        DEFAULT_SHELL.to_string()
    } else {
        req.shell_path.clone()
    };

    let phase = BuildPhase {
        name: Some(req.name.clone()),
        ..BuildPhase::new(PhaseKind::ShellScript(ShellScript {
            shell_path,
            shell_script: req.script.clone(),
            input_paths: Vec::new(),
            output_paths: Vec::new(),
        }))
    };
    append(graph, &target, phase)?;
    Ok(Outcome::Applied(format!(
        "Successfully added run script phase '{}' to target '{}'",
        req.name, req.target
    )))
}

/// Append a copy-files phase wrapping existing file references.
///
/// Paths that match no file reference are skipped.
pub fn add_copy_files_phase(
    graph: &mut ProjectGraph,
    req: &AddCopyFiles,
) -> Result<Outcome, OpError> {
    let Some(target) = graph.target_named(&req.target) else {
        return Ok(Outcome::Reported(Notice::TargetNotFound(req.target.clone())));
    };

    let mut resolved = Vec::new();
    for path in &req.files {
        match resolve_file(graph, path) {
            Some(file) => resolved.push(file),
            None => tracing::debug!(path = %path, "no file reference, skipping"),
        }
    }

    let files = resolved
        .into_iter()
        .map(|file| graph.objects.insert(Object::BuildFile(BuildFile::for_file(file))))
        .collect();
    let phase = BuildPhase {
        name: Some(req.name.clone()),
        files,
        ..BuildPhase::new(PhaseKind::CopyFiles(CopyFiles {
            dst_path: String::new(),
            dst_subfolder_spec: req.destination.subfolder_spec(),
        }))
    };
    append(graph, &target, phase)?;
    Ok(Outcome::Applied(format!(
        "Successfully added copy files phase '{}' to target '{}'",
        req.name, req.target
    )))
}

fn append(graph: &mut ProjectGraph, target: &ObjectId, phase: BuildPhase) -> Result<(), OpError> {
    let phase = graph.objects.insert(Object::BuildPhase(phase));
    graph.objects.target_mut(target)?.build_phases.push(phase);
    Ok(())
}

/// A file reference whose path is `path`, else whose path or name is its basename.
fn resolve_file(graph: &ProjectGraph, path: &str) -> Option<ObjectId> {
    let exact = graph
        .objects
        .file_references()
        .find(|(_, file)| file.path.as_deref() == Some(path));
    exact
        .or_else(|| {
            graph
                .objects
                .file_references()
                .find(|(_, file)| file.matches_path(path))
        })
        .map(|(id, _)| id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::PhaseTag;
    use crate::core::verify::verify;
    use crate::ops::create::{create_project, CreateProject};
    use crate::ops::files::{add_file, AddFile};

    fn project() -> ProjectGraph {
        create_project(&CreateProject::new("Demo")).unwrap().0
    }

    fn last_phase(graph: &ProjectGraph) -> BuildPhase {
        let target = graph.target_named("Demo").unwrap();
        let id = graph
            .objects
            .target(&target)
            .unwrap()
            .build_phases
            .last()
            .cloned()
            .unwrap();
        graph.objects.phase(&id).unwrap().clone()
    }

    mod run_script {
        use super::*;

        #[test]
        fn appends_named_script() {
            let mut graph = project();
            let req = AddRunScript {
                target: "Demo".into(),
                name: "Lint".into(),
                script: "swiftlint".into(),
                shell_path: String::new(),
            };
            assert!(add_run_script_phase(&mut graph, &req).unwrap().is_applied());

            let phase = last_phase(&graph);
            assert_eq!(phase.display_name(), "Lint");
            match phase.kind {
                PhaseKind::ShellScript(script) => {
                    assert_eq!(script.shell_script, "swiftlint");
                    assert_eq!(script.shell_path, DEFAULT_SHELL);
                }
                other => panic!("unexpected phase {:?}", other),
            }
            assert!(verify(&graph).is_ok());
        }

        #[test]
        fn missing_target_is_reported() {
            let mut graph = project();
            let req = AddRunScript {
                target: "Nope".into(),
                name: "Lint".into(),
                script: "true".into(),
                shell_path: DEFAULT_SHELL.into(),
            };
            assert!(!add_run_script_phase(&mut graph, &req).unwrap().is_applied());
        }
    }

    mod copy_files {
        use super::*;

        #[test]
        fn wraps_known_files_and_skips_unknown() {
            let mut graph = project();
            add_file(&mut graph, &AddFile::new("Resources/config.json")).unwrap();

            let req = AddCopyFiles {
                target: "Demo".into(),
                name: "Copy Config".into(),
                destination: CopyFilesDestination::Resources,
                files: vec!["config.json".into(), "missing.txt".into()],
            };
            add_copy_files_phase(&mut graph, &req).unwrap();

            let phase = last_phase(&graph);
            assert_eq!(phase.tag(), PhaseTag::CopyFiles);
            assert_eq!(phase.files.len(), 1);
            match &phase.kind {
                PhaseKind::CopyFiles(copy) => {
                    assert_eq!(copy.destination(), Some(CopyFilesDestination::Resources))
                }
                other => panic!("unexpected phase {:?}", other),
            }
            assert!(verify(&graph).is_ok());
        }

        #[test]
        fn destination_names_are_case_insensitive() {
            let dest: CopyFilesDestination = "Shared_Support".parse().unwrap();
            assert_eq!(dest.subfolder_spec(), 12);
            assert!("downloads".parse::<CopyFilesDestination>().is_err());
        }
    }
}
