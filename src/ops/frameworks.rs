//! ops::frameworks
//!
//! Linking (and optionally embedding) frameworks.
//!
//! A bare name such as `UIKit` is a system framework, referenced from the
//! SDK. Anything with a path separator or a `.framework` suffix is a
//! custom framework, referenced relative to its group. Only custom
//! frameworks can be embedded.

use crate::core::graph::ProjectGraph;
use crate::core::model::{
    basename, Attributes, BuildFile, BuildPhase, CopyFiles, FileReference, Object, PhaseKind,
    PlistValue,
};
use crate::core::types::{CopyFilesDestination, ObjectId, SourceTree};
use crate::engine::{Notice, Outcome};

use super::targets::navigator_group;
use super::OpError;

/// Name of the copy-files phase that embeds frameworks.
pub const EMBED_PHASE_NAME: &str = "Embed Frameworks";

/// Request for [`add_framework`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFramework {
    pub target: String,
    pub framework: String,
    pub embed: bool,
}

/// How a framework argument is referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FrameworkRef {
    System { name: String, path: String },
    Custom { name: String, path: String },
}

impl FrameworkRef {
    fn classify(argument: &str) -> Self {
        if !argument.contains('/') && !argument.ends_with(".framework") {
            let name = format!("{}.framework", argument);
            FrameworkRef::System {
                path: format!("System/Library/Frameworks/{}", name),
                name,
            }
        } else {
            FrameworkRef::Custom {
                name: basename(argument).to_string(),
                path: argument.to_string(),
            }
        }
    }

    fn name(&self) -> &str {
        match self {
            FrameworkRef::System { name, .. } | FrameworkRef::Custom { name, .. } => name,
        }
    }

    fn path(&self) -> &str {
        match self {
            FrameworkRef::System { path, .. } | FrameworkRef::Custom { path, .. } => path,
        }
    }

    fn file_reference(&self) -> FileReference {
        let source_tree = match self {
            FrameworkRef::System { .. } => SourceTree::SdkRoot,
            FrameworkRef::Custom { .. } => SourceTree::Group,
        };
        FileReference {
            name: Some(self.name().to_string()),
            path: Some(self.path().to_string()),
            source_tree,
            last_known_file_type: Some("wrapper.framework".to_string()),
            ..FileReference::default()
        }
    }

    fn matches(&self, file: &FileReference) -> bool {
        file.path.as_deref() == Some(self.path())
            || (file.name.as_deref() == Some(self.name()) && file.path.is_none())
    }
}

/// Link a framework into a target.
pub fn add_framework(graph: &mut ProjectGraph, req: &AddFramework) -> Result<Outcome, OpError> {
    if req.framework.trim().is_empty() {
        return Err(OpError::InvalidArgument("framework cannot be empty".into()));
    }
    let Some(target) = graph.target_named(&req.target) else {
        return Ok(Outcome::Reported(Notice::TargetNotFound(req.target.clone())));
    };
    let framework = FrameworkRef::classify(&req.framework);

    if linked(graph, &target, &framework) {
        return Ok(Outcome::Reported(Notice::FrameworkAlreadyLinked {
            framework: framework.name().to_string(),
            target: req.target.clone(),
        }));
    }

    let existing = graph
        .objects
        .file_references()
        .find(|(_, file)| framework.matches(file))
        .map(|(id, _)| id.clone());
    let group = navigator_group(graph, "Frameworks")?;
    let file = match existing {
        Some(file) => file,
        None => {
            let file = graph
                .objects
                .insert(Object::FileReference(framework.file_reference()));
            graph.objects.group_mut(&group)?.children.push(file.clone());
            file
        }
    };

    let phase = graph.ensure_phase(&target, PhaseKind::Frameworks)?;
    let link = graph
        .objects
        .insert(Object::BuildFile(BuildFile::for_file(file.clone())));
    graph.objects.phase_mut(&phase)?.files.push(link);

    let embedded = match &framework {
        FrameworkRef::Custom { .. } if req.embed => {
            embed(graph, &target, &file)?;
            true
        }
        FrameworkRef::System { .. } if req.embed => {
            tracing::warn!(framework = framework.name(), "system frameworks are not embedded");
            false
        }
        _ => false,
    };

    let mut message = format!(
        "Successfully added framework '{}' to target '{}'",
        framework.name(),
        req.target
    );
    if embedded {
        message.push_str(" (embedded)");
    }
    Ok(Outcome::Applied(message))
}

/// Whether the target's Frameworks phase already wraps this framework.
fn linked(graph: &ProjectGraph, target: &ObjectId, framework: &FrameworkRef) -> bool {
    let Some(phase) = graph.phase_of(target, PhaseKind::Frameworks.tag()) else {
        return false;
    };
    let Ok(phase) = graph.objects.phase(&phase) else {
        return false;
    };
    phase
        .files
        .iter()
        .filter_map(|id| graph.objects.build_file(id).ok())
        .filter_map(|bf| bf.file_ref.as_ref())
        .filter_map(|id| graph.objects.file_reference(id).ok())
        .any(|file| framework.matches(file))
}

fn embed(graph: &mut ProjectGraph, target: &ObjectId, file: &ObjectId) -> Result<(), OpError> {
    let spec = CopyFilesDestination::Frameworks.subfolder_spec();
    let existing = graph
        .objects
        .target(target)?
        .build_phases
        .iter()
        .find(|id| {
            matches!(
                graph.objects.phase(id).map(|p| &p.kind),
                Ok(PhaseKind::CopyFiles(copy)) if copy.dst_subfolder_spec == spec
            )
        })
        .cloned();
    let phase = match existing {
        Some(phase) => phase,
        None => {
            let phase = graph.objects.insert(Object::BuildPhase(BuildPhase {
                name: Some(EMBED_PHASE_NAME.to_string()),
                ..BuildPhase::new(PhaseKind::CopyFiles(CopyFiles {
                    dst_path: String::new(),
                    dst_subfolder_spec: spec,
                }))
            }));
            graph.objects.target_mut(target)?.build_phases.push(phase.clone());
            phase
        }
    };

    let mut settings = Attributes::new();
    settings.insert(
        "ATTRIBUTES".into(),
        PlistValue::Array(vec!["CodeSignOnCopy".into(), "RemoveHeadersOnCopy".into()]),
    );
    let build_file = graph.objects.insert(Object::BuildFile(BuildFile {
        settings: Some(settings),
        ..BuildFile::for_file(file.clone())
    }));
    graph.objects.phase_mut(&phase)?.files.push(build_file);
    Ok(())
}
