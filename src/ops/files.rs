//! ops::files
//!
//! Adding, removing and renaming file references.
//!
//! # Matching
//!
//! Remove and move look files up loosely, the way users type them: a
//! reference matches when its path equals the argument, or its name or
//! path equals the argument's last component. When some reference matches
//! the full path exactly, only the exact matches are used. Remove takes
//! the first match in navigator order; move rewrites every match.
//!
//! # Build phase selection
//!
//! | Extensions | Phase |
//! |---|---|
//! | swift, m, mm, c, cpp, cc, cxx | Sources |
//! | h, hpp, hxx | Headers |
//! | anything else | Resources |

use std::collections::HashSet;

use crate::core::graph::ProjectGraph;
use crate::core::model::{basename, BuildFile, FileReference, Object, PhaseKind};
use crate::core::types::{ObjectId, SourceTree};
use crate::engine::{Notice, Outcome};

use super::cascade::Cascade;
use super::OpError;

/// Request for [`add_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFile {
    pub path: String,
    pub group: Option<String>,
    pub target: Option<String>,
}

impl AddFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            group: None,
            target: None,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn in_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

fn extension(path: &str) -> String {
    let base = basename(path);
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Build phase a file with this path is compiled or copied by.
pub fn phase_for(path: &str) -> PhaseKind {
    match extension(path).as_str() {
        "swift" | "m" | "mm" | "c" | "cpp" | "cc" | "cxx" => PhaseKind::Sources,
        "h" | "hpp" | "hxx" => PhaseKind::Headers,
        _ => PhaseKind::Resources,
    }
}

/// `lastKnownFileType` Xcode records for a path, if the extension is known.
pub fn last_known_file_type(path: &str) -> Option<&'static str> {
    let ty = match extension(path).as_str() {
        "swift" => "sourcecode.swift",
        "m" => "sourcecode.c.objc",
        "mm" => "sourcecode.cpp.objcpp",
        "c" => "sourcecode.c.c",
        "cpp" | "cc" | "cxx" => "sourcecode.cpp.cpp",
        "h" => "sourcecode.c.h",
        "hpp" | "hxx" => "sourcecode.cpp.h",
        "metal" => "sourcecode.metal",
        "plist" => "text.plist.xml",
        "strings" => "text.plist.strings",
        "entitlements" => "text.plist.entitlements",
        "xcconfig" => "text.xcconfig",
        "json" => "text.json",
        "md" => "net.daringfireball.markdown",
        "txt" => "text",
        "storyboard" => "file.storyboard",
        "xib" => "file.xib",
        "xcassets" => "folder.assetcatalog",
        "png" => "image.png",
        "jpg" | "jpeg" => "image.jpeg",
        "framework" => "wrapper.framework",
        "a" => "archive.ar",
        "dylib" => "compiled.mach-o.dylib",
        _ => return None,
    };
    Some(ty)
}

/// Add a file to a group and, optionally, to a target.
pub fn add_file(graph: &mut ProjectGraph, req: &AddFile) -> Result<Outcome, OpError> {
    if req.path.trim().is_empty() {
        return Err(OpError::InvalidArgument("file path cannot be empty".into()));
    }
    let group = match &req.group {
        Some(name) => graph
            .group_named(name)
            .ok_or_else(|| OpError::GroupNotFound(name.clone()))?,
        None => graph.main_group()?,
    };
    let target = match &req.target {
        Some(name) => Some(super::require_target(graph, name)?),
        None => None,
    };
    let file_name = basename(&req.path).to_string();
    let name = (file_name != req.path).then(|| file_name.clone());

    let existing = graph
        .objects
        .group(&group)?
        .children
        .iter()
        .find(|child| {
            graph
                .objects
                .file_reference(child)
                .map(|f| f.path.as_deref() == Some(req.path.as_str()) && f.name == name)
                .unwrap_or(false)
        })
        .cloned();

    let phase_kind = phase_for(&req.path);
    if let (Some(file), Some(target)) = (&existing, &target) {
        let already = graph
            .phase_of(target, phase_kind.tag())
            .and_then(|phase| graph.objects.phase(&phase).ok())
            .map(|phase| {
                phase.files.iter().any(|bf| {
                    graph
                        .objects
                        .build_file(bf)
                        .map(|bf| bf.file_ref.as_ref() == Some(file))
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false);
        if already {
            return Ok(Outcome::Reported(Notice::FileAlreadyInTarget {
                file: file_name,
                target: req.target.clone().unwrap_or_default(),
            }));
        }
    }
    if existing.is_some() && target.is_none() {
        return Ok(Outcome::Reported(Notice::FileAlreadyInGroup {
            file: file_name,
            group: req.group.clone().unwrap_or_else(|| "main group".into()),
        }));
    }

    let file = match existing {
        Some(file) => file,
        None => {
            let file = graph.objects.insert(Object::FileReference(FileReference {
                name,
                path: Some(req.path.clone()),
                source_tree: SourceTree::Group,
                last_known_file_type: last_known_file_type(&req.path).map(str::to_string),
                ..FileReference::default()
            }));
            graph.objects.group_mut(&group)?.children.push(file.clone());
            file
        }
    };

    if let Some(target) = &target {
        let phase = graph.ensure_phase(target, phase_kind)?;
        let build_file = graph
            .objects
            .insert(Object::BuildFile(BuildFile::for_file(file.clone())));
        graph.objects.phase_mut(&phase)?.files.push(build_file);
    }
    tracing::debug!(%file, path = %req.path, "added file");

    let mut message = format!("Successfully added file '{}'", file_name);
    if let Some(target) = &req.target {
        message.push_str(&format!(" to target '{}'", target));
    }
    if let Some(group) = &req.group {
        message.push_str(&format!(" in group '{}'", group));
    }
    Ok(Outcome::Applied(message))
}

/// File references in navigator pre-order: a group's children in order,
/// descending into each subgroup where it sits.
fn files_in_tree_order(graph: &ProjectGraph) -> Vec<ObjectId> {
    let mut out = Vec::new();
    let Ok(main) = graph.main_group() else {
        return out;
    };
    let mut seen = HashSet::new();
    let mut stack = vec![main];
    while let Some(id) = stack.pop() {
        if !seen.insert(id.clone()) {
            continue;
        }
        if let Ok(group) = graph.objects.group(&id) {
            stack.extend(group.children.iter().rev().cloned());
        } else if graph.objects.file_reference(&id).is_ok() {
            out.push(id);
        }
    }
    out
}

/// File references in the navigator tree matching `path`, in tree order.
fn matching_files(graph: &ProjectGraph, path: &str) -> Vec<ObjectId> {
    let candidates: Vec<(ObjectId, &FileReference)> = files_in_tree_order(graph)
        .into_iter()
        .filter_map(|id| {
            let file = graph.objects.file_reference(&id).ok()?;
            file.matches_path(path).then_some((id, file))
        })
        .collect();

    let exact: Vec<ObjectId> = candidates
        .iter()
        .filter(|(_, f)| f.path.as_deref() == Some(path))
        .map(|(id, _)| id.clone())
        .collect();
    if exact.is_empty() {
        candidates.into_iter().map(|(id, _)| id).collect()
    } else {
        exact
    }
}

/// Names of the targets whose build phases include any of `files`.
fn targets_using(graph: &ProjectGraph, files: &[ObjectId]) -> Vec<String> {
    let mut names = Vec::new();
    for (_, target) in graph.targets() {
        let uses = target
            .build_phases
            .iter()
            .filter_map(|id| graph.objects.phase(id).ok())
            .flat_map(|phase| phase.files.iter())
            .filter_map(|id| graph.objects.build_file(id).ok())
            .any(|bf| bf.file_ref.as_ref().is_some_and(|f| files.contains(f)));
        if uses && !names.contains(&target.name) {
            names.push(target.name.clone());
        }
    }
    names
}

/// Remove a file from the project, including every build phase using it.
pub fn remove_file(graph: &mut ProjectGraph, path: &str) -> Result<Outcome, OpError> {
    let Some(file) = matching_files(graph, path).into_iter().next() else {
        return Ok(Outcome::Reported(Notice::FileNotFound(path.to_string())));
    };
    let targets = targets_using(graph, std::slice::from_ref(&file));

    let removed = Cascade::new().remove(file.clone()).run(graph);
    tracing::debug!(%file, removed = removed.len(), "removed file");

    let mut message = format!("Successfully removed {} from project", path);
    if !targets.is_empty() {
        message.push_str(&format!(". Removed from targets: {}", targets.join(", ")));
    }
    Ok(Outcome::Applied(message))
}

/// Point every reference matching `old_path` at `new_path`.
///
/// The references stay where they are in the navigator tree.
pub fn move_file(
    graph: &mut ProjectGraph,
    old_path: &str,
    new_path: &str,
) -> Result<Outcome, OpError> {
    if new_path.trim().is_empty() {
        return Err(OpError::InvalidArgument("new path cannot be empty".into()));
    }
    let files = matching_files(graph, old_path);
    if files.is_empty() {
        return Ok(Outcome::Reported(Notice::FileNotFound(old_path.to_string())));
    }

    let new_name = basename(new_path);
    for id in &files {
        let file = graph.objects.file_reference_mut(id)?;
        file.path = Some(new_path.to_string());
        file.name = (new_name != new_path).then(|| new_name.to_string());
        if file.explicit_file_type.is_none() {
            file.last_known_file_type = last_known_file_type(new_path)
                .map(str::to_string)
                .or(file.last_known_file_type.take());
        }
    }

    Ok(Outcome::Applied(format!(
        "Successfully moved {} to {}",
        old_path, new_path
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::PhaseTag;
    use crate::core::verify::verify;
    use crate::ops::create::{create_project, CreateProject};
    use crate::ops::groups::{create_group, CreateGroup};
    use crate::ops::targets::{add_target, AddTarget};

    fn project() -> ProjectGraph {
        create_project(&CreateProject::new("Demo")).unwrap().0
    }

    fn sources_of(graph: &ProjectGraph, target: &str) -> Vec<ObjectId> {
        let target = graph.target_named(target).unwrap();
        let phase = graph.phase_of(&target, PhaseTag::Sources).unwrap();
        graph.objects.phase(&phase).unwrap().files.clone()
    }

    mod classify {
        use super::*;

        #[test]
        fn extensions_pick_phases() {
            assert_eq!(phase_for("a/B.swift").tag(), PhaseTag::Sources);
            assert_eq!(phase_for("x.MM").tag(), PhaseTag::Sources);
            assert_eq!(phase_for("x.hpp").tag(), PhaseTag::Headers);
            assert_eq!(phase_for("Info.plist").tag(), PhaseTag::Resources);
            assert_eq!(phase_for("Makefile").tag(), PhaseTag::Resources);
            assert_eq!(phase_for(".swift").tag(), PhaseTag::Resources);
        }

        #[test]
        fn known_file_types() {
            assert_eq!(last_known_file_type("A.swift"), Some("sourcecode.swift"));
            assert_eq!(last_known_file_type("A.xcassets"), Some("folder.assetcatalog"));
            assert_eq!(last_known_file_type("A.unknown"), None);
        }
    }

    mod add {
        use super::*;

        #[test]
        fn source_file_lands_in_sources_phase() {
            let mut graph = project();
            let outcome =
                add_file(&mut graph, &AddFile::new("Sources/Foo.swift").in_target("Demo")).unwrap();
            assert_eq!(
                outcome.to_string(),
                "Successfully added file 'Foo.swift' to target 'Demo'"
            );

            let files = sources_of(&graph, "Demo");
            assert_eq!(files.len(), 1);
            let bf = graph.objects.build_file(&files[0]).unwrap();
            let file = graph
                .objects
                .file_reference(bf.file_ref.as_ref().unwrap())
                .unwrap();
            assert_eq!(file.path.as_deref(), Some("Sources/Foo.swift"));
            assert_eq!(file.name.as_deref(), Some("Foo.swift"));
            assert!(verify(&graph).is_ok());
        }

        #[test]
        fn headers_phase_is_created_on_demand() {
            let mut graph = project();
            add_file(&mut graph, &AddFile::new("Bridge.h").in_target("Demo")).unwrap();
            let target = graph.target_named("Demo").unwrap();
            let headers = graph.phase_of(&target, PhaseTag::Headers).unwrap();
            assert_eq!(graph.objects.phase(&headers).unwrap().files.len(), 1);
        }

        #[test]
        fn named_group_must_exist() {
            let mut graph = project();
            let err = add_file(&mut graph, &AddFile::new("A.swift").in_group("Nope")).unwrap_err();
            assert!(matches!(err, OpError::GroupNotFound(_)));

            create_group(&mut graph, &CreateGroup::new("Models")).unwrap();
            add_file(&mut graph, &AddFile::new("A.swift").in_group("Models")).unwrap();
            let models = graph.group_named("Models").unwrap();
            assert_eq!(graph.objects.group(&models).unwrap().children.len(), 1);
        }

        #[test]
        fn missing_target_is_fatal_and_changes_nothing() {
            let mut graph = project();
            let before = graph.objects.len();
            let err = add_file(&mut graph, &AddFile::new("A.swift").in_target("Nope")).unwrap_err();
            assert!(matches!(err, OpError::TargetNotFound(_)));
            assert_eq!(graph.objects.len(), before);
        }

        #[test]
        fn adding_twice_is_reported() {
            let mut graph = project();
            let req = AddFile::new("A.swift").in_target("Demo");
            add_file(&mut graph, &req).unwrap();
            let outcome = add_file(&mut graph, &req).unwrap();
            assert_eq!(
                outcome,
                Outcome::Reported(Notice::FileAlreadyInTarget {
                    file: "A.swift".into(),
                    target: "Demo".into()
                })
            );
            assert_eq!(sources_of(&graph, "Demo").len(), 1);
        }

        #[test]
        fn existing_reference_is_reused_for_another_target() {
            let mut graph = project();
            add_target(
                &mut graph,
                &AddTarget::new("Widget", crate::core::types::ProductType::AppExtension, "w"),
            )
            .unwrap();
            add_file(&mut graph, &AddFile::new("Shared.swift").in_target("Demo")).unwrap();
            add_file(&mut graph, &AddFile::new("Shared.swift").in_target("Widget")).unwrap();
            let shared = graph
                .objects
                .file_references()
                .filter(|(_, f)| f.path.as_deref() == Some("Shared.swift"))
                .count();
            assert_eq!(shared, 1);
            assert!(verify(&graph).is_ok());
        }
    }

    mod remove {
        use super::*;

        #[test]
        fn removes_reference_and_build_files() {
            let mut graph = project();
            add_file(&mut graph, &AddFile::new("Sources/Foo.swift").in_target("Demo")).unwrap();
            let outcome = remove_file(&mut graph, "Sources/Foo.swift").unwrap();
            assert_eq!(
                outcome.to_string(),
                "Successfully removed Sources/Foo.swift from project. Removed from targets: Demo"
            );
            assert!(sources_of(&graph, "Demo").is_empty());
            assert_eq!(graph.objects.build_files().count(), 0);
            assert!(verify(&graph).is_ok());
        }

        #[test]
        fn basename_matches() {
            let mut graph = project();
            add_file(&mut graph, &AddFile::new("Sources/Foo.swift")).unwrap();
            let outcome = remove_file(&mut graph, "Foo.swift").unwrap();
            assert_eq!(outcome.to_string(), "Successfully removed Foo.swift from project");
        }

        #[test]
        fn exact_path_wins_over_basename() {
            let mut graph = project();
            add_file(&mut graph, &AddFile::new("A/Foo.swift")).unwrap();
            add_file(&mut graph, &AddFile::new("B/Foo.swift")).unwrap();
            remove_file(&mut graph, "A/Foo.swift").unwrap();
            let remaining: Vec<_> = graph
                .objects
                .file_references()
                .filter_map(|(_, f)| f.path.clone())
                .filter(|p| p.ends_with("Foo.swift"))
                .collect();
            assert_eq!(remaining, ["B/Foo.swift"]);
        }

        #[test]
        fn same_basename_removes_first_in_tree_order() {
            let mut graph = project();
            create_group(&mut graph, &CreateGroup::new("A")).unwrap();
            create_group(&mut graph, &CreateGroup::new("B")).unwrap();
            add_file(&mut graph, &AddFile::new("B/Foo.swift").in_group("B")).unwrap();
            add_file(&mut graph, &AddFile::new("A/Foo.swift").in_group("A")).unwrap();

            remove_file(&mut graph, "Foo.swift").unwrap();

            let remaining: Vec<_> = graph
                .objects
                .file_references()
                .filter_map(|(_, f)| f.path.clone())
                .filter(|p| p.ends_with("Foo.swift"))
                .collect();
            assert_eq!(remaining, ["B/Foo.swift"]);
            assert!(verify(&graph).is_ok());
        }

        #[test]
        fn subgroup_file_precedes_later_sibling() {
            let mut graph = project();
            create_group(&mut graph, &CreateGroup::new("Nested")).unwrap();
            add_file(&mut graph, &AddFile::new("Nested/Foo.swift").in_group("Nested")).unwrap();
            add_file(&mut graph, &AddFile::new("Top/Foo.swift")).unwrap();

            remove_file(&mut graph, "Foo.swift").unwrap();

            let remaining: Vec<_> = graph
                .objects
                .file_references()
                .filter_map(|(_, f)| f.path.clone())
                .filter(|p| p.ends_with("Foo.swift"))
                .collect();
            assert_eq!(remaining, ["Top/Foo.swift"]);
        }

        #[test]
        fn unknown_file_is_reported() {
            let mut graph = project();
            let outcome = remove_file(&mut graph, "Nope.swift").unwrap();
            assert_eq!(outcome.to_string(), "File not found in project: Nope.swift");
        }
    }

    mod rename {
        use super::*;

        #[test]
        fn rewrites_path_and_name_in_place() {
            let mut graph = project();
            add_file(&mut graph, &AddFile::new("Old/Foo.swift")).unwrap();
            let main = graph.main_group().unwrap();
            let before = graph.objects.group(&main).unwrap().children.clone();

            move_file(&mut graph, "Old/Foo.swift", "New/Bar.swift").unwrap();
            assert_eq!(graph.objects.group(&main).unwrap().children, before);
            let file = graph
                .objects
                .file_references()
                .find(|(_, f)| f.path.as_deref() == Some("New/Bar.swift"))
                .map(|(_, f)| f.clone())
                .unwrap();
            assert_eq!(file.name.as_deref(), Some("Bar.swift"));
        }

        #[test]
        fn unknown_file_is_reported() {
            let mut graph = project();
            let outcome = move_file(&mut graph, "Nope.swift", "X.swift").unwrap();
            assert!(!outcome.is_applied());
        }
    }
}
