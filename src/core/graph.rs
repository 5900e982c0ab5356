//! core::graph
//!
//! The project object graph and its derived indexes.
//!
//! # Architecture
//!
//! A [`ProjectGraph`] is the object store plus the file-level header fields
//! and the identifier of the root `PBXProject`. Name lookups used by the
//! commands (targets, groups) resolve here once, at the start of an
//! operation; everything after that works by identifier.
//!
//! [`ReferenceIndex`] is the reverse of [`Object::edges`]: for every
//! identifier, the objects pointing at it. It is recomputed per operation
//! and turns cascade planning into lookups.
//!
//! # Invariants
//!
//! - `root` names a `PBXProject` in the store
//! - Name lookups resolve duplicates to the first match in project order

use std::collections::{HashMap, HashSet, VecDeque};

use super::model::{
    Attributes, BuildConfiguration, BuildPhase, Edge, NativeTarget, Object, PhaseKind, PhaseTag,
    Project,
};
use super::store::{ObjectStore, StoreError};
use super::types::ObjectId;

/// A loaded (or freshly created) project.
#[derive(Debug, Clone)]
pub struct ProjectGraph {
    /// Bundle name without `.xcodeproj`.
    pub name: String,
    pub archive_version: String,
    pub object_version: String,
    pub classes: Attributes,
    pub root: ObjectId,
    pub objects: ObjectStore,
}

impl ProjectGraph {
    /// Archive version every project file carries.
    pub const ARCHIVE_VERSION: &'static str = "1";
    /// Object version written by newly created projects.
    pub const OBJECT_VERSION: &'static str = "56";

    pub fn new(name: impl Into<String>, root: ObjectId, objects: ObjectStore) -> Self {
        Self {
            name: name.into(),
            archive_version: Self::ARCHIVE_VERSION.to_string(),
            object_version: Self::OBJECT_VERSION.to_string(),
            classes: Attributes::new(),
            root,
            objects,
        }
    }

    pub fn project(&self) -> Result<&Project, StoreError> {
        self.objects.project(&self.root)
    }

    pub fn project_mut(&mut self) -> Result<&mut Project, StoreError> {
        self.objects.project_mut(&self.root)
    }

    pub fn main_group(&self) -> Result<ObjectId, StoreError> {
        Ok(self.project()?.main_group.clone())
    }

    /// Targets in `Project.targets` order.
    pub fn targets(&self) -> Vec<(ObjectId, &NativeTarget)> {
        let Ok(project) = self.project() else {
            return Vec::new();
        };
        project
            .targets
            .iter()
            .filter_map(|id| self.objects.target(id).ok().map(|t| (id.clone(), t)))
            .collect()
    }

    /// Resolve a target name to its identifier.
    pub fn target_named(&self, name: &str) -> Option<ObjectId> {
        let mut matches = self
            .targets()
            .into_iter()
            .filter(|(_, t)| t.name == name)
            .map(|(id, _)| id);
        let first = matches.next();
        if first.is_some() && matches.next().is_some() {
            tracing::warn!(target_name = name, "several targets share this name, using the first");
        }
        first
    }

    /// Groups reachable from the main group, pre-order, with their depth.
    pub fn group_tree(&self) -> Vec<(ObjectId, usize)> {
        let mut out = Vec::new();
        let Ok(main) = self.main_group() else {
            return out;
        };
        let mut stack = vec![(main, 0usize)];
        let mut seen = HashSet::new();
        while let Some((id, depth)) = stack.pop() {
            if !seen.insert(id.clone()) {
                continue;
            }
            let Ok(group) = self.objects.group(&id) else {
                continue;
            };
            for child in group.children.iter().rev() {
                if self.objects.group(child).is_ok() {
                    stack.push((child.clone(), depth + 1));
                }
            }
            out.push((id, depth));
        }
        out
    }

    /// Resolve a group name (the name, else the path) to its identifier.
    pub fn group_named(&self, name: &str) -> Option<ObjectId> {
        let mut matches = self.group_tree().into_iter().filter(|(id, _)| {
            self.objects
                .group(id)
                .map(|g| g.display_name() == Some(name))
                .unwrap_or(false)
        });
        let first = matches.next().map(|(id, _)| id);
        if first.is_some() && matches.next().is_some() {
            tracing::warn!(group = name, "several groups share this name, using the first");
        }
        first
    }

    /// First build phase of `target` with the given kind.
    pub fn phase_of(&self, target: &ObjectId, tag: PhaseTag) -> Option<ObjectId> {
        let target = self.objects.target(target).ok()?;
        target
            .build_phases
            .iter()
            .find(|id| {
                self.objects
                    .phase(id)
                    .map(|p| p.tag() == tag)
                    .unwrap_or(false)
            })
            .cloned()
    }

    /// First phase of the kind of `kind`, created and appended if absent.
    pub fn ensure_phase(
        &mut self,
        target: &ObjectId,
        kind: PhaseKind,
    ) -> Result<ObjectId, StoreError> {
        if let Some(existing) = self.phase_of(target, kind.tag()) {
            return Ok(existing);
        }
        self.objects.target(target)?;
        let phase = self.objects.insert(Object::BuildPhase(BuildPhase::new(kind)));
        self.objects.target_mut(target)?.build_phases.push(phase.clone());
        Ok(phase)
    }

    /// Configurations of a configuration list, in list order.
    pub fn configurations_of(&self, list: &ObjectId) -> Vec<(ObjectId, &BuildConfiguration)> {
        let Ok(list) = self.objects.configuration_list(list) else {
            return Vec::new();
        };
        list.build_configurations
            .iter()
            .filter_map(|id| self.objects.configuration(id).ok().map(|c| (id.clone(), c)))
            .collect()
    }

    pub fn reference_index(&self) -> ReferenceIndex {
        ReferenceIndex::build(&self.objects)
    }

    /// Objects reachable from the root through ownership edges.
    ///
    /// Opaque edges count as ownership so that objects referenced only from
    /// unmodeled data are never considered orphans.
    pub fn reachable(&self) -> HashSet<ObjectId> {
        self.reachable_without(&HashSet::new())
    }

    /// Like [`ProjectGraph::reachable`], treating `excluded` as already gone.
    pub fn reachable_without(&self, excluded: &HashSet<ObjectId>) -> HashSet<ObjectId> {
        let mut result = HashSet::new();
        let mut queue = VecDeque::from([self.root.clone()]);

        while let Some(current) = queue.pop_front() {
            if excluded.contains(&current)
                || !self.objects.contains(&current)
                || !result.insert(current.clone())
            {
                continue;
            }
            if let Some(object) = self.objects.get(&current) {
                queue.extend(
                    object
                        .edges()
                        .into_iter()
                        .filter(|(_, edge)| matches!(edge, Edge::Owns | Edge::Opaque))
                        .map(|(id, _)| id),
                );
            }
        }

        result
    }

    /// Remove `id` from the children of every group holding it.
    pub fn detach_from_groups(&mut self, id: &ObjectId) {
        let parents: Vec<ObjectId> = self
            .objects
            .groups()
            .filter(|(_, g)| g.children.contains(id))
            .map(|(gid, _)| gid.clone())
            .collect();
        for parent in parents {
            if let Ok(group) = self.objects.group_mut(&parent) {
                group.children.retain(|c| c != id);
            }
        }
    }
}

/// Reverse edges: identifier to the objects that point at it.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    referrers: HashMap<ObjectId, Vec<(ObjectId, Edge)>>,
}

impl ReferenceIndex {
    pub fn build(store: &ObjectStore) -> Self {
        let mut referrers: HashMap<ObjectId, Vec<(ObjectId, Edge)>> = HashMap::new();
        for (id, object) in store.iter() {
            for (to, edge) in object.edges() {
                referrers.entry(to).or_default().push((id.clone(), edge));
            }
        }
        Self { referrers }
    }

    /// Every object pointing at `id`, with the edge kind.
    pub fn referrers(&self, id: &ObjectId) -> &[(ObjectId, Edge)] {
        self.referrers.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Objects owning `id`.
    pub fn owners(&self, id: &ObjectId) -> impl Iterator<Item = &ObjectId> {
        self.referrers(id)
            .iter()
            .filter(|(_, edge)| *edge == Edge::Owns)
            .map(|(from, _)| from)
    }

    /// Whether anything outside `excluded` still points at `id`.
    pub fn is_referenced_outside(&self, id: &ObjectId, excluded: &HashSet<ObjectId>) -> bool {
        self.referrers(id)
            .iter()
            .any(|(from, _)| !excluded.contains(from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ConfigurationList, Group};

    fn graph_with_groups() -> (ProjectGraph, ObjectId, ObjectId) {
        let mut store = ObjectStore::new("test");
        let nested = store.insert(Object::Group(Group::named("Nested")));
        let sources = store.insert(Object::Group(Group {
            children: vec![nested.clone()],
            ..Group::named("Sources")
        }));
        let main = store.insert(Object::Group(Group {
            children: vec![sources.clone()],
            ..Group::default()
        }));
        let list = store.insert(Object::ConfigurationList(ConfigurationList::new(
            vec![],
            "Release",
        )));
        let root = store.insert(Object::Project(Project {
            build_configuration_list: list,
            compatibility_version: None,
            development_region: None,
            known_regions: None,
            main_group: main,
            products_group: None,
            project_dir_path: String::new(),
            project_root: String::new(),
            targets: vec![],
            package_references: None,
            extra: Attributes::new(),
        }));
        (ProjectGraph::new("Test", root, store), sources, nested)
    }

    mod lookup {
        use super::*;

        #[test]
        fn group_tree_is_preorder() {
            let (graph, sources, nested) = graph_with_groups();
            let tree = graph.group_tree();
            assert_eq!(tree.len(), 3);
            assert_eq!(tree[1], (sources, 1));
            assert_eq!(tree[2], (nested.clone(), 2));
            assert_eq!(graph.group_named("Nested"), Some(nested));
            assert_eq!(graph.group_named("Missing"), None);
        }

        #[test]
        fn detach_removes_child_links() {
            let (mut graph, sources, nested) = graph_with_groups();
            graph.detach_from_groups(&nested);
            assert!(graph.objects.group(&sources).unwrap().children.is_empty());
        }
    }

    mod reachability {
        use super::*;

        #[test]
        fn orphans_are_not_reachable() {
            let (mut graph, _, nested) = graph_with_groups();
            let orphan = graph.objects.insert(Object::Group(Group::named("Orphan")));
            let reachable = graph.reachable();
            assert!(reachable.contains(&nested));
            assert!(!reachable.contains(&orphan));
        }

        #[test]
        fn excluded_objects_cut_their_subtree() {
            let (graph, sources, nested) = graph_with_groups();
            let reachable = graph.reachable_without(&HashSet::from([sources.clone()]));
            assert!(!reachable.contains(&sources));
            assert!(!reachable.contains(&nested));
            assert!(reachable.contains(&graph.root));
        }

        #[test]
        fn reference_index_reverses_edges() {
            let (graph, sources, nested) = graph_with_groups();
            let index = graph.reference_index();
            let owners: Vec<_> = index.owners(&nested).collect();
            assert_eq!(owners, vec![&sources]);
            assert!(index.is_referenced_outside(&nested, &HashSet::new()));
            assert!(!index.is_referenced_outside(&nested, &HashSet::from([sources])));
        }
    }
}
