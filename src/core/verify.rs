//! core::verify
//!
//! Structural verification of a project graph.
//!
//! # Checks
//!
//! - Every object is reachable from the root through ownership edges
//! - No configuration list is owned by two objects
//! - No two children of one group share both name and path
//! - Every target dependency carries a container proxy
//! - No owning or referring edge points at a missing object
//! - Remote package URLs are unique
//!
//! # Invariants
//!
//! - Never mutates the graph
//! - Must be deterministic: the same graph yields the same violations in
//!   the same order

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use super::graph::ProjectGraph;
use super::model::{Edge, Object};
use super::types::ObjectId;

/// A broken structural invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq, Hash)]
pub enum Violation {
    #[error("root object {0} is missing or not a PBXProject")]
    MissingRoot(ObjectId),

    #[error("object {0} is not reachable from the project")]
    Orphan(ObjectId),

    #[error("configuration list {list} is shared by {owners} objects")]
    SharedConfigurationList { list: ObjectId, owners: usize },

    #[error("group {group} has several children named {name:?} at {path:?}")]
    DuplicateSibling {
        group: ObjectId,
        name: Option<String>,
        path: Option<String>,
    },

    #[error("target dependency {0} has no container proxy")]
    DependencyWithoutProxy(ObjectId),

    #[error("{from} points at missing object {to}")]
    DanglingReference { from: ObjectId, to: ObjectId },

    #[error("package URL {0} is referenced more than once")]
    DuplicatePackageUrl(String),
}

/// Result of verification.
#[derive(Debug, Clone, Default)]
pub struct VerifyResult {
    pub violations: Vec<Violation>,
}

impl VerifyResult {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations present here but not in `before`.
    pub fn introduced_since(&self, before: &VerifyResult) -> Vec<Violation> {
        let known: HashSet<&Violation> = before.violations.iter().collect();
        self.violations
            .iter()
            .filter(|v| !known.contains(v))
            .cloned()
            .collect()
    }
}

/// Verify every structural invariant of the graph.
pub fn verify(graph: &ProjectGraph) -> VerifyResult {
    if graph.project().is_err() {
        return VerifyResult {
            violations: vec![Violation::MissingRoot(graph.root.clone())],
        };
    }

    let mut violations = Vec::new();
    check_reachability(graph, &mut violations);
    check_configuration_lists(graph, &mut violations);
    check_siblings(graph, &mut violations);
    check_dependencies(graph, &mut violations);
    check_dangling(graph, &mut violations);
    check_packages(graph, &mut violations);
    VerifyResult { violations }
}

fn check_reachability(graph: &ProjectGraph, out: &mut Vec<Violation>) {
    let reachable = graph.reachable();
    out.extend(
        graph
            .objects
            .iter()
            .filter(|(id, _)| !reachable.contains(*id))
            .map(|(id, _)| Violation::Orphan(id.clone())),
    );
}

fn check_configuration_lists(graph: &ProjectGraph, out: &mut Vec<Violation>) {
    let mut owners: BTreeMap<&ObjectId, usize> = BTreeMap::new();
    for (_, object) in graph.objects.iter() {
        let list = match object {
            Object::Project(p) => &p.build_configuration_list,
            Object::NativeTarget(t) => &t.build_configuration_list,
            _ => continue,
        };
        *owners.entry(list).or_default() += 1;
    }
    out.extend(
        owners
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(list, owners)| Violation::SharedConfigurationList {
                list: list.clone(),
                owners,
            }),
    );
}

fn check_siblings(graph: &ProjectGraph, out: &mut Vec<Violation>) {
    for (group_id, group) in graph.objects.groups() {
        let mut seen = HashSet::new();
        for child in &group.children {
            let key = match graph.objects.get(child) {
                Some(Object::Group(g)) => (g.name.clone(), g.path.clone()),
                Some(Object::FileReference(f)) => (f.name.clone(), f.path.clone()),
                _ => continue,
            };
            if !seen.insert(key.clone()) {
                out.push(Violation::DuplicateSibling {
                    group: group_id.clone(),
                    name: key.0,
                    path: key.1,
                });
            }
        }
    }
}

fn check_dependencies(graph: &ProjectGraph, out: &mut Vec<Violation>) {
    out.extend(
        graph
            .objects
            .target_dependencies()
            .filter(|(_, d)| d.target.is_some() && d.target_proxy.is_none())
            .map(|(id, _)| Violation::DependencyWithoutProxy(id.clone())),
    );
}

fn check_dangling(graph: &ProjectGraph, out: &mut Vec<Violation>) {
    for (id, object) in graph.objects.iter() {
        for (to, edge) in object.edges() {
            if edge != Edge::Opaque && !graph.objects.contains(&to) {
                out.push(Violation::DanglingReference {
                    from: id.clone(),
                    to,
                });
            }
        }
    }
    for (id, proxy) in graph.objects.container_proxies() {
        if proxy.container_portal == graph.root && !graph.objects.contains(&proxy.remote_global_id)
        {
            out.push(Violation::DanglingReference {
                from: id.clone(),
                to: proxy.remote_global_id.clone(),
            });
        }
    }
}

fn check_packages(graph: &ProjectGraph, out: &mut Vec<Violation>) {
    let Ok(project) = graph.project() else {
        return;
    };
    let mut seen = HashSet::new();
    for id in project.package_references.iter().flatten() {
        if let Ok(package) = graph.objects.remote_package(id) {
            if !seen.insert(package.repository_url.as_str()) {
                out.push(Violation::DuplicatePackageUrl(
                    package.repository_url.clone(),
                ));
            }
        }
    }
}
