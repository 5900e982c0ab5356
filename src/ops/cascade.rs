//! ops::cascade
//!
//! Planned removal of objects and everything that depends on them.
//!
//! # Architecture
//!
//! A removal names a few root objects (a target, a file reference, a
//! package). [`Cascade::plan`] computes, without touching the store, the
//! full set of objects that must go with them:
//!
//! 1. everything that is no longer reachable from the project once the
//!    roots are gone (owned subtrees, but not objects still shared with a
//!    surviving owner)
//! 2. surviving build files whose file or product is going away
//! 3. surviving target dependencies whose target is going away, and
//!    package products whose package is going away
//!
//! repeated until nothing new is added. [`Cascade::apply`] then detaches
//! the doomed set from every survivor that still lists it and removes it.
//! `apply` cannot fail, so a removal is never left half done.
//!
//! # Invariants
//!
//! - Objects that were already unreachable before the removal are left alone
//! - No survivor keeps an owning or referring edge into the removed set

use std::collections::HashSet;

use crate::core::graph::ProjectGraph;
use crate::core::model::{Edge, Object, PlistValue};
use crate::core::types::ObjectId;

/// A removal to plan.
#[derive(Debug, Default)]
pub struct Cascade {
    roots: HashSet<ObjectId>,
}

impl Cascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `id` and whatever depends on it.
    pub fn remove(&mut self, id: ObjectId) -> &mut Self {
        self.roots.insert(id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Compute the full set of objects to delete.
    pub fn plan(&self, graph: &ProjectGraph) -> HashSet<ObjectId> {
        let before = graph.reachable();
        let index = graph.reference_index();
        let mut doomed: HashSet<ObjectId> = self
            .roots
            .iter()
            .filter(|id| graph.objects.contains(id))
            .cloned()
            .collect();

        loop {
            let live = graph.reachable_without(&doomed);
            let mut next = doomed.clone();
            next.extend(before.iter().filter(|id| !live.contains(*id)).cloned());

            for id in next.clone() {
                for (from, edge) in index.referrers(&id) {
                    if *edge != Edge::Refers || next.contains(from) {
                        continue;
                    }
                    if matches!(
                        graph.objects.get(from),
                        Some(
                            Object::BuildFile(_)
                                | Object::TargetDependency(_)
                                | Object::PackageProduct(_)
                        )
                    ) {
                        next.insert(from.clone());
                    }
                }
            }

            if next.len() == doomed.len() {
                break;
            }
            doomed = next;
        }

        tracing::debug!(roots = self.roots.len(), doomed = doomed.len(), "planned removal");
        doomed
    }

    /// Detach and delete `doomed`.
    pub fn apply(graph: &mut ProjectGraph, doomed: &HashSet<ObjectId>) {
        let index = graph.reference_index();
        let mut touched: Vec<&ObjectId> = doomed
            .iter()
            .flat_map(|id| index.referrers(id).iter().map(|(from, _)| from))
            .filter(|from| !doomed.contains(*from))
            .collect();
        touched.sort();
        touched.dedup();

        for id in touched {
            if let Some(object) = graph.objects.get_mut(id) {
                detach(object, doomed);
            }
        }
        super::remove_all(graph, doomed);
    }

    /// Plan and apply in one step. Returns the removed identifiers.
    pub fn run(&self, graph: &mut ProjectGraph) -> HashSet<ObjectId> {
        let doomed = self.plan(graph);
        Self::apply(graph, &doomed);
        doomed
    }
}

/// Drop every mention of `doomed` from `object`.
fn detach(object: &mut Object, doomed: &HashSet<ObjectId>) {
    let keep = |id: &ObjectId| !doomed.contains(id);
    let clear = |slot: &mut Option<ObjectId>| {
        if slot.as_ref().is_some_and(|id| doomed.contains(id)) {
            *slot = None;
        }
    };

    match object {
        Object::Project(p) => {
            p.targets.retain(keep);
            if let Some(refs) = p.package_references.as_mut() {
                refs.retain(keep);
            }
            clear(&mut p.products_group);
        }
        Object::Group(g) => g.children.retain(keep),
        Object::NativeTarget(t) => {
            t.build_phases.retain(keep);
            t.dependencies.retain(keep);
            if let Some(products) = t.package_product_dependencies.as_mut() {
                products.retain(keep);
            }
            clear(&mut t.product);
        }
        Object::BuildPhase(p) => p.files.retain(keep),
        Object::ConfigurationList(l) => l.build_configurations.retain(keep),
        Object::BuildConfiguration(c) => clear(&mut c.base_configuration_reference),
        Object::TargetDependency(d) => {
            clear(&mut d.target_proxy);
            clear(&mut d.target);
        }
        Object::PackageProduct(p) => clear(&mut p.package),
        Object::BuildFile(f) => {
            clear(&mut f.file_ref);
            clear(&mut f.product_ref);
        }
        _ => {}
    }

    for value in object.extra_mut().values_mut() {
        prune(value, doomed);
    }
}

/// Remove doomed identifiers from arrays and dictionary keys.
fn prune(value: &mut PlistValue, doomed: &HashSet<ObjectId>) {
    let is_doomed = |s: &str| ObjectId::new(s).is_ok_and(|id| doomed.contains(&id));
    match value {
        PlistValue::String(_) => {}
        PlistValue::Array(items) => {
            items.retain(|item| !item.as_str().is_some_and(is_doomed));
            items.iter_mut().for_each(|item| prune(item, doomed));
        }
        PlistValue::Dict(map) => {
            map.retain(|key, _| !is_doomed(key));
            map.values_mut().for_each(|item| prune(item, doomed));
        }
    }
}
