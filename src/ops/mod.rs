//! ops
//!
//! Operations on a project graph.
//!
//! # Architecture
//!
//! Every mutating operation is a plain function taking `&mut ProjectGraph`
//! and a request struct, and returning an [`Outcome`]. Each runs the same
//! short transaction:
//!
//! ```text
//! Resolve -> Validate -> Mutate -> Cascade
//! ```
//!
//! Names from the command line are resolved to identifiers first. All
//! existence checks run before the first store mutation, and removal
//! cascades are computed in full from a [`ReferenceIndex`] before anything
//! is deleted, so an operation never stops halfway.
//!
//! Read-only queries live in [`query`] and take `&ProjectGraph`.
//!
//! Operations never touch the filesystem. Disk side effects requested by
//! the file commands are in [`disk`] and run after the project is saved.
//!
//! [`Outcome`]: crate::engine::Outcome
//! [`ReferenceIndex`]: crate::core::graph::ReferenceIndex

pub mod build_phases;
pub mod build_settings;
pub mod cascade;
pub mod create;
pub mod dependencies;
pub mod disk;
pub mod files;
pub mod frameworks;
pub mod groups;
pub mod packages;
pub mod query;
pub mod targets;

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::graph::ProjectGraph;
use crate::core::store::StoreError;
use crate::core::types::{ObjectId, TypeError};

/// Fatal operation errors.
///
/// Conditions that merely make an operation a no-op are not errors; they
/// are reported through [`crate::engine::Notice`].
#[derive(Debug, Error)]
pub enum OpError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("'{}' already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Group '{0}' not found in project")]
    GroupNotFound(String),

    #[error("Target '{0}' not found in project")]
    TargetNotFound(String),

    #[error("Configuration '{configuration}' not found for target '{target}'")]
    ConfigurationNotFound {
        target: String,
        configuration: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Resolve a target name, failing if it is absent.
pub(crate) fn require_target(graph: &ProjectGraph, name: &str) -> Result<ObjectId, OpError> {
    graph
        .target_named(name)
        .ok_or_else(|| OpError::TargetNotFound(name.to_string()))
}

/// Remove every object in `doomed` from the store.
///
/// Callers detach the objects from their surviving owners first.
pub(crate) fn remove_all(graph: &mut ProjectGraph, doomed: &HashSet<ObjectId>) {
    let mut ordered: Vec<&ObjectId> = doomed.iter().collect();
    ordered.sort();
    for id in ordered {
        if graph.objects.remove(id).is_some() {
            tracing::trace!(%id, "removed object");
        }
    }
}
