//! engine::runner
//!
//! Engine runner - the single entry point for command execution.
//!
//! # Architecture
//!
//! ```text
//! Load -> Verify -> Mutate -> Verify -> Save
//! ```
//!
//! **Key principle:** command handlers never load or save a project
//! themselves. Mutating commands go through [`run_mutation`] (or
//! [`run_create`] for a new project); read-only commands go through
//! [`run_query`], which never writes.
//!
//! # Invariants
//!
//! - Exactly one operation runs per load/save cycle
//! - Reported outcomes are never saved
//! - A mutation that introduces an invariant violation is never saved

use std::path::Path;

use thiserror::Error;

use super::{Context, Outcome};
use crate::codec::{CodecError, ProjectCodec};
use crate::core::graph::ProjectGraph;
use crate::core::verify::{verify, Violation};
use crate::ops::OpError;

/// Errors from the engine runner.
#[derive(Debug, Error)]
pub enum RunError {
    /// Loading or saving failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The operation failed.
    #[error(transparent)]
    Op(#[from] OpError),

    /// The operation broke a graph invariant.
    #[error("operation left the project inconsistent: {}", describe(.0))]
    InvariantRegression(Vec<Violation>),
}

fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load, apply one operation, verify and save.
pub fn run_mutation<C, F>(
    codec: &C,
    path: &Path,
    ctx: &Context,
    op: F,
) -> Result<Outcome, RunError>
where
    C: ProjectCodec + ?Sized,
    F: FnOnce(&mut ProjectGraph) -> Result<Outcome, OpError>,
{
    let mut graph = codec.load(path)?;
    let before = ctx.verify.then(|| verify(&graph));
    if let Some(report) = &before {
        if !report.is_ok() {
            tracing::warn!(
                violations = report.violations.len(),
                "project already has structural problems"
            );
        }
    }

    let outcome = op(&mut graph)?;
    if let Outcome::Reported(notice) = &outcome {
        tracing::debug!(%notice, "nothing to save");
        return Ok(outcome);
    }

    check(&graph, before.as_ref())?;
    codec.write(&graph, path)?;
    Ok(outcome)
}

/// Build a new project and save it, refusing to overwrite.
pub fn run_create<C, F>(codec: &C, path: &Path, ctx: &Context, build: F) -> Result<Outcome, RunError>
where
    C: ProjectCodec + ?Sized,
    F: FnOnce() -> Result<(ProjectGraph, Outcome), OpError>,
{
    if codec.exists(path) {
        return Err(OpError::AlreadyExists(path.to_path_buf()).into());
    }
    let (graph, outcome) = build()?;
    if ctx.verify {
        check(&graph, None)?;
    }
    codec.write(&graph, path)?;
    Ok(outcome)
}

/// Load and run a read-only query.
pub fn run_query<C, F, T>(codec: &C, path: &Path, query: F) -> Result<T, RunError>
where
    C: ProjectCodec + ?Sized,
    F: FnOnce(&ProjectGraph) -> Result<T, OpError>,
{
    let graph = codec.load(path)?;
    Ok(query(&graph)?)
}

fn check(
    graph: &ProjectGraph,
    before: Option<&crate::core::verify::VerifyResult>,
) -> Result<(), RunError> {
    let after = verify(graph);
    let introduced = match before {
        Some(before) => after.introduced_since(before),
        None => after.violations,
    };
    if introduced.is_empty() {
        Ok(())
    } else {
        Err(RunError::InvariantRegression(introduced))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::memory::MemoryCodec;
    use crate::core::model::{Group, Object};
    use crate::engine::Notice;
    use crate::ops::create::{create_project, CreateProject};

    fn seeded() -> (MemoryCodec, &'static Path) {
        let codec = MemoryCodec::new();
        let path = Path::new("/virtual/Demo.xcodeproj");
        let (graph, _) = create_project(&CreateProject::new("Demo")).unwrap();
        codec.insert(path, graph);
        (codec, path)
    }

    #[test]
    fn applied_outcomes_are_saved() {
        let (codec, path) = seeded();
        let outcome = run_mutation(&codec, path, &Context::default(), |graph| {
            let main = graph.main_group()?;
            let group = graph.objects.insert(Object::Group(Group::named("New")));
            graph.objects.group_mut(&main)?.children.push(group);
            Ok(Outcome::Applied("added".into()))
        })
        .unwrap();
        assert!(outcome.is_applied());
        assert_eq!(codec.write_count(), 1);
    }

    #[test]
    fn reported_outcomes_are_not_saved() {
        let (codec, path) = seeded();
        let outcome = run_mutation(&codec, path, &Context::default(), |_| {
            Ok(Outcome::Reported(Notice::TargetNotFound("X".into())))
        })
        .unwrap();
        assert!(!outcome.is_applied());
        assert_eq!(codec.write_count(), 0);
    }

    #[test]
    fn regressions_block_the_save() {
        let (codec, path) = seeded();
        let err = run_mutation(&codec, path, &Context::default(), |graph| {
            graph.objects.insert(Object::Group(Group::named("Orphan")));
            Ok(Outcome::Applied("added".into()))
        })
        .unwrap_err();
        assert!(matches!(err, RunError::InvariantRegression(ref v) if v.len() == 1));
        assert_eq!(codec.write_count(), 0);
    }

    #[test]
    fn verification_can_be_disabled() {
        let (codec, path) = seeded();
        let ctx = Context {
            verify: false,
            ..Context::default()
        };
        run_mutation(&codec, path, &ctx, |graph| {
            graph.objects.insert(Object::Group(Group::named("Orphan")));
            Ok(Outcome::Applied("added".into()))
        })
        .unwrap();
        assert_eq!(codec.write_count(), 1);
    }

    #[test]
    fn create_refuses_existing_project() {
        let (codec, path) = seeded();
        let err = run_create(&codec, path, &Context::default(), || {
            create_project(&CreateProject::new("Demo"))
        })
        .unwrap_err();
        assert!(matches!(err, RunError::Op(OpError::AlreadyExists(_))));
    }

    #[test]
    fn query_never_writes() {
        let (codec, path) = seeded();
        let count = run_query(&codec, path, |graph| Ok(graph.targets().len())).unwrap();
        assert_eq!(count, 1);
        assert_eq!(codec.write_count(), 0);
    }
}
