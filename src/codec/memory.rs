//! codec::memory
//!
//! In-memory codec for tests.
//!
//! Graphs are stored by the bundle path they are written to. Loading
//! returns a clone, so a test can run several commands against the same
//! path and inspect what was saved in between.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{CodecError, ProjectCodec};
use crate::core::graph::ProjectGraph;
use crate::core::paths::ProjectPaths;

#[derive(Debug, Default)]
pub struct MemoryCodec {
    projects: RefCell<HashMap<PathBuf, ProjectGraph>>,
    writes: RefCell<usize>,
}

impl MemoryCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project at `path`.
    pub fn insert(&self, path: &Path, graph: ProjectGraph) {
        self.projects
            .borrow_mut()
            .insert(Self::key(path), graph);
    }

    /// The stored graph at `path`, if any.
    pub fn get(&self, path: &Path) -> Option<ProjectGraph> {
        self.projects.borrow().get(&Self::key(path)).cloned()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    fn key(path: &Path) -> PathBuf {
        ProjectPaths::resolve(path).bundle().to_path_buf()
    }
}

impl ProjectCodec for MemoryCodec {
    fn load(&self, path: &Path) -> Result<ProjectGraph, CodecError> {
        self.get(path).ok_or_else(|| CodecError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such project"),
        })
    }

    fn write(&self, graph: &ProjectGraph, path: &Path) -> Result<(), CodecError> {
        self.insert(path, graph.clone());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.projects.borrow().contains_key(&Self::key(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::ObjectStore;
    use crate::core::types::ObjectId;

    #[test]
    fn write_then_load() {
        let codec = MemoryCodec::new();
        let path = Path::new("/virtual/Demo.xcodeproj");
        assert!(codec.load(path).is_err());

        let graph = ProjectGraph::new(
            "Demo",
            ObjectId::new("ROOT").unwrap(),
            ObjectStore::new("ROOT"),
        );
        codec.write(&graph, path).unwrap();
        assert_eq!(codec.write_count(), 1);
        let loaded = codec.load(&path.join("project.pbxproj")).unwrap();
        assert_eq!(loaded.name, "Demo");
    }
}
