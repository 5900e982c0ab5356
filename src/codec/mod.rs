//! codec
//!
//! Loading and saving project graphs.
//!
//! # Architecture
//!
//! The engine only sees [`ProjectCodec`]. [`PbxprojCodec`] is the real
//! implementation over `project.pbxproj`; [`memory::MemoryCodec`] keeps
//! graphs in memory for tests.
//!
//! ```text
//! text --plist::parse--> PlistValue --decode--> ProjectGraph
//! ProjectGraph --encode--> Document --writer::render--> text
//! ```
//!
//! # Invariants
//!
//! - `write` replaces the file atomically: readers see the old file or the
//!   new one, never a partial write
//! - header fields (`archiveVersion`, `objectVersion`, `classes`) are written
//!   back exactly as loaded

pub mod decode;
pub mod encode;
pub mod memory;
pub mod plist;
pub mod writer;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::graph::ProjectGraph;
use crate::core::paths::ProjectPaths;

/// Errors from loading or saving a project.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed project: {0}")]
    MalformedProject(String),

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Boundary between the engine and the on-disk format.
pub trait ProjectCodec {
    /// Load the project at `path` (bundle or `project.pbxproj`).
    fn load(&self, path: &Path) -> Result<ProjectGraph, CodecError>;

    /// Replace the project at `path` with `graph`.
    fn write(&self, graph: &ProjectGraph, path: &Path) -> Result<(), CodecError>;

    /// Whether something already occupies `path`.
    fn exists(&self, path: &Path) -> bool {
        ProjectPaths::resolve(path).bundle().exists()
    }
}

/// Codec for Xcode's `project.pbxproj` text format.
#[derive(Debug, Clone, Copy, Default)]
pub struct PbxprojCodec;

impl PbxprojCodec {
    /// Parse project text. `name` becomes the graph's name.
    pub fn from_text(text: &str, name: &str) -> Result<ProjectGraph, CodecError> {
        let document =
            plist::parse(text).map_err(|e| CodecError::MalformedProject(e.to_string()))?;
        decode::decode(document, name)
    }

    /// Render a graph to project text.
    pub fn to_text(graph: &ProjectGraph) -> String {
        writer::render(&encode::encode(graph))
    }
}

impl ProjectCodec for PbxprojCodec {
    fn load(&self, path: &Path) -> Result<ProjectGraph, CodecError> {
        let paths = ProjectPaths::resolve(path);
        let file = paths.pbxproj();
        tracing::debug!(path = %file.display(), "loading project");
        let text = fs::read_to_string(&file).map_err(|e| CodecError::Read {
            path: file.clone(),
            source: e,
        })?;
        Self::from_text(&text, &paths.name())
    }

    fn write(&self, graph: &ProjectGraph, path: &Path) -> Result<(), CodecError> {
        let paths = ProjectPaths::resolve(path);
        let file = paths.pbxproj();
        tracing::debug!(path = %file.display(), objects = graph.objects.len(), "writing project");
        write_atomic(&file, Self::to_text(graph).as_bytes())
    }
}

/// Write `contents` to `path` through a temp file and rename.
///
/// Creates parent directories if needed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), CodecError> {
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |e| CodecError::Write { path, source: e }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err(path))?;
        }
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let mut file = fs::File::create(&temp_path).map_err(write_err(&temp_path))?;
    file.write_all(contents).map_err(write_err(&temp_path))?;
    file.sync_all().map_err(write_err(&temp_path))?;

    fs::rename(&temp_path, path).map_err(write_err(path))?;
    Ok(())
}
