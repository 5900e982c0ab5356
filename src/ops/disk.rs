//! ops::disk
//!
//! Filesystem side effects of the file commands.
//!
//! These run only after the project has been saved. A missing source file
//! is reported, not an error. Failing to create the destination directory
//! of a move, or failing the move itself, is an error.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::codec::{write_atomic, CodecError};
use crate::core::paths::ProjectPaths;

use super::create::WORKSPACE_DATA;

/// Errors from disk side effects.
#[derive(Debug, Error)]
pub enum DiskError {
    #[error("failed to create directory '{}': {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to move '{}' to '{}': {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("failed to remove '{}': {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// What a disk side effect did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiskStatus {
    Moved { from: PathBuf, to: PathBuf },
    Removed(PathBuf),
    Missing(PathBuf),
}

impl fmt::Display for DiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskStatus::Moved { from, to } => {
                write!(f, "Moved {} to {} on disk", from.display(), to.display())
            }
            DiskStatus::Removed(path) => write!(f, "Deleted {} from disk", path.display()),
            DiskStatus::Missing(path) => write!(f, "File not found on disk: {}", path.display()),
        }
    }
}

/// Move a file, creating the destination's parent directories first.
pub fn move_on_disk(from: &Path, to: &Path) -> Result<DiskStatus, DiskError> {
    if !from.exists() {
        return Ok(DiskStatus::Missing(from.to_path_buf()));
    }
    if let Some(parent) = to.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| DiskError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    fs::rename(from, to).map_err(|source| DiskError::Move {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    tracing::debug!(from = %from.display(), to = %to.display(), "moved file on disk");
    Ok(DiskStatus::Moved {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
    })
}

/// Delete a file or directory tree.
pub fn remove_from_disk(path: &Path) -> Result<DiskStatus, DiskError> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(DiskStatus::Removed(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Ok(DiskStatus::Missing(path.to_path_buf()))
        }
        Err(source) => Err(DiskError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write the workspace stub Xcode expects inside a new bundle.
pub fn write_workspace_data(paths: &ProjectPaths) -> Result<PathBuf, DiskError> {
    let path = paths.workspace_data();
    write_atomic(&path, WORKSPACE_DATA.as_bytes())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    mod moving {
        use super::*;

        #[test]
        fn creates_missing_parents() {
            let dir = TempDir::new().unwrap();
            let from = dir.path().join("Foo.swift");
            fs::write(&from, "let x = 1").unwrap();
            let to = dir.path().join("Sources/Models/Foo.swift");

            let status = move_on_disk(&from, &to).unwrap();
            assert!(matches!(status, DiskStatus::Moved { .. }));
            assert!(!from.exists());
            assert_eq!(fs::read_to_string(&to).unwrap(), "let x = 1");
        }

        #[test]
        fn missing_source_is_reported() {
            let dir = TempDir::new().unwrap();
            let from = dir.path().join("Nope.swift");
            let status = move_on_disk(&from, &dir.path().join("B.swift")).unwrap();
            assert_eq!(status, DiskStatus::Missing(from));
        }
    }

    mod removing {
        use super::*;

        #[test]
        fn deletes_files_and_directories() {
            let dir = TempDir::new().unwrap();
            let file = dir.path().join("a.txt");
            fs::write(&file, "a").unwrap();
            let folder = dir.path().join("Assets.xcassets");
            fs::create_dir_all(folder.join("AppIcon.appiconset")).unwrap();

            assert!(matches!(remove_from_disk(&file).unwrap(), DiskStatus::Removed(_)));
            assert!(matches!(remove_from_disk(&folder).unwrap(), DiskStatus::Removed(_)));
            assert!(!file.exists());
            assert!(!folder.exists());
        }

        #[test]
        fn missing_file_is_reported() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("gone.txt");
            assert_eq!(
                remove_from_disk(&path).unwrap().to_string(),
                format!("File not found on disk: {}", path.display())
            );
        }
    }

    #[test]
    fn workspace_data_is_written_inside_bundle() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::resolve(dir.path().join("Demo.xcodeproj"));
        let written = write_workspace_data(&paths).unwrap();
        assert_eq!(written, paths.workspace_data());
        assert!(fs::read_to_string(written).unwrap().contains("self:"));
    }
}
