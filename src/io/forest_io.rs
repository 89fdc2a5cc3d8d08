use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::task::TaskNode;

/// Error type for task-file I/O
#[derive(Debug, thiserror::Error)]
pub enum ForestIoError {
    #[error("could not parse {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize tasks for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },
}

/// Load the task file.
///
/// A missing file is first-run: an empty document is written back and an
/// empty forest returned. A malformed document is a `Corrupt` error and
/// nothing is written — the caller keeps whatever it already had in memory.
pub fn load_forest(path: &Path) -> Result<Vec<TaskNode>, ForestIoError> {
    if !path.exists() {
        save_forest(path, &[])?;
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(|e| ForestIoError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ForestIoError::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Overwrite the task file with the whole forest as pretty-printed JSON.
/// The write goes through a temp file in the same directory and a rename,
/// so a crash mid-write never leaves a truncated document.
pub fn save_forest(path: &Path, forest: &[TaskNode]) -> Result<(), ForestIoError> {
    let content = serde_json::to_string_pretty(forest).map_err(|e| ForestIoError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    atomic_write(path, content.as_bytes()).map_err(|e| ForestIoError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    // A bare filename has an empty parent
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
