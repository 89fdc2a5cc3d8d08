use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ops::sort::SortKey;

/// Persisted sort preference, kept beside the task file so the selected
/// ordering carries across invocations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            sort_by: SortKey::CreateDate,
            ascending: true,
        }
    }
}

/// State file path for a given task file (`todos.json` → `todos.state.json`)
pub fn state_path(data_path: &Path) -> PathBuf {
    data_path.with_extension("state.json")
}

/// Read the sort state for a task file. Missing or unreadable state is
/// not an error — the caller falls back to defaults.
pub fn read_sort_state(data_path: &Path) -> Option<SortState> {
    let content = fs::read_to_string(state_path(data_path)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write the sort state beside the task file
pub fn write_sort_state(data_path: &Path, state: &SortState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(state_path(data_path), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("todos.json");
        let state = SortState {
            sort_by: SortKey::Priority,
            ascending: false,
        };

        write_sort_state(&data, &state).unwrap();
        assert_eq!(read_sort_state(&data), Some(state));
    }

    #[test]
    fn missing_state_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_sort_state(&dir.path().join("todos.json")).is_none());
    }

    #[test]
    fn malformed_state_returns_none() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("todos.json");
        fs::write(state_path(&data), "not json {{{").unwrap();
        assert!(read_sort_state(&data).is_none());
    }

    #[test]
    fn serde_defaults_on_empty_object() {
        let state: SortState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.sort_by, SortKey::CreateDate);
        assert!(state.ascending);
    }

    #[test]
    fn state_lives_beside_the_data_file() {
        let path = state_path(Path::new("some/dir/todos.json"));
        assert_eq!(path, Path::new("some/dir/todos.state.json"));
    }
}
