use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::task::TaskNode;

/// Tasks without a due date sort after every real date in ascending order
const NO_DUE_DATE: &str = "9999-12-31";

/// Sort key for ordering sibling task lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Lexicographic on the creation timestamp (zero-padded, fixed-width)
    #[default]
    CreateDate,
    /// By priority rank, Critical highest
    Priority,
    /// Lexicographic on `YYYY-MM-DD`; empty due dates last when ascending
    DueDate,
    /// Case-insensitive on the task text
    Name,
}

impl SortKey {
    /// Compare two siblings under this key, ascending.
    pub fn compare(self, a: &TaskNode, b: &TaskNode) -> Ordering {
        match self {
            SortKey::CreateDate => a.create_date.cmp(&b.create_date),
            SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortKey::DueDate => due_key(a).cmp(due_key(b)),
            SortKey::Name => a.text.to_lowercase().cmp(&b.text.to_lowercase()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::CreateDate => "created",
            SortKey::Priority => "priority",
            SortKey::DueDate => "due",
            SortKey::Name => "name",
        };
        f.write_str(name)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "created" | "create-date" => Ok(SortKey::CreateDate),
            "priority" => Ok(SortKey::Priority),
            "due" | "due-date" => Ok(SortKey::DueDate),
            "name" => Ok(SortKey::Name),
            _ => Err(format!(
                "unknown sort key '{}' (expected created, priority, due, or name)",
                s
            )),
        }
    }
}

fn due_key(node: &TaskNode) -> &str {
    if node.due_date.is_empty() {
        NO_DUE_DATE
    } else {
        &node.due_date
    }
}

/// Sort every sibling list in the forest by the same key and direction.
///
/// Each `children` list is ordered independently; there is no merged global
/// order across subtrees. The sort is stable, and descending reverses the
/// comparison only — equal keys keep their original relative order either way.
pub fn sort_forest(forest: &mut [TaskNode], key: SortKey, ascending: bool) {
    forest.sort_by(|a, b| {
        let ord = key.compare(a, b);
        if ascending { ord } else { ord.reverse() }
    });
    for node in forest {
        sort_forest(&mut node.children, key, ascending);
    }
}
