use std::fmt;
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Task priority level, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// The display name, which is also the persisted form
    pub fn name(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    /// Parse a persisted priority name. Unrecognized values normalize
    /// to Medium so that older or hand-edited task files keep loading.
    pub fn from_name(s: &str) -> Priority {
        match s {
            "Low" => Priority::Low,
            "Medium" => Priority::Medium,
            "High" => Priority::High,
            "Critical" => Priority::Critical,
            _ => Priority::Medium,
        }
    }

    /// Sort rank: Critical=4 > High=3 > Medium=2 > Low=1
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Critical => 4,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strict parse for command-line input — a typo should be an error,
/// unlike loading, where unknown values fall back to Medium.
impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(format!(
                "unknown priority '{}' (expected low, medium, high, or critical)",
                s
            )),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Priority::from_name(&s))
    }
}

/// Stable handle to a task node, assigned when the node enters a store.
/// Refs survive re-sorts and unrelated mutations, and are never reused
/// within a store's lifetime. The default value is the unassigned sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeRef(pub(crate) u64);

/// A task with its fields and nested subtasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskNode {
    /// Task text (non-empty, trimmed)
    pub text: String,
    /// Completion flag; setting it cascades to all descendants
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    /// Due date as `YYYY-MM-DD`, or empty for no due date
    #[serde(default)]
    pub due_date: String,
    /// Creation timestamp `YYYY-MM-DD HH:MM:SS`, set once and never edited
    #[serde(default = "now_stamp")]
    pub create_date: String,
    /// Subtasks (recursive); insertion order is the current sort order
    #[serde(default)]
    pub children: Vec<TaskNode>,

    /// In-memory handle owned by the store; not persisted
    #[serde(skip)]
    pub id: NodeRef,
}

impl TaskNode {
    /// Create a fresh, uncompleted task stamped with the current time.
    /// The ref stays unassigned until a store adopts the node.
    pub fn new(text: String, priority: Priority, due_date: String) -> Self {
        TaskNode {
            text,
            completed: false,
            priority,
            due_date,
            create_date: now_stamp(),
            children: Vec::new(),
            id: NodeRef::default(),
        }
    }
}

impl PartialEq for TaskNode {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.completed == other.completed
            && self.priority == other.priority
            && self.due_date == other.due_date
            && self.create_date == other.create_date
            && self.children == other.children
    }
}

impl Eq for TaskNode {}

/// Current local time in the persisted `YYYY-MM-DD HH:MM:SS` form
pub fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_round_trips_by_name() {
        for p in [
            Priority::Low,
            Priority::Medium,
            Priority::High,
            Priority::Critical,
        ] {
            assert_eq!(Priority::from_name(p.name()), p);
        }
    }

    #[test]
    fn unknown_priority_normalizes_to_medium() {
        assert_eq!(Priority::from_name("Urgent"), Priority::Medium);
        assert_eq!(Priority::from_name(""), Priority::Medium);
    }

    #[test]
    fn cli_parse_is_strict() {
        assert_eq!("CRITICAL".parse::<Priority>(), Ok(Priority::Critical));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn rank_ordering() {
        assert!(Priority::Critical.rank() > Priority::High.rank());
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn equality_ignores_ref() {
        let mut a = TaskNode::new("same".into(), Priority::Medium, String::new());
        let mut b = a.clone();
        a.id = NodeRef(1);
        b.id = NodeRef(2);
        assert_eq!(a, b);
    }

    #[test]
    fn now_stamp_shape() {
        let stamp = now_stamp();
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[13..14], ":");
    }
}
