use crate::model::task::{NodeRef, Priority, TaskNode};
use crate::ops::complete::set_completion;
use crate::ops::sort::{SortKey, sort_forest};
use crate::ops::stats::{ForestStats, forest_stats};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task text must not be empty")]
    EmptyText,
    #[error("no task for reference {0:?}")]
    NotFound(NodeRef),
}

/// Partial update for a task's editable fields. `None` leaves a field alone;
/// `completed`, `create_date`, and `children` are never touched by an edit.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<String>,
}

/// Owns the forest of root tasks and hands out stable [`NodeRef`]s.
///
/// Every add, edit, or toggle re-runs a full recursive re-sort with the
/// currently selected key and direction, so the forest order always reflects
/// the active sort. Refs stay valid across re-sorts; stale refs (from nodes
/// since removed) make mutations a silent no-op rather than an error.
pub struct TaskStore {
    roots: Vec<TaskNode>,
    next_id: u64,
    sort_key: SortKey,
    ascending: bool,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::with_sort(SortKey::default(), true)
    }

    pub fn with_sort(sort_key: SortKey, ascending: bool) -> Self {
        TaskStore {
            roots: Vec::new(),
            next_id: 1,
            sort_key,
            ascending,
        }
    }

    /// Adopt a loaded forest: assign fresh refs throughout and apply the
    /// current ordering. Replaces whatever the store held before.
    pub fn load_forest(&mut self, forest: Vec<TaskNode>) {
        self.roots = forest;
        assign_refs(&mut self.roots, &mut self.next_id);
        self.resort();
    }

    /// The ordered root tasks (the persisted document shape)
    pub fn roots(&self) -> &[TaskNode] {
        &self.roots
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn ascending(&self) -> bool {
        self.ascending
    }

    /// Add a top-level task. Text is trimmed; empty text is rejected.
    pub fn add_root(
        &mut self,
        text: &str,
        priority: Priority,
        due_date: &str,
    ) -> Result<NodeRef, StoreError> {
        let node = self.new_node(text, priority, due_date)?;
        let id = node.id;
        self.roots.push(node);
        self.resort();
        Ok(id)
    }

    /// Add a subtask under `parent`. Fails with `NotFound` if the parent
    /// ref no longer resolves — creation needs a live parent.
    pub fn add_child(
        &mut self,
        parent: NodeRef,
        text: &str,
        priority: Priority,
        due_date: &str,
    ) -> Result<NodeRef, StoreError> {
        let node = self.new_node(text, priority, due_date)?;
        let id = node.id;
        let parent_node =
            find_mut_in(&mut self.roots, parent).ok_or(StoreError::NotFound(parent))?;
        parent_node.children.push(node);
        self.resort();
        Ok(id)
    }

    /// Resolve a ref anywhere in the forest.
    pub fn find(&self, node: NodeRef) -> Option<&TaskNode> {
        find_in(&self.roots, node)
    }

    /// Delete the node and its entire subtree, wherever it lives.
    /// A stale ref is a no-op; returns whether anything was removed.
    pub fn remove(&mut self, node: NodeRef) -> bool {
        remove_in(&mut self.roots, node)
    }

    /// Apply the given fields only. Patched text is trimmed and must be
    /// non-empty. A stale ref is a no-op returning `Ok(false)`.
    pub fn update_fields(&mut self, node: NodeRef, patch: TaskPatch) -> Result<bool, StoreError> {
        let text = match patch.text {
            Some(t) => {
                let t = t.trim().to_string();
                if t.is_empty() {
                    return Err(StoreError::EmptyText);
                }
                Some(t)
            }
            None => None,
        };

        let Some(task) = find_mut_in(&mut self.roots, node) else {
            return Ok(false);
        };
        if let Some(t) = text {
            task.text = t;
        }
        if let Some(p) = patch.priority {
            task.priority = p;
        }
        if let Some(d) = patch.due_date {
            task.due_date = d;
        }
        self.resort();
        Ok(true)
    }

    /// Set completion on the node and cascade it through the whole subtree.
    /// A stale ref is a no-op; returns whether anything changed.
    pub fn set_completed(&mut self, node: NodeRef, value: bool) -> bool {
        let Some(task) = find_mut_in(&mut self.roots, node) else {
            return false;
        };
        set_completion(task, value);
        self.resort();
        true
    }

    /// Remove completed root tasks along with their entire subtrees; their
    /// children go with them even when uncompleted. Completed non-root
    /// tasks are never touched. Returns the number of roots removed.
    pub fn clear_completed_roots(&mut self) -> usize {
        let before = self.roots.len();
        self.roots.retain(|n| !n.completed);
        before - self.roots.len()
    }

    /// Empty the forest.
    pub fn clear_all(&mut self) {
        self.roots.clear();
    }

    /// Select the sort key and direction, and reorder the whole forest.
    pub fn set_sort(&mut self, key: SortKey, ascending: bool) {
        self.sort_key = key;
        self.ascending = ascending;
        self.resort();
    }

    pub fn stats(&self) -> ForestStats {
        forest_stats(&self.roots)
    }

    fn new_node(
        &mut self,
        text: &str,
        priority: Priority,
        due_date: &str,
    ) -> Result<TaskNode, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let mut node = TaskNode::new(text.to_string(), priority, due_date.to_string());
        node.id = NodeRef(self.next_id);
        self.next_id += 1;
        Ok(node)
    }

    fn resort(&mut self) {
        sort_forest(&mut self.roots, self.sort_key, self.ascending);
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Forest traversal helpers
// ---------------------------------------------------------------------------

fn assign_refs(nodes: &mut [TaskNode], next_id: &mut u64) {
    for node in nodes {
        node.id = NodeRef(*next_id);
        *next_id += 1;
        assign_refs(&mut node.children, next_id);
    }
}

fn find_in(nodes: &[TaskNode], target: NodeRef) -> Option<&TaskNode> {
    for node in nodes {
        if node.id == target {
            return Some(node);
        }
        if let Some(found) = find_in(&node.children, target) {
            return Some(found);
        }
    }
    None
}

fn find_mut_in(nodes: &mut [TaskNode], target: NodeRef) -> Option<&mut TaskNode> {
    for node in nodes {
        if node.id == target {
            return Some(node);
        }
        if let Some(found) = find_mut_in(&mut node.children, target) {
            return Some(found);
        }
    }
    None
}

fn remove_in(nodes: &mut Vec<TaskNode>, target: NodeRef) -> bool {
    if let Some(idx) = nodes.iter().position(|n| n.id == target) {
        nodes.remove(idx);
        return true;
    }
    for node in nodes {
        if remove_in(&mut node.children, target) {
            return true;
        }
    }
    false
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
