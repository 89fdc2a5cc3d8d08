use serde::Serialize;

use crate::model::task::TaskNode;

/// Node counts over an entire forest, all depths included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForestStats {
    pub total: usize,
    pub completed: usize,
}

/// Count all nodes and all completed nodes recursively. The two counts are
/// independent traversals: a completed leaf under an uncompleted parent
/// contributes to `completed` without any relation to its ancestors.
pub fn forest_stats(forest: &[TaskNode]) -> ForestStats {
    let mut stats = ForestStats {
        total: 0,
        completed: 0,
    };
    count_into(forest, &mut stats);
    stats
}

fn count_into(nodes: &[TaskNode], stats: &mut ForestStats) {
    for node in nodes {
        stats.total += 1;
        if node.completed {
            stats.completed += 1;
        }
        count_into(&node.children, stats);
    }
}
