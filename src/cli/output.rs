use crate::model::task::TaskNode;
use crate::ops::stats::ForestStats;

/// Render the forest as an indented tree with display paths.
///
/// ```text
/// 1 [x] groceries  (Medium)
///   1.1 [ ] milk  (Low, due 2026-09-01)
/// ```
pub fn render_forest(forest: &[TaskNode]) -> String {
    if forest.is_empty() {
        return "no tasks\n".to_string();
    }
    let mut out = String::new();
    render_level(forest, "", 0, &mut out);
    out
}

fn render_level(nodes: &[TaskNode], prefix: &str, depth: usize, out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        let path = if prefix.is_empty() {
            format!("{}", i + 1)
        } else {
            format!("{}.{}", prefix, i + 1)
        };
        let mark = if node.completed { 'x' } else { ' ' };
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{} [{}] {}  ({}", path, mark, node.text, node.priority));
        if !node.due_date.is_empty() {
            out.push_str(&format!(", due {}", node.due_date));
        }
        out.push_str(")\n");
        render_level(&node.children, &path, depth + 1, out);
    }
}

/// One-line counters, matching the persisted totals
pub fn render_stats(stats: &ForestStats) -> String {
    format!("Total: {} | Completed: {}\n", stats.total, stats.completed)
}
