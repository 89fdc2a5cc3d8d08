use crate::model::task::TaskNode;

/// Set a node and every descendant to the same completion state.
///
/// Propagation is downward only: checking a parent completes everything
/// below it, but completing every child never auto-completes the parent.
pub fn set_completion(node: &mut TaskNode, value: bool) {
    node.completed = value;
    for child in &mut node.children {
        set_completion(child, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;

    fn node(text: &str, children: Vec<TaskNode>) -> TaskNode {
        let mut n = TaskNode::new(text.into(), Priority::Medium, String::new());
        n.children = children;
        n
    }

    fn assert_all(node: &TaskNode, value: bool) {
        assert_eq!(node.completed, value, "node {:?}", node.text);
        for child in &node.children {
            assert_all(child, value);
        }
    }

    #[test]
    fn cascade_down_three_levels() {
        let mut root = node(
            "root",
            vec![
                node("a", vec![node("a1", vec![]), node("a2", vec![])]),
                node("b", vec![]),
            ],
        );

        set_completion(&mut root, true);
        assert_all(&root, true);

        set_completion(&mut root, false);
        assert_all(&root, false);
    }

    #[test]
    fn uncompleting_a_parent_clears_completed_descendants() {
        let mut root = node("root", vec![node("a", vec![])]);
        root.children[0].completed = true;

        set_completion(&mut root, false);
        assert!(!root.completed);
        assert!(!root.children[0].completed);
    }

    #[test]
    fn no_upward_propagation() {
        let mut root = node("root", vec![node("a", vec![]), node("b", vec![])]);

        for child in &mut root.children {
            set_completion(child, true);
        }
        assert!(root.children.iter().all(|c| c.completed));
        assert!(!root.completed);
    }
}
