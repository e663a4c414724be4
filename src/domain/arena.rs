//! Arena-backed forest for the course level view.

use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::key::YearGroupKey;

/// Node classification in the rendered hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Programme,
    Course,
    /// Synthesized "course across all years" grouping level
    AllYears,
    Unit,
    /// Synthesized homepage leaf
    Overview,
}

/// Data payload for view tree nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub kind: NodeKind,
    /// Host platform course id, 0 when the node has no platform counterpart
    pub platform_id: u64,
    pub full_name: String,
    pub short_name: String,
    /// Stable identifier used for year-group reconciliation
    pub id_number: String,
    pub enrolled: bool,
    /// Grouping key, set on course nodes until the all-years pass consumes it
    pub year_group: Option<YearGroupKey>,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for unattached nodes
    pub parent: Option<Index>,
    /// Indices of child nodes. `None` marks a leaf; an empty list marks a
    /// node that is expandable but currently childless.
    pub children: Option<Vec<Index>>,
}

impl TreeNode {
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Arena-based forest for efficient hierarchy management.
///
/// Uses generational arena for memory-safe node references and O(1)
/// lookups. Roots are explicit and ordered: nodes are inserted unattached
/// and only become visible once adopted or promoted to a root.
#[derive(Debug, Default)]
pub struct CourseTree {
    arena: Arena<TreeNode>,
    roots: Vec<Index>,
}

impl CourseTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self, data))]
    pub fn insert(&mut self, data: NodeData) -> Index {
        self.arena.insert(TreeNode {
            data,
            parent: None,
            children: None,
        })
    }

    /// Append `child` to `parent`'s child list, recording the back-pointer.
    #[instrument(level = "trace", skip(self))]
    pub fn adopt(&mut self, parent: Index, child: Index) {
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.get_or_insert_with(Vec::new).push(child);
        }
    }

    /// Detach and return all of `parent`'s children, leaving it a leaf.
    #[instrument(level = "trace", skip(self))]
    pub fn abandon_children(&mut self, parent: Index) -> Vec<Index> {
        let children = self
            .arena
            .get_mut(parent)
            .and_then(|node| node.children.take())
            .unwrap_or_default();
        for &child in &children {
            if let Some(node) = self.arena.get_mut(child) {
                node.parent = None;
            }
        }
        children
    }

    pub fn push_root(&mut self, idx: Index) {
        self.roots.push(idx);
    }

    /// Top-level nodes in display order.
    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    /// Ordered child indices of a node, empty for leaves.
    pub fn children(&self, idx: Index) -> Vec<Index> {
        self.node(idx)
            .and_then(|node| node.children.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Preorder traversal over all nodes reachable from the roots.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Depth of the deepest root subtree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        if let Some(node) = self.node(idx) {
            1 + node
                .children
                .iter()
                .flatten()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a CourseTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a CourseTree) -> Self {
        let stack = tree.roots.iter().rev().copied().collect();
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().flatten().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str) -> NodeData {
        NodeData {
            kind: NodeKind::Course,
            platform_id: 0,
            full_name: name.to_string(),
            short_name: name.to_string(),
            id_number: String::new(),
            enrolled: false,
            year_group: None,
        }
    }

    #[test]
    fn test_adopt_links_both_directions() {
        let mut tree = CourseTree::new();
        let parent = tree.insert(data("parent"));
        let child = tree.insert(data("child"));
        tree.adopt(parent, child);

        assert_eq!(tree.children(parent), vec![child]);
        assert_eq!(tree.node(child).unwrap().parent, Some(parent));
    }

    #[test]
    fn test_abandon_children_leaves_a_leaf() {
        let mut tree = CourseTree::new();
        let parent = tree.insert(data("parent"));
        let child = tree.insert(data("child"));
        tree.adopt(parent, child);

        let abandoned = tree.abandon_children(parent);

        assert_eq!(abandoned, vec![child]);
        assert!(tree.node(parent).unwrap().children.is_none());
        assert_eq!(tree.node(child).unwrap().parent, None);
    }

    #[test]
    fn test_iter_visits_forest_preorder() {
        let mut tree = CourseTree::new();
        let a = tree.insert(data("a"));
        let a1 = tree.insert(data("a1"));
        let a2 = tree.insert(data("a2"));
        let b = tree.insert(data("b"));
        tree.adopt(a, a1);
        tree.adopt(a, a2);
        tree.push_root(a);
        tree.push_root(b);

        let names: Vec<_> = tree.iter().map(|(_, n)| n.data.full_name.clone()).collect();
        assert_eq!(names, vec!["a", "a1", "a2", "b"]);
    }

    #[test]
    fn test_unattached_nodes_are_invisible() {
        let mut tree = CourseTree::new();
        let root = tree.insert(data("root"));
        tree.insert(data("floating"));
        tree.push_root(root);

        assert_eq!(tree.iter().count(), 1);
        assert_eq!(tree.depth(), 1);
    }
}
