//! Mapping search matches back onto hierarchy leaves.

use std::collections::BTreeSet;

use dbtree_query::MatchSet;

use crate::node::{HierarchyNode, Level, NodePath};

/// A highlighted leaf and where it sits in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLeaf<'a> {
    /// Path from the root to the leaf.
    pub path: NodePath,
    /// The leaf node.
    pub node: &'a HierarchyNode,
}

/// Leaves selected for emphasis, in tree order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet<'a> {
    /// Highlighted leaves in pre-order.
    leaves: Vec<HighlightedLeaf<'a>>,
}

impl<'a> HighlightSet<'a> {
    /// Returns true if nothing is highlighted.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Number of highlighted leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Iterates over highlighted leaves in tree order.
    pub fn iter(&self) -> impl Iterator<Item = &HighlightedLeaf<'a>> {
        self.leaves.iter()
    }

    /// Returns true if the leaf at `path` is highlighted.
    pub fn contains(&self, path: &NodePath) -> bool {
        self.leaves.iter().any(|l| &l.path == path)
    }

    /// Paths of all highlighted leaves.
    pub fn paths(&self) -> BTreeSet<NodePath> {
        self.leaves.iter().map(|l| l.path.clone()).collect()
    }

    /// Distinct pids among highlighted leaves.
    pub fn pids(&self) -> BTreeSet<&'a str> {
        self.leaves.iter().filter_map(|l| l.node.pid()).collect()
    }
}

/// Selects every leaf below `tree` whose document pid, trimmed, is in `matches`.
///
/// Several leaves may share a pid; all of them are selected. An empty match set selects
/// nothing.
pub fn resolve<'a>(tree: &'a HierarchyNode, matches: &MatchSet) -> HighlightSet<'a> {
    if matches.is_empty() {
        return HighlightSet::default();
    }

    let mut leaves = Vec::new();
    let mut stack = vec![(tree, NodePath::root())];
    while let Some((node, path)) = stack.pop() {
        if node.level == Level::Leaf {
            if node.pid().is_some_and(|pid| matches.contains(pid)) {
                leaves.push(HighlightedLeaf { path, node });
            }
            continue;
        }
        for (i, child) in node.children.iter().enumerate().rev() {
            stack.push((child, path.child(i)));
        }
    }

    HighlightSet { leaves }
}
