//! Nodes of the aggregation tree.
//!
//! The tree is always five levels deep: a root named after the database, then authors,
//! areas and report types, then one leaf per ingested document. Children appear in the
//! order their group was first seen, never sorted.

use std::{fmt, str::FromStr, sync::Arc};

use dbtree_record::Document;
use serde::Serialize;

/// A level of the aggregation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// The database.
    Root,
    /// Report author.
    Author,
    /// Clinical area.
    Area,
    /// Report type.
    ReportType,
    /// One document.
    Leaf,
}

impl Level {
    /// Every level from the root down.
    pub const ALL: [Self; 5] = [
        Self::Root,
        Self::Author,
        Self::Area,
        Self::ReportType,
        Self::Leaf,
    ];

    /// Distance from the root (root is 0, leaves are 4).
    pub const fn depth(self) -> usize {
        match self {
            Self::Root => 0,
            Self::Author => 1,
            Self::Area => 2,
            Self::ReportType => 3,
            Self::Leaf => 4,
        }
    }

    /// Lowercase name for messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Author => "author",
            Self::Area => "area",
            Self::ReportType => "report type",
            Self::Leaf => "pid",
        }
    }

    /// Breadcrumb prefix for this level.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Root => "Database",
            Self::Author => "Author",
            Self::Area => "Area",
            Self::ReportType => "Type",
            Self::Leaf => "PID",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "root" | "database" => Ok(Self::Root),
            "author" => Ok(Self::Author),
            "area" => Ok(Self::Area),
            "type" | "report-type" | "report_type" | "report type" => Ok(Self::ReportType),
            "pid" | "leaf" => Ok(Self::Leaf),
            other => Err(format!(
                "unknown level '{other}' (expected author, area, type or pid)"
            )),
        }
    }
}

/// Position of a node, as child indices from the root.
///
/// The root's path is empty. Paths stay valid for the lifetime of an immutable tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The root's path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the `index`th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Child indices from the root.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Depth of the node this path addresses.
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

/// A node in the aggregation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    /// Level of this node.
    pub level: Level,

    /// Breadcrumb from the root, e.g. `Database: Hosp / Author: Smith / Area: ER`.
    pub label: String,

    /// This level's own display value: the database label at the root, the trimmed raw
    /// field value below it.
    pub display: String,

    /// Normalized key siblings are unique by. Absent at the root and at leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_key: Option<String>,

    /// Children in first-seen order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,

    /// The document a leaf stands for, shared with the pid lookup table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Arc<Document>>,
}

impl HierarchyNode {
    /// Creates a root node for a database.
    pub(crate) fn root(database_label: &str) -> Self {
        Self {
            level: Level::Root,
            label: format!("{}: {database_label}", Level::Root.prefix()),
            display: database_label.to_string(),
            group_key: None,
            children: Vec::new(),
            document: None,
        }
    }

    /// Creates a grouping node below `parent_label`.
    pub(crate) fn group(level: Level, parent_label: &str, display: &str, key: String) -> Self {
        Self {
            level,
            label: breadcrumb(parent_label, level, display),
            display: display.to_string(),
            group_key: Some(key),
            children: Vec::new(),
            document: None,
        }
    }

    /// Creates a leaf node below `parent_label`.
    pub(crate) fn leaf(parent_label: &str, display: &str, document: Arc<Document>) -> Self {
        Self {
            level: Level::Leaf,
            label: breadcrumb(parent_label, Level::Leaf, display),
            display: display.to_string(),
            group_key: None,
            children: Vec::new(),
            document: Some(document),
        }
    }

    /// Returns the child with the given group key.
    pub fn child(&self, group_key: &str) -> Option<&Self> {
        self.children
            .iter()
            .find(|c| c.group_key.as_deref() == Some(group_key))
    }

    /// Returns the node at `path` below this node.
    pub fn get(&self, path: &NodePath) -> Option<&Self> {
        path.indices()
            .iter()
            .try_fold(self, |node, &i| node.children.get(i))
    }

    /// The trimmed pid of a leaf's document.
    pub fn pid(&self) -> Option<&str> {
        self.document.as_deref().map(|d| d.pid.trim())
    }

    /// Returns an iterator over this node and all descendants in pre-order.
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter { stack: vec![self] }
    }

    /// Returns an iterator over the leaves below this node, in tree order.
    pub fn leaves(&self) -> impl Iterator<Item = &Self> {
        self.iter_preorder().filter(|n| n.level == Level::Leaf)
    }

    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        if self.level == Level::Leaf {
            return 1;
        }
        self.children.iter().map(Self::leaf_count).sum()
    }

    /// Returns true if this node stands for one document.
    ///
    /// Grouping nodes are never leaves, even when they have no children.
    pub fn is_leaf(&self) -> bool {
        self.level == Level::Leaf
    }
}

/// Appends one level to a breadcrumb.
fn breadcrumb(parent_label: &str, level: Level, display: &str) -> String {
    format!("{parent_label} / {}: {display}", level.prefix())
}

/// Iterator for pre-order traversal of nodes.
pub struct PreorderIter<'a> {
    /// Stack of nodes to visit (rightmost children pushed first).
    stack: Vec<&'a HierarchyNode>,
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = &'a HierarchyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
