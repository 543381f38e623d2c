//! Aggregation of documents into the grouping tree.
//!
//! Construction walks the documents once. Each grouping node owns a map from normalized
//! group key to the position of its child, so finding or creating the author, area and
//! report type branches for a document is constant time on average. Leaves are recorded
//! with their pid key and attached to their documents only after every document has been
//! seen, so all leaves for a repeated pid share the last document stored under it.

use std::{collections::HashMap, sync::Arc};

use dbtree_record::Document;
use tracing::{debug, info};

use crate::{
    Hierarchy, HierarchyError,
    key::{display_value, group_key, pid_key},
    node::{HierarchyNode, Level},
};

/// Builds the hierarchy for `database_label` from documents in ingestion order.
///
/// Fails only if the label is empty. An empty document sequence yields a root with no
/// children.
pub fn build<I>(database_label: &str, documents: I) -> Result<Hierarchy, HierarchyError>
where
    I: IntoIterator<Item = Document>,
{
    let label = database_label.trim();
    if label.is_empty() {
        return Err(HierarchyError::MissingDatabaseLabel);
    }

    let mut root = Branch::new(HierarchyNode::root(label));
    let mut table: HashMap<String, Arc<Document>> = HashMap::new();
    let mut count = 0usize;

    for doc in documents {
        count += 1;
        let author = root.child(Level::Author, &doc.author_name);
        let area = author.child(Level::Area, &doc.area);
        let report_type = area.child(Level::ReportType, &doc.report_type);

        let key = pid_key(&doc.pid);
        report_type.leaves.push(PendingLeaf {
            display: display_value(&doc.pid).to_string(),
            pid_key: key.clone(),
        });
        if table.insert(key.clone(), Arc::new(doc)).is_some() {
            debug!(pid = %key, "pid seen again; later document replaces earlier one");
        }
    }

    let root = root.finish(&table);
    info!(
        database = label,
        documents = count,
        authors = root.children.len(),
        distinct_pids = table.len(),
        "built hierarchy"
    );

    Ok(Hierarchy::new(label.to_string(), root, table))
}

/// A grouping node under construction.
struct Branch {
    /// The node itself; its children are filled in by [`Branch::finish`].
    node: HierarchyNode,
    /// Group key to position in `branches`.
    index: HashMap<String, usize>,
    /// Child branches in first-seen order.
    branches: Vec<Self>,
    /// Leaves, only populated at the report type level.
    leaves: Vec<PendingLeaf>,
}

/// A leaf waiting for its document to be resolved.
struct PendingLeaf {
    /// Trimmed raw pid for the breadcrumb.
    display: String,
    /// Key into the pid table.
    pid_key: String,
}

impl Branch {
    /// Wraps a node with empty child bookkeeping.
    fn new(node: HierarchyNode) -> Self {
        Self {
            node,
            index: HashMap::new(),
            branches: Vec::new(),
            leaves: Vec::new(),
        }
    }

    /// Returns the child branch for `value`, creating it on first sight.
    fn child(&mut self, level: Level, value: &str) -> &mut Self {
        let key = group_key(value);
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                debug!(level = level.name(), key = %key, parent = %self.node.label, "new group");
                let node =
                    HierarchyNode::group(level, &self.node.label, display_value(value), key.clone());
                self.branches.push(Self::new(node));
                let position = self.branches.len() - 1;
                self.index.insert(key, position);
                position
            }
        };
        &mut self.branches[position]
    }

    /// Converts the branch and its descendants into finished nodes.
    fn finish(self, table: &HashMap<String, Arc<Document>>) -> HierarchyNode {
        let mut node = self.node;
        let mut children: Vec<HierarchyNode> =
            self.branches.into_iter().map(|b| b.finish(table)).collect();
        children.extend(self.leaves.into_iter().filter_map(|leaf| {
            table
                .get(&leaf.pid_key)
                .map(|doc| HierarchyNode::leaf(&node.label, &leaf.display, Arc::clone(doc)))
        }));
        node.children = children;
        node
    }
}
