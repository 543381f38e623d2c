//! The built hierarchy and its pid lookup table.

use std::{collections::HashMap, sync::Arc};

use dbtree_record::Document;
use serde::Serialize;

use crate::node::{HierarchyNode, Level};

/// An immutable aggregation tree together with its pid to document table.
#[derive(Debug, Clone, Serialize)]
pub struct Hierarchy {
    /// Label of the database the tree is rooted at.
    database_label: String,
    /// Root node.
    root: HierarchyNode,
    /// Normalized pid to the last document ingested with that pid.
    #[serde(skip)]
    documents: HashMap<String, Arc<Document>>,
}

/// Node counts per level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HierarchySummary {
    /// Distinct authors.
    pub authors: usize,
    /// Area nodes across all authors.
    pub areas: usize,
    /// Report type nodes across all areas.
    pub report_types: usize,
    /// Leaves, one per ingested document.
    pub leaves: usize,
    /// Distinct normalized pids.
    pub distinct_pids: usize,
}

impl Hierarchy {
    /// Assembles a hierarchy from its parts.
    pub(crate) fn new(
        database_label: String,
        root: HierarchyNode,
        documents: HashMap<String, Arc<Document>>,
    ) -> Self {
        Self {
            database_label,
            root,
            documents,
        }
    }

    /// Label of the database this tree is rooted at.
    pub fn database_label(&self) -> &str {
        &self.database_label
    }

    /// Root node.
    pub fn root(&self) -> &HierarchyNode {
        &self.root
    }

    /// Looks up a document by pid. Surrounding whitespace in `pid` is ignored.
    pub fn document(&self, pid: &str) -> Option<&Arc<Document>> {
        self.documents.get(pid.trim())
    }

    /// The pid to document table.
    pub fn documents(&self) -> &HashMap<String, Arc<Document>> {
        &self.documents
    }

    /// Leaves in tree order.
    pub fn leaves(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.root.leaves()
    }

    /// Counts nodes at each level.
    pub fn summary(&self) -> HierarchySummary {
        let mut summary = HierarchySummary {
            distinct_pids: self.documents.len(),
            ..HierarchySummary::default()
        };
        for node in self.root.iter_preorder() {
            match node.level {
                Level::Root => {}
                Level::Author => summary.authors += 1,
                Level::Area => summary.areas += 1,
                Level::ReportType => summary.report_types += 1,
                Level::Leaf => summary.leaves += 1,
            }
        }
        summary
    }

    /// Splits into the root node and the pid table.
    pub fn into_parts(self) -> (HierarchyNode, HashMap<String, Arc<Document>>) {
        (self.root, self.documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;

    fn doc(author: &str, area: &str, report_type: &str, pid: &str) -> Document {
        Document {
            author_name: author.into(),
            area: area.into(),
            report_type: report_type.into(),
            pid: pid.into(),
            ..Document::default()
        }
    }

    #[test]
    fn summary_counts_levels() {
        let hierarchy = build(
            "Hosp",
            vec![
                doc("Smith", "Cardio", "Note", "1"),
                doc("Smith", "ER", "Note", "2"),
                doc("Jones", "ER", "Surg", "3"),
                doc("Jones", "ER", "Surg", "3"),
            ],
        )
        .unwrap();

        assert_eq!(
            hierarchy.summary(),
            HierarchySummary {
                authors: 2,
                areas: 3,
                report_types: 3,
                leaves: 4,
                distinct_pids: 3,
            }
        );
    }

    #[test]
    fn document_lookup_trims() {
        let hierarchy = build("Hosp", vec![doc("A", "B", "C", " 42 ")]).unwrap();
        assert!(hierarchy.document("42").is_some());
        assert!(hierarchy.document(" 42").is_some());
        assert!(hierarchy.document("43").is_none());
    }

    #[test]
    fn into_parts_returns_shared_documents() {
        let hierarchy = build("Hosp", vec![doc("A", "B", "C", "1")]).unwrap();
        let (root, table) = hierarchy.into_parts();
        let leaf = root.leaves().next().unwrap();
        assert!(Arc::ptr_eq(leaf.document.as_ref().unwrap(), &table["1"]));
    }

    #[test]
    fn serializes_tree_to_json() {
        let hierarchy = build("Hosp", vec![doc("Smith", "ER", "Note", "1")]).unwrap();
        let json = serde_json::to_value(&hierarchy).unwrap();
        assert_eq!(json["database_label"], "Hosp");
        assert_eq!(json["root"]["level"], "root");
        assert_eq!(json["root"]["children"][0]["group_key"], "SMITH");
        let leaf = &json["root"]["children"][0]["children"][0]["children"][0]["children"][0];
        assert_eq!(leaf["level"], "leaf");
        assert_eq!(leaf["document"]["pid"], "1");
    }
}
