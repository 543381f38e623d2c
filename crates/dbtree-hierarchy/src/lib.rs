//! Hierarchical aggregation and highlight resolution for dbtree.
//!
//! [`build`] groups ingested documents into a five-level tree:
//!
//! ```text
//! Database: Hosp
//! ├── Author: Smith
//! │   └── Area: Cardio
//! │       └── Type: Note
//! │           ├── PID: 001
//! │           └── PID: 002
//! └── Author: Jones
//!     └── Area: ER
//!         └── Type: Surgery
//!             └── PID: 003
//! ```
//!
//! Siblings are unique by a normalized group key (trimmed, upper-cased, empty values
//! replaced by [`NOT_SPECIFIED`]) and appear in first-seen order. Leaves are never
//! deduplicated: every document gets its own leaf.
//!
//! [`resolve`] maps a search index's match set onto leaves, and [`HighlightSession`] wires
//! query composition, search and resolution into a single request/response call.
//!
//! # Example
//!
//! ```
//! use dbtree_hierarchy::{build, resolve};
//! use dbtree_query::MatchSet;
//! use dbtree_record::Document;
//!
//! let docs = vec![Document {
//!     author_name: "Smith".into(),
//!     pid: "001".into(),
//!     ..Document::default()
//! }];
//! let hierarchy = build("Hosp", docs).unwrap();
//! let matches = MatchSet::from(["001".to_string()]);
//! assert_eq!(resolve(hierarchy.root(), &matches).len(), 1);
//! ```

#![warn(missing_docs)]

mod build;
mod error;
mod hierarchy;
mod highlight;
mod key;
mod node;
mod session;

pub use build::build;
pub use error::HierarchyError;
pub use hierarchy::{Hierarchy, HierarchySummary};
pub use highlight::{HighlightSet, HighlightedLeaf, resolve};
pub use key::{NOT_SPECIFIED, display_value, group_key, pid_key};
pub use node::{HierarchyNode, Level, NodePath, PreorderIter};
pub use session::{CancelFlag, Cancelled, HighlightOutcome, HighlightRequest, HighlightSession};
