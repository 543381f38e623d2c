//! Tantivy-backed full-text index for dbtree.
//!
//! [`IndexWriter`] stores each document under its database label; [`TantivyIndex`]
//! implements [`dbtree_query::SearchIndex`] by parsing the composed query, restricting it
//! to one database and returning the pids of every matching document.
//!
//! ```
//! use dbtree_index::IndexWriter;
//! use dbtree_query::SearchIndex;
//! use dbtree_record::Document;
//!
//! let mut writer = IndexWriter::in_memory("english").unwrap();
//! let doc = Document {
//!     pid: "001".into(),
//!     parsed_text: "chest pain".into(),
//!     ..Document::default()
//! };
//! writer.replace_database("Hosp", [&doc]).unwrap();
//!
//! let index = writer.searcher().unwrap();
//! assert!(index.search("Hosp", "pain").unwrap().contains("001"));
//! ```

#![warn(missing_docs)]

mod analyzer;
mod error;
mod location;
mod schema;
mod searcher;
mod writer;

pub use analyzer::{DBTREE_TOKENIZER, build_analyzer, build_analyzer_from_name, parse_language};
pub use error::IndexError;
pub use location::{DATA_DIR, index_directory, index_exists};
pub use schema::{DATABASE_FIELD, FieldKind, IndexSchema};
pub use searcher::TantivyIndex;
pub use writer::IndexWriter;
