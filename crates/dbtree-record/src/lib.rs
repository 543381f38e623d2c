//! Record model and ingestion for dbtree.
//!
//! A record source yields flat [`RawRecord`]s: field name to text mappings. Ingestion turns
//! each raw record into a [`Document`], copying the thirteen recognized [`Field`]s verbatim
//! and ignoring everything else. Per-record anomalies never fail a batch; only an unreadable
//! source produces an [`IngestError`].
//!
//! # Example
//!
//! ```
//! use dbtree_record::ingest_reader;
//!
//! let xml = r#"<records dbName="Hosp">
//!   <document><authname>Smith</authname><pid>001</pid></document>
//! </records>"#;
//! let batch = ingest_reader(xml.as_bytes()).unwrap();
//! assert_eq!(batch.database_label.as_deref(), Some("Hosp"));
//! assert_eq!(batch.documents[0].author_name, "Smith");
//! ```

#![warn(missing_docs)]

mod document;
mod error;
mod field;
mod ingest;
mod record;
mod source;

pub use document::Document;
pub use error::IngestError;
pub use field::Field;
pub use ingest::{IngestedBatch, ingest, ingest_batch, ingest_file, ingest_reader, ingest_record};
pub use record::{RawRecord, RecordBatch};
pub use source::{read_records, read_records_file, read_records_str};
