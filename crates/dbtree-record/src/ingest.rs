//! Conversion of raw records into documents.

use std::{io::BufRead, path::Path};

use tracing::{info, warn};

use crate::{Document, Field, IngestError, RawRecord, RecordBatch, source};

/// Documents produced from one record source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestedBatch {
    /// Database label declared by the source, if any.
    pub database_label: Option<String>,
    /// Documents in source order.
    pub documents: Vec<Document>,
}

/// Converts one raw record into a document.
///
/// Recognized fields are copied verbatim; unknown fields are ignored. A record with no
/// recognized fields yields a document whose attributes are all empty.
pub fn ingest_record(record: &RawRecord) -> Document {
    let mut doc = Document::default();
    for (name, value) in record.iter() {
        if let Some(field) = Field::from_name(name) {
            doc.set_field(field, value.to_string());
        }
    }
    doc
}

/// Converts a sequence of raw records into documents, preserving order.
pub fn ingest<'a, I>(records: I) -> Vec<Document>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut ignored = 0usize;
    let documents: Vec<Document> = records
        .into_iter()
        .map(|record| {
            ignored += record
                .iter()
                .filter(|(name, _)| Field::from_name(name).is_none())
                .count();
            ingest_record(record)
        })
        .collect();

    if ignored > 0 {
        warn!(ignored, "ignored unrecognized record fields");
    }
    documents
}

/// Converts a whole record batch, carrying its database label through.
pub fn ingest_batch(batch: &RecordBatch) -> IngestedBatch {
    IngestedBatch {
        database_label: batch.database_label.clone(),
        documents: ingest(&batch.records),
    }
}

/// Reads and ingests a tagged-record stream.
pub fn ingest_reader<R: BufRead>(reader: R) -> Result<IngestedBatch, IngestError> {
    let batch = source::read_records(reader)?;
    Ok(ingest_batch(&batch))
}

/// Reads and ingests a tagged-record file.
pub fn ingest_file(path: &Path) -> Result<IngestedBatch, IngestError> {
    let batch = source::read_records_file(path)?;
    let ingested = ingest_batch(&batch);
    info!(
        path = %path.display(),
        documents = ingested.documents.len(),
        "ingested record file"
    );
    Ok(ingested)
}
