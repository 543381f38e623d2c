//! Tagged-record XML source.
//!
//! A record file has a single root element whose `dbName` attribute names the database.
//! Each child of the root is one record, and each child of a record is one field:
//!
//! ```xml
//! <records dbName="Hosp">
//!   <document>
//!     <authname>Smith</authname>
//!     <pid>001</pid>
//!   </document>
//! </records>
//! ```
//!
//! Field text is taken verbatim, including surrounding whitespace. Elements nested inside a
//! field are flattened into the field's text.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use tracing::debug;

use crate::{IngestError, RawRecord, RecordBatch};

/// Root attribute carrying the database label.
const DATABASE_ATTRIBUTE: &[u8] = b"dbName";

/// Reads a tagged-record file from disk.
pub fn read_records_file(path: &Path) -> Result<RecordBatch, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(BufReader::new(file))
}

/// Reads tagged records from an in-memory string.
pub fn read_records_str(xml: &str) -> Result<RecordBatch, IngestError> {
    read_records(xml.as_bytes())
}

/// Reads tagged records from any buffered reader.
pub fn read_records<R: BufRead>(source: R) -> Result<RecordBatch, IngestError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut state = ParseState::default();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| IngestError::malformed(position(&reader), e.to_string()))?;
        let at = position(&reader);

        match event {
            Event::Start(e) => state.open(&e, at)?,
            Event::Empty(e) => {
                state.open(&e, at)?;
                state.close();
            }
            Event::End(_) => state.close(),
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| IngestError::malformed(at, e.to_string()))?;
                state.text(&text);
            }
            Event::CData(c) => state.text(&String::from_utf8_lossy(&c.into_inner())),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let batch = state.finish(position(&reader))?;
    debug!(
        records = batch.records.len(),
        database = ?batch.database_label,
        "read tagged-record source"
    );
    Ok(batch)
}

/// Current byte offset of the reader.
fn position<R>(reader: &Reader<R>) -> u64 {
    u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX)
}

/// Element nesting state while walking the event stream.
#[derive(Default)]
struct ParseState {
    /// Number of currently open elements.
    depth: usize,
    /// Whether the root element has been seen.
    saw_root: bool,
    /// Label from the root's `dbName` attribute.
    database_label: Option<String>,
    /// Completed records.
    records: Vec<RawRecord>,
    /// Record currently being read.
    record: Option<RawRecord>,
    /// Field currently being read: name and accumulated text.
    field: Option<(String, String)>,
}

impl ParseState {
    /// Handles an opening (or self-closing) element.
    fn open(&mut self, element: &BytesStart<'_>, at: u64) -> Result<(), IngestError> {
        match self.depth {
            0 => {
                if self.saw_root {
                    return Err(IngestError::malformed(at, "multiple root elements"));
                }
                self.saw_root = true;
                self.database_label = database_label(element, at)?;
            }
            1 => self.record = Some(RawRecord::new()),
            2 => {
                let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                self.field = Some((name, String::new()));
            }
            _ => {}
        }
        self.depth += 1;
        Ok(())
    }

    /// Handles a closing element.
    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        match self.depth {
            1 => {
                if let Some(record) = self.record.take() {
                    self.records.push(record);
                }
            }
            2 => {
                if let Some((name, value)) = self.field.take()
                    && let Some(record) = self.record.as_mut()
                {
                    record.insert(name, value);
                }
            }
            _ => {}
        }
    }

    /// Appends character data to the open field, if any.
    fn text(&mut self, text: &str) {
        if let Some((_, value)) = self.field.as_mut() {
            value.push_str(text);
        }
    }

    /// Checks the document was complete and returns the batch.
    fn finish(self, at: u64) -> Result<RecordBatch, IngestError> {
        if !self.saw_root {
            return Err(IngestError::malformed(at, "missing root element"));
        }
        if self.depth > 0 {
            return Err(IngestError::malformed(at, "unexpected end of input"));
        }
        Ok(RecordBatch {
            database_label: self.database_label,
            records: self.records,
        })
    }
}

/// Extracts the `dbName` attribute from the root element.
fn database_label(root: &BytesStart<'_>, at: u64) -> Result<Option<String>, IngestError> {
    for attr in root.attributes() {
        let attr = attr.map_err(|e| IngestError::malformed(at, e.to_string()))?;
        if attr.key.local_name().as_ref() == DATABASE_ATTRIBUTE {
            let value = attr
                .unescape_value()
                .map_err(|e| IngestError::malformed(at, e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
