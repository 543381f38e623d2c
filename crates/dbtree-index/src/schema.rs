//! Index schema: one Tantivy field per record field, plus the owning database.
//!
//! - `database`: database label (raw string, stored), scopes every search
//! - `pid`, `date`, `dob`: raw strings, matched exactly
//! - `unparsed`: stored only, never searched
//! - everything else: tokenized with [`DBTREE_TOKENIZER`] and stored

use dbtree_record::Field as RecordField;
use tantivy::schema::{
    Field, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing, TextOptions,
};

use crate::analyzer::DBTREE_TOKENIZER;

/// Name of the database field.
pub const DATABASE_FIELD: &str = "database";

/// How a record field is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Tokenized with the record analyzer.
    Text,
    /// Indexed as a single untokenized term.
    Raw,
    /// Stored for display, not searchable.
    StoredOnly,
}

impl FieldKind {
    /// Indexing kind for a record field.
    pub fn of(field: RecordField) -> Self {
        match field {
            RecordField::Pid | RecordField::Date | RecordField::Dob => Self::Raw,
            RecordField::UnparsedText => Self::StoredOnly,
            _ => Self::Text,
        }
    }

    /// Tantivy options for this kind.
    fn options(self) -> TextOptions {
        match self {
            Self::Text => TextOptions::default()
                .set_indexing_options(
                    TextFieldIndexing::default()
                        .set_tokenizer(DBTREE_TOKENIZER)
                        .set_index_option(IndexRecordOption::WithFreqsAndPositions),
                )
                .set_stored(),
            Self::Raw => STRING | STORED,
            Self::StoredOnly => TextOptions::default().set_stored(),
        }
    }
}

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Database label.
    pub database: Field,
    /// Document pid.
    pub pid: Field,
    /// Record fields with their Tantivy handles, in vocabulary order.
    fields: Vec<(RecordField, Field)>,
}

impl IndexSchema {
    /// Creates the schema.
    pub fn new() -> Self {
        let mut builder = Schema::builder();
        let database = builder.add_text_field(DATABASE_FIELD, STRING | STORED);

        let fields: Vec<(RecordField, Field)> = RecordField::ALL
            .iter()
            .map(|&field| {
                let handle = builder.add_text_field(field.name(), FieldKind::of(field).options());
                (field, handle)
            })
            .collect();
        let pid = fields
            .iter()
            .find(|(field, _)| *field == RecordField::Pid)
            .map_or(database, |(_, handle)| *handle);

        Self {
            schema: builder.build(),
            database,
            pid,
            fields,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Record fields and their handles.
    pub fn fields(&self) -> impl Iterator<Item = (RecordField, Field)> + '_ {
        self.fields.iter().copied()
    }

    /// Handle for one record field.
    pub fn field(&self, field: RecordField) -> Option<Field> {
        self.fields()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, handle)| handle)
    }

    /// Fields free-text queries run against: every searchable record field.
    pub fn default_search_fields(&self) -> Vec<Field> {
        self.fields()
            .filter(|(field, _)| FieldKind::of(*field) != FieldKind::StoredOnly)
            .map(|(_, handle)| handle)
            .collect()
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}
