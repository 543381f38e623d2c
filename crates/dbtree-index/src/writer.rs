//! Index writer: stores documents under their database label.

use std::{fs, path::Path};

use dbtree_record::Document;
use tantivy::{
    Index, IndexWriter as TantivyIndexWriter, TantivyDocument, Term, directory::MmapDirectory,
};
use tracing::{debug, info};

use crate::{
    analyzer::{DBTREE_TOKENIZER, build_analyzer_from_name},
    error::IndexError,
    schema::{FieldKind, IndexSchema},
    searcher::TantivyIndex,
};

/// Default heap size for the index writer (50 MB).
const DEFAULT_HEAP_SIZE: usize = 50_000_000;

/// Writes documents to a Tantivy index.
///
/// Rebuilds are whole-database: [`replace_database`](Self::replace_database) drops every
/// document carrying the label and adds the new batch in one commit.
pub struct IndexWriter {
    /// The Tantivy index.
    index: Index,
    /// The underlying Tantivy writer.
    writer: TantivyIndexWriter,
    /// Schema with field handles.
    schema: IndexSchema,
    /// Stemming language the analyzer was built with.
    stemmer: String,
}

impl IndexWriter {
    /// Opens or creates an index at the given path.
    pub fn open(path: &Path, stemmer: &str) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();

        fs::create_dir_all(path)?;

        let dir =
            MmapDirectory::open(path).map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        let index = Index::open_or_create(dir, schema.schema().clone())
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        Self::from_index(index, schema, stemmer)
    }

    /// Creates an empty index held in memory.
    pub fn in_memory(stemmer: &str) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();
        let index = Index::create_in_ram(schema.schema().clone());
        Self::from_index(index, schema, stemmer)
    }

    /// Registers the analyzer and opens a writer on `index`.
    fn from_index(index: Index, schema: IndexSchema, stemmer: &str) -> Result<Self, IndexError> {
        let analyzer = build_analyzer_from_name(stemmer)?;
        index.tokenizers().register(DBTREE_TOKENIZER, analyzer);

        let writer = index
            .writer(DEFAULT_HEAP_SIZE)
            .map_err(|e| IndexError::write(&e))?;

        Ok(Self {
            index,
            writer,
            schema,
            stemmer: stemmer.to_string(),
        })
    }

    /// Stages one document under `database`. The label and identifier fields are stored
    /// trimmed.
    ///
    /// Nothing is visible until [`commit`](Self::commit).
    pub fn add_document(&mut self, database: &str, doc: &Document) -> Result<(), IndexError> {
        let mut tantivy_doc = TantivyDocument::new();
        tantivy_doc.add_text(self.schema.database, database.trim());
        for (field, handle) in self.schema.fields() {
            let value = doc.field(field);
            match FieldKind::of(field) {
                FieldKind::Raw => tantivy_doc.add_text(handle, value.trim()),
                FieldKind::Text | FieldKind::StoredOnly => tantivy_doc.add_text(handle, value),
            }
        }

        self.writer
            .add_document(tantivy_doc)
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Stages removal of every document stored under `database`.
    pub fn delete_database(&mut self, database: &str) {
        let term = Term::from_field_text(self.schema.database, database.trim());
        self.writer.delete_term(term);
    }

    /// Replaces the contents of one database and commits.
    ///
    /// Returns the number of documents added.
    pub fn replace_database<'a, I>(&mut self, database: &str, docs: I) -> Result<usize, IndexError>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        self.delete_database(database);
        let mut added = 0;
        for doc in docs {
            self.add_document(database, doc)?;
            added += 1;
        }
        self.commit()?;
        info!(database, documents = added, "rebuilt database index");
        Ok(added)
    }

    /// Commits all pending changes to the index.
    pub fn commit(&mut self) -> Result<(), IndexError> {
        let opstamp = self.writer.commit().map_err(|e| IndexError::commit(&e))?;
        debug!(opstamp, "committed index");
        Ok(())
    }

    /// Stages removal of every document in the index.
    pub fn delete_all(&mut self) -> Result<(), IndexError> {
        self.writer
            .delete_all_documents()
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Number of committed documents.
    pub fn num_docs(&self) -> Result<u64, IndexError> {
        let reader = self.index.reader().map_err(|e| IndexError::read(&e))?;
        Ok(reader.searcher().num_docs())
    }

    /// A searcher over this writer's committed documents.
    pub fn searcher(&self) -> Result<TantivyIndex, IndexError> {
        TantivyIndex::from_index(self.index.clone(), &self.stemmer)
    }
}

#[cfg(test)]
mod test {
    use dbtree_query::SearchIndex;
    use tempfile::TempDir;

    use super::*;

    fn doc(pid: &str, report_type: &str) -> Document {
        Document {
            pid: pid.into(),
            report_type: report_type.into(),
            parsed_text: "chest pain on exertion".into(),
            ..Document::default()
        }
    }

    #[test]
    fn creates_index_in_empty_directory() {
        let temp = TempDir::new().unwrap();
        let writer = IndexWriter::open(temp.path(), "english").unwrap();
        assert!(temp.path().join("meta.json").exists());
        drop(writer);
    }

    #[test]
    fn rejects_unknown_stemmer() {
        assert!(matches!(
            IndexWriter::in_memory("klingon"),
            Err(IndexError::InvalidLanguage(_))
        ));
    }

    #[test]
    fn uncommitted_documents_are_not_counted() {
        let mut writer = IndexWriter::in_memory("english").unwrap();
        writer.add_document("Hosp", &doc("1", "NOTE")).unwrap();
        assert_eq!(writer.num_docs().unwrap(), 0);
        writer.commit().unwrap();
        assert_eq!(writer.num_docs().unwrap(), 1);
    }

    #[test]
    fn replace_database_keeps_other_databases() {
        let mut writer = IndexWriter::in_memory("english").unwrap();
        writer
            .replace_database("Hosp", &[doc("1", "NOTE"), doc("2", "SURG")])
            .unwrap();
        writer.replace_database("Clinic", &[doc("9", "NOTE")]).unwrap();
        assert_eq!(writer.num_docs().unwrap(), 3);

        let added = writer.replace_database("Hosp", &[doc("3", "EMER")]).unwrap();
        assert_eq!(added, 1);
        assert_eq!(writer.num_docs().unwrap(), 2);
    }

    #[test]
    fn padded_label_is_stored_trimmed() {
        let mut writer = IndexWriter::in_memory("english").unwrap();
        writer.replace_database(" Hosp ", &[doc("1", "NOTE")]).unwrap();
        let index = writer.searcher().unwrap();
        assert_eq!(index.count_database("Hosp").unwrap(), 1);
        assert!(index.search("Hosp", "chest").unwrap().contains("1"));

        writer.replace_database("Hosp", &[doc("2", "NOTE")]).unwrap();
        assert_eq!(writer.num_docs().unwrap(), 1);
    }

    #[test]
    fn delete_all_empties_index() {
        let mut writer = IndexWriter::in_memory("english").unwrap();
        writer.replace_database("Hosp", &[doc("1", "NOTE")]).unwrap();
        writer.delete_all().unwrap();
        writer.commit().unwrap();
        assert_eq!(writer.num_docs().unwrap(), 0);
    }

    #[test]
    fn reopening_keeps_committed_documents() {
        let temp = TempDir::new().unwrap();
        {
            let mut writer = IndexWriter::open(temp.path(), "english").unwrap();
            writer.replace_database("Hosp", &[doc("1", "NOTE")]).unwrap();
        }
        let writer = IndexWriter::open(temp.path(), "english").unwrap();
        assert_eq!(writer.num_docs().unwrap(), 1);
    }
}
