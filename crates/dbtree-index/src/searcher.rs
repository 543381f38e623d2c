//! Searching the index on behalf of the highlight session.

use std::path::Path;

use dbtree_query::{MatchSet, SearchError, SearchIndex};
use tantivy::{
    Index, IndexReader, ReloadPolicy, TantivyDocument, Term,
    collector::{Count, DocSetCollector},
    directory::MmapDirectory,
    query::{BooleanQuery, Occur, Query, QueryParser, TermQuery},
    schema::{IndexRecordOption, Value},
};
use tracing::debug;

use crate::{
    IndexError,
    analyzer::{DBTREE_TOKENIZER, build_analyzer_from_name},
    schema::IndexSchema,
};

/// A [`SearchIndex`] backed by a Tantivy index.
///
/// Queries use Tantivy's query syntax over every searchable record field, with terms
/// combined by OR unless the query says otherwise. Every search is restricted to one
/// database and returns the complete set of matching pids.
#[derive(Clone)]
pub struct TantivyIndex {
    /// The Tantivy index.
    index: Index,
    /// Schema with field handles.
    schema: IndexSchema,
}

impl TantivyIndex {
    /// Opens an existing index for searching.
    pub fn open(path: &Path, stemmer: &str) -> Result<Self, IndexError> {
        if !path.exists() {
            return Err(IndexError::OpenIndex {
                path: path.to_path_buf(),
                message: "index directory does not exist".to_string(),
            });
        }

        let dir =
            MmapDirectory::open(path).map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        let index = Index::open(dir).map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        Self::from_index(index, stemmer)
    }

    /// Wraps an already open index, registering the analyzer for `stemmer`.
    pub fn from_index(index: Index, stemmer: &str) -> Result<Self, IndexError> {
        let analyzer = build_analyzer_from_name(stemmer)?;
        index.tokenizers().register(DBTREE_TOKENIZER, analyzer);
        Ok(Self {
            index,
            schema: IndexSchema::new(),
        })
    }

    /// Total number of documents across all databases.
    pub fn num_docs(&self) -> Result<u64, IndexError> {
        let reader = self.reader().map_err(|e| IndexError::read(&e))?;
        Ok(reader.searcher().num_docs())
    }

    /// Number of documents stored under `database`.
    pub fn count_database(&self, database: &str) -> Result<usize, IndexError> {
        let reader = self.reader().map_err(|e| IndexError::read(&e))?;
        reader
            .searcher()
            .search(&self.database_query(database), &Count)
            .map_err(|e| IndexError::read(&e))
    }

    /// A reader pinned to the latest commit.
    fn reader(&self) -> tantivy::Result<IndexReader> {
        self.index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
    }

    /// Exact match on the database label.
    fn database_query(&self, database: &str) -> TermQuery {
        TermQuery::new(
            Term::from_field_text(self.schema.database, database.trim()),
            IndexRecordOption::Basic,
        )
    }

    /// Parses `query` and restricts it to `database`.
    fn scoped_query(&self, database: &str, query: &str) -> Result<BooleanQuery, SearchError> {
        let parser = QueryParser::for_index(&self.index, self.schema.default_search_fields());
        let parsed = parser
            .parse_query(query)
            .map_err(|e| SearchError::QueryParse {
                query: query.to_string(),
                message: e.to_string(),
            })?;
        let scope: Box<dyn Query> = Box::new(self.database_query(database));
        Ok(BooleanQuery::new(vec![(Occur::Must, parsed), (Occur::Must, scope)]))
    }
}

impl SearchIndex for TantivyIndex {
    fn search(&self, database: &str, query: &str) -> Result<MatchSet, SearchError> {
        if query.trim().is_empty() {
            return Ok(MatchSet::new());
        }

        let scoped = self.scoped_query(database, query)?;
        let unavailable = |e: tantivy::TantivyError| SearchError::Unavailable(e.to_string());

        let searcher = self.reader().map_err(unavailable)?.searcher();
        let addresses = searcher.search(&scoped, &DocSetCollector).map_err(unavailable)?;

        let mut matches = MatchSet::with_capacity(addresses.len());
        for address in addresses {
            let doc: TantivyDocument = searcher.doc(address).map_err(unavailable)?;
            if let Some(pid) = doc
                .get_first(self.schema.pid)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|pid| !pid.is_empty())
            {
                matches.insert(pid.to_string());
            }
        }

        debug!(database, query, matches = matches.len(), "index search");
        Ok(matches)
    }
}
