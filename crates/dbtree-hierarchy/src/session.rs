//! Request/response query handling over a built hierarchy.
//!
//! A [`HighlightSession`] runs compose, search and resolve for one request at a time.
//! It holds no state between requests: each call takes the full query state and returns
//! a complete outcome, or [`Cancelled`] if the caller aborted it, in which case the
//! caller keeps whatever it was showing before.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use dbtree_query::{FilterSet, MatchSet, SearchError, SearchIndex, compose};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    Hierarchy,
    highlight::{HighlightSet, resolve},
};

/// A shareable flag a caller sets to abandon an in-flight request.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The request was cancelled; no highlight state was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search cancelled")]
pub struct Cancelled;

/// Query state for one request.
#[derive(Debug, Clone, Default)]
pub struct HighlightRequest {
    /// Free-text part of the query.
    pub free_text: String,
    /// Active report-type filters.
    pub filters: FilterSet,
    /// Optional cancellation flag.
    pub cancel: Option<CancelFlag>,
}

impl HighlightRequest {
    /// Creates a request without cancellation.
    pub fn new(free_text: impl Into<String>, filters: FilterSet) -> Self {
        Self {
            free_text: free_text.into(),
            filters,
            cancel: None,
        }
    }

    /// Attaches a cancellation flag.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Returns true if the attached flag has been set.
    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}

/// Result of one request.
#[derive(Debug, Clone, Default)]
pub struct HighlightOutcome<'a> {
    /// The composed query; empty when highlighting was cleared.
    pub query: String,
    /// Pids the index returned.
    pub matches: MatchSet,
    /// Leaves to emphasize.
    pub leaves: HighlightSet<'a>,
    /// The index error the search degraded from, if any.
    pub degraded: Option<SearchError>,
}

impl HighlightOutcome<'_> {
    /// Outcome of an empty query: nothing highlighted, no search issued.
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Returns true if the request cleared highlighting.
    pub fn is_cleared(&self) -> bool {
        self.query.is_empty()
    }

    /// Number of matched documents.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Result count message, e.g. `3 results found`.
    pub fn summary_line(&self) -> String {
        match self.match_count() {
            1 => "1 result found".to_string(),
            n => format!("{n} results found"),
        }
    }
}

/// Runs queries against one hierarchy and index.
pub struct HighlightSession<'a, S> {
    /// The tree results are resolved against.
    hierarchy: &'a Hierarchy,
    /// The index queries are sent to.
    index: S,
}

impl<'a, S: SearchIndex> HighlightSession<'a, S> {
    /// Creates a session.
    pub fn new(hierarchy: &'a Hierarchy, index: S) -> Self {
        Self { hierarchy, index }
    }

    /// The hierarchy this session resolves against.
    pub fn hierarchy(&self) -> &'a Hierarchy {
        self.hierarchy
    }

    /// Runs one request.
    ///
    /// An empty composed query clears highlighting without touching the index. Index
    /// failures degrade to an empty match set and are reported in
    /// [`HighlightOutcome::degraded`].
    pub fn run(&self, request: &HighlightRequest) -> Result<HighlightOutcome<'a>, Cancelled> {
        let query = compose(&request.free_text, &request.filters);
        if query.is_empty() {
            debug!("empty query; clearing highlights");
            return Ok(HighlightOutcome::cleared());
        }
        if request.is_cancelled() {
            return Err(Cancelled);
        }

        let database = self.hierarchy.database_label();
        let (matches, degraded) = match self.index.search(database, &query) {
            Ok(matches) => (matches, None),
            Err(error) => {
                warn!(%error, query = %query, "search failed; showing no matches");
                (MatchSet::new(), Some(error))
            }
        };

        if request.is_cancelled() {
            debug!(query = %query, "search cancelled; discarding results");
            return Err(Cancelled);
        }

        let leaves = resolve(self.hierarchy.root(), &matches);
        debug!(
            query = %query,
            matches = matches.len(),
            leaves = leaves.len(),
            "resolved highlights"
        );

        Ok(HighlightOutcome {
            query,
            matches,
            leaves,
            degraded,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use dbtree_query::FilterTag;
    use dbtree_record::Document;

    use super::*;
    use crate::build;

    /// Index returning a fixed answer and recording the queries it saw.
    struct FixedIndex {
        /// Answer for every search.
        answer: Result<MatchSet, SearchError>,
        /// `(database, query)` pairs received.
        seen: RefCell<Vec<(String, String)>>,
        /// Flag to set while searching, simulating a cancel during I/O.
        cancel_during_search: Option<CancelFlag>,
    }

    impl FixedIndex {
        fn new(answer: Result<MatchSet, SearchError>) -> Self {
            Self {
                answer,
                seen: RefCell::new(Vec::new()),
                cancel_during_search: None,
            }
        }
    }

    impl SearchIndex for FixedIndex {
        fn search(&self, database: &str, query: &str) -> Result<MatchSet, SearchError> {
            self.seen
                .borrow_mut()
                .push((database.to_string(), query.to_string()));
            if let Some(flag) = &self.cancel_during_search {
                flag.cancel();
            }
            self.answer.clone()
        }
    }

    fn hierarchy() -> Hierarchy {
        let doc = |author: &str, report_type: &str, pid: &str| Document {
            author_name: author.into(),
            area: "Cardio".into(),
            report_type: report_type.into(),
            pid: pid.into(),
            ..Document::default()
        };
        build(
            "Hosp",
            vec![doc("Smith", "NOTE", "001"), doc("Smith", "NOTE", "002"), doc("Jones", "SURG", "003")],
        )
        .unwrap()
    }

    #[test]
    fn runs_composed_query_scoped_to_database() {
        let hierarchy = hierarchy();
        let index = FixedIndex::new(Ok(MatchSet::from(["002".to_string()])));
        let session = HighlightSession::new(&hierarchy, &index);

        let request = HighlightRequest::new("chestpain", FilterSet::from([FilterTag::Note]));
        let outcome = session.run(&request).unwrap();

        assert_eq!(outcome.query, "(type:NOTE ) AND chestpain");
        assert_eq!(outcome.leaves.len(), 1);
        assert_eq!(outcome.summary_line(), "1 result found");
        assert!(outcome.degraded.is_none());
        assert_eq!(
            index.seen.borrow().as_slice(),
            &[("Hosp".to_string(), "(type:NOTE ) AND chestpain".to_string())]
        );
    }

    #[test]
    fn empty_query_clears_without_searching() {
        let hierarchy = hierarchy();
        let index = FixedIndex::new(Ok(MatchSet::from(["001".to_string()])));
        let session = HighlightSession::new(&hierarchy, &index);

        let outcome = session.run(&HighlightRequest::default()).unwrap();
        assert!(outcome.is_cleared());
        assert!(outcome.leaves.is_empty());
        assert!(index.seen.borrow().is_empty());
    }

    #[test]
    fn unavailable_index_degrades_to_no_matches() {
        let hierarchy = hierarchy();
        let error = SearchError::Unavailable("index offline".into());
        let index = FixedIndex::new(Err(error.clone()));
        let session = HighlightSession::new(&hierarchy, &index);

        let outcome = session
            .run(&HighlightRequest::new("pain", FilterSet::new()))
            .unwrap();
        assert!(outcome.leaves.is_empty());
        assert_eq!(outcome.match_count(), 0);
        assert_eq!(outcome.summary_line(), "0 results found");
        assert_eq!(outcome.degraded, Some(error));
    }

    #[test]
    fn rejected_query_degrades_like_unavailable() {
        let hierarchy = hierarchy();
        let index = FixedIndex::new(Err(SearchError::QueryParse {
            query: "(".into(),
            message: "unbalanced".into(),
        }));
        let session = HighlightSession::new(&hierarchy, &index);

        let outcome = session.run(&HighlightRequest::new("(", FilterSet::new())).unwrap();
        assert!(outcome.leaves.is_empty());
        assert!(matches!(outcome.degraded, Some(SearchError::QueryParse { .. })));
    }

    #[test]
    fn cancelled_before_search_does_not_search() {
        let hierarchy = hierarchy();
        let index = FixedIndex::new(Ok(MatchSet::new()));
        let session = HighlightSession::new(&hierarchy, &index);

        let flag = CancelFlag::new();
        flag.cancel();
        let request = HighlightRequest::new("pain", FilterSet::new()).with_cancel(flag);
        assert_eq!(session.run(&request).unwrap_err(), Cancelled);
        assert!(index.seen.borrow().is_empty());
    }

    #[test]
    fn cancelled_during_search_discards_results() {
        let hierarchy = hierarchy();
        let flag = CancelFlag::new();
        let mut index = FixedIndex::new(Ok(MatchSet::from(["001".to_string()])));
        index.cancel_during_search = Some(flag.clone());
        let session = HighlightSession::new(&hierarchy, &index);

        let request = HighlightRequest::new("pain", FilterSet::new()).with_cancel(flag);
        assert!(session.run(&request).is_err());
        assert_eq!(index.seen.borrow().len(), 1);
    }

    #[test]
    fn counts_matches_not_leaves() {
        let hierarchy = hierarchy();
        let index = FixedIndex::new(Ok(MatchSet::from([
            "001".to_string(),
            "003".to_string(),
            "999".to_string(),
        ])));
        let session = HighlightSession::new(&hierarchy, &index);

        let outcome = session
            .run(&HighlightRequest::new("x", FilterSet::new()))
            .unwrap();
        assert_eq!(outcome.leaves.len(), 2);
        assert_eq!(outcome.summary_line(), "3 results found");
    }
}
