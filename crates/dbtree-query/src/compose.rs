//! Query composition from free text and active filters.

use tracing::debug;

use crate::FilterSet;

/// Builds the query string sent to the search index.
///
/// - free text only: the text
/// - filters only: the concatenated filter clauses
/// - both: `(<clauses>) AND <text>`
/// - neither: the empty string, which callers treat as "clear highlighting"
///
/// Surrounding whitespace in the free text is ignored.
pub fn compose(free_text: &str, filters: &FilterSet) -> String {
    let text = free_text.trim();
    let clauses = filters.clauses();

    let query = match (text.is_empty(), clauses.is_empty()) {
        (true, _) => clauses,
        (false, true) => text.to_string(),
        (false, false) => format!("({clauses}) AND {text}"),
    };

    debug!(query = %query, "composed query");
    query
}
