//! Query composition for dbtree searches.
//!
//! The user's query state is a piece of free text plus a set of report-type filters
//! (checkboxes in an interactive front end). [`compose`] turns that state into one boolean
//! query string in the index's field-qualified syntax:
//!
//! - `chest pain` - free text searched across every indexed field
//! - `type:NOTE ` - one clause per active [`FilterTag`]
//! - `(type:NOTE ) AND chest pain` - both combined
//!
//! The [`SearchIndex`] trait is the boundary to whatever full-text index executes the query.
//!
//! # Example
//!
//! ```
//! use dbtree_query::{FilterSet, FilterTag, compose};
//!
//! let filters = FilterSet::from([FilterTag::Note]);
//! assert_eq!(compose("chestpain", &filters), "(type:NOTE ) AND chestpain");
//! ```

#![warn(missing_docs)]

mod compose;
mod filter;
mod search;

pub use compose::compose;
pub use filter::{FilterSet, FilterTag, FilterTagError, TYPE_FIELD};
pub use search::{MatchSet, SearchError, SearchIndex};
