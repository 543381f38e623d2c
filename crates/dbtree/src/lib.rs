//! dbtree: browse clinical report records as a hierarchy.
//!
//! Records from a tagged-record XML export are grouped into a
//! database > author > area > report type > pid tree. A full-text index over the same
//! records lets a query, optionally narrowed by report-type filters, highlight the
//! matching leaves of that tree.

#![warn(missing_docs)]

pub mod cli;
