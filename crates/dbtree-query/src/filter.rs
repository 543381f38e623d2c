//! Report-type filter tags and filter sets.

use std::{collections::BTreeSet, fmt, str::FromStr};

use thiserror::Error;

/// Index field that filter clauses constrain.
pub const TYPE_FIELD: &str = "type";

/// A report-type filter.
///
/// Declaration order is the order clauses appear in a composed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterTag {
    /// Results reports (`RSLTS`).
    Results,
    /// Surgery reports (`SURG`).
    Surgery,
    /// Emergency reports (`EMER`).
    Emergency,
    /// Notes (`NOTE`).
    Note,
}

impl FilterTag {
    /// Every tag, in clause order.
    pub const ALL: [Self; 4] = [Self::Results, Self::Surgery, Self::Emergency, Self::Note];

    /// Report type code stored in the index.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Results => "RSLTS",
            Self::Surgery => "SURG",
            Self::Emergency => "EMER",
            Self::Note => "NOTE",
        }
    }

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Results => "Results",
            Self::Surgery => "Surgery",
            Self::Emergency => "Emergency",
            Self::Note => "Note",
        }
    }

    /// Query clause for this tag, including its trailing space: `type:NOTE `.
    pub fn clause(self) -> String {
        format!("{TYPE_FIELD}:{} ", self.code())
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a filter name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter '{0}' (expected results, surgery, emergency or note)")]
pub struct FilterTagError(pub String);

impl FromStr for FilterTag {
    type Err = FilterTagError;

    /// Accepts a tag's label or code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tag| {
                tag.label().eq_ignore_ascii_case(wanted) || tag.code().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| FilterTagError(s.to_string()))
    }
}

/// The set of active filters.
///
/// Iteration follows [`FilterTag`] declaration order regardless of activation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Active tags.
    tags: BTreeSet<FilterTag>,
}

impl FilterSet {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates a tag. Returns false if it was already active.
    pub fn insert(&mut self, tag: FilterTag) -> bool {
        self.tags.insert(tag)
    }

    /// Deactivates a tag. Returns false if it was not active.
    pub fn remove(&mut self, tag: FilterTag) -> bool {
        self.tags.remove(&tag)
    }

    /// Flips a tag's state, returning the new state.
    pub fn toggle(&mut self, tag: FilterTag) -> bool {
        if self.tags.remove(&tag) {
            false
        } else {
            self.tags.insert(tag)
        }
    }

    /// Returns true if the tag is active.
    pub fn contains(&self, tag: FilterTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Returns true if no tag is active.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of active tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Iterates over active tags in clause order.
    pub fn iter(&self) -> impl Iterator<Item = FilterTag> + '_ {
        self.tags.iter().copied()
    }

    /// Concatenated clauses of the active tags; empty when none are active.
    pub fn clauses(&self) -> String {
        self.iter().map(FilterTag::clause).collect()
    }
}

impl FromIterator<FilterTag> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterTag>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[FilterTag; N]> for FilterSet {
    fn from(tags: [FilterTag; N]) -> Self {
        tags.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clause_has_trailing_space() {
        assert_eq!(FilterTag::Note.clause(), "type:NOTE ");
        assert_eq!(FilterTag::Results.clause(), "type:RSLTS ");
    }

    #[test]
    fn clauses_follow_declaration_order() {
        let mut set = FilterSet::new();
        set.insert(FilterTag::Note);
        set.insert(FilterTag::Results);
        set.insert(FilterTag::Emergency);
        assert_eq!(set.clauses(), "type:RSLTS type:EMER type:NOTE ");
    }

    #[test]
    fn activation_order_is_irrelevant() {
        let a = FilterSet::from([FilterTag::Surgery, FilterTag::Note]);
        let b = FilterSet::from([FilterTag::Note, FilterTag::Surgery]);
        assert_eq!(a, b);
        assert_eq!(a.clauses(), b.clauses());
    }

    #[test]
    fn toggle_flips_state() {
        let mut set = FilterSet::new();
        assert!(set.toggle(FilterTag::Surgery));
        assert!(set.contains(FilterTag::Surgery));
        assert!(!set.toggle(FilterTag::Surgery));
        assert!(set.is_empty());
    }

    #[test]
    fn empty_set_has_no_clauses() {
        assert_eq!(FilterSet::new().clauses(), "");
    }

    #[test]
    fn parses_labels_and_codes() {
        assert_eq!("note".parse::<FilterTag>().unwrap(), FilterTag::Note);
        assert_eq!("SURG".parse::<FilterTag>().unwrap(), FilterTag::Surgery);
        assert_eq!("Emergency".parse::<FilterTag>().unwrap(), FilterTag::Emergency);
        assert_eq!("rslts".parse::<FilterTag>().unwrap(), FilterTag::Results);
    }

    #[test]
    fn rejects_unknown_filter() {
        let err = "radiology".parse::<FilterTag>().unwrap_err();
        assert!(err.to_string().contains("radiology"));
    }
}
