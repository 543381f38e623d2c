//! Group key normalization.

/// Key and display value substituted for empty fields.
pub const NOT_SPECIFIED: &str = "_Not Specified";

/// Normalized key used to compare siblings at a grouping level.
///
/// The value is trimmed and upper-cased; an empty result becomes [`NOT_SPECIFIED`].
pub fn group_key(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

/// Normalized key for a document identifier: trimmed, never case-folded.
pub fn pid_key(pid: &str) -> String {
    display_value(pid).to_string()
}

/// Value shown in breadcrumbs: the raw value without surrounding whitespace.
pub fn display_value(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_SPECIFIED
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_key_trims_and_uppercases() {
        assert_eq!(group_key("  Smith "), "SMITH");
        assert_eq!(group_key("er"), "ER");
    }

    #[test]
    fn empty_values_become_sentinel() {
        assert_eq!(group_key(""), NOT_SPECIFIED);
        assert_eq!(group_key(" \t\n"), NOT_SPECIFIED);
        assert_eq!(pid_key("   "), NOT_SPECIFIED);
        assert_eq!(display_value(""), NOT_SPECIFIED);
    }

    #[test]
    fn pid_key_keeps_case() {
        assert_eq!(pid_key(" ab-01 "), "ab-01");
    }

    #[test]
    fn display_value_keeps_case() {
        assert_eq!(display_value(" Cardio "), "Cardio");
    }
}
