//! The fixed field vocabulary of a raw record.

use std::fmt;

/// A field name recognized by the ingester.
///
/// Raw records may carry any field names; only these thirteen are copied into a
/// [`Document`](crate::Document). Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Clinical area (`area`).
    Area,
    /// Report date (`date`).
    Date,
    /// Report author (`authname`).
    AuthorName,
    /// Report title (`title`).
    Title,
    /// Report type code (`type`).
    ReportType,
    /// Document identifier (`pid`).
    Pid,
    /// Parsed report text (`parsed`).
    ParsedText,
    /// Unparsed report text (`unparsed`).
    UnparsedText,
    /// Patient first name (`firstName`).
    FirstName,
    /// Patient last name (`lastName`).
    LastName,
    /// Patient sex (`sex`).
    Sex,
    /// Patient race (`race`).
    Race,
    /// Patient date of birth (`dob`).
    Dob,
}

impl Field {
    /// Every field, in vocabulary order.
    pub const ALL: [Self; 13] = [
        Self::Area,
        Self::Date,
        Self::AuthorName,
        Self::Title,
        Self::ReportType,
        Self::Pid,
        Self::ParsedText,
        Self::UnparsedText,
        Self::FirstName,
        Self::LastName,
        Self::Sex,
        Self::Race,
        Self::Dob,
    ];

    /// Looks up a field by its raw record name.
    pub fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "area" => Self::Area,
            "date" => Self::Date,
            "authname" => Self::AuthorName,
            "title" => Self::Title,
            "type" => Self::ReportType,
            "pid" => Self::Pid,
            "parsed" => Self::ParsedText,
            "unparsed" => Self::UnparsedText,
            "firstName" => Self::FirstName,
            "lastName" => Self::LastName,
            "sex" => Self::Sex,
            "race" => Self::Race,
            "dob" => Self::Dob,
            _ => return None,
        };
        Some(field)
    }

    /// Returns the raw record name of this field.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Date => "date",
            Self::AuthorName => "authname",
            Self::Title => "title",
            Self::ReportType => "type",
            Self::Pid => "pid",
            Self::ParsedText => "parsed",
            Self::UnparsedText => "unparsed",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Sex => "sex",
            Self::Race => "race",
            Self::Dob => "dob",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
