//! The ingested document entity.

use serde::{Deserialize, Serialize};

use crate::Field;

/// One ingested record.
///
/// Every attribute is a plain string; an empty string means the source did not provide
/// the field. Values are stored exactly as read: trimming and case folding happen during
/// aggregation, never here, so report text keeps its original layout for display.
///
/// JSON keys use the raw record vocabulary (`authname`, `type`, `parsed`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Clinical area.
    pub area: String,
    /// Report date.
    pub date: String,
    /// Report author.
    #[serde(rename = "authname")]
    pub author_name: String,
    /// Report title.
    pub title: String,
    /// Report type code, e.g. `NOTE` or `SURG`.
    #[serde(rename = "type")]
    pub report_type: String,
    /// Document identifier.
    pub pid: String,
    /// Parsed report text.
    #[serde(rename = "parsed")]
    pub parsed_text: String,
    /// Unparsed report text.
    #[serde(rename = "unparsed")]
    pub unparsed_text: String,
    /// Patient first name.
    #[serde(rename = "firstName")]
    pub first_name: String,
    /// Patient last name.
    #[serde(rename = "lastName")]
    pub last_name: String,
    /// Patient sex.
    pub sex: String,
    /// Patient race.
    pub race: String,
    /// Patient date of birth.
    pub dob: String,
}

impl Document {
    /// Returns the value of a field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Area => &self.area,
            Field::Date => &self.date,
            Field::AuthorName => &self.author_name,
            Field::Title => &self.title,
            Field::ReportType => &self.report_type,
            Field::Pid => &self.pid,
            Field::ParsedText => &self.parsed_text,
            Field::UnparsedText => &self.unparsed_text,
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Sex => &self.sex,
            Field::Race => &self.race,
            Field::Dob => &self.dob,
        }
    }

    /// Sets the value of a field.
    pub fn set_field(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Area => &mut self.area,
            Field::Date => &mut self.date,
            Field::AuthorName => &mut self.author_name,
            Field::Title => &mut self.title,
            Field::ReportType => &mut self.report_type,
            Field::Pid => &mut self.pid,
            Field::ParsedText => &mut self.parsed_text,
            Field::UnparsedText => &mut self.unparsed_text,
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Sex => &mut self.sex,
            Field::Race => &mut self.race,
            Field::Dob => &mut self.dob,
        };
        *slot = value;
    }

    /// Returns `(field, value)` pairs for every field, in vocabulary order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(|f| (f, self.field(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_every_field() {
        let mut doc = Document::default();
        for field in Field::ALL {
            doc.set_field(field, format!("v-{}", field.name()));
        }
        for (field, value) in doc.fields() {
            assert_eq!(value, format!("v-{}", field.name()));
        }
    }

    #[test]
    fn json_uses_record_vocabulary() {
        let doc = Document {
            author_name: "Smith".into(),
            report_type: "NOTE".into(),
            first_name: "Ann".into(),
            ..Document::default()
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["authname"], "Smith");
        assert_eq!(json["type"], "NOTE");
        assert_eq!(json["firstName"], "Ann");

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }
}
