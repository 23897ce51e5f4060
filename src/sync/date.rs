//! The canonical monday.com date column encoding.
//!
//! Date columns store their value as a JSON-encoded string, e.g.
//! `{"date":"2023-03-15"}` (possibly with extra fields such as
//! `changed_at`). A cleared column is reported as JSON `null` or the
//! literal string `"null"`. Everything written back is normalized to
//! exactly `{"date":"YYYY-MM-DD"}` - zero-padded, Gregorian, no time
//! component.

use chrono::NaiveDate;
use std::fmt;

/// A parsed date column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateValue(NaiveDate);

impl DateValue {
    /// Wraps a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        DateValue(date)
    }

    /// Parses a raw column value as delivered by the API or a webhook
    /// payload.
    ///
    /// Returns `None` for anything that does not carry a usable date:
    /// empty input, `null` (JSON or the literal text monday sometimes
    /// sends), malformed JSON, a missing or empty `date` field, or a
    /// `date` string that is not `YYYY-MM-DD`.
    pub fn from_column_json(raw: &str) -> Option<DateValue> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "null" {
            return None;
        }

        let value: serde_json::Value = serde_json::from_str(raw).ok()?;
        let date_str = value.get("date")?.as_str()?;
        if date_str.is_empty() {
            return None;
        }

        NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .ok()
            .map(DateValue)
    }

    /// Encodes the value in the canonical form monday.com expects for a
    /// `change_column_value` mutation.
    pub fn to_column_json(&self) -> String {
        serde_json::json!({ "date": self.to_string() }).to_string()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_canonical_encoding() {
        let parsed = DateValue::from_column_json(r#"{"date":"2023-03-15"}"#).unwrap();
        assert_eq!(parsed.as_naive(), NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
    }

    #[test]
    fn parses_value_with_extra_fields() {
        // The API includes bookkeeping fields alongside the date.
        let raw = r#"{"date":"2024-01-02","icon":null,"changed_at":"2024-01-02T10:00:00.000Z"}"#;
        let parsed = DateValue::from_column_json(raw).unwrap();
        assert_eq!(parsed.to_string(), "2024-01-02");
    }

    #[test]
    fn cleared_column_parses_to_none() {
        assert_eq!(DateValue::from_column_json("null"), None);
        assert_eq!(DateValue::from_column_json(""), None);
        assert_eq!(DateValue::from_column_json("  "), None);
        assert_eq!(DateValue::from_column_json("{}"), None);
        assert_eq!(DateValue::from_column_json(r#"{"date":null}"#), None);
        assert_eq!(DateValue::from_column_json(r#"{"date":""}"#), None);
    }

    #[test]
    fn malformed_input_parses_to_none() {
        assert_eq!(DateValue::from_column_json("not json"), None);
        assert_eq!(DateValue::from_column_json(r#"{"date":"15/03/2023"}"#), None);
        assert_eq!(DateValue::from_column_json(r#"{"date":"2023-13-40"}"#), None);
        assert_eq!(DateValue::from_column_json(r#"{"date":42}"#), None);
    }

    #[test]
    fn encoding_is_zero_padded() {
        let date = DateValue::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(date.to_column_json(), r#"{"date":"2024-03-05"}"#);
    }

    proptest! {
        /// encode -> decode -> encode is the identity for every valid date.
        #[test]
        fn encode_decode_roundtrip(year in 1900i32..=9999, month in 1u32..=12, day in 1u32..=28) {
            let date = DateValue::new(NaiveDate::from_ymd_opt(year, month, day).unwrap());
            let encoded = date.to_column_json();
            let decoded = DateValue::from_column_json(&encoded).unwrap();
            prop_assert_eq!(decoded, date);
            prop_assert_eq!(decoded.to_column_json(), encoded);
        }

        /// Parsing never panics, whatever the input.
        #[test]
        fn parse_never_panics(raw in ".{0,64}") {
            let _ = DateValue::from_column_json(&raw);
        }
    }
}
