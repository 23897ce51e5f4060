//! Newtype wrappers for monday.com identifiers.
//!
//! Item, board, and column ids are numeric in the monday.com UI but are
//! carried here as opaque strings: webhook payloads deliver them as JSON
//! numbers that can exceed safe integer ranges in other tooling, and the
//! GraphQL API accepts and returns them as `ID` strings. The newtypes also
//! prevent accidental mixing (e.g., passing a board id where an item id is
//! expected).

use serde::{Deserialize, Serialize};
use std::fmt;

/// An item (or subitem) id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(s: impl Into<String>) -> Self {
        ItemId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

/// A board id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(pub String);

impl BoardId {
    pub fn new(s: impl Into<String>) -> Self {
        BoardId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BoardId {
    fn from(s: String) -> Self {
        BoardId(s)
    }
}

impl From<&str> for BoardId {
    fn from(s: &str) -> Self {
        BoardId(s.to_string())
    }
}

/// A column id.
///
/// Column ids are stable identifiers (e.g., `date7`) distinct from the
/// column's display label, which users can rename freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(pub String);

impl ColumnId {
    pub fn new(s: impl Into<String>) -> Self {
        ColumnId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        ColumnId(s)
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        ColumnId(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_serializes_transparently() {
        let id = ItemId::new("123456789");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"123456789\"");

        let parsed: ItemId = serde_json::from_str("\"987\"").unwrap();
        assert_eq!(parsed, ItemId::new("987"));
    }

    #[test]
    fn ids_display_as_raw_strings() {
        assert_eq!(ItemId::new("42").to_string(), "42");
        assert_eq!(BoardId::new("7").to_string(), "7");
        assert_eq!(ColumnId::new("date7").to_string(), "date7");
    }

    #[test]
    fn column_ids_compare_by_value() {
        assert_eq!(ColumnId::from("date7"), ColumnId::new("date7"));
        assert_ne!(ColumnId::new("date7"), ColumnId::new("date8"));
    }
}
