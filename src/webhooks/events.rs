//! Typed monday.com webhook events.
//!
//! A webhook delivery is either the one-time registration challenge or an
//! event envelope `{"event": {"type": ..., ...}}`. Only two event types
//! drive the sync engine:
//!
//! - `create_pulse` - an item was created (a subitem creation carries a
//!   parent reference)
//! - `update_column_value` - a column value changed
//!
//! Everything else classifies as [`WebhookEvent::Unknown`], which is
//! acknowledged with a no-op success response: monday.com expects 2xx for
//! every subscribed event type, including ones we choose not to act on.

use serde::{Deserialize, Serialize};

use crate::types::{BoardId, ColumnId, ItemId};

/// A classified webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookEvent {
    /// Registration handshake; the value is echoed back verbatim.
    Challenge(serde_json::Value),

    /// An item was created.
    CreateItem(CreateItemEvent),

    /// A column value changed on an item.
    UpdateColumnValue(UpdateColumnValueEvent),

    /// Any event type we do not handle, or a payload missing required
    /// identifiers. Not an error.
    Unknown,
}

/// Reference to a subitem's parent, present on subitem creation events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub item_id: ItemId,
    pub board_id: BoardId,
}

/// A `create_pulse` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemEvent {
    /// The newly created item.
    pub item_id: ItemId,

    /// The board the item lives on.
    pub board_id: BoardId,

    /// Set when the new item is a subitem; both the parent item id and the
    /// parent's board id must be present for the sync to know where to
    /// read the deadline from.
    pub parent: Option<ParentRef>,
}

/// An `update_column_value` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateColumnValueEvent {
    pub item_id: ItemId,

    pub board_id: BoardId,

    /// The column that changed.
    pub column_id: ColumnId,

    /// The new value as raw JSON text. `None` when the column was cleared
    /// (the payload carries JSON `null`).
    pub raw_value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serde_roundtrip() {
        let event = WebhookEvent::UpdateColumnValue(UpdateColumnValueEvent {
            item_id: ItemId::new("1"),
            board_id: BoardId::new("2"),
            column_id: ColumnId::new("date7"),
            raw_value: Some(r#"{"date":"2023-03-15"}"#.to_string()),
        });

        let json = serde_json::to_string(&event).unwrap();
        let parsed: WebhookEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
