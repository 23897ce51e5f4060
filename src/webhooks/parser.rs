//! Webhook payload classifier.
//!
//! This module turns an already-parsed JSON payload into a typed
//! [`WebhookEvent`] in a single validating step, so business logic never
//! digs through untyped JSON.
//!
//! # Classification rules
//!
//! 1. A top-level `challenge` field wins over everything else.
//! 2. `event.type == "create_pulse"` requires an item id and board id;
//!    a parent reference is captured when both parent fields are present.
//! 3. `event.type == "update_column_value"` additionally requires a column
//!    id; the new value is kept as raw JSON text.
//! 4. Anything else - other event types, a missing `event` object, missing
//!    required identifiers - classifies as [`WebhookEvent::Unknown`].
//!
//! Unknown is deliberately not an error: the sender expects a 2xx for every
//! subscribed event type. Only a body that is not valid JSON at all is
//! rejected, and that happens at the HTTP layer before classification.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{BoardId, ColumnId, ItemId};

use super::events::{CreateItemEvent, ParentRef, UpdateColumnValueEvent, WebhookEvent};

/// Classifies a webhook payload.
pub fn classify(payload: &Value) -> WebhookEvent {
    if let Some(challenge) = payload.get("challenge") {
        return WebhookEvent::Challenge(challenge.clone());
    }

    let raw: RawEnvelope = match serde_json::from_value(payload.clone()) {
        Ok(raw) => raw,
        Err(_) => return WebhookEvent::Unknown,
    };

    let Some(event) = raw.event else {
        return WebhookEvent::Unknown;
    };

    match event.kind.as_deref() {
        Some("create_pulse") => classify_create_pulse(event),
        Some("update_column_value") => classify_update_column_value(event),
        _ => WebhookEvent::Unknown,
    }
}

fn classify_create_pulse(event: RawEvent) -> WebhookEvent {
    let (Some(item_id), Some(board_id)) = (
        event.item_id.as_ref().and_then(id_string),
        event.board_id.as_ref().and_then(id_string),
    ) else {
        return WebhookEvent::Unknown;
    };

    // A parent reference is only usable when both halves are present.
    let parent = match (
        event.parent_item_id.as_ref().and_then(id_string),
        event.parent_board_id.as_ref().and_then(id_string),
    ) {
        (Some(item), Some(board)) => Some(ParentRef {
            item_id: ItemId(item),
            board_id: BoardId(board),
        }),
        _ => None,
    };

    WebhookEvent::CreateItem(CreateItemEvent {
        item_id: ItemId(item_id),
        board_id: BoardId(board_id),
        parent,
    })
}

fn classify_update_column_value(event: RawEvent) -> WebhookEvent {
    let (Some(item_id), Some(board_id), Some(column_id)) = (
        event.item_id.as_ref().and_then(id_string),
        event.board_id.as_ref().and_then(id_string),
        event.column_id.as_ref().and_then(id_string),
    ) else {
        return WebhookEvent::Unknown;
    };

    let raw_value = match &event.value {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.to_string()),
    };

    WebhookEvent::UpdateColumnValue(UpdateColumnValueEvent {
        item_id: ItemId(item_id),
        board_id: BoardId(board_id),
        column_id: ColumnId(column_id),
        raw_value,
    })
}

/// Renders an id field as an opaque string.
///
/// monday.com delivers ids as JSON numbers in webhook payloads but as
/// strings in API responses; both are accepted here.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// Raw payload structures for deserialization
//
// Fields are Option<T> across the board: the webhook payload shape varies by
// event type, and required fields are validated explicitly above.
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    event: Option<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: Option<String>,

    // Item creation events carry "pulseId"; older payloads use "pulse_id"
    // and column updates have been observed with "itemId".
    #[serde(rename = "pulseId", alias = "pulse_id", alias = "itemId")]
    item_id: Option<Value>,

    #[serde(rename = "boardId", alias = "board_id")]
    board_id: Option<Value>,

    #[serde(rename = "columnId", alias = "column_id")]
    column_id: Option<Value>,

    value: Option<Value>,

    #[serde(rename = "parentItemId", alias = "parent_item_id")]
    parent_item_id: Option<Value>,

    #[serde(rename = "parentItemBoardId", alias = "parent_item_board_id")]
    parent_board_id: Option<Value>,
}
