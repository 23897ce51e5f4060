//! monday.com GraphQL client.
//!
//! All remote calls go through a single endpoint with an API-key header and
//! a `{"query": ..., "variables": ...}` body. The client exposes one
//! low-level [`MondayClient::execute`] plus the three typed operations the
//! sync engine needs, behind the [`MondayApi`] trait so the engine can be
//! tested without a network.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::types::{BoardId, ColumnId, ItemId};

use super::error::ApiError;

/// Fetches one item with its named date column and its subitems.
const PARENT_WITH_SUBITEMS_QUERY: &str = r#"
query ParentWithSubitems($itemId: [ID!], $columnId: [String!]) {
  items(ids: $itemId) {
    id
    name
    column_values(ids: $columnId) {
      id
      value
      text
    }
    subitems {
      id
      name
      board {
        id
      }
    }
  }
}"#;

/// Fetches one item with its full column set, for content-based lookup of
/// the deadline column.
const COLUMN_VALUES_QUERY: &str = r#"
query ItemColumnValues($itemId: [ID!]) {
  items(ids: $itemId) {
    id
    name
    column_values {
      id
      type
      value
    }
  }
}"#;

/// The generic column mutation; `$value` is a JSON-encoded string.
const CHANGE_COLUMN_VALUE_MUTATION: &str = r#"
mutation ChangeColumnValue($boardId: ID!, $itemId: ID!, $columnId: String!, $value: JSON!) {
  change_column_value(board_id: $boardId, item_id: $itemId, column_id: $columnId, value: $value) {
    id
  }
}"#;

/// One column's current value as returned by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnValue {
    pub id: ColumnId,

    /// The column's type (e.g., "date", "status").
    pub column_type: String,

    /// The raw JSON-encoded value, `None` when the column is empty.
    pub raw_value: Option<String>,
}

/// A subitem as listed under its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubitemRef {
    pub item_id: ItemId,
    pub name: String,

    /// Subitems live on their own board, distinct from the parent's.
    pub board_id: BoardId,
}

/// A parent item with its deadline column and subitems, fetched fresh on
/// every sync. Never cached: the remote system is the source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentContext {
    pub item_id: ItemId,
    pub name: String,

    /// Raw value of the requested deadline column, if the item has it and
    /// it is non-empty.
    pub deadline_raw: Option<String>,

    pub subitems: Vec<SubitemRef>,
}

/// The remote operations the sync engine depends on.
#[async_trait]
pub trait MondayApi: Send + Sync {
    /// Fetches an item with its named date column and subitems.
    async fn item_with_subitems(
        &self,
        item: &ItemId,
        deadline_column: &ColumnId,
    ) -> Result<ParentContext, ApiError>;

    /// Fetches an item's full column set (id, type, value).
    async fn item_column_values(&self, item: &ItemId) -> Result<Vec<ColumnValue>, ApiError>;

    /// Writes a column value on an item. `value` is a JSON-encoded string.
    async fn change_column_value(
        &self,
        board: &BoardId,
        item: &ItemId,
        column: &ColumnId,
        value: &str,
    ) -> Result<(), ApiError>;
}

/// HTTP client for the monday.com GraphQL endpoint.
#[derive(Clone)]
pub struct MondayClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl MondayClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        MondayClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Executes one GraphQL operation and returns the full response body.
    ///
    /// Error normalization:
    /// - transport failures become [`ApiError::Network`]
    /// - non-2xx statuses become [`ApiError::HttpStatus`]
    /// - a 200 body carrying an `errors` array becomes
    ///   [`ApiError::GraphQlErrors`]
    ///
    /// No retry: a failed call surfaces immediately.
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Value, ApiError> {
        debug!(endpoint = %self.endpoint, %variables, "executing GraphQL operation");

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let body: Value = response.json().await?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.get("message")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown error")
                            .to_string()
                    })
                    .collect();
                return Err(ApiError::GraphQlErrors(messages));
            }
        }

        Ok(body)
    }

    /// Extracts the single requested item from a response body.
    fn single_item(body: Value, item: &ItemId) -> Result<RawItem, ApiError> {
        let data = body.get("data").cloned().unwrap_or(Value::Null);
        let parsed: ItemsData = serde_json::from_value(data)
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        parsed
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::MalformedResponse(format!("item {item} not found")))
    }
}

impl std::fmt::Debug for MondayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MondayClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MondayApi for MondayClient {
    async fn item_with_subitems(
        &self,
        item: &ItemId,
        deadline_column: &ColumnId,
    ) -> Result<ParentContext, ApiError> {
        let variables = json!({
            "itemId": [item.as_str()],
            "columnId": [deadline_column.as_str()],
        });
        let body = self.execute(PARENT_WITH_SUBITEMS_QUERY, variables).await?;
        let raw = Self::single_item(body, item)?;

        Ok(ParentContext {
            item_id: ItemId(raw.id),
            name: raw.name.unwrap_or_default(),
            deadline_raw: raw
                .column_values
                .into_iter()
                .next()
                .and_then(|cv| cv.value),
            subitems: raw
                .subitems
                .into_iter()
                .map(|s| SubitemRef {
                    item_id: ItemId(s.id),
                    name: s.name.unwrap_or_default(),
                    board_id: BoardId(s.board.id),
                })
                .collect(),
        })
    }

    async fn item_column_values(&self, item: &ItemId) -> Result<Vec<ColumnValue>, ApiError> {
        let variables = json!({ "itemId": [item.as_str()] });
        let body = self.execute(COLUMN_VALUES_QUERY, variables).await?;
        let raw = Self::single_item(body, item)?;

        Ok(raw
            .column_values
            .into_iter()
            .map(|cv| ColumnValue {
                id: ColumnId(cv.id),
                column_type: cv.column_type.unwrap_or_default(),
                raw_value: cv.value,
            })
            .collect())
    }

    async fn change_column_value(
        &self,
        board: &BoardId,
        item: &ItemId,
        column: &ColumnId,
        value: &str,
    ) -> Result<(), ApiError> {
        let variables = json!({
            "boardId": board.as_str(),
            "itemId": item.as_str(),
            "columnId": column.as_str(),
            "value": value,
        });
        self.execute(CHANGE_COLUMN_VALUE_MUTATION, variables)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Raw response structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct ItemsData {
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: String,
    name: Option<String>,
    #[serde(default)]
    column_values: Vec<RawColumnValue>,
    #[serde(default)]
    subitems: Vec<RawSubitem>,
}

#[derive(Debug, Deserialize)]
struct RawColumnValue {
    id: String,
    #[serde(rename = "type")]
    column_type: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSubitem {
    id: String,
    name: Option<String>,
    board: RawBoard,
}

#[derive(Debug, Deserialize)]
struct RawBoard {
    id: String,
}
