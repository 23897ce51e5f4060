//! Shared test doubles.
//!
//! [`MockApi`] is an in-memory [`MondayApi`] that records every mutation and
//! can be scripted to fail queries or individual item mutations. Clones
//! share state, so a test can hand one clone to the engine and inspect
//! calls through another.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::monday::{ApiError, ColumnValue, MondayApi, ParentContext};
use crate::types::{BoardId, ColumnId, ItemId};

/// One recorded `change_column_value` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMutation {
    pub board_id: BoardId,
    pub item_id: ItemId,
    pub column_id: ColumnId,
    pub value: String,
}

#[derive(Default)]
struct MockState {
    parent: Option<ParentContext>,
    columns: Vec<ColumnValue>,
    fail_queries: bool,
    failing_items: Vec<ItemId>,
    queries: usize,
    mutations: Vec<RecordedMutation>,
}

#[derive(Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<MockState>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the response to `item_with_subitems`.
    pub fn with_parent(self, parent: ParentContext) -> Self {
        self.inner.lock().unwrap().parent = Some(parent);
        self
    }

    /// Scripts the response to `item_column_values`.
    pub fn with_columns(self, columns: Vec<ColumnValue>) -> Self {
        self.inner.lock().unwrap().columns = columns;
        self
    }

    /// Makes every query fail with an HTTP 500.
    pub fn failing_queries(self) -> Self {
        self.inner.lock().unwrap().fail_queries = true;
        self
    }

    /// Makes mutations fail for the given item ids. The mutation is still
    /// recorded as attempted.
    pub fn failing_mutations_for(self, items: &[&str]) -> Self {
        self.inner.lock().unwrap().failing_items = items.iter().map(|s| ItemId::new(*s)).collect();
        self
    }

    pub fn mutations(&self) -> Vec<RecordedMutation> {
        self.inner.lock().unwrap().mutations.clone()
    }

    pub fn query_count(&self) -> usize {
        self.inner.lock().unwrap().queries
    }
}

#[async_trait]
impl MondayApi for MockApi {
    async fn item_with_subitems(
        &self,
        item: &ItemId,
        _deadline_column: &ColumnId,
    ) -> Result<ParentContext, ApiError> {
        let mut state = self.inner.lock().unwrap();
        state.queries += 1;
        if state.fail_queries {
            return Err(ApiError::HttpStatus(500));
        }
        state
            .parent
            .clone()
            .ok_or_else(|| ApiError::MalformedResponse(format!("item {item} not found")))
    }

    async fn item_column_values(&self, _item: &ItemId) -> Result<Vec<ColumnValue>, ApiError> {
        let mut state = self.inner.lock().unwrap();
        state.queries += 1;
        if state.fail_queries {
            return Err(ApiError::HttpStatus(500));
        }
        Ok(state.columns.clone())
    }

    async fn change_column_value(
        &self,
        board: &BoardId,
        item: &ItemId,
        column: &ColumnId,
        value: &str,
    ) -> Result<(), ApiError> {
        let mut state = self.inner.lock().unwrap();
        state.mutations.push(RecordedMutation {
            board_id: board.clone(),
            item_id: item.clone(),
            column_id: column.clone(),
            value: value.to_string(),
        });
        if state.failing_items.contains(item) {
            return Err(ApiError::GraphQlErrors(vec![
                "internal server error".to_string(),
            ]));
        }
        Ok(())
    }
}
