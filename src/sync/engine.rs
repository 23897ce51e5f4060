//! The date sync engine.
//!
//! Two workflows keep subitem dates aligned with their parent's deadline:
//!
//! - **Deadline propagation**: when the configured parent-deadline column
//!   changes (or a fresh parent item appears), the new date is written to
//!   the fixed date column of every subitem.
//! - **Subitem initialization**: when a subitem is created, its date column
//!   is seeded from the parent's deadline.
//!
//! Both are idempotent: re-running against the same upstream state writes
//! the same values again and nothing else. The engine holds no state of its
//! own; parent context is fetched fresh on every event and never cached.
//!
//! Failure policy is always-ack: a failed mutation is recorded as a
//! `Failed` result for that item and processing continues with the rest; a
//! failure before any per-item work begins (the initial parent query)
//! yields empty results. Neither bubbles up as an HTTP failure - the sender
//! resends on non-2xx, which would only compound a remote outage.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::monday::{ColumnValue, MondayApi, ParentContext};
use crate::types::{ColumnId, ItemId};
use crate::webhooks::{CreateItemEvent, ParentRef, UpdateColumnValueEvent, WebhookEvent};

use super::date::DateValue;

/// The fixed column ids the engine operates on.
///
/// These are per-board configuration, passed in at construction time.
/// Column ids are never inferred from display labels: labels are
/// locale-dependent and user-renamable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConfig {
    /// The deadline column on parent items.
    pub parent_deadline: ColumnId,

    /// The date column on subitems that mirrors the parent deadline.
    pub subitem_date: ColumnId,
}

/// Outcome of one attempted sync step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The column value was written.
    Updated,
    /// Nothing to do (no source date, or no children).
    Skipped,
    /// The remote call failed; detail carries the error message.
    Failed,
}

/// One per item touched; aggregated into the webhook response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub item_id: ItemId,
    pub column_id: ColumnId,
    pub outcome: SyncOutcome,
    pub detail: String,
}

impl SyncResult {
    fn updated(item_id: ItemId, column_id: ColumnId, date: &DateValue) -> Self {
        SyncResult {
            item_id,
            column_id,
            outcome: SyncOutcome::Updated,
            detail: format!("set to {date}"),
        }
    }

    fn skipped(item_id: ItemId, column_id: ColumnId, detail: impl Into<String>) -> Self {
        SyncResult {
            item_id,
            column_id,
            outcome: SyncOutcome::Skipped,
            detail: detail.into(),
        }
    }

    fn failed(item_id: ItemId, column_id: ColumnId, detail: impl Into<String>) -> Self {
        SyncResult {
            item_id,
            column_id,
            outcome: SyncOutcome::Failed,
            detail: detail.into(),
        }
    }
}

/// Orchestrates the sync workflows against the remote API.
pub struct SyncEngine {
    api: Arc<dyn MondayApi>,
    columns: ColumnConfig,
}

impl SyncEngine {
    pub fn new(api: Arc<dyn MondayApi>, columns: ColumnConfig) -> Self {
        SyncEngine { api, columns }
    }

    /// Dispatches a classified event to the matching workflow.
    ///
    /// Events the engine does not act on (unknown types, column updates on
    /// other columns) produce empty results and zero remote calls.
    pub async fn handle_event(&self, event: &WebhookEvent) -> Vec<SyncResult> {
        match event {
            WebhookEvent::UpdateColumnValue(ev) if ev.column_id == self.columns.parent_deadline => {
                self.propagate_deadline(ev).await
            }
            WebhookEvent::UpdateColumnValue(ev) => {
                debug!(column = %ev.column_id, "ignoring update to non-deadline column");
                Vec::new()
            }
            WebhookEvent::CreateItem(ev) => match &ev.parent {
                Some(parent) => self.init_subitem(ev, parent).await,
                None => self.sync_new_item(ev).await,
            },
            // Challenges are answered before dispatch; Unknown is a no-op.
            WebhookEvent::Challenge(_) | WebhookEvent::Unknown => Vec::new(),
        }
    }

    /// Workflow A: the parent's deadline column changed; push the new date
    /// to every subitem.
    async fn propagate_deadline(&self, event: &UpdateColumnValueEvent) -> Vec<SyncResult> {
        let date = event
            .raw_value
            .as_deref()
            .and_then(DateValue::from_column_json);

        let Some(date) = date else {
            // Deadline cleared. Children keep their dates; clearing them
            // too is an open product question, so the safe move is a skip.
            info!(item = %event.item_id, "deadline cleared or unparseable, not propagating");
            return vec![SyncResult::skipped(
                event.item_id.clone(),
                self.columns.parent_deadline.clone(),
                "deadline cleared or empty; subitem dates left unchanged",
            )];
        };

        let parent = match self
            .api
            .item_with_subitems(&event.item_id, &self.columns.parent_deadline)
            .await
        {
            Ok(parent) => parent,
            Err(e) => {
                warn!(item = %event.item_id, error = %e, "failed to fetch parent item, skipping sync");
                return Vec::new();
            }
        };

        self.write_to_subitems(&parent, &date).await
    }

    /// Workflow A variant for a freshly created parent item: the deadline
    /// comes from a query rather than the event payload.
    async fn sync_new_item(&self, event: &CreateItemEvent) -> Vec<SyncResult> {
        let parent = match self
            .api
            .item_with_subitems(&event.item_id, &self.columns.parent_deadline)
            .await
        {
            Ok(parent) => parent,
            Err(e) => {
                warn!(item = %event.item_id, error = %e, "failed to fetch new item, skipping sync");
                return Vec::new();
            }
        };

        let date = parent
            .deadline_raw
            .as_deref()
            .and_then(DateValue::from_column_json);

        let Some(date) = date else {
            debug!(item = %event.item_id, "new item has no deadline, nothing to propagate");
            return vec![SyncResult::skipped(
                event.item_id.clone(),
                self.columns.parent_deadline.clone(),
                "no deadline set on item",
            )];
        };

        self.write_to_subitems(&parent, &date).await
    }

    /// Workflow B: a subitem was created; seed its date column from the
    /// parent's deadline.
    async fn init_subitem(&self, event: &CreateItemEvent, parent: &ParentRef) -> Vec<SyncResult> {
        let columns = match self.api.item_column_values(&parent.item_id).await {
            Ok(columns) => columns,
            Err(e) => {
                warn!(
                    parent = %parent.item_id,
                    subitem = %event.item_id,
                    error = %e,
                    "failed to fetch parent columns, skipping subitem init"
                );
                return Vec::new();
            }
        };

        let date = self
            .find_deadline_column(&columns)
            .and_then(|cv| cv.raw_value.as_deref())
            .and_then(DateValue::from_column_json);

        let Some(date) = date else {
            debug!(parent = %parent.item_id, "parent has no deadline, leaving subitem date empty");
            return vec![SyncResult::skipped(
                event.item_id.clone(),
                self.columns.subitem_date.clone(),
                "parent has no deadline date",
            )];
        };

        let value = date.to_column_json();
        let result = match self
            .api
            .change_column_value(
                &event.board_id,
                &event.item_id,
                &self.columns.subitem_date,
                &value,
            )
            .await
        {
            Ok(()) => {
                info!(subitem = %event.item_id, %date, "initialized subitem date from parent");
                SyncResult::updated(
                    event.item_id.clone(),
                    self.columns.subitem_date.clone(),
                    &date,
                )
            }
            Err(e) => {
                warn!(subitem = %event.item_id, error = %e, "failed to initialize subitem date");
                SyncResult::failed(
                    event.item_id.clone(),
                    self.columns.subitem_date.clone(),
                    e.to_string(),
                )
            }
        };

        vec![result]
    }

    /// Picks the parent's deadline column: the configured id when present,
    /// otherwise the first date-typed column (content lookup, never label
    /// text).
    fn find_deadline_column<'a>(&self, columns: &'a [ColumnValue]) -> Option<&'a ColumnValue> {
        columns
            .iter()
            .find(|cv| cv.id == self.columns.parent_deadline)
            .or_else(|| columns.iter().find(|cv| cv.column_type == "date"))
    }

    /// Fans the date out to every subitem, one mutation each, on the
    /// subitem's own board. A failure on one subitem does not abort the
    /// rest.
    async fn write_to_subitems(&self, parent: &ParentContext, date: &DateValue) -> Vec<SyncResult> {
        if parent.subitems.is_empty() {
            debug!(item = %parent.item_id, "no subitems to update");
            return Vec::new();
        }

        let value = date.to_column_json();
        let mut results = Vec::with_capacity(parent.subitems.len());

        for subitem in &parent.subitems {
            match self
                .api
                .change_column_value(
                    &subitem.board_id,
                    &subitem.item_id,
                    &self.columns.subitem_date,
                    &value,
                )
                .await
            {
                Ok(()) => {
                    info!(subitem = %subitem.item_id, %date, "updated subitem date");
                    results.push(SyncResult::updated(
                        subitem.item_id.clone(),
                        self.columns.subitem_date.clone(),
                        date,
                    ));
                }
                Err(e) => {
                    warn!(subitem = %subitem.item_id, error = %e, "failed to update subitem date");
                    results.push(SyncResult::failed(
                        subitem.item_id.clone(),
                        self.columns.subitem_date.clone(),
                        e.to_string(),
                    ));
                }
            }
        }

        results
    }
}
