//! HTTP server for the deadline sync bot.
//!
//! # Endpoints
//!
//! - `POST /webhook` - Accepts monday.com webhook deliveries
//! - `GET /health` - Returns 200 if the server is running

use std::sync::Arc;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::{WebhookResponse, webhook_handler};

use crate::sync::SyncEngine;

/// Shared application state, passed to handlers via Axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// The date sync engine, already wired to the remote API client.
    engine: SyncEngine,

    /// Secret for HMAC-SHA256 signature verification. `None` disables
    /// enforcement (environments without a configured secret).
    webhook_secret: Option<Vec<u8>>,
}

impl AppState {
    pub fn new(engine: SyncEngine, webhook_secret: Option<Vec<u8>>) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                engine,
                webhook_secret,
            }),
        }
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.inner.engine
    }

    /// Returns the webhook secret when signature enforcement is on.
    pub fn webhook_secret(&self) -> Option<&[u8]> {
        self.inner.webhook_secret.as_deref()
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
