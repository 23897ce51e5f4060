//! Webhook endpoint handler.
//!
//! Accepts monday.com webhook deliveries and runs the full pipeline:
//! handshake short-circuit, optional signature verification, event
//! classification, and the date sync engine.
//!
//! # Request
//!
//! - Method: POST, JSON body
//! - Optional header `x-monday-signature-256` (`sha256=<hex>`), required
//!   when a webhook secret is configured
//!
//! # Response
//!
//! - 200 OK `{"challenge": ...}` for the registration handshake
//! - 200 OK `{"status":"ok","results":[...]}` for everything else the body
//!   parses to - including unknown event types and partial sync failures.
//!   Non-2xx responses make monday.com retry the delivery, which would
//!   only amplify a remote outage.
//! - 400 Bad Request when the body is not valid JSON
//! - 401 Unauthorized when signature enforcement is on and the signature
//!   is missing or wrong
//!
//! The handshake is answered before signature enforcement: registration
//! must succeed even when the sender cannot sign the challenge request.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AppState;
use crate::sync::SyncResult;
use crate::webhooks::{WebhookEvent, classify, verify_signature};

/// Header carrying the HMAC-SHA256 signature of the raw body.
const HEADER_SIGNATURE: &str = "x-monday-signature-256";

/// Errors that reject a webhook delivery outright.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Body is not valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Signature enforcement is on and verification failed.
    #[error("invalid signature")]
    InvalidSignature,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
        };

        (status, self.to_string()).into_response()
    }
}

/// The acknowledgement body for non-handshake deliveries.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    pub results: Vec<SyncResult>,
}

/// Webhook handler.
pub async fn webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, WebhookError> {
    let payload: serde_json::Value = serde_json::from_slice(&body)?;

    // Registration handshake: echo the challenge verbatim and stop.
    if let Some(challenge) = payload.get("challenge") {
        info!("answering webhook registration challenge");
        return Ok(Json(serde_json::json!({ "challenge": challenge })).into_response());
    }

    // Verify against the raw bytes as received; a re-serialized body is
    // not guaranteed to match what the sender signed.
    if let Some(secret) = app_state.webhook_secret() {
        let signature_header = headers
            .get(HEADER_SIGNATURE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !verify_signature(&body, signature_header, secret) {
            warn!("rejecting webhook with missing or invalid signature");
            return Err(WebhookError::InvalidSignature);
        }
    }

    let event = classify(&payload);
    if matches!(event, WebhookEvent::Unknown) {
        debug!("acknowledging unhandled event type");
    }

    let results = app_state.engine().handle_event(&event).await;

    Ok(Json(WebhookResponse {
        status: "ok",
        results,
    })
    .into_response())
}
