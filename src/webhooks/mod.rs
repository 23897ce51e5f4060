//! Webhook handling for monday.com deliveries.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Event classification into typed [`WebhookEvent`] values

pub mod events;
pub mod parser;
pub mod signature;

pub use events::{CreateItemEvent, ParentRef, UpdateColumnValueEvent, WebhookEvent};
pub use parser::classify;
pub use signature::{
    compute_signature, format_signature_header, parse_signature_header, verify_signature,
};
