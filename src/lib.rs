//! Deadline sync bot - keeps monday.com subitem date columns in sync with
//! their parent item's deadline column.
//!
//! This library provides the webhook pipeline: signature verification, event
//! classification, the date sync engine, and the monday.com GraphQL client.

pub mod config;
pub mod monday;
pub mod server;
pub mod sync;
pub mod types;
pub mod webhooks;

#[cfg(test)]
pub(crate) mod test_utils;
