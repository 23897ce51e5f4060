//! Process configuration from environment variables.
//!
//! Everything except the API key has a sensible default. The webhook
//! secret is optional: without one, signature enforcement is disabled.

use std::net::SocketAddr;
use thiserror::Error;

use crate::sync::ColumnConfig;
use crate::types::ColumnId;

/// Default monday.com GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";

/// Default id of the deadline column on parent items.
pub const DEFAULT_PARENT_DEADLINE_COLUMN: &str = "date7";

/// Default id of the mirrored date column on subitems.
pub const DEFAULT_SUBITEM_DATE_COLUMN: &str = "date_mkn2am1b";

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid listen address {0:?}")]
    InvalidListenAddr(String),
}

/// Resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// monday.com GraphQL endpoint (`MONDAY_API_URL`).
    pub api_url: String,

    /// API key sent in the Authorization header (`MONDAY_API_KEY`).
    pub api_key: String,

    /// Column ids the sync engine operates on
    /// (`PARENT_DEADLINE_COLUMN` / `SUBITEM_DATE_COLUMN`).
    pub columns: ColumnConfig,

    /// Shared secret for webhook signature enforcement
    /// (`WEBHOOK_SECRET`); `None` disables enforcement.
    pub webhook_secret: Option<Vec<u8>>,

    /// Address to bind the HTTP server to (`LISTEN_ADDR`).
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// The seam exists so tests can supply variables without mutating the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let api_key = lookup("MONDAY_API_KEY").ok_or(ConfigError::MissingVar("MONDAY_API_KEY"))?;

        let api_url = lookup("MONDAY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let parent_deadline = lookup("PARENT_DEADLINE_COLUMN")
            .unwrap_or_else(|| DEFAULT_PARENT_DEADLINE_COLUMN.to_string());
        let subitem_date =
            lookup("SUBITEM_DATE_COLUMN").unwrap_or_else(|| DEFAULT_SUBITEM_DATE_COLUMN.to_string());

        let webhook_secret = lookup("WEBHOOK_SECRET")
            .filter(|s| !s.is_empty())
            .map(String::into_bytes);

        let listen_raw = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_raw
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(listen_raw))?;

        Ok(Config {
            api_url,
            api_key,
            columns: ColumnConfig {
                parent_deadline: ColumnId::new(parent_deadline),
                subitem_date: ColumnId::new(subitem_date),
            },
            webhook_secret,
            listen_addr,
        })
    }
}
