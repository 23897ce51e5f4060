//! monday.com API error types.
//!
//! The API reports failures at three levels, and callers need to tell them
//! apart when deciding whether a sync step failed or the whole request is
//! doomed:
//!
//! - the request never completed (connect/timeout failure),
//! - the endpoint answered with a non-2xx status,
//! - the endpoint answered 200 but the body carries an `errors` array -
//!   GraphQL reports application errors this way even on HTTP success.
//!
//! There is no retry layer: every error surfaces immediately to the caller,
//! which decides per item whether to continue.

use thiserror::Error;

/// A normalized monday.com API error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be completed (connection, DNS, timeout, or a
    /// body that could not be read/decoded as JSON).
    #[error("request to monday.com failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status code.
    #[error("monday.com returned HTTP {0}")]
    HttpStatus(u16),

    /// HTTP 200 with an `errors` array in the response body.
    #[error("monday.com returned errors: {}", .0.join(", "))]
    GraphQlErrors(Vec<String>),

    /// HTTP 200 whose `data` does not match the expected shape (missing
    /// item, wrong structure).
    #[error("unexpected monday.com response: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_errors_display_joins_messages() {
        let err = ApiError::GraphQlErrors(vec![
            "Column not found".to_string(),
            "Invalid value".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "monday.com returned errors: Column not found, Invalid value"
        );
    }

    #[test]
    fn http_status_display_includes_code() {
        assert_eq!(
            ApiError::HttpStatus(429).to_string(),
            "monday.com returned HTTP 429"
        );
    }
}
