use serde_json::Value;
use thiserror::Error;

/// Maximum number of characters of an error response body
/// that are kept for diagnostics.
pub const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Overpass request failed: {0}")]
    Transport(String),
    #[error("Overpass {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Invalid Overpass response: {0}")]
    Decode(String),
}

impl UpstreamError {
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: truncate_body(body),
        }
    }
}

/// Keeps the first [`MAX_ERROR_BODY_CHARS`] characters of a response body.
pub fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

/// A points-of-interest API that understands the Overpass query language.
pub trait OverpassGateway {
    /// Sends a single query and returns the parsed JSON response verbatim.
    ///
    /// Implementations must not retry, see [`crate::usecases::query_with_retry`].
    fn query(&self, query: &str) -> Result<Value, UpstreamError>;
}
