//! Error types for rescache.

use thiserror::Error;

/// Result type alias using `ResourceError`.
pub type Result<T> = std::result::Result<T, ResourceError>;

#[derive(Debug, Error)]
pub enum ResourceError {
    /// Transport-level failure talking to the panel (DNS, timeout, body read).
    #[error("panel request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The panel answered with a non-success status.
    #[error("panel returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The panel answered 2xx but the body is not a user-with-servers response.
    #[error("malformed panel response: {0}")]
    MalformedResponse(&'static str),

    /// Snapshot serialization failed.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    /// The cache has no entry for the key even after a refresh reported success.
    #[error("no snapshot available after refresh")]
    Unavailable,
}

impl ResourceError {
    /// True when the failure originated upstream rather than in this process.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ResourceError::Upstream(_)
                | ResourceError::UpstreamStatus { .. }
                | ResourceError::MalformedResponse(_)
        )
    }
}
