//! Failure taxonomy of the catalog boundary.

use thiserror::Error;

/// Reason a catalog page could not be produced.
///
/// An empty page is not an error: it is `Ok(vec![])`. Records with missing
/// optional fields are handled by field fallbacks and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("catalog request failed: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("catalog returned HTTP {0}")]
    Status(u16),
    /// The body was not JSON or lacked the `data` array.
    #[error("catalog response malformed: {0}")]
    Malformed(String),
    /// Page numbers are 1-based.
    #[error("invalid page number {0}; pages start at 1")]
    InvalidPage(u32),
}

impl FetchError {
    /// Whether a later retry of the same request could plausibly succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status(code) => *code == 429 || *code >= 500,
            Self::Malformed(_) | Self::InvalidPage(_) => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
