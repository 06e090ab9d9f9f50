//! Error types for the remote collaborators
//!
//! The simulation itself never fails; only commentary, speech, and theme
//! generation can, and their call sites swap errors for fallbacks.

use crate::sim::ParseColorError;

/// Result alias carrying [`ServiceError`].
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure talking to (or decoding a reply from) a generation service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No API key was compiled in.
    #[error("no API key configured")]
    MissingApiKey,
    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}")]
    Http { status: u16 },
    /// The request never completed (network, CORS, no window).
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The reply parsed but carried no usable text or audio.
    #[error("empty response")]
    EmptyResponse,
    #[error(transparent)]
    InvalidColor(#[from] ParseColorError),
    #[error("bad audio payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl ServiceError {
    /// Wraps any displayable transport failure.
    pub fn transport<T: std::fmt::Display>(err: T) -> Self {
        Self::Transport(err.to_string())
    }
}
