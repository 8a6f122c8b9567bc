// ── Core error types ──
//
// User-facing errors from sentinel-core. The `From<sentinel_api::Error>`
// impl folds transport-layer failures into the three categories the
// dashboard distinguishes: could not reach, bad status, bad body.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Base URL is not configured")]
    NotConfigured,

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Fetch errors ─────────────────────────────────────────────────
    #[error("{message}")]
    Transport { message: String },

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Invalid response: {message}")]
    Parse { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sentinel_api::Error> for CoreError {
    fn from(err: sentinel_api::Error) -> Self {
        match err {
            sentinel_api::Error::Status { status, reason } => CoreError::Status { status, reason },
            sentinel_api::Error::Deserialization { message, body: _ } => {
                CoreError::Parse { message }
            }
            sentinel_api::Error::Transport(e) => CoreError::Transport {
                message: e.to_string(),
            },
            sentinel_api::Error::InvalidUrl(e) => CoreError::Transport {
                message: format!("Invalid URL: {e}"),
            },
            sentinel_api::Error::ClientBuild(message) => CoreError::Transport { message },
        }
    }
}
