use thiserror::Error;

/// Top-level error type for the `sentinel-api` crate.
///
/// Covers every way a single upstream round-trip can fail: the request
/// never left, the upstream answered with a non-success status, or the
/// body was not the JSON we expected. `sentinel-core` maps these into
/// user-facing notifications.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Upstream ────────────────────────────────────────────────────
    /// Upstream answered with a non-2xx status.
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
