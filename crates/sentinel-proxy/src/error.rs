//! Proxy error types.
//!
//! [`ProxyError`] is what handlers return; it renders as the JSON
//! `{ "error": ... }` body clients expect. [`StartupError`] covers the
//! binary's boot sequence and carries miette diagnostics.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ── Request errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Missing URL. Use ?url=... to specify the servers URL")]
    MissingUrl,

    #[error("Unable to fetch data from {url}: {source}")]
    Upstream {
        url: String,
        #[source]
        source: sentinel_api::Error,
    },

    #[error("Unable to fetch player data")]
    PlayersUpstream {
        #[source]
        source: sentinel_api::Error,
    },

    #[error("404 - Not Found")]
    NotFound,

    #[error("500 - Internal Server Error")]
    Internal,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingUrl => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream { .. } | Self::PlayersUpstream { .. } | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> Option<String> {
        match self {
            Self::NotFound => Some("The requested resource does not exist".into()),
            Self::Internal => Some("An unexpected error occurred".into()),
            _ => None,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            message: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

// ── Startup errors ──────────────────────────────────────────────────

#[derive(Debug, Error, Diagnostic)]
pub enum StartupError {
    #[error("Invalid configuration")]
    #[diagnostic(
        code(sentinel::config),
        help("Check the [proxy] section of your config file and SENTINEL_PROXY__* variables.")
    )]
    Config(#[from] sentinel_config::ConfigError),

    #[error("Could not build the upstream HTTP client")]
    #[diagnostic(code(sentinel::client))]
    Client(#[from] sentinel_api::Error),

    #[error("Could not bind {addr}")]
    #[diagnostic(
        code(sentinel::bind),
        help("Is another process already using this port? Try --port=<other>.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server stopped unexpectedly")]
    #[diagnostic(code(sentinel::serve))]
    Serve(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::ProxyError;

    #[test]
    fn statuses_match_error_kind() {
        assert_eq!(ProxyError::MissingUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ProxyError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ProxyError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_message_names_the_url() {
        let err = ProxyError::Upstream {
            url: "http://h/sdo/servers".into(),
            source: sentinel_api::Error::Status {
                status: 502,
                reason: "Bad Gateway".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Unable to fetch data from http://h/sdo/servers: HTTP 502: Bad Gateway"
        );
    }
}
