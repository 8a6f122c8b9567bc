// SDO API HTTP client
//
// Wraps `reqwest::Client` with status checking and JSON decoding. Callers
// hand in absolute URLs: the dashboard builds them from a user-supplied
// base, and the proxy forwards whatever `?url=` it was given.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Player, Server};
use crate::transport::TransportConfig;

/// Raw HTTP client for the SDO status API.
///
/// Every method performs exactly one GET. There is no retry, caching or
/// backoff: a failure is returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct SdoClient {
    http: reqwest::Client,
}

impl SdoClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(http: reqwest::Client) -> Self {
        Self { http }
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET {base}/sdo/servers`, already resolved to an absolute URL.
    pub async fn list_servers(&self, url: &str) -> Result<Vec<Server>, Error> {
        debug!("listing servers");
        self.get_records(url).await
    }

    /// `GET {base}/sdo/players`, already resolved to an absolute URL.
    pub async fn list_players(&self, url: &str) -> Result<Vec<Player>, Error> {
        debug!("listing players");
        self.get_records(url).await
    }

    /// Fetch any JSON document untouched. Used by the proxy passthrough.
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value, Error> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode a JSON array of records.
    pub async fn get_records<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, Error> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Send a GET request, reject non-2xx statuses, return the raw body.
    async fn get_text(&self, url: &str) -> Result<String, Error> {
        let url = Url::parse(url)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_owned(),
            });
        }

        resp.text().await.map_err(Error::Transport)
    }
}
