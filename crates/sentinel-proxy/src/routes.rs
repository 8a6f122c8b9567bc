//! Router, shared state and handlers.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{Request, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{Span, error, info, warn};

use sentinel_api::SdoClient;

use crate::error::ProxyError;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    client: SdoClient,
    players_upstream: Arc<str>,
}

impl AppState {
    pub fn new(client: SdoClient, players_upstream: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            players_upstream: players_upstream.into(),
        }
    }
}

/// The full proxy: API routes plus fallback and middleware.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/servers", get(servers))
        .route("/api/players", get(players))
        .with_state(state);
    with_middleware(api)
}

/// Attach the JSON 404 fallback, panic recovery and request tracing.
pub fn with_middleware(routes: Router) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                path = %request.uri().path(),
                status = tracing::field::Empty,
                latency_ms = tracing::field::Empty,
            )
        })
        .on_request(|_request: &Request<_>, _span: &Span| {})
        .on_response(|response: &Response, latency: Duration, span: &Span| {
            let status = response.status().as_u16();
            let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
            span.record("status", status);
            span.record("latency_ms", latency_ms);
            info!(status, latency_ms, "request completed");
        });

    routes
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(trace_layer)
}

// ── Handlers ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ServersQuery {
    url: Option<String>,
}

async fn servers(
    State(state): State<AppState>,
    Query(query): Query<ServersQuery>,
) -> Result<Json<Value>, ProxyError> {
    let Some(url) = query.url.filter(|u| !u.trim().is_empty()) else {
        warn!("servers requested without an upstream URL");
        return Err(ProxyError::MissingUrl);
    };

    info!(%url, "fetching servers");
    match state.client.get_json(&url).await {
        Ok(body) => {
            info!(count = record_count(&body), "servers fetched");
            Ok(Json(body))
        }
        Err(source) => {
            error!(%url, error = %source, "servers fetch failed");
            Err(ProxyError::Upstream { url, source })
        }
    }
}

async fn players(State(state): State<AppState>) -> Result<Json<Value>, ProxyError> {
    info!(url = %state.players_upstream, "fetching players");
    match state.client.get_json(&state.players_upstream).await {
        Ok(body) => {
            info!(count = record_count(&body), "players fetched");
            Ok(Json(body))
        }
        Err(source) => {
            error!(error = %source, "players fetch failed");
            Err(ProxyError::PlayersUpstream { source })
        }
    }
}

async fn not_found(uri: Uri) -> ProxyError {
    warn!(path = %uri.path(), "route not found");
    ProxyError::NotFound
}

#[allow(clippy::needless_pass_by_value)]
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| err.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_owned());
    error!(%detail, "handler panicked");
    ProxyError::Internal.into_response()
}

fn record_count(body: &Value) -> usize {
    body.as_array().map_or(0, Vec::len)
}
