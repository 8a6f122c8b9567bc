//! Backend passthrough for the SDO status API.
//!
//! Two read-only routes forward upstream JSON untouched:
//!
//! - `GET /api/servers?url=<upstream>` proxies the caller-supplied URL.
//! - `GET /api/players` proxies the configured players upstream.
//!
//! Everything else answers with a JSON 404. Handler panics become a JSON
//! 500 instead of a dropped connection.

pub mod error;
pub mod routes;

pub use error::{ProxyError, StartupError};
pub use routes::{AppState, router, with_middleware};

use tokio::net::TcpListener;
use tracing::info;

/// Serve the router on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "proxy listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
