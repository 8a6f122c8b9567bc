//! Polling and view-state layer between `sentinel-api` and the front-ends.
//!
//! This crate owns everything the dashboard does between "the user pressed
//! apply" and "a card grid is on screen":
//!
//! - **[`Dashboard`]**: The view-state controller. Owns the single
//!   [`DashboardState`] behind a `watch` channel, switches view and layout
//!   modes, runs the refresh and countdown timers, and applies fetched
//!   collections. Every mutation goes through one of its methods.
//!
//! - **[`Configuration`]**: Refresh interval plus base URL. Polling is
//!   enabled exactly when the base URL is non-blank.
//!
//! - **[`build_url`]**: Maps a base URL and endpoint name to the absolute
//!   upstream URL (or `""` when unconfigured).
//!
//! - **[`Countdown`]**: Visible seconds-until-refresh, wrapping at zero.
//!
//! - **Render layer** ([`render`]): Pure functions turning upstream
//!   records into stat counters and card view-models. Always a full
//!   rebuild, never a patch.
//!
//! - **[`Notifications`]**: Stack of transient banners with per-kind
//!   lifetimes.

pub mod config;
pub mod controller;
pub mod countdown;
pub mod endpoint;
pub mod error;
pub mod notify;
pub mod render;
pub mod state;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::Configuration;
pub use controller::Dashboard;
pub use countdown::Countdown;
pub use endpoint::build_url;
pub use error::CoreError;
pub use notify::{Notification, NotificationKind, Notifications};
pub use render::{
    Badge, Card, InfoRow, PlayerStats, PlayersView, ServerStats, ServersView, render_players,
    render_servers,
};
pub use state::DashboardState;
pub use view::{LayoutMode, ViewMode, ViewportClass, detect_viewport_class};

// Upstream record types, re-exported so front-ends only depend on core.
pub use sentinel_api::{Player, SdoClient, Server, TransportConfig};
