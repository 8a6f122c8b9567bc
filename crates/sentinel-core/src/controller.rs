// ── Dashboard controller ──
//
// Owns the dashboard state, the SDO client and the two background timers.
// Front-ends hold a cloned handle, call methods to mutate, and observe
// snapshots through the `watch` channel.

use std::sync::{Arc, Weak};

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use sentinel_api::SdoClient;

use crate::config::Configuration;
use crate::error::CoreError;
use crate::notify::NotificationKind;
use crate::render::{render_players, render_servers};
use crate::state::DashboardState;
use crate::view::{LayoutMode, ViewMode, detect_viewport_class};

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

// ── Dashboard ────────────────────────────────────────────────────────

/// The view-state controller.
///
/// Cheaply cloneable via `Arc<DashboardInner>`. All state lives in one
/// [`DashboardState`] behind a `watch` channel and is only mutated through
/// `send_modify` from the methods below.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    client: SdoClient,
    state: watch::Sender<DashboardState>,
    timers: Mutex<Option<Timers>>,
}

/// Handles for one generation of running timers.
struct Timers {
    cancel: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

/// Result of one fetch, before it is checked against the generation.
enum Fetched {
    Servers(Vec<sentinel_api::Server>),
    Players(Vec<sentinel_api::Player>),
}

impl Dashboard {
    /// Create a controller with the given configuration. Timers are not
    /// started; call [`start_timers`](Self::start_timers) or
    /// [`apply_settings`](Self::apply_settings).
    ///
    /// The initial layout follows the viewport class of `viewport_width`.
    pub fn new(client: SdoClient, config: Configuration, viewport_width: u32) -> Self {
        let class = detect_viewport_class(viewport_width);
        let layout = class.default_layout();
        debug!(viewport = %class, layout = %layout, "initial layout");

        let (state, _) = watch::channel(DashboardState::new(config, layout));
        Self {
            inner: Arc::new(DashboardInner {
                client,
                state,
                timers: Mutex::new(None),
            }),
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    pub fn config(&self) -> Configuration {
        self.inner.state.borrow().config.clone()
    }

    /// Whether the refresh and countdown timers are running.
    pub async fn timers_running(&self) -> bool {
        self.inner.timers.lock().await.is_some()
    }

    // ── View and layout ──────────────────────────────────────────────

    /// Switch entity type, reset the countdown and fetch the new mode.
    pub async fn set_view_mode(&self, mode: ViewMode) -> Result<(), CoreError> {
        self.inner.state.send_modify(|s| {
            s.view_mode = mode;
            s.restart_countdown();
        });
        info!(mode = %mode, "view mode changed");
        self.fetch_and_apply(mode).await
    }

    /// Flip the view mode in a single state update and fetch the result.
    pub async fn toggle_view_mode(&self) -> Result<(), CoreError> {
        let mut next = ViewMode::default();
        self.inner.state.send_modify(|s| {
            s.view_mode = s.view_mode.toggled();
            s.restart_countdown();
            next = s.view_mode;
        });
        info!(mode = %next, "view mode toggled");
        self.fetch_and_apply(next).await
    }

    /// Change the card arrangement. Never fetches.
    pub fn set_layout_mode(&self, layout: LayoutMode) {
        self.inner.state.send_modify(|s| s.layout_mode = layout);
        debug!(layout = %layout, "layout mode changed");
    }

    pub fn toggle_layout_mode(&self) -> LayoutMode {
        let mut next = LayoutMode::default();
        self.inner.state.send_modify(|s| {
            s.layout_mode = s.layout_mode.toggled();
            next = s.layout_mode;
        });
        debug!(layout = %next, "layout mode toggled");
        next
    }

    /// Report a viewport change. Returns the suggested layout when it
    /// differs from the active one; the active layout is never overridden.
    pub fn on_resize(&self, width: u32) -> Option<LayoutMode> {
        let class = detect_viewport_class(width);
        let suggested = class.default_layout();
        let current = self.inner.state.borrow().layout_mode;
        if suggested == current {
            return None;
        }
        info!(width, viewport = %class, suggested = %suggested, "layout suggestion");
        Some(suggested)
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Validate raw form input and apply it. Invalid input leaves the
    /// configuration untouched and raises an error notification.
    pub async fn apply_settings_input(
        &self,
        refresh_interval: &str,
        base_url: &str,
    ) -> Result<(), CoreError> {
        match Configuration::parse(refresh_interval, base_url) {
            Ok(config) => self.apply_settings(config).await,
            Err(e) => {
                warn!(error = %e, "rejected settings");
                self.notify(NotificationKind::Error, e.to_string());
                Err(e)
            }
        }
    }

    /// Store a new configuration and (re)start or stop polling.
    pub async fn apply_settings(&self, config: Configuration) -> Result<(), CoreError> {
        let enabled = config.is_polling_enabled();
        info!(
            refresh_secs = config.refresh_interval_secs(),
            base_url = config.base_url(),
            "applying settings"
        );

        self.inner.state.send_modify(|s| {
            s.config = config;
            s.restart_countdown();
        });

        if !enabled {
            self.stop_timers().await;
            self.notify(
                NotificationKind::Success,
                "Settings saved. Add a base URL to enable automatic refresh.",
            );
            return Ok(());
        }

        self.inner.state.send_modify(|s| s.loading = true);
        self.start_timers().await;
        self.notify(NotificationKind::Success, "Settings applied");
        self.refresh().await
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Manual refresh of the active view.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let mode = self.inner.state.borrow().view_mode;
        self.fetch_and_apply(mode).await
    }

    /// Fetch one collection and apply it to the state.
    ///
    /// A response is applied only if no newer fetch for the same mode was
    /// started meanwhile. On success or failure the loading flag is
    /// cleared and the countdown restarts.
    pub async fn fetch_and_apply(&self, mode: ViewMode) -> Result<(), CoreError> {
        let url = self.inner.state.borrow().config.endpoint_url(mode);
        if url.is_empty() {
            warn!(mode = %mode, "refresh skipped: base URL not configured");
            self.inner.state.send_modify(|s| s.loading = false);
            self.notify(
                NotificationKind::Warning,
                "Please configure the base URL first",
            );
            return Err(CoreError::NotConfigured);
        }

        let mut generation = 0;
        self.inner.state.send_modify(|s| {
            s.loading = true;
            generation = s.generations.advance(mode);
        });
        debug!(mode = %mode, generation, url = %url, "fetching");

        let fetched = match mode {
            ViewMode::Servers => self
                .inner
                .client
                .list_servers(&url)
                .await
                .map(Fetched::Servers),
            ViewMode::Players => self
                .inner
                .client
                .list_players(&url)
                .await
                .map(Fetched::Players),
        }
        .map_err(CoreError::from);

        let mut applied = false;
        self.inner.state.send_modify(|s| {
            if !s.generations.is_current(mode, generation) {
                return;
            }
            applied = true;
            if let Ok(data) = &fetched {
                match data {
                    Fetched::Servers(servers) => {
                        s.servers = Some(Arc::new(render_servers(servers)));
                    }
                    Fetched::Players(players) => {
                        s.players = Some(Arc::new(render_players(players, Utc::now())));
                    }
                }
                s.last_refresh = Some(Utc::now());
            }
            s.loading = false;
            s.restart_countdown();
        });

        if !applied {
            debug!(mode = %mode, generation, "discarding stale response");
            return Ok(());
        }

        match fetched {
            Ok(_) => {
                debug!(mode = %mode, "refresh complete");
                Ok(())
            }
            Err(e) => {
                warn!(mode = %mode, error = %e, "refresh failed");
                self.notify(
                    NotificationKind::Error,
                    format!("{} error: {e}", mode.label()),
                );
                Err(e)
            }
        }
    }

    // ── Countdown ────────────────────────────────────────────────────

    /// Advance the visible countdown by one second.
    pub fn tick_countdown(&self) {
        self.inner.state.send_modify(|s| {
            s.countdown.tick();
        });
    }

    // ── Notifications ────────────────────────────────────────────────

    /// Show a notification and schedule its removal after the kind's
    /// lifetime. Returns the notification id.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let message = message.into();
        let mut id = 0;
        self.inner.state.send_modify(|s| {
            id = s.notifications.push(kind, message, Instant::now());
        });

        let weak: Weak<DashboardInner> = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(kind.lifetime()).await;
            if let Some(inner) = weak.upgrade() {
                inner.state.send_if_modified(|s| s.notifications.dismiss(id));
            }
        });
        id
    }

    /// Dismiss the most recent notification, if any.
    pub fn dismiss_latest(&self) -> bool {
        self.inner.state.send_if_modified(|s| {
            let Some(id) = s.notifications.latest().map(|n| n.id) else {
                return false;
            };
            s.notifications.dismiss(id)
        })
    }

    /// Remove every notification whose lifetime has elapsed.
    pub fn prune_notifications(&self) -> usize {
        let mut removed = 0;
        self.inner.state.send_if_modified(|s| {
            removed = s.notifications.prune_expired(Instant::now());
            removed > 0
        });
        removed
    }

    // ── Timers ───────────────────────────────────────────────────────

    /// (Re)start the refresh and countdown timers.
    ///
    /// Any previous timers are cancelled first. Without a base URL nothing
    /// is started and the countdown is hidden.
    pub async fn start_timers(&self) {
        let mut timers = self.inner.timers.lock().await;
        if let Some(previous) = timers.take() {
            previous.cancel.cancel();
        }

        let config = self.config();
        if !config.is_polling_enabled() {
            self.inner.state.send_modify(|s| s.countdown_visible = false);
            info!("no base URL configured, timers not started");
            return;
        }

        let cancel = CancellationToken::new();
        let period = config.refresh_interval();
        let handles = vec![
            tokio::spawn(refresh_task(self.clone(), period, cancel.clone())),
            tokio::spawn(countdown_task(self.clone(), cancel.clone())),
        ];
        *timers = Some(Timers { cancel, handles });

        self.inner.state.send_modify(|s| {
            s.countdown_visible = true;
            s.restart_countdown();
        });
        info!(period_secs = period.as_secs(), "timers started");
    }

    /// Cancel both timers and hide the countdown. In-flight requests are
    /// left to finish.
    pub async fn stop_timers(&self) {
        if let Some(previous) = self.inner.timers.lock().await.take() {
            previous.cancel.cancel();
            info!("timers stopped");
        }
        self.inner.state.send_modify(|s| s.countdown_visible = false);
    }

    /// Stop timers and wait for their tasks to exit.
    pub async fn shutdown(&self) {
        let previous = self.inner.timers.lock().await.take();
        if let Some(timers) = previous {
            timers.cancel.cancel();
            for handle in timers.handles {
                let _ = handle.await;
            }
        }
        self.inner.state.send_modify(|s| s.countdown_visible = false);
        debug!("dashboard shut down");
    }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Refresh the active view once per period. The first firing is one full
/// period after start.
async fn refresh_task(dashboard: Dashboard, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = dashboard.refresh().await {
                    debug!(error = %e, "periodic refresh failed");
                }
            }
        }
    }
}

/// Decrement the visible countdown every second.
async fn countdown_task(dashboard: Dashboard, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(COUNTDOWN_TICK);
    interval.tick().await;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => dashboard.tick_countdown(),
        }
    }
}
