// ── Dashboard state ──
//
// The single state object behind the controller's `watch` channel.
// Observers get clones; only `Dashboard` methods mutate it.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Configuration;
use crate::countdown::Countdown;
use crate::notify::Notifications;
use crate::render::{PlayersView, ServersView};
use crate::view::{LayoutMode, ViewMode};

/// Everything a front-end needs to draw one frame.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub config: Configuration,
    pub view_mode: ViewMode,
    pub layout_mode: LayoutMode,
    pub countdown: Countdown,
    /// Hidden while polling is disabled.
    pub countdown_visible: bool,
    pub loading: bool,
    /// `None` until the first successful fetch for that mode.
    pub servers: Option<Arc<ServersView>>,
    pub players: Option<Arc<PlayersView>>,
    pub notifications: Notifications,
    pub last_refresh: Option<DateTime<Utc>>,
    pub(crate) generations: Generations,
}

impl DashboardState {
    pub(crate) fn new(config: Configuration, layout_mode: LayoutMode) -> Self {
        Self {
            countdown: Countdown::new(config.refresh_interval_secs()),
            countdown_visible: false,
            config,
            view_mode: ViewMode::default(),
            layout_mode,
            loading: false,
            servers: None,
            players: None,
            notifications: Notifications::default(),
            last_refresh: None,
            generations: Generations::default(),
        }
    }

    /// Reset the countdown to the configured interval.
    pub(crate) fn restart_countdown(&mut self) {
        self.countdown = Countdown::new(self.config.refresh_interval_secs());
    }
}

/// Monotonic request counters, one per view mode.
///
/// Every fetch takes a fresh generation; when its response arrives it is
/// applied only if no newer fetch for the same mode was issued meanwhile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Generations([u64; 2]);

impl Generations {
    pub(crate) fn advance(&mut self, mode: ViewMode) -> u64 {
        let slot = &mut self.0[mode.index()];
        *slot += 1;
        *slot
    }

    pub(crate) fn is_current(&self, mode: ViewMode, generation: u64) -> bool {
        self.0[mode.index()] == generation
    }
}
