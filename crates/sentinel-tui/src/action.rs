//! All UI actions. Actions are the sole mechanism for TUI state mutation;
//! dashboard state itself only changes through the controller.

use std::sync::Arc;

use sentinel_core::DashboardState;

use crate::screen::ScreenId;

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,
    /// New terminal width in columns.
    Resize(u16),

    // ── Navigation ──
    SwitchScreen(ScreenId),
    ToggleHelp,
    ScrollDown,
    ScrollUp,
    ScrollTop,

    // ── Dashboard commands ──
    ToggleView,
    ToggleLayout,
    Refresh,
    DismissNotification,
    ApplySettings {
        refresh_interval: String,
        base_url: String,
    },

    // ── Data ──
    StateUpdated(Arc<DashboardState>),
}
