// ── Dashboard configuration ──
//
// Refresh interval plus base URL. Polling is enabled exactly when the base
// URL has non-whitespace content; the interval is always at least one
// second.

use std::time::Duration;

use crate::endpoint::build_url;
use crate::error::CoreError;
use crate::view::ViewMode;

/// Default seconds between automatic refreshes.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u32 = 30;

/// User-editable dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    refresh_interval_secs: u32,
    base_url: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            base_url: String::new(),
        }
    }
}

impl Configuration {
    /// Build a validated configuration. The base URL is stored trimmed.
    pub fn new(refresh_interval_secs: u32, base_url: &str) -> Result<Self, CoreError> {
        if refresh_interval_secs == 0 {
            return Err(CoreError::ValidationFailed {
                message: "refresh interval must be at least 1 second".into(),
            });
        }
        Ok(Self {
            refresh_interval_secs,
            base_url: base_url.trim().to_owned(),
        })
    }

    /// Parse raw form input, as typed into a settings field.
    pub fn parse(refresh_interval: &str, base_url: &str) -> Result<Self, CoreError> {
        let secs = refresh_interval
            .trim()
            .parse::<u32>()
            .map_err(|_| CoreError::ValidationFailed {
                message: format!("refresh interval must be a positive integer, got {refresh_interval:?}"),
            })?;
        Self::new(secs, base_url)
    }

    pub fn refresh_interval_secs(&self) -> u32 {
        self.refresh_interval_secs
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_interval_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timers run and fetches go out only when this is true.
    pub fn is_polling_enabled(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Absolute upstream URL for a view mode, or `""` when unconfigured.
    pub fn endpoint_url(&self, mode: ViewMode) -> String {
        build_url(&self.base_url, mode.endpoint())
    }
}
