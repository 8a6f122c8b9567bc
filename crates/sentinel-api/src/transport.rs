// Shared transport configuration for building reqwest::Client instances.
//
// The dashboard fetcher and the proxy both talk to the same upstream, so
// timeout and user-agent settings live here instead of being
// duplicated in each caller.

use std::time::Duration;

const USER_AGENT: &str = concat!("sentinel/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| crate::error::Error::ClientBuild(e.to_string()))
    }

    /// Set the request timeout in whole seconds; `0` disables it.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::TransportConfig;

    #[test]
    fn zero_timeout_disables_it() {
        let cfg = TransportConfig::default().with_timeout_secs(0);
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn timeout_is_applied_in_seconds() {
        let cfg = TransportConfig::default().with_timeout_secs(7);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(7)));
        assert!(cfg.build_client().is_ok());
    }
}
