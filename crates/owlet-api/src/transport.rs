// Transport configuration for building the shared reqwest::Client.
//
// Both cloud endpoints (identity and device data) go through one client;
// timeout and user-agent settings live here so the session module stays
// focused on auth mechanics.

use std::time::Duration;

use crate::error::Error;

/// Transport settings for the HTTP client behind a [`Session`](crate::Session).
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("owlet-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Transport)
    }
}
