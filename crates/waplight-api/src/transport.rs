// HTTP client construction shared by the login and session phases.
//
// LAN controllers almost always present a self-signed certificate, so
// certificate validation is disabled on every client built here. That
// is a deliberate trust decision for private controllers, not an
// oversight.

use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::error::Error;

/// Transport settings applied to every client this crate builds.
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
    /// Build a bare `reqwest::Client` (used for the login request).
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        self.builder()
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    /// Build a `reqwest::Client` carrying session default headers
    /// (`Cookie` and `X-Csrf-Token`).
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        self.builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    fn builder(&self) -> reqwest::ClientBuilder {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("waplight/0.1.0")
            .danger_accept_invalid_certs(true)
    }
}
