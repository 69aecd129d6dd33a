// ── Platform configuration ──
//
// The user-facing config surface: controller address, credentials, and
// the optional include/exclude identifier lists. Keys are camelCase to
// match the plugin's JSON config block. Id lists default to empty
// rather than being optional, so the filter logic never branches on
// presence.

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::error::CoreError;
use crate::filter::FilterPolicy;

/// Configuration for one controller's worth of access point lights.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    /// Controller address as `hostname:port`, or a full URL.
    pub host: String,

    /// Controller account username.
    pub username: String,

    /// Controller account password.
    pub password: SecretString,

    /// If non-empty, only these device identifiers become lights.
    #[serde(default)]
    pub include_ids: Vec<String>,

    /// Device identifiers that never become lights. Wins over `includeIds`.
    #[serde(default)]
    pub exclude_ids: Vec<String>,
}

impl PlatformConfig {
    /// Controller base URL.
    ///
    /// Bare `hostname:port` values get the `https://` scheme the
    /// controller requires; values already carrying a scheme are taken
    /// as-is.
    pub fn base_url(&self) -> Result<Url, CoreError> {
        let raw = if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("https://{}", self.host)
        };
        raw.parse().map_err(|_| CoreError::Config {
            message: format!("invalid controller host: {}", self.host),
        })
    }

    /// The include/exclude policy configured for this platform.
    pub fn filter_policy(&self) -> FilterPolicy {
        FilterPolicy::new(self.include_ids.clone(), self.exclude_ids.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_keys_and_defaults() {
        let config: PlatformConfig = serde_json::from_value(serde_json::json!({
            "host": "unifi.local:443",
            "username": "admin",
            "password": "secret",
            "includeIds": ["a"],
        }))
        .expect("valid config");

        assert_eq!(config.include_ids, vec!["a".to_owned()]);
        assert!(config.exclude_ids.is_empty());
    }

    #[test]
    fn bare_host_gets_https_scheme() {
        let config: PlatformConfig = serde_json::from_value(serde_json::json!({
            "host": "unifi.local:8443",
            "username": "admin",
            "password": "secret",
        }))
        .expect("valid config");

        let url = config.base_url().expect("valid URL");
        assert_eq!(url.as_str(), "https://unifi.local:8443/");
    }

    #[test]
    fn full_url_host_is_taken_as_is() {
        let config: PlatformConfig = serde_json::from_value(serde_json::json!({
            "host": "http://127.0.0.1:9000",
            "username": "admin",
            "password": "secret",
        }))
        .expect("valid config");

        let url = config.base_url().expect("valid URL");
        assert_eq!(url.scheme(), "http");
    }
}
