// ── Core error types ──
//
// User-facing errors from waplight-core. Consumers never see raw HTTP
// status codes or JSON parse failures; the `From<waplight_api::Error>`
// impl translates transport-layer errors at the crate seam.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller error: {message}")]
    Api { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<waplight_api::Error> for CoreError {
    fn from(err: waplight_api::Error) -> Self {
        match err {
            waplight_api::Error::Authentication { message } => {
                Self::AuthenticationFailed { message }
            }
            waplight_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("invalid URL: {e}"),
            },
            waplight_api::Error::Tls(message) => Self::Api {
                message: format!("TLS error: {message}"),
            },
            waplight_api::Error::Transport(e) => Self::Api {
                message: e.to_string(),
            },
            waplight_api::Error::Api { message } => Self::Api { message },
            waplight_api::Error::Deserialization { message, .. } => Self::Api {
                message: format!("bad controller response: {message}"),
            },
        }
    }
}
