use thiserror::Error;

/// Top-level error type for the `waplight-api` crate.
///
/// Covers the full surface of this client: the login handshake, HTTP
/// transport, and the controller's JSON envelope. `waplight-core` maps
/// these into its own domain errors at the crate seam.
#[derive(Debug, Error)]
pub enum Error {
    /// Login failed: bad credentials, a non-2xx response, a missing
    /// session cookie, or an undecodable session token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Error reported by the controller API (non-2xx status or an
    /// envelope with `meta.rc != "ok"`).
    #[error("Controller API error: {message}")]
    Api { message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
