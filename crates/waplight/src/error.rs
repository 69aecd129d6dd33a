//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use waplight_core::CoreError;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(waplight::config),
        help(
            "Check the config file or pass --config <path>.\n\
             Required keys: host, username, password."
        )
    )]
    Config { message: String },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(waplight::auth_failed),
        help("Verify the controller username and password.")
    )]
    AuthFailed { message: String },

    #[error("Device '{identifier}' not found")]
    #[diagnostic(
        code(waplight::not_found),
        help("Run `waplight discover` to list known access points.")
    )]
    DeviceNotFound { identifier: String },

    #[error("Accessory cache error: {message}")]
    #[diagnostic(
        code(waplight::cache),
        help("Delete the cache file to start over; accessories will be re-registered.")
    )]
    Cache { message: String },

    #[error("Controller error: {message}")]
    #[diagnostic(code(waplight::api))]
    Api { message: String },
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Api { message } => Self::Api { message },
            CoreError::Config { message } => Self::Config { message },
        }
    }
}

impl From<waplight_api::Error> for CliError {
    fn from(err: waplight_api::Error) -> Self {
        Self::from(CoreError::from(err))
    }
}
