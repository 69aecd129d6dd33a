//! Config loading for the waplight CLI.
//!
//! JSON file (the plugin's platform config block) merged with
//! `WAPLIGHT_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Json},
};

use waplight_core::PlatformConfig;

use crate::error::CliError;

/// Resolve the default config file path via XDG / platform conventions.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("dev", "waplight", "waplight").map_or_else(
        || PathBuf::from("waplight.json"),
        |dirs| dirs.config_dir().join("config.json"),
    )
}

/// Load the platform config from file + environment.
pub fn load(path: Option<&Path>) -> Result<PlatformConfig, CliError> {
    let path = path.map_or_else(default_config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Json::file(&path))
        .merge(Env::prefixed("WAPLIGHT_"));

    figment.extract().map_err(|e| CliError::Config {
        message: e.to_string(),
    })
}
