//! Command implementations.

use tracing::info;

use waplight_api::{Session, TransportConfig};
use waplight_core::{CoreError, PlatformConfig, WapLightPlatform};

use crate::cli::LedState;
use crate::error::CliError;
use crate::registry::{FileRegistry, default_cache_path};

/// Run one discovery pass and print the resulting accessories.
pub async fn discover(config: PlatformConfig) -> Result<(), CliError> {
    let mut registry = FileRegistry::load(default_cache_path())?;
    let mut platform = WapLightPlatform::new(config);

    for record in registry.records().to_vec() {
        platform.configure_accessory(record);
    }

    platform
        .discover_devices(&mut registry)
        .await
        .map_err(CliError::from)?;

    if platform.handlers().is_empty() {
        info!("no access points registered");
        return Ok(());
    }

    for handler in platform.handlers() {
        let information = handler.information();
        let on = handler.get_on().await;
        println!(
            "{} [{}] led={}",
            information.name,
            handler.record().uuid,
            if on { "on" } else { "off" }
        );
    }

    Ok(())
}

/// Read the LED state of one access point.
pub async fn get(config: PlatformConfig, id: &str) -> Result<(), CliError> {
    let session = login(&config).await?;

    match session.get_access_point(id).await? {
        Some(ap) => {
            println!(
                "{} led={}",
                ap.display_name(),
                if ap.led_is_on() { "on" } else { "off" }
            );
            Ok(())
        }
        None => Err(CliError::DeviceNotFound {
            identifier: id.to_owned(),
        }),
    }
}

/// Force the LED state of one access point.
pub async fn set(config: PlatformConfig, id: &str, state: LedState) -> Result<(), CliError> {
    let session = login(&config).await?;

    // Resolve the device first so an unknown id reports not-found
    // instead of an opaque controller error.
    let ap = session
        .get_access_point(id)
        .await?
        .ok_or_else(|| CliError::DeviceNotFound {
            identifier: id.to_owned(),
        })?;

    session.set_led_override(id, state.is_on()).await?;
    println!(
        "{} led={}",
        ap.display_name(),
        if state.is_on() { "on" } else { "off" }
    );
    Ok(())
}

async fn login(config: &PlatformConfig) -> Result<Session, CliError> {
    let base_url = config.base_url().map_err(CliError::from)?;
    Session::login(
        base_url,
        &config.username,
        &config.password,
        &TransportConfig::default(),
    )
    .await
    .map_err(|e| CliError::from(CoreError::from(e)))
}
