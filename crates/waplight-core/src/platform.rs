// ── Dynamic platform ──
//
// Restored-cache intake and the discovery pass. The reconciler visits
// every access point the controller reports — including excluded ones —
// so accessories that fell out of the include policy still get
// unregistered. Accessories whose devices the controller no longer
// reports are left alone.

use std::sync::Arc;

use tracing::{debug, info, warn};

use waplight_api::{Session, TransportConfig};

use crate::accessory::{
    AccessoryRecord, AccessoryRegistry, PLATFORM_NAME, PLUGIN_NAME, accessory_uuid,
};
use crate::config::PlatformConfig;
use crate::error::CoreError;
use crate::handler::LightHandler;
use crate::session::SessionHolder;

/// The platform: owns the restored accessory cache, the shared session
/// holder, and the live handlers from the last discovery pass.
pub struct WapLightPlatform {
    config: PlatformConfig,
    transport: TransportConfig,
    session: Arc<SessionHolder>,
    /// Accessories restored from the host cache before discovery ran.
    restored: Vec<AccessoryRecord>,
    /// Live handlers attached during the last discovery pass.
    handlers: Vec<Arc<LightHandler>>,
}

impl WapLightPlatform {
    pub fn new(config: PlatformConfig) -> Self {
        Self::with_transport(config, TransportConfig::default())
    }

    pub fn with_transport(config: PlatformConfig, transport: TransportConfig) -> Self {
        Self {
            config,
            transport,
            session: Arc::new(SessionHolder::new()),
            restored: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Host callback: a cached accessory was restored from disk.
    ///
    /// Restored accessories are only tracked here; handlers attach once
    /// discovery confirms the device still exists and is included.
    pub fn configure_accessory(&mut self, record: AccessoryRecord) {
        info!(name = %record.display_name, "loading accessory from cache");
        self.restored.push(record);
    }

    /// Shared session holder for characteristic handlers.
    pub fn session(&self) -> Arc<SessionHolder> {
        Arc::clone(&self.session)
    }

    /// Live handlers from the last discovery pass.
    pub fn handlers(&self) -> &[Arc<LightHandler>] {
        &self.handlers
    }

    /// Run one discovery pass against the controller.
    ///
    /// Authenticates, lists access points, and reconciles them against
    /// the restored cache through `registry`. A failed login aborts the
    /// pass with a warning before any registration changes; the host
    /// keeps running with whatever accessories it already had.
    pub async fn discover_devices(
        &mut self,
        registry: &mut dyn AccessoryRegistry,
    ) -> Result<(), CoreError> {
        let base_url = self.config.base_url()?;

        let session = match Session::login(
            base_url,
            &self.config.username,
            &self.config.password,
            &self.transport,
        )
        .await
        {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "authentication failed; skipping discovery pass");
                return Ok(());
            }
        };

        let access_points = session.list_access_points().await?;

        // Publish the session only after discovery data is in hand, so
        // handlers never observe a session from a half-finished pass.
        self.session.replace(session);
        self.handlers.clear();

        let policy = self.config.filter_policy();
        let included = policy.apply(&access_points);
        debug!(
            total = access_points.len(),
            included = included.len(),
            "discovered access points"
        );

        for ap in access_points {
            let uuid = accessory_uuid(&ap.id);
            // Re-derived per device; must agree with `policy.apply` above.
            let include = policy.includes(&ap.id);
            let existing = self.restored.iter().position(|r| r.uuid == uuid);

            match (existing, include) {
                (Some(pos), false) => {
                    let record = self.restored.remove(pos);
                    info!(
                        name = %record.display_name,
                        id = %ap.id,
                        "removing cached accessory excluded by policy"
                    );
                    registry.unregister(PLUGIN_NAME, PLATFORM_NAME, std::slice::from_ref(&record));
                }
                (Some(pos), true) => {
                    let record = self.restored[pos].clone();
                    info!(
                        name = %record.display_name,
                        id = %ap.id,
                        "restoring accessory from cache"
                    );
                    self.handlers
                        .push(Arc::new(LightHandler::new(record, self.session())));
                }
                (None, false) => {
                    info!(
                        name = %ap.display_name(),
                        id = %ap.id,
                        "skipping access point excluded by policy"
                    );
                }
                (None, true) => {
                    info!(name = %ap.display_name(), id = %ap.id, "adding new accessory");
                    let record = AccessoryRecord::new(ap);
                    registry.register(PLUGIN_NAME, PLATFORM_NAME, std::slice::from_ref(&record));
                    self.handlers
                        .push(Arc::new(LightHandler::new(record, self.session())));
                }
            }
        }

        Ok(())
    }
}
