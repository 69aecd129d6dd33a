// ── Accessory identity and the host registry boundary ──
//
// The host runtime owns accessory persistence; waplight only decides
// which accessories exist. Identity is a v5 UUID derived from the
// controller identifier, so the same access point always maps to the
// same accessory across restarts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use waplight_api::AccessPoint;

/// Plugin identifier used when registering with the host runtime.
pub const PLUGIN_NAME: &str = "waplight";

/// Platform identifier used when registering with the host runtime.
pub const PLATFORM_NAME: &str = "UnifiWapLight";

/// Derive the stable accessory UUID for a controller device identifier.
///
/// Same identifier, same UUID — always. Distinct identifiers produce
/// distinct UUIDs (SHA-1 name-based derivation).
pub fn accessory_uuid(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes())
}

/// A registered accessory, as the host runtime persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessoryRecord {
    pub uuid: Uuid,
    pub display_name: String,
    /// Snapshot of the access point this accessory represents, kept as
    /// the accessory's context blob.
    pub access_point: AccessPoint,
}

impl AccessoryRecord {
    /// Build a fresh record for a newly discovered access point.
    pub fn new(access_point: AccessPoint) -> Self {
        Self {
            uuid: accessory_uuid(&access_point.id),
            display_name: access_point.display_name().to_owned(),
            access_point,
        }
    }
}

/// Host-runtime accessory registration boundary.
///
/// Implemented by the embedding host (and by test doubles). Calls are
/// keyed by the plugin/platform namespace pair the host uses to
/// partition accessories between plugins.
pub trait AccessoryRegistry {
    /// Register new accessories with the host.
    fn register(&mut self, plugin: &str, platform: &str, records: &[AccessoryRecord]);

    /// Remove previously registered accessories from the host.
    fn unregister(&mut self, plugin: &str, platform: &str, records: &[AccessoryRecord]);
}
