// ── Characteristic handlers ──
//
// One handler per live accessory; `get_on`/`set_on` back the host's On
// characteristic and round-trip to the controller on every call. There
// is no local state cache. Failures degrade to `false` plus an error
// log so the host's characteristic dispatch stays responsive — a
// handler never panics and never propagates an error to the host.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::accessory::AccessoryRecord;
use crate::session::SessionHolder;

/// Manufacturer placeholder on the accessory information service.
pub const MANUFACTURER: &str = "Default-Manufacturer";

/// Model placeholder on the accessory information service.
pub const MODEL: &str = "Default-Model";

/// Serial number placeholder on the accessory information service.
pub const SERIAL_NUMBER: &str = "Default-Serial";

/// Static information-service characteristics for one light accessory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessoryInformation {
    pub manufacturer: &'static str,
    pub model: &'static str,
    pub serial_number: &'static str,
    pub name: String,
}

/// Binds one registered accessory's On characteristic to the
/// controller's LED override for its device.
pub struct LightHandler {
    record: AccessoryRecord,
    session: Arc<SessionHolder>,
}

impl LightHandler {
    pub fn new(record: AccessoryRecord, session: Arc<SessionHolder>) -> Self {
        Self { record, session }
    }

    /// The accessory record this handler is attached to.
    pub fn record(&self) -> &AccessoryRecord {
        &self.record
    }

    /// Information-service characteristics for this accessory.
    pub fn information(&self) -> AccessoryInformation {
        AccessoryInformation {
            manufacturer: MANUFACTURER,
            model: MODEL,
            serial_number: SERIAL_NUMBER,
            name: self.record.display_name.clone(),
        }
    }

    /// Handle a SET on the On characteristic.
    ///
    /// Returns `true` when the controller accepted the write. Without
    /// an authorized session the call is refused, not retried.
    pub async fn set_on(&self, value: bool) -> bool {
        let Some(session) = self.session.get() else {
            error!(
                name = %self.record.display_name,
                "cannot set LED state: no authorized session"
            );
            return false;
        };

        match session
            .set_led_override(&self.record.access_point.id, value)
            .await
        {
            Ok(()) => {
                debug!(name = %self.record.display_name, value, "set LED override");
                true
            }
            Err(e) => {
                error!(
                    name = %self.record.display_name,
                    error = %e,
                    "failed to set LED state"
                );
                false
            }
        }
    }

    /// Handle a GET on the On characteristic.
    ///
    /// Live round trip on every call; degrades to `false` when no
    /// session exists or the controller no longer reports the device.
    pub async fn get_on(&self) -> bool {
        let Some(session) = self.session.get() else {
            error!(
                name = %self.record.display_name,
                "cannot read LED state: no authorized session"
            );
            return false;
        };

        match session.get_access_point(&self.record.access_point.id).await {
            Ok(Some(ap)) => {
                let on = ap.led_is_on();
                debug!(name = %self.record.display_name, on, "read LED override");
                on
            }
            Ok(None) => {
                warn!(
                    name = %self.record.display_name,
                    id = %self.record.access_point.id,
                    "device missing from controller response"
                );
                false
            }
            Err(e) => {
                error!(
                    name = %self.record.display_name,
                    error = %e,
                    "failed to read LED state"
                );
                false
            }
        }
    }
}
