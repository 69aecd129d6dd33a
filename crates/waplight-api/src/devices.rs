// Device endpoints used by waplight: stat/device reads and the
// rest/device LED override write.

use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::models::{AccessPoint, LedOverride};
use crate::session::Session;

impl Session {
    /// List every wireless access point the controller reports.
    ///
    /// `GET /proxy/network/api/s/default/stat/device`, narrowed to
    /// devices classified as wireless APs (see
    /// [`AccessPoint::is_wireless_ap`] for the two firmware shapes).
    pub async fn list_access_points(&self) -> Result<Vec<AccessPoint>, Error> {
        let url = self.site_url("stat/device")?;
        debug!("listing access points");
        let devices: Vec<AccessPoint> = self.get(url).await?;
        Ok(devices
            .into_iter()
            .filter(AccessPoint::is_wireless_ap)
            .collect())
    }

    /// Get a single access point by controller identifier.
    ///
    /// There is no single-device endpoint; this lists and finds by id.
    /// Returns `None` when the controller does not report the device.
    pub async fn get_access_point(&self, id: &str) -> Result<Option<AccessPoint>, Error> {
        let access_points = self.list_access_points().await?;
        Ok(access_points.into_iter().find(|ap| ap.id == id))
    }

    /// Force a device's status LED on or off.
    ///
    /// `PUT /proxy/network/api/s/default/rest/device/{id}` with
    /// `{"led_override": "on"|"off"}`.
    pub async fn set_led_override(&self, id: &str, on: bool) -> Result<(), Error> {
        let url = self.site_url(&format!("rest/device/{id}"))?;
        let state = if on { LedOverride::On } else { LedOverride::Off };
        debug!(id, ?state, "setting LED override");
        let _: Vec<serde_json::Value> = self.put(url, &json!({ "led_override": state })).await?;
        Ok(())
    }
}
