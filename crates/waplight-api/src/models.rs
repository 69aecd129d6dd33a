// Controller response types.
//
// Only the fields waplight consumes are modeled; everything else lands
// in `extra`. Fields use `#[serde(default)]` because the stat/device
// payload is inconsistent across controller firmware versions.

use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard UniFi API response envelope.
///
/// Every endpoint this client touches wraps its payload:
/// ```json
/// { "meta": { "rc": "ok", "msg": "optional" }, "data": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub meta: Meta,
    pub data: Vec<T>,
}

/// Metadata from the envelope. `rc` == `"ok"` means success.
#[derive(Debug, Deserialize)]
pub struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

// ── LED override ─────────────────────────────────────────────────────

/// Status LED override state as stored on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedOverride {
    On,
    Off,
    /// Any other value (`"default"` on stock firmware): the device
    /// follows the site-wide LED setting instead of a forced state.
    #[serde(other)]
    Default,
}

// ── Device ───────────────────────────────────────────────────────────

/// Device record from `stat/device`, narrowed to the fields waplight uses.
///
/// Firmwares disagree on how an access point is tagged: classic
/// controllers use `type: "uap"`, newer UniFi OS builds also expose an
/// `is_access_point` boolean. Both shapes resolve through
/// [`AccessPoint::is_wireless_ap`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessPoint {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    #[serde(default)]
    pub is_access_point: Option<bool>,
    #[serde(default)]
    pub led_override: Option<LedOverride>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AccessPoint {
    /// Device type tag classic firmwares use for wireless APs.
    const UAP_TYPE: &'static str = "uap";

    /// Whether this device is a wireless access point.
    ///
    /// The explicit boolean wins when present; the `type` tag is the
    /// fallback for older controllers.
    pub fn is_wireless_ap(&self) -> bool {
        if let Some(flag) = self.is_access_point {
            return flag;
        }
        self.device_type.as_deref() == Some(Self::UAP_TYPE)
    }

    /// Whether the status LED override is currently forced on.
    pub fn led_is_on(&self) -> bool {
        self.led_override == Some(LedOverride::On)
    }

    /// Display name, falling back to the controller identifier.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
