// waplight-core: reconciliation and accessory logic between the host
// runtime boundary and the controller client.

pub mod accessory;
pub mod config;
pub mod error;
pub mod filter;
pub mod handler;
pub mod platform;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use accessory::{AccessoryRecord, AccessoryRegistry, PLATFORM_NAME, PLUGIN_NAME, accessory_uuid};
pub use config::PlatformConfig;
pub use error::CoreError;
pub use filter::FilterPolicy;
pub use handler::{AccessoryInformation, LightHandler};
pub use platform::WapLightPlatform;
pub use session::SessionHolder;
