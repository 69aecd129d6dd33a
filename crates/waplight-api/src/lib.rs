// waplight-api: Async Rust client for the UniFi controller operations
// waplight needs — login, access point listing, and LED override writes.

pub mod devices;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;

pub use error::Error;
pub use models::{AccessPoint, LedOverride};
pub use session::Session;
pub use transport::TransportConfig;
