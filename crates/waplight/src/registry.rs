//! File-backed accessory cache.
//!
//! Stands in for the host runtime's accessory persistence: records are
//! loaded before discovery (feeding `configure_accessory`) and written
//! back after every registration change. A failed write loses cache,
//! not accessories, so it is logged and tolerated.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::{debug, warn};

use waplight_core::{AccessoryRecord, AccessoryRegistry};

use crate::error::CliError;

/// Resolve the default accessory cache path.
pub fn default_cache_path() -> PathBuf {
    ProjectDirs::from("dev", "waplight", "waplight").map_or_else(
        || PathBuf::from("accessories.json"),
        |dirs| dirs.data_dir().join("accessories.json"),
    )
}

/// Accessory registry persisted as a JSON file.
pub struct FileRegistry {
    path: PathBuf,
    records: Vec<AccessoryRecord>,
}

impl FileRegistry {
    /// Load the cache, starting empty if the file does not exist yet.
    pub fn load(path: PathBuf) -> Result<Self, CliError> {
        let records = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| CliError::Cache {
                message: format!("unreadable accessory cache {}: {e}", path.display()),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(CliError::Cache {
                    message: format!("cannot read {}: {e}", path.display()),
                });
            }
        };

        debug!(path = %path.display(), count = records.len(), "loaded accessory cache");
        Ok(Self { path, records })
    }

    /// The cached records, in registration order.
    pub fn records(&self) -> &[AccessoryRecord] {
        &self.records
    }

    fn persist(&self) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_vec_pretty(&self.records)?;
            std::fs::write(&self.path, json)
        };

        if let Err(e) = write() {
            warn!(path = %self.path.display(), error = %e, "failed to persist accessory cache");
        }
    }
}

impl AccessoryRegistry for FileRegistry {
    fn register(&mut self, _plugin: &str, _platform: &str, records: &[AccessoryRecord]) {
        self.records.extend_from_slice(records);
        self.persist();
    }

    fn unregister(&mut self, _plugin: &str, _platform: &str, records: &[AccessoryRecord]) {
        self.records
            .retain(|r| !records.iter().any(|dropped| dropped.uuid == r.uuid));
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use waplight_core::{PLATFORM_NAME, PLUGIN_NAME};

    fn record(id: &str, name: &str) -> AccessoryRecord {
        AccessoryRecord::new(
            serde_json::from_value(serde_json::json!({
                "_id": id, "type": "uap", "name": name,
            }))
            .expect("valid device JSON"),
        )
    }

    #[test]
    fn registrations_survive_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("accessories.json");

        let mut registry = FileRegistry::load(path.clone()).expect("load");
        registry.register(PLUGIN_NAME, PLATFORM_NAME, &[record("1", "AP1")]);

        let reloaded = FileRegistry::load(path).expect("reload");
        assert_eq!(reloaded.records().len(), 1);
        assert_eq!(reloaded.records()[0].display_name, "AP1");
    }

    #[test]
    fn unregister_removes_by_uuid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("accessories.json");

        let mut registry = FileRegistry::load(path.clone()).expect("load");
        registry.register(
            PLUGIN_NAME,
            PLATFORM_NAME,
            &[record("1", "AP1"), record("2", "AP2")],
        );
        registry.unregister(PLUGIN_NAME, PLATFORM_NAME, &[record("1", "AP1")]);

        let reloaded = FileRegistry::load(path).expect("reload");
        assert_eq!(reloaded.records().len(), 1);
        assert_eq!(reloaded.records()[0].display_name, "AP2");
    }

    #[test]
    fn missing_cache_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let registry = FileRegistry::load(dir.path().join("nope.json")).expect("load");
        assert!(registry.records().is_empty());
    }
}
