// ── Include/exclude policy ──
//
// One predicate backs both the population-level filter and the
// per-device create/remove decision in the reconciler, so the two
// evaluations cannot disagree.

use waplight_api::AccessPoint;

/// Configuration-driven allow/deny list over device identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    include_ids: Vec<String>,
    exclude_ids: Vec<String>,
}

impl FilterPolicy {
    pub fn new(include_ids: Vec<String>, exclude_ids: Vec<String>) -> Self {
        Self {
            include_ids,
            exclude_ids,
        }
    }

    /// Whether a device identifier passes the policy.
    ///
    /// An empty include list admits everything; an exclude match always
    /// wins over an include match.
    pub fn includes(&self, id: &str) -> bool {
        let include_ok = self.include_ids.is_empty() || self.include_ids.iter().any(|i| i == id);
        let exclude_hit = self.exclude_ids.iter().any(|e| e == id);
        include_ok && !exclude_hit
    }

    /// Narrow a device list to the devices the policy admits.
    pub fn apply(&self, devices: &[AccessPoint]) -> Vec<AccessPoint> {
        devices
            .iter()
            .filter(|ap| self.includes(&ap.id))
            .cloned()
            .collect()
    }
}
