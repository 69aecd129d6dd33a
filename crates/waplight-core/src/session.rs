// ── Shared session holder ──
//
// A discovery pass builds a complete `Session` and swaps it in
// atomically; concurrent characteristic handlers either see the old
// session or the new one, never a half-built state. The holder is
// replace-only: nothing ever mutates a published session in place.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use waplight_api::Session;

/// Process-scoped holder for the current authorized session.
#[derive(Default)]
pub struct SessionHolder {
    current: ArcSwapOption<Session>,
}

impl SessionHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current session, if any pass has authenticated successfully.
    pub fn get(&self) -> Option<Arc<Session>> {
        self.current.load_full()
    }

    /// Swap in a freshly authenticated session.
    pub fn replace(&self, session: Session) {
        self.current.store(Some(Arc::new(session)));
    }
}
