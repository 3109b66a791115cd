//! store.rs — holds the currently displayed bundle between load cycles.
//!
//! The aggregation functions stay pure: they take a bundle by reference and
//! never touch this slot. The slot only answers "what is the latest bundle"
//! for the API layer and accepts whole-bundle replacement from the refresh
//! path. There is no field-level mutation of a stored bundle.

use std::sync::{Arc, RwLock};

use crate::feeds::types::FeedBundle;

#[derive(Debug, Default)]
pub struct BundleSlot {
    inner: RwLock<Option<Arc<FeedBundle>>>,
}

impl BundleSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest installed bundle, if any load cycle has completed.
    pub fn current(&self) -> Option<Arc<FeedBundle>> {
        self.inner.read().expect("bundle slot poisoned").clone()
    }

    /// Atomically replace the stored bundle. A bundle with every feed absent
    /// does not displace an existing one (the stale data beats a blank
    /// dashboard); it is only installed when the slot is still empty, so
    /// consumers get the defaults path instead of "no data yet".
    ///
    /// Returns whether the bundle was installed.
    pub fn install(&self, bundle: FeedBundle) -> bool {
        let mut guard = self.inner.write().expect("bundle slot poisoned");
        if bundle.is_empty() && guard.is_some() {
            return false;
        }
        *guard = Some(Arc::new(bundle));
        true
    }
}
