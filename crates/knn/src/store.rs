//! Shared, read-only reference snapshots.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::reference::ScaledReference;

/// Publishes the current [`ScaledReference`] to concurrent predictors.
///
/// Readers take an `Arc` snapshot and predict without holding any lock.
/// [`ReferenceStore::replace`] swaps in a new table; predictors that already
/// hold the previous snapshot keep reading it unchanged.
#[derive(Debug)]
pub struct ReferenceStore {
    current: RwLock<Arc<ScaledReference>>,
}

impl ReferenceStore {
    /// Creates a store publishing `reference`.
    pub fn new(reference: ScaledReference) -> Self {
        Self {
            current: RwLock::new(Arc::new(reference)),
        }
    }

    /// Returns the currently published reference table.
    pub fn snapshot(&self) -> Arc<ScaledReference> {
        Arc::clone(&self.current.read())
    }

    /// Publishes `reference` and returns the previous snapshot.
    pub fn replace(&self, reference: ScaledReference) -> Arc<ScaledReference> {
        let next = Arc::new(reference);
        let n_rows = next.n_rows();
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!(n_rows, "reference table replaced");
        previous
    }
}
