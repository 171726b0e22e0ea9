use std::sync::Mutex;

use crate::domain::report::StoredDataset;

/// Process-wide holder of the single most-recently-ingested dataset.
///
/// One slot, last-write-wins, no history. The slot is guarded by a mutex
/// and `current()` hands out a cloned snapshot, so a reader never observes
/// a partially replaced entry.
#[derive(Debug, Default)]
pub struct DatasetStore {
    slot: Mutex<Option<StoredDataset>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the held entry wholesale.
    pub fn replace(&self, entry: StoredDataset) {
        *self.slot.lock().unwrap() = Some(entry);
    }

    /// Snapshot of the held entry, or `None` if nothing has been ingested.
    pub fn current(&self) -> Option<StoredDataset> {
        self.slot.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().unwrap().is_none()
    }
}
