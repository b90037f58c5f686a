//! Append positions and maintain the latest position pointer.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::{Position, PositionId};
use crate::error::Result;
use crate::port::outbound::store::Store;

/// Writes positions through a [`Store`].
pub struct PositionWriter {
    store: Arc<dyn Store>,
    /// Held across insert and generated-id retrieval.
    insert_lock: Mutex<()>,
}

impl PositionWriter {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            insert_lock: Mutex::new(()),
        }
    }

    /// Append a position and return the id the store generated for it.
    ///
    /// Only one insert runs at a time process-wide, so a generated id is
    /// never handed to the wrong caller. Returns `Ok(None)` when the store
    /// has no position statement configured.
    ///
    /// # Errors
    /// Returns the store error if the insert fails.
    pub fn add_position(&self, position: &Position) -> Result<Option<PositionId>> {
        let _guard = self.insert_lock.lock();
        let id = self.store.insert_position(position)?;
        match id {
            Some(id) => debug!(
                device_id = %position.device_id(),
                position_id = %id,
                "Recorded position"
            ),
            None => debug!(
                device_id = %position.device_id(),
                "Position statement not configured, nothing recorded"
            ),
        }
        Ok(id)
    }

    /// Point the position's device at `position_id`.
    ///
    /// Not serialized: callers pass the id they just received from
    /// [`add_position`](Self::add_position). Performs no insert.
    ///
    /// # Errors
    /// Returns the store error if the update fails.
    pub fn update_latest_position(&self, position: &Position, position_id: PositionId) -> Result<()> {
        let updated = self
            .store
            .update_device_latest_position(position.device_id(), position_id)?;
        if !updated {
            warn!(
                device_id = %position.device_id(),
                position_id = %position_id,
                "Latest position pointer not updated"
            );
        }
        Ok(())
    }
}

impl std::fmt::Debug for PositionWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionWriter").finish_non_exhaustive()
    }
}
