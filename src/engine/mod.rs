mod conflict;
mod error;
mod mutations;
mod policy;
mod queries;
mod registry;
mod store;

pub use error::EngineError;
pub use policy::{CapacityPolicy, EngineConfig, OverlapPolicy, UnknownPolicy};
pub use registry::RoomRegistry;
pub use store::ReservationStore;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The reservation conflict engine.
///
/// Rooms live in a concurrent registry; they are immutable and never removed,
/// so a room resolved outside the store lock stays valid. All reservations
/// share one lock: a booking's overlap check and its insert happen under the
/// same write guard, so two callers can never both pass the check for
/// overlapping spans.
pub struct Engine {
    config: EngineConfig,
    rooms: RoomRegistry,
    reservations: RwLock<ReservationStore>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rooms: RoomRegistry::new(),
            reservations: RwLock::new(ReservationStore::new()),
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    // Every write to the store is all-or-nothing, so a guard poisoned by a
    // panicking holder still protects a consistent store.
    pub(super) fn read_store(&self) -> RwLockReadGuard<'_, ReservationStore> {
        self.reservations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn write_store(&self) -> RwLockWriteGuard<'_, ReservationStore> {
        self.reservations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
