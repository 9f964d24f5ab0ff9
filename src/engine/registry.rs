use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::limits::MAX_ROOMS;
use crate::model::Room;

use super::EngineError;

/// Authoritative set of rooms, keyed by id. Rooms are never removed.
pub struct RoomRegistry {
    rooms: DashMap<String, Room>,
    /// Slots claimed by inserts; never exceeds `max_rooms`.
    claimed: AtomicUsize,
    max_rooms: usize,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::with_limit(MAX_ROOMS)
    }

    pub fn with_limit(max_rooms: usize) -> Self {
        Self {
            rooms: DashMap::new(),
            claimed: AtomicUsize::new(0),
            max_rooms,
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rooms.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<Room> {
        self.rooms.get(id).map(|e| e.value().clone())
    }

    pub fn capacity_of(&self, id: &str) -> Option<u32> {
        self.rooms.get(id).map(|e| e.value().capacity)
    }

    /// Insert a room unless its id is taken or the registry is full. The
    /// duplicate check, the slot claim and the insert happen under the same
    /// shard lock.
    pub fn insert(&self, room: Room) -> Result<(), EngineError> {
        match self.rooms.entry(room.id.clone()) {
            Entry::Occupied(e) => Err(EngineError::AlreadyExists(e.key().clone())),
            Entry::Vacant(e) => {
                let claim = self
                    .claimed
                    .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                        (n < self.max_rooms).then_some(n + 1)
                    });
                if claim.is_err() {
                    return Err(EngineError::LimitExceeded("too many rooms"));
                }
                e.insert(room);
                Ok(())
            }
        }
    }

    /// All rooms ordered by id.
    pub fn list(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self.rooms.iter().map(|e| e.value().clone()).collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str, capacity: u32) -> Room {
        Room {
            id: id.into(),
            name: format!("Room {id}"),
            capacity,
        }
    }

    #[test]
    fn insert_and_get() {
        let registry = RoomRegistry::new();
        assert!(registry.is_empty());
        registry.insert(room("R1", 10)).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("R1"));
        assert_eq!(registry.get("R1").unwrap().capacity, 10);
        assert_eq!(registry.capacity_of("R1"), Some(10));
    }

    #[test]
    fn get_missing_returns_none() {
        let registry = RoomRegistry::new();
        assert!(registry.get("nope").is_none());
        assert!(registry.capacity_of("nope").is_none());
    }

    #[test]
    fn duplicate_id_rejected_and_original_kept() {
        let registry = RoomRegistry::new();
        registry.insert(room("R1", 10)).unwrap();
        let result = registry.insert(room("R1", 99));
        assert_eq!(result, Err(EngineError::AlreadyExists("R1".into())));
        assert_eq!(registry.get("R1").unwrap().capacity, 10);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn full_registry_rejects_new_rooms() {
        let registry = RoomRegistry::with_limit(2);
        registry.insert(room("a", 1)).unwrap();
        registry.insert(room("b", 1)).unwrap();
        assert_eq!(
            registry.insert(room("c", 1)),
            Err(EngineError::LimitExceeded("too many rooms"))
        );
        // A duplicate still reports the duplicate.
        assert_eq!(
            registry.insert(room("a", 1)),
            Err(EngineError::AlreadyExists("a".into()))
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn limit_holds_under_concurrent_inserts() {
        let registry = RoomRegistry::with_limit(5);
        std::thread::scope(|s| {
            for t in 0..8 {
                let registry = &registry;
                s.spawn(move || {
                    for i in 0..10 {
                        let _ = registry.insert(room(&format!("t{t}-{i}"), 1));
                    }
                });
            }
        });
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn list_is_sorted_by_id() {
        let registry = RoomRegistry::new();
        for id in ["c", "a", "b"] {
            registry.insert(room(id, 1)).unwrap();
        }
        let ids: Vec<String> = registry.list().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
