use crate::model::*;

use super::conflict::{find_conflict, validate_span};
use super::{Engine, EngineError};

impl Engine {
    pub fn get_room(&self, id: &str) -> Result<Room, EngineError> {
        self.rooms
            .get(id)
            .ok_or_else(|| EngineError::RoomNotFound(id.to_string()))
    }

    pub fn list_rooms(&self) -> Vec<Room> {
        self.rooms.list()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// True when no reservation of the room overlaps `[start, end]`. Pure
    /// query: never mutates and answers the same for the same store contents.
    pub fn check_availability(&self, room_id: &str, start: Ms, end: Ms) -> Result<bool, EngineError> {
        let span = validate_span(start, end)?;
        if !self.rooms.contains(room_id) {
            return Err(EngineError::RoomNotFound(room_id.to_string()));
        }
        let store = self.read_store();
        Ok(find_conflict(&store, room_id, &span, self.config.overlap).is_none())
    }

    /// Every reservation in acceptance order.
    pub fn list_reservations(&self) -> Vec<Reservation> {
        self.read_store().all().cloned().collect()
    }

    pub fn reservations_for_room(&self, room_id: &str) -> Result<Vec<Reservation>, EngineError> {
        if !self.rooms.contains(room_id) {
            return Err(EngineError::RoomNotFound(room_id.to_string()));
        }
        Ok(self.read_store().for_room(room_id).cloned().collect())
    }

    pub fn reservation_count(&self) -> usize {
        self.read_store().len()
    }

    pub fn snapshot(&self) -> Snapshot {
        let store = self.read_store();
        Snapshot {
            rooms: self.rooms.list(),
            reservations: store.all().cloned().collect(),
        }
    }
}
