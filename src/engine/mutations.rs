use tracing::{debug, info};

use crate::limits::*;
use crate::model::*;
use crate::observability::{RESERVATIONS_TOTAL, ROOMS_REGISTERED};

use super::conflict::{check_capacity, find_conflict, validate_id, validate_span};
use super::{Engine, EngineError};

impl Engine {
    pub fn add_room(&self, id: &str, name: &str, capacity: u32) -> Result<Room, EngineError> {
        validate_id(id)?;
        if name.len() > MAX_NAME_LEN {
            return Err(EngineError::LimitExceeded("room name too long"));
        }
        if capacity == 0 {
            return Err(EngineError::InvalidCapacity);
        }
        let room = Room {
            id: id.to_string(),
            name: name.to_string(),
            capacity,
        };
        self.rooms.insert(room.clone())?;
        metrics::gauge!(ROOMS_REGISTERED).set(self.rooms.len() as f64);
        info!(room = %room.id, capacity, "room added");
        Ok(room)
    }

    /// Book `[start, end]` on a room. All-or-nothing: on any rejection the
    /// store is left exactly as it was.
    pub fn make_reservation(
        &self,
        id: &str,
        room_id: &str,
        start: Ms,
        end: Ms,
    ) -> Result<Reservation, EngineError> {
        let result = self.try_reserve(id, room_id, start, end);
        let outcome = match &result {
            Ok(_) => "accepted",
            Err(e) => e.reason(),
        };
        metrics::counter!(RESERVATIONS_TOTAL, "outcome" => outcome).increment(1);
        result
    }

    fn try_reserve(
        &self,
        id: &str,
        room_id: &str,
        start: Ms,
        end: Ms,
    ) -> Result<Reservation, EngineError> {
        validate_id(id)?;
        let span = validate_span(start, end)?;
        let room = self
            .rooms
            .get(room_id)
            .ok_or_else(|| EngineError::RoomNotFound(room_id.to_string()))?;

        let mut store = self.write_store();
        if store.len() >= MAX_RESERVATIONS {
            return Err(EngineError::LimitExceeded("too many reservations"));
        }
        if store.contains(id) {
            return Err(EngineError::AlreadyExists(id.to_string()));
        }

        if let Some(existing) = find_conflict(&store, room_id, &span, self.config.overlap) {
            debug!(reservation = id, room = room_id, conflict = %existing.id, "reservation rejected");
            return Err(EngineError::ConflictDetected(existing.id.clone()));
        }

        check_capacity(
            self.config.capacity,
            self.config.overlap,
            &room,
            &store,
            &self.rooms,
            &span,
        )?;

        let reservation = Reservation {
            id: id.to_string(),
            room_id: room_id.to_string(),
            span,
        };
        store.insert(reservation.clone());
        info!(reservation = id, room = room_id, start, end, "reservation accepted");
        Ok(reservation)
    }
}
