use crate::limits::*;
use crate::model::*;

use super::policy::{CapacityPolicy, OverlapPolicy};
use super::registry::RoomRegistry;
use super::store::ReservationStore;
use super::EngineError;

pub(crate) fn validate_span(start: Ms, end: Ms) -> Result<Span, EngineError> {
    if start < MIN_VALID_TIMESTAMP_MS || end > MAX_VALID_TIMESTAMP_MS {
        return Err(EngineError::LimitExceeded("timestamp out of range"));
    }
    if start >= end {
        return Err(EngineError::InvalidSpan { start, end });
    }
    Ok(Span::new(start, end))
}

pub(crate) fn validate_id(id: &str) -> Result<(), EngineError> {
    if id.is_empty() {
        return Err(EngineError::InvalidId("empty id"));
    }
    if id.chars().any(char::is_whitespace) {
        return Err(EngineError::InvalidId("id contains whitespace"));
    }
    if id.len() > MAX_ID_LEN {
        return Err(EngineError::LimitExceeded("id too long"));
    }
    Ok(())
}

/// First reservation of `room_id` that overlaps `span`, in insertion order.
pub(crate) fn find_conflict<'a>(
    store: &'a ReservationStore,
    room_id: &'a str,
    span: &Span,
    policy: OverlapPolicy,
) -> Option<&'a Reservation> {
    store
        .for_room(room_id)
        .find(|r| policy.overlaps(&r.span, span))
}

/// Sum of room capacities over every reservation, in any room, overlapping
/// `span`.
pub(crate) fn legacy_occupancy(
    store: &ReservationStore,
    rooms: &RoomRegistry,
    span: &Span,
    policy: OverlapPolicy,
) -> u64 {
    store
        .all()
        .filter(|r| policy.overlaps(&r.span, span))
        .map(|r| u64::from(rooms.capacity_of(&r.room_id).unwrap_or(0)))
        .sum()
}

pub(crate) fn check_capacity(
    capacity_policy: CapacityPolicy,
    overlap_policy: OverlapPolicy,
    room: &Room,
    store: &ReservationStore,
    rooms: &RoomRegistry,
    span: &Span,
) -> Result<(), EngineError> {
    match capacity_policy {
        CapacityPolicy::Disabled => Ok(()),
        CapacityPolicy::Legacy => {
            let occupied = legacy_occupancy(store, rooms, span, overlap_policy);
            if occupied >= u64::from(room.capacity) {
                return Err(EngineError::CapacityExceeded {
                    capacity: room.capacity,
                    occupied,
                });
            }
            Ok(())
        }
    }
}
