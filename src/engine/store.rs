use std::collections::HashSet;

use crate::model::*;

/// Accepted reservations in acceptance order.
///
/// The store does not judge what it is given; conflict and duplicate checks
/// belong to the engine, which holds the store's write lock while it checks
/// and inserts.
#[derive(Default)]
pub struct ReservationStore {
    reservations: Vec<Reservation>,
    ids: HashSet<String>,
}

impl ReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Append at the end of the ordered collection.
    pub fn insert(&mut self, reservation: Reservation) {
        self.ids.insert(reservation.id.clone());
        self.reservations.push(reservation);
    }

    /// Reservations of one room, in insertion order. Each call is a fresh
    /// traversal.
    pub fn for_room<'a>(&'a self, room_id: &'a str) -> impl Iterator<Item = &'a Reservation> + 'a {
        self.reservations.iter().filter(move |r| r.room_id == room_id)
    }

    pub fn all(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(id: &str, room_id: &str, start: Ms, end: Ms) -> Reservation {
        Reservation {
            id: id.into(),
            room_id: room_id.into(),
            span: Span::new(start, end),
        }
    }

    #[test]
    fn insert_preserves_order() {
        let mut store = ReservationStore::new();
        store.insert(reservation("b", "R1", 300, 400));
        store.insert(reservation("a", "R1", 100, 200));
        store.insert(reservation("c", "R2", 0, 50));
        let ids: Vec<&str> = store.all().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn for_room_filters_and_restarts() {
        let mut store = ReservationStore::new();
        store.insert(reservation("a", "R1", 100, 200));
        store.insert(reservation("b", "R2", 100, 200));
        store.insert(reservation("c", "R1", 300, 400));

        let first: Vec<&str> = store.for_room("R1").map(|r| r.id.as_str()).collect();
        let second: Vec<&str> = store.for_room("R1").map(|r| r.id.as_str()).collect();
        assert_eq!(first, vec!["a", "c"]);
        assert_eq!(first, second);
        assert_eq!(store.for_room("R3").count(), 0);
    }

    #[test]
    fn contains_tracks_ids() {
        let mut store = ReservationStore::new();
        assert!(store.is_empty());
        assert!(!store.contains("a"));
        store.insert(reservation("a", "R1", 100, 200));
        assert!(store.contains("a"));
        assert!(!store.contains("b"));
    }
}
