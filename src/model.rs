use serde::{Deserialize, Serialize};

/// Unix milliseconds in the single implicit zone. The only time type.
pub type Ms = i64;

/// Closed interval `[start, end]`. Both endpoints belong to the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    /// Inclusive overlap: spans that merely touch at an endpoint overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Conventional `[start, end)` overlap, where touching spans are disjoint.
    pub fn overlaps_half_open(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A bookable conference room. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    /// Seats. Informational unless the legacy capacity check is enabled.
    pub capacity: u32,
}

/// An accepted reservation. There is exactly one lifecycle state (active);
/// reservations are never updated or cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub room_id: String,
    pub span: Span,
}

impl Reservation {
    pub fn start(&self) -> Ms {
        self.span.start
    }

    pub fn end(&self) -> Ms {
        self.span.end
    }
}

// ── Query result types ───────────────────────────────────────────

/// Consistent view of every room and reservation, taken under one lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rooms: Vec<Room>,
    pub reservations: Vec<Reservation>,
}
