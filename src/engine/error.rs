use thiserror::Error;

use crate::model::Ms;

/// Every rejection the engine can report. All are recoverable: a rejected
/// call leaves the engine state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("room not found: {0}")]
    RoomNotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("conflict with reservation: {0}")]
    ConflictDetected(String),
    #[error("capacity {capacity} exceeded: {occupied} seats already booked in window")]
    CapacityExceeded { capacity: u32, occupied: u64 },
    #[error("invalid span: start {start} must be before end {end}")]
    InvalidSpan { start: Ms, end: Ms },
    #[error("room capacity must be positive")]
    InvalidCapacity,
    #[error("invalid identifier: {0}")]
    InvalidId(&'static str),
    #[error("limit exceeded: {0}")]
    LimitExceeded(&'static str),
}

impl EngineError {
    /// Short label for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            EngineError::RoomNotFound(_) => "room_not_found",
            EngineError::AlreadyExists(_) => "already_exists",
            EngineError::ConflictDetected(_) => "conflict",
            EngineError::CapacityExceeded { .. } => "capacity_exceeded",
            EngineError::InvalidSpan { .. } => "invalid_span",
            EngineError::InvalidCapacity => "invalid_capacity",
            EngineError::InvalidId(_) => "invalid_id",
            EngineError::LimitExceeded(_) => "limit_exceeded",
        }
    }
}
