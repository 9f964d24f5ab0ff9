use std::str::FromStr;

use thiserror::Error;

use crate::model::Span;

/// How two reservation spans are compared for conflicts.
///
/// `Inclusive` is the scheduling policy: a booking that starts exactly when
/// another ends still conflicts with it. `HalfOpen` must be opted into
/// explicitly and changes which adjacent bookings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    #[default]
    Inclusive,
    HalfOpen,
}

impl OverlapPolicy {
    pub fn overlaps(self, a: &Span, b: &Span) -> bool {
        match self {
            OverlapPolicy::Inclusive => a.overlaps(b),
            OverlapPolicy::HalfOpen => a.overlaps_half_open(b),
        }
    }
}

/// Whether bookings are admitted against room capacity.
///
/// `Legacy` sums the capacity of the rooms of every reservation (in any room)
/// overlapping the candidate and rejects once that sum reaches the target
/// room's capacity. It does not model seats; it exists for compatibility with
/// schedules produced by the old scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapacityPolicy {
    #[default]
    Disabled,
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    pub overlap: OverlapPolicy,
    pub capacity: CapacityPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} policy: {value:?}")]
pub struct UnknownPolicy {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for OverlapPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inclusive" => Ok(OverlapPolicy::Inclusive),
            "half-open" | "half_open" | "halfopen" => Ok(OverlapPolicy::HalfOpen),
            _ => Err(UnknownPolicy {
                kind: "overlap",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for CapacityPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" | "off" => Ok(CapacityPolicy::Disabled),
            "legacy" => Ok(CapacityPolicy::Legacy),
            _ => Err(UnknownPolicy {
                kind: "capacity",
                value: s.to_string(),
            }),
        }
    }
}
