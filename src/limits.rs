use crate::model::Ms;

pub const MAX_ROOMS: usize = 10_000;
pub const MAX_RESERVATIONS: usize = 1_000_000;
pub const MAX_ID_LEN: usize = 128;
pub const MAX_NAME_LEN: usize = 256;

/// Longest accepted protocol line, in bytes.
pub const MAX_LINE_LEN: usize = 4096;

/// 0001-01-01 00:00
pub const MIN_VALID_TIMESTAMP_MS: Ms = -62_135_596_800_000;
/// 9999-12-31 23:59:59.999
pub const MAX_VALID_TIMESTAMP_MS: Ms = 253_402_300_799_999;
