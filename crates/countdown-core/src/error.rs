//! Error types for countdown-core.
//!
//! Engine commands never fail -- invalid commands are silent no-ops. The
//! only fallible surface is parsing user-supplied duration input.

use thiserror::Error;

/// Failed to parse a `"MM:SS"` duration string.
#[derive(Error, Debug)]
pub enum ParseDurationError {
    /// Input was not two colon-separated fields
    #[error("expected MM:SS, got {0:?}")]
    Format(String),

    /// A field was not a number
    #[error("invalid number in duration: {0}")]
    Number(#[from] std::num::ParseIntError),

    /// Seconds field outside 0..=59
    #[error("seconds out of range: {0} (must be 0-59)")]
    SecondsOutOfRange(u32),
}
