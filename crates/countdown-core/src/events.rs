use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Point-in-time view of the engine state.
///
/// Built by [`TimerEngine::snapshot`](crate::TimerEngine::snapshot); the CLI
/// prints it as JSON. Display math (MM:SS split of `remaining`, elapsed
/// fraction) is left to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub minutes: u32,
    pub seconds: u32,
    /// Total seconds left; meaningful only during countdown.
    pub remaining: u64,
    /// Total seconds at countdown start; 0 while idle.
    pub max_duration: u64,
    pub at: DateTime<Utc>,
}
