//! # Countdown Core Library
//!
//! This library provides the core logic for the Countdown timer. All timer
//! behavior lives in [`TimerEngine`]; front-ends (the CLI binary, or any
//! other presentation layer) are thin observers that issue commands and
//! subscribe to state streams.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a two-phase state machine (setting / countdown) that
//!   owns its own one-second tick task and serializes commands against it
//! - **Observable state**: one replay-latest watch channel per field, so a
//!   late subscriber immediately sees the current value
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: the state machine and its command surface
//! - [`DurationSetting`]: the editable minutes/seconds pair
//! - [`Snapshot`]: a serializable point-in-time view of the engine

pub mod error;
pub mod events;
pub mod timer;

pub use error::ParseDurationError;
pub use events::Snapshot;
pub use timer::{DurationSetting, Phase, TimerEngine};
