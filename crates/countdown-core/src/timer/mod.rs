mod duration;
mod engine;

pub use duration::DurationSetting;
pub use engine::{Phase, TimerEngine};
