//! Timer engine implementation.
//!
//! The engine owns its own tick task: `start()` spawns a one-second loop
//! that decrements `remaining` and re-emits it until it reaches zero, at
//! which point the loop forces the phase back to `Setting` and exits.
//!
//! ## State Transitions
//!
//! ```text
//! Setting -> Countdown   (start, total > 0)
//! Countdown -> Setting   (tick reaches 0, or stop/clear)
//! ```
//!
//! Commands and tick iterations all take the same mutex, so observers see
//! updates in issuing order and no tick emission can land after a stop.
//!
//! Must be used inside a tokio runtime -- `start()` spawns the tick task
//! on the current runtime.

use std::sync::{Arc, Mutex, Weak};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};

use super::duration::DurationSetting;
use crate::events::Snapshot;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Duration is editable, no countdown active.
    Setting,
    /// Duration is locked, tick loop running.
    Countdown,
}

struct Shared {
    phase: Phase,
    setting: DurationSetting,
    /// Total seconds left; authoritative only during countdown.
    remaining: u64,
    /// Total seconds at countdown start; 0 while idle.
    max_duration: u64,
    /// Bumped whenever the current tick loop is superseded.
    generation: u64,
    tick_task: Option<JoinHandle<()>>,
    phase_tx: watch::Sender<Phase>,
    minutes_tx: watch::Sender<u32>,
    seconds_tx: watch::Sender<u32>,
    remaining_tx: watch::Sender<u64>,
}

impl Shared {
    /// Cancel the outstanding tick loop, if any.
    ///
    /// Abort lands at the loop's next await; a loop already past it can
    /// still reach the mutex once, so the generation bump keeps it away
    /// from any newer countdown.
    fn cancel_tick_task(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.phase_tx.send_replace(phase);
        }
    }

    /// Re-emit minutes/seconds for whichever fields an edit changed.
    fn publish_setting(&mut self, before: DurationSetting) {
        if self.setting.minutes() != before.minutes() {
            self.minutes_tx.send_replace(self.setting.minutes());
        }
        if self.setting.seconds() != before.seconds() {
            self.seconds_tx.send_replace(self.setting.seconds());
        }
    }
}

/// Core timer engine.
///
/// Cheaply cloneable handle; all clones share the same state. Commands
/// are synchronous and never fail -- misapplied ones are silent no-ops.
#[derive(Clone)]
pub struct TimerEngine {
    shared: Arc<Mutex<Shared>>,
}

impl TimerEngine {
    /// Create an engine in the `Setting` phase at 00:00.
    pub fn new() -> Self {
        let (phase_tx, _) = watch::channel(Phase::Setting);
        let (minutes_tx, _) = watch::channel(0);
        let (seconds_tx, _) = watch::channel(0);
        let (remaining_tx, _) = watch::channel(0);
        Self {
            shared: Arc::new(Mutex::new(Shared {
                phase: Phase::Setting,
                setting: DurationSetting::default(),
                remaining: 0,
                max_duration: 0,
                generation: 0,
                tick_task: None,
                phase_tx,
                minutes_tx,
                seconds_tx,
                remaining_tx,
            })),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.shared.lock().unwrap().phase
    }

    pub fn minutes(&self) -> u32 {
        self.shared.lock().unwrap().setting.minutes()
    }

    pub fn seconds(&self) -> u32 {
        self.shared.lock().unwrap().setting.seconds()
    }

    pub fn remaining(&self) -> u64 {
        self.shared.lock().unwrap().remaining
    }

    pub fn max_duration(&self) -> u64 {
        self.shared.lock().unwrap().max_duration
    }

    /// Build a full state snapshot.
    pub fn snapshot(&self) -> Snapshot {
        let shared = self.shared.lock().unwrap();
        Snapshot {
            phase: shared.phase,
            minutes: shared.setting.minutes(),
            seconds: shared.setting.seconds(),
            remaining: shared.remaining,
            max_duration: shared.max_duration,
            at: Utc::now(),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────
    //
    // Watch receivers replay the latest value: a late subscriber reads
    // the current state via `borrow()` before awaiting changes.

    pub fn subscribe_phase(&self) -> watch::Receiver<Phase> {
        self.shared.lock().unwrap().phase_tx.subscribe()
    }

    pub fn subscribe_minutes(&self) -> watch::Receiver<u32> {
        self.shared.lock().unwrap().minutes_tx.subscribe()
    }

    pub fn subscribe_seconds(&self) -> watch::Receiver<u32> {
        self.shared.lock().unwrap().seconds_tx.subscribe()
    }

    pub fn subscribe_remaining(&self) -> watch::Receiver<u64> {
        self.shared.lock().unwrap().remaining_tx.subscribe()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn increment_minutes(&self) {
        let mut shared = self.shared.lock().unwrap();
        if shared.phase == Phase::Countdown {
            return;
        }
        let before = shared.setting;
        shared.setting.increment_minutes();
        shared.publish_setting(before);
    }

    pub fn decrement_minutes(&self) {
        let mut shared = self.shared.lock().unwrap();
        if shared.phase == Phase::Countdown {
            return;
        }
        let before = shared.setting;
        shared.setting.decrement_minutes();
        shared.publish_setting(before);
    }

    pub fn increment_seconds(&self) {
        let mut shared = self.shared.lock().unwrap();
        if shared.phase == Phase::Countdown {
            return;
        }
        let before = shared.setting;
        shared.setting.increment_seconds();
        shared.publish_setting(before);
    }

    pub fn decrement_seconds(&self) {
        let mut shared = self.shared.lock().unwrap();
        if shared.phase == Phase::Countdown {
            return;
        }
        let before = shared.setting;
        shared.setting.decrement_seconds();
        shared.publish_setting(before);
    }

    /// Begin the countdown. No-op if already counting down or if the
    /// configured duration is zero.
    pub fn start(&self) {
        let mut shared = self.shared.lock().unwrap();
        if shared.phase == Phase::Countdown {
            return;
        }
        let count = shared.setting.total_seconds();
        if count == 0 {
            return;
        }
        shared.cancel_tick_task();
        shared.max_duration = count;
        shared.remaining = count;
        shared.remaining_tx.send_replace(count);
        shared.set_phase(Phase::Countdown);
        let generation = shared.generation;
        shared.tick_task = Some(tokio::spawn(run_ticks(
            Arc::downgrade(&self.shared),
            generation,
        )));
    }

    /// Cancel the countdown and emit a final `remaining = 0`. The
    /// configured minutes/seconds are preserved for restart.
    pub fn stop(&self) {
        let mut shared = self.shared.lock().unwrap();
        shared.cancel_tick_task();
        shared.max_duration = 0;
        shared.remaining = 0;
        shared.set_phase(Phase::Setting);
        shared.remaining_tx.send_replace(0);
    }

    /// `stop()` plus reset of the configured duration to 00:00.
    pub fn clear(&self) {
        let mut shared = self.shared.lock().unwrap();
        shared.cancel_tick_task();
        shared.max_duration = 0;
        shared.remaining = 0;
        shared.set_phase(Phase::Setting);
        shared.remaining_tx.send_replace(0);
        let before = shared.setting;
        shared.setting = DurationSetting::default();
        shared.publish_setting(before);
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The tick loop: one decrement per one-second interval.
///
/// Each iteration takes the state mutex, so a stop issued between ticks
/// wins the race cleanly -- the loop observes the phase change (or a
/// stale generation) and exits without emitting.
async fn run_ticks(shared: Weak<Mutex<Shared>>, generation: u64) {
    let mut interval = time::interval(TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The interval's first tick completes immediately; consume it so the
    // first decrement lands one full second after start.
    interval.tick().await;
    loop {
        interval.tick().await;
        // Holding only a weak reference lets a dropped engine take its
        // loop down with it.
        let Some(strong) = shared.upgrade() else {
            break;
        };
        let mut shared = strong.lock().unwrap();
        if shared.phase != Phase::Countdown || shared.generation != generation {
            break;
        }
        let next = shared.remaining.saturating_sub(1);
        shared.remaining = next;
        shared.remaining_tx.send_replace(next);
        if next == 0 {
            // Natural completion: same teardown as stop(), minus the
            // extra zero emission.
            shared.max_duration = 0;
            shared.set_phase(Phase::Setting);
            shared.tick_task = None;
            break;
        }
    }
}
