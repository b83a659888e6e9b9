//! Simulation clock — current time and the time of the last statistics update.

use crate::types::SimTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub now:         SimTime,
    pub last_update: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self { now: 0.0, last_update: 0.0 }
    }

    /// Move the clock forward to `time`.
    /// Callers guarantee `time >= now`; this is not re-checked in release builds.
    pub fn advance_to(&mut self, time: SimTime) {
        debug_assert!(time >= self.now, "clock moved backwards: {} -> {time}", self.now);
        self.now = time;
    }

    /// Time elapsed since the last statistics update, and mark `now` as updated.
    pub fn take_elapsed(&mut self) -> SimTime {
        let elapsed = self.now - self.last_update;
        self.last_update = self.now;
        elapsed
    }
}
