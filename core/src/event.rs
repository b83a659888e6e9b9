//! The event calendar — next scheduled time for each event type.
//!
//! RULE: There are exactly two event types and the calendar holds
//! exactly one slot for each. A slot at NEVER is not pending.
//!
//! Tie-break: when several types share the minimum time, the one with
//! the lowest ordinal wins (Arrival before Departure).

use crate::{
    clock::SimClock,
    error::{SimError, SimResult},
    types::{SimTime, NEVER},
};
use serde::{Deserialize, Serialize};

/// Event types in ordinal order.
/// NEVER reorder — the order is the tie-break rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum EventType {
    Arrival = 0,
    Departure = 1,
}

impl EventType {
    pub const ALL: [EventType; 2] = [EventType::Arrival, EventType::Departure];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Arrival   => "arrival",
            Self::Departure => "departure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCalendar {
    next_time: [SimTime; EventType::ALL.len()],
}

impl Default for EventCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl EventCalendar {
    /// A calendar with nothing pending.
    pub fn new() -> Self {
        Self { next_time: [NEVER; EventType::ALL.len()] }
    }

    pub fn schedule(&mut self, event: EventType, time: SimTime) {
        self.next_time[event as usize] = time;
    }

    pub fn cancel(&mut self, event: EventType) {
        self.next_time[event as usize] = NEVER;
    }

    pub fn time_of(&self, event: EventType) -> SimTime {
        self.next_time[event as usize]
    }

    pub fn is_pending(&self, event: EventType) -> bool {
        self.time_of(event) < NEVER
    }

    /// Pick the earliest pending event and advance the clock to it.
    pub fn next(&self, clock: &mut SimClock) -> SimResult<(EventType, SimTime)> {
        let mut earliest: Option<(EventType, SimTime)> = None;
        for event in EventType::ALL {
            let time = self.time_of(event);
            if time >= NEVER {
                continue;
            }
            // Strict comparison keeps the lower ordinal on ties.
            if earliest.is_none_or(|(_, best)| time < best) {
                earliest = Some((event, time));
            }
        }

        let (event, time) = earliest.ok_or(SimError::CalendarEmpty { time: clock.now })?;
        clock.advance_to(time);
        Ok((event, time))
    }
}
