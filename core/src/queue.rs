//! Bounded FIFO of arrival times for customers waiting for service.

use crate::{
    error::{SimError, SimResult},
    types::SimTime,
};
use std::collections::VecDeque;

/// Default capacity, the classic `Q_LIMIT`.
pub const DEFAULT_QUEUE_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub(crate) struct WaitingQueue {
    arrivals: VecDeque<SimTime>,
    capacity: usize,
}

impl WaitingQueue {
    /// Storage grows on demand; `capacity` only bounds `push`.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            arrivals: VecDeque::new(),
            capacity,
        }
    }

    /// Append an arrival at the tail.
    /// Fails with QueueOverflow if the queue would exceed its capacity;
    /// the queue is left unchanged in that case.
    pub(crate) fn push(&mut self, arrival_time: SimTime) -> SimResult<()> {
        if self.arrivals.len() >= self.capacity {
            return Err(SimError::QueueOverflow {
                time:     arrival_time,
                capacity: self.capacity,
            });
        }
        self.arrivals.push_back(arrival_time);
        Ok(())
    }

    /// Remove and return the oldest arrival time.
    pub(crate) fn pop(&mut self) -> Option<SimTime> {
        self.arrivals.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.arrivals.len()
    }

}
