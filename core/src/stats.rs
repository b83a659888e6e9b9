//! Time-weighted statistics and the final run report.

use crate::{
    error::{SimError, SimResult},
    types::{CustomerCount, SimTime},
};
use serde::{Deserialize, Serialize};

/// Running totals. Every field is non-decreasing over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Accumulators {
    pub total_delay:       f64,
    pub customers_delayed: CustomerCount,
    pub area_queue_len:    f64,
    pub area_server_busy:  f64,
}

impl Accumulators {
    /// Add the areas for an interval of length `elapsed` during which
    /// the queue held `queue_len` customers and the server was `busy`.
    pub fn accumulate_interval(&mut self, elapsed: SimTime, queue_len: usize, busy: bool) {
        self.area_queue_len += queue_len as f64 * elapsed;
        if busy {
            self.area_server_busy += elapsed;
        }
    }

    /// Record a customer starting service after waiting `delay`.
    pub fn record_delay(&mut self, delay: SimTime) {
        self.total_delay += delay;
        self.customers_delayed += 1;
    }

    /// Compute the final estimates. `end_time` is the clock at termination.
    pub fn finalize(&self, end_time: SimTime) -> SimResult<SimReport> {
        if self.customers_delayed == 0 {
            return Err(SimError::invalid("customers_delayed", 0));
        }
        if !(end_time > 0.0) {
            return Err(SimError::ZeroLengthRun { end_time });
        }
        Ok(SimReport {
            average_delay:        self.total_delay / self.customers_delayed as f64,
            average_queue_length: self.area_queue_len / end_time,
            server_utilization:   self.area_server_busy / end_time,
            simulation_end_time:  end_time,
            customers_delayed:    self.customers_delayed,
        })
    }
}

/// Final measures of performance for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    pub average_delay:        f64,
    pub average_queue_length: f64,
    pub server_utilization:   f64,
    pub simulation_end_time:  SimTime,
    pub customers_delayed:    CustomerCount,
}

impl SimReport {
    /// The four headline results, bit-comparable.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (
            self.average_delay,
            self.average_queue_length,
            self.server_utilization,
            self.simulation_end_time,
        )
    }
}
