//! The simulation engine — single-server FIFO queue, driven event by event.
//!
//! EXECUTION ORDER per event (fixed, never reordered):
//!   1. Calendar picks the next event and advances the clock.
//!   2. Time-weighted areas are updated with the state that held
//!      during the interval just ended.
//!   3. The arrival or departure handler mutates queue/server state.
//!
//! RULES:
//!   - Server Busy <=> a Departure is pending on the calendar.
//!   - All randomness flows through the engine's VariateSource.
//!   - A failed run never yields statistics.

use crate::{
    clock::SimClock,
    config::SimConfig,
    error::{SimError, SimResult},
    event::{EventCalendar, EventType},
    queue::WaitingQueue,
    rng::{VariateSource, VariateStream},
    stats::{Accumulators, SimReport},
    types::{CustomerCount, SimTime},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    Idle,
    Busy,
}

/// State right after one event was handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub time:              SimTime,
    pub event:             EventType,
    pub queue_len:         usize,
    pub server:            ServerStatus,
    pub customers_delayed: CustomerCount,
}

pub struct SimEngine<V: VariateSource = VariateStream> {
    config:   SimConfig,
    clock:    SimClock,
    calendar: EventCalendar,
    server:   ServerStatus,
    queue:    WaitingQueue,
    stats:    Accumulators,
    variates: V,
    trace:    Vec<TraceEntry>,
    aborted:  bool,
}

impl SimEngine<VariateStream> {
    /// Build an engine with a PCG variate stream.
    /// The resolved seed is written back into the config.
    pub fn new(mut config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let seed = config.resolved_seed();
        config.seed = Some(seed);
        Self::with_source(config, VariateStream::new(seed))
    }
}

impl<V: VariateSource> SimEngine<V> {
    /// Build an engine drawing from the given variate source.
    /// Schedules the first arrival; no event is processed yet.
    pub fn with_source(config: SimConfig, variates: V) -> SimResult<Self> {
        config.validate()?;

        let mut engine = Self {
            clock:    SimClock::new(),
            calendar: EventCalendar::new(),
            server:   ServerStatus::Idle,
            queue:    WaitingQueue::with_capacity(config.queue_limit),
            stats:    Accumulators::default(),
            trace:    Vec::new(),
            aborted:  false,
            variates,
            config,
        };

        let first = engine.variates.exponential(engine.config.mean_interarrival);
        engine.calendar.schedule(EventType::Arrival, engine.clock.now + first);
        Ok(engine)
    }

    /// Run until the required number of customers has been delayed,
    /// then compute the final statistics.
    pub fn run(&mut self) -> SimResult<SimReport> {
        log::info!(
            "run start: mean_interarrival={} mean_service={} required={} queue_limit={} seed={:?}",
            self.config.mean_interarrival,
            self.config.mean_service,
            self.config.num_delays_required,
            self.config.queue_limit,
            self.config.seed,
        );

        while !self.is_done() {
            self.step()?;
        }

        let report = self.report()?;
        log::info!(
            "run complete at time {:.3}: avg_delay={:.3} avg_queue={:.3} utilization={:.3}",
            report.simulation_end_time,
            report.average_delay,
            report.average_queue_length,
            report.server_utilization,
        );
        Ok(report)
    }

    /// Process exactly one event. Returns None once the run is done.
    pub fn step(&mut self) -> SimResult<Option<EventType>> {
        if self.aborted {
            return Err(SimError::RunAborted);
        }
        if self.is_done() {
            return Ok(None);
        }

        match self.dispatch_next() {
            Ok(event) => Ok(Some(event)),
            Err(e) => {
                self.aborted = true;
                log::error!("run aborted at time {:.6}: {e}", self.clock.now);
                Err(e)
            }
        }
    }

    fn dispatch_next(&mut self) -> SimResult<EventType> {
        let (event, time) = self.calendar.next(&mut self.clock)?;
        self.update_time_avg_stats();

        match event {
            EventType::Arrival   => self.arrive()?,
            EventType::Departure => self.depart(),
        }

        log::debug!(
            "time={time:.6} event={} queue={} server={:?} delayed={}",
            event.name(),
            self.queue.len(),
            self.server,
            self.stats.customers_delayed,
        );

        if self.config.record_trace {
            self.trace.push(TraceEntry {
                time,
                event,
                queue_len:         self.queue.len(),
                server:            self.server,
                customers_delayed: self.stats.customers_delayed,
            });
        }
        Ok(event)
    }

    /// Areas under the queue-length and server-busy curves, using the
    /// state that held since the previous event.
    fn update_time_avg_stats(&mut self) {
        let elapsed = self.clock.take_elapsed();
        self.stats
            .accumulate_interval(elapsed, self.queue.len(), self.server == ServerStatus::Busy);
    }

    fn arrive(&mut self) -> SimResult<()> {
        let now = self.clock.now;
        let gap = self.variates.exponential(self.config.mean_interarrival);
        self.calendar.schedule(EventType::Arrival, now + gap);

        match self.server {
            ServerStatus::Busy => self.queue.push(now)?,
            ServerStatus::Idle => {
                // Arriving to an idle server: zero delay, straight into service.
                self.stats.record_delay(0.0);
                self.server = ServerStatus::Busy;
                self.schedule_departure(now);
            }
        }
        Ok(())
    }

    fn depart(&mut self) {
        let now = self.clock.now;
        match self.queue.pop() {
            None => {
                self.server = ServerStatus::Idle;
                self.calendar.cancel(EventType::Departure);
            }
            Some(arrived_at) => {
                self.stats.record_delay(now - arrived_at);
                self.schedule_departure(now);
            }
        }
    }

    fn schedule_departure(&mut self, now: SimTime) {
        let service = self.variates.exponential(self.config.mean_service);
        self.calendar.schedule(EventType::Departure, now + service);
    }

    /// Final estimates. Only available once the run is done and did not abort.
    pub fn report(&self) -> SimResult<SimReport> {
        if self.aborted {
            return Err(SimError::RunAborted);
        }
        if !self.is_done() {
            return Err(SimError::RunIncomplete {
                delayed:  self.stats.customers_delayed,
                required: self.config.num_delays_required,
            });
        }
        self.stats.finalize(self.clock.now)
    }

    pub fn is_done(&self) -> bool {
        self.stats.customers_delayed >= self.config.num_delays_required
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn calendar(&self) -> &EventCalendar {
        &self.calendar
    }

    pub fn server(&self) -> ServerStatus {
        self.server
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn accumulators(&self) -> &Accumulators {
        &self.stats
    }

    pub fn customers_delayed(&self) -> CustomerCount {
        self.stats.customers_delayed
    }

    /// Recorded events; empty unless `record_trace` is set.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }
}
