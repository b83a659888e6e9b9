//! Discrete-event simulation of a single-server FIFO queue.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod queue;
pub mod report;
pub mod rng;
pub mod stats;
pub mod types;

pub use config::SimConfig;
pub use engine::{ServerStatus, SimEngine};
pub use error::{SimError, SimResult};
pub use stats::SimReport;
