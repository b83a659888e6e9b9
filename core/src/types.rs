//! Shared primitive types used across the entire simulation.

/// Simulated time, in the same unit as the configured means (minutes).
pub type SimTime = f64;

/// A count of customers.
pub type CustomerCount = u64;

/// Scheduled time of an event that is not pending.
/// Larger than any time a run can realistically reach.
pub const NEVER: SimTime = 1.0e30;
