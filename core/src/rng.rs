//! Random variate generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through a VariateSource owned by the engine,
//! seeded once per run. The same seed always yields the same stream.

use crate::error::{SimError, SimResult};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Source of the random quantities a run consumes.
pub trait VariateSource {
    /// Exponentially distributed sample with the given mean (> 0).
    fn exponential(&mut self, mean: f64) -> f64;
}

/// Deterministic PCG stream producing exponential variates by inversion.
pub struct VariateStream {
    inner: Pcg64Mcg,
}

impl VariateStream {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in (0.0, 1.0]. Never exactly zero, so `ln` is finite.
    pub fn next_unit(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        let u = (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64);
        1.0 - u
    }
}

impl VariateSource for VariateStream {
    fn exponential(&mut self, mean: f64) -> f64 {
        -mean * self.next_unit().ln()
    }
}

/// Returns the same value for every draw regardless of the mean.
/// Used to drive the engine through hand-computable scenarios.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSource(pub f64);

impl VariateSource for ConstantSource {
    fn exponential(&mut self, _mean: f64) -> f64 {
        self.0
    }
}

/// Replays a fixed script of draws, then repeats the last one.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(draws: Vec<f64>) -> SimResult<Self> {
        if draws.is_empty() {
            return Err(SimError::invalid("draws", "empty script"));
        }
        Ok(Self { draws, next: 0 })
    }
}

impl VariateSource for ScriptedSource {
    fn exponential(&mut self, _mean: f64) -> f64 {
        let idx = self.next.min(self.draws.len() - 1);
        self.next += 1;
        self.draws[idx]
    }
}
