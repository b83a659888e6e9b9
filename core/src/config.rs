use crate::{
    error::{SimError, SimResult},
    queue::DEFAULT_QUEUE_LIMIT,
    types::CustomerCount,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub mean_interarrival:   f64,
    pub mean_service:        f64,
    pub num_delays_required: CustomerCount,
    #[serde(default = "default_queue_limit")]
    pub queue_limit:         usize,
    /// Fixed seed for reproducible runs. None draws one from the wall clock.
    #[serde(default)]
    pub seed:                Option<u64>,
    #[serde(default)]
    pub record_trace:        bool,
}

fn default_queue_limit() -> usize {
    DEFAULT_QUEUE_LIMIT
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mean_interarrival:   5.0,
            mean_service:        3.0,
            num_delays_required: 1000,
            queue_limit:         DEFAULT_QUEUE_LIMIT,
            seed:                None,
            record_trace:        false,
        }
    }
}

impl SimConfig {
    pub fn new(mean_interarrival: f64, mean_service: f64, num_delays_required: CustomerCount) -> Self {
        Self {
            mean_interarrival,
            mean_service,
            num_delays_required,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_queue_limit(mut self, queue_limit: usize) -> Self {
        self.queue_limit = queue_limit;
        self
    }

    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Reject parameters for which the model is undefined.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.mean_interarrival.is_finite() && self.mean_interarrival > 0.0) {
            return Err(SimError::invalid("mean_interarrival", self.mean_interarrival));
        }
        if !(self.mean_service.is_finite() && self.mean_service > 0.0) {
            return Err(SimError::invalid("mean_service", self.mean_service));
        }
        if self.num_delays_required == 0 {
            return Err(SimError::invalid("num_delays_required", 0));
        }
        if self.queue_limit == 0 {
            return Err(SimError::invalid("queue_limit", 0));
        }
        Ok(())
    }

    /// The explicit seed, or one derived from the current time.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            let now = chrono::Utc::now();
            now.timestamp_nanos_opt()
                .map(|n| n as u64)
                .unwrap_or(now.timestamp_micros() as u64)
        })
    }

    /// Parse the classic input format:
    /// `mean_interarrival mean_service num_delays_required`.
    /// Tokens past the third are ignored.
    pub fn parse_input(content: &str) -> SimResult<Self> {
        let mut tokens = content.split_whitespace();
        let mut next = |name: &str| {
            tokens.next().ok_or_else(|| {
                SimError::InputFormat(format!("expected three values, missing {name}"))
            })
        };

        let ia = next("mean_interarrival")?;
        let sv = next("mean_service")?;
        let n = next("num_delays_required")?;

        let mean_interarrival = ia
            .parse::<f64>()
            .map_err(|e| SimError::InputFormat(format!("mean_interarrival {ia:?}: {e}")))?;
        let mean_service = sv
            .parse::<f64>()
            .map_err(|e| SimError::InputFormat(format!("mean_service {sv:?}: {e}")))?;
        let num_delays_required = n
            .parse::<CustomerCount>()
            .map_err(|e| SimError::InputFormat(format!("num_delays_required {n:?}: {e}")))?;

        Ok(Self::new(mean_interarrival, mean_service, num_delays_required))
    }

    /// Render in the classic input format, the inverse of `parse_input`.
    pub fn to_input(&self) -> String {
        format!(
            "{:?} {:?} {}",
            self.mean_interarrival, self.mean_service, self.num_delays_required
        )
    }

    /// Read the input file. If it does not exist, write the defaults
    /// to it and return them.
    pub fn load_or_create(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_input(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let defaults = Self::default();
                std::fs::write(path, defaults.to_input())?;
                log::warn!(
                    "{} not found; created it with defaults {}",
                    path.display(),
                    defaults.to_input()
                );
                Ok(defaults)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load a full JSON config.
    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: SimConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
