use crate::types::SimTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Overflow of the waiting queue (capacity {capacity}) at time {time}")]
    QueueOverflow { time: SimTime, capacity: usize },

    #[error("Event list empty at time {time}")]
    CalendarEmpty { time: SimTime },

    #[error("Run aborted by an earlier failure; no statistics are available")]
    RunAborted,

    #[error("Run incomplete: {delayed} of {required} customers delayed")]
    RunIncomplete { delayed: u64, required: u64 },

    #[error("Run ended at time {end_time}; time averages are undefined")]
    ZeroLengthRun { end_time: SimTime },

    #[error("Invalid input format: {0}")]
    InputFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub fn invalid(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter { name, value: value.to_string() }
    }

    /// True for failures that abort a run after event processing started.
    pub fn is_fatal_run(&self) -> bool {
        matches!(self, Self::QueueOverflow { .. } | Self::CalendarEmpty { .. })
    }

    /// Process exit code the runner reports for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::QueueOverflow { .. } => 2,
            _ => 1,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
