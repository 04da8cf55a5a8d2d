//! Generic batch execution.
//!
//! [`BatchProcessor`] takes an arbitrary list of items and a caller-supplied
//! [`BatchStep`], and pushes the items through the step in groups:
//!
//! - **chunking** into groups of `batch_size` ([`chunk`])
//! - **bounded concurrency**, at most `max_concurrency` groups in flight
//! - **retry with backoff** of whatever a step reports as unprocessed
//!   ([`backoff_delay`])
//! - **aggregation** of every group's results into an [`AggregateResult`]
//!
//! The engine knows nothing about queues or messages; see [`crate::sqs`] for
//! the SQS step functions.

mod backoff;
mod chunk;
mod config;
mod logger;
mod processor;
mod step;

pub use backoff::{
    backoff_delay, FixedJitter, JitterSource, RandomJitter, BASE_DELAY_MS, JITTER_RANGE_MS,
    MAX_DELAY_MS,
};
pub use chunk::chunk;
pub use config::{
    BatchConfig, ConfigError, DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_RETRIES,
};
pub use logger::{BatchLogger, LogLogger, NoopLogger};
pub use processor::{AggregateResult, BatchProcessor};
pub use step::{BatchStep, StepOutcome};
