//! # sqsbulk-core
//!
//! Bulk operations against AWS SQS queues.
//!
//! SQS caps every batch request at ten entries and throttles busy callers, so
//! moving thousands of messages means many small requests, some of which
//! partially fail. This crate splits that problem in two:
//!
//! - [`batch`]: a generic engine that chunks items, runs groups under a
//!   concurrency bound and retries whatever a step reports as unprocessed,
//!   with exponential backoff and jitter.
//! - [`sqs`]: a [`QueueClient`] whose batch operations (send, receive,
//!   delete, change visibility) are ready-made step functions for the engine.
//!
//! ## Example
//!
//! ```no_run
//! use sqsbulk::batch::{BatchConfig, BatchProcessor, LogLogger};
//! use sqsbulk::QueueClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = aws_config::from_env().load().await;
//! let queue = QueueClient::from_config(config, None);
//! let queue_url = queue.resolve_queue_url(Some("my-dlq")).await?;
//!
//! let processor = BatchProcessor::new(BatchConfig {
//!     verbose: true,
//!     ..BatchConfig::default()
//! })?
//! .with_logger(LogLogger);
//!
//! let bodies: Vec<String> = (0..100).map(|i| format!("message {i}")).collect();
//! let (queue, url) = (&queue, queue_url.as_str());
//! let result = processor
//!     .process(bodies, &move |batch| queue.send_batch(url, batch))
//!     .await;
//!
//! for body in &result.failed {
//!     eprintln!("not sent: {body}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod sqs;

#[cfg(test)]
mod test_utils;

pub use sqs::*;
