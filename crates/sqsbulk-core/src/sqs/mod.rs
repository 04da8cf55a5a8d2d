//! SQS client wrapper and the batch step functions built on it.
//!
//! Every bulk operation is an `async fn` on [`QueueClient`] taking one batch
//! of items and returning a [`StepOutcome`](crate::batch::StepOutcome), so it
//! can be handed to [`BatchProcessor::process`](crate::batch::BatchProcessor::process)
//! as a closure:
//!
//! ```no_run
//! use sqsbulk::batch::{BatchConfig, BatchProcessor};
//! use sqsbulk::QueueClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = aws_config::from_env().load().await;
//! let queue = QueueClient::from_config(config, None);
//! let queue_url = queue.resolve_queue_url(Some("my-queue")).await?;
//!
//! let processor = BatchProcessor::new(BatchConfig::default())?;
//! let bodies = vec!["one".to_string(), "two".to_string()];
//! let queue = &queue;
//! let url = queue_url.as_str();
//! let result = processor
//!     .process(bodies, &move |batch| queue.send_batch(url, batch))
//!     .await;
//!
//! println!("sent {}, failed {}", result.processed.len(), result.failed.len());
//! # Ok(())
//! # }
//! ```

mod delete;
mod entry;
mod error;
mod model;
mod receive;
mod send;
mod visibility;

pub use entry::BatchId;
pub use error::SqsError;
pub use model::{MessageHandle, MessageModel, SentMessage};
pub use receive::ReceiveOptions;

use aws_config::SdkConfig;
use aws_sdk_sqs as sqs;

/// Maximum number of entries SQS accepts in one batch request.
pub const MAX_BATCH_ENTRIES: usize = 10;

/// Client for bulk operations against SQS queues.
///
/// Provides queue discovery and the batch operations used as step functions
/// by the bulk commands.
#[derive(Clone, Debug)]
pub struct QueueClient {
    /// The AWS SDK configuration used for SQS operations
    pub config: SdkConfig,
    /// The SQS client instance
    pub client: sqs::Client,
    /// Queue URL or name used when a command does not name one
    pub default_queue_url: Option<String>,
}

impl QueueClient {
    /// Creates a QueueClient from a pre-built AWS SDK config.
    ///
    /// The caller decides how credentials and endpoints are configured
    /// (e.g. `--local` for LocalStack).
    pub fn from_config(config: SdkConfig, default_queue_url: Option<String>) -> Self {
        let client = sqs::Client::new(&config);
        Self {
            config,
            client,
            default_queue_url,
        }
    }

    /// Turns a queue URL or queue name into a queue URL.
    ///
    /// Falls back to `default_queue_url` when `queue` is `None`. Values that
    /// look like URLs are returned as-is; anything else is looked up with
    /// `GetQueueUrl`.
    ///
    /// # Errors
    ///
    /// [`SqsError::MissingQueueUrl`] if neither a queue nor a default is set,
    /// [`SqsError::Service`] if the name lookup fails.
    pub async fn resolve_queue_url(&self, queue: Option<&str>) -> Result<String, SqsError> {
        let queue = queue
            .or(self.default_queue_url.as_deref())
            .ok_or(SqsError::MissingQueueUrl)?;

        if queue.starts_with("http://") || queue.starts_with("https://") {
            return Ok(queue.to_string());
        }

        let output = self.client.get_queue_url().queue_name(queue).send().await?;
        output
            .queue_url
            .ok_or(SqsError::MissingField("queue_url"))
    }

    /// Lists all SQS queue URLs in the AWS account.
    ///
    /// Handles pagination automatically, returning all queues regardless of count.
    pub async fn list(&self) -> Result<Vec<String>, SqsError> {
        let mut queues = Vec::new();

        let mut output = self.client.list_queues().send().await?;
        loop {
            if let Some(mut list) = output.queue_urls {
                queues.append(&mut list);
            }

            let Some(token) = output.next_token else {
                break;
            };

            output = self
                .client
                .list_queues()
                .set_next_token(Some(token))
                .send()
                .await?;
        }

        Ok(queues)
    }
}
