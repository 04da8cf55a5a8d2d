use super::backoff::{backoff_delay, JitterSource, RandomJitter};
use super::chunk::chunk;
use super::config::{BatchConfig, ConfigError};
use super::logger::{BatchLogger, NoopLogger};
use super::step::BatchStep;
use futures::future::join_all;

/// Combined outcome of one [`BatchProcessor::process`] call.
///
/// Every input item ends up either represented in `processed` (through the
/// record the step produced for it) or returned untouched in `failed`.
/// Neither list follows input order once groups run concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult<T, R> {
    /// Success records from every group
    pub processed: Vec<R>,
    /// Items still unprocessed after their group ran out of retries
    pub failed: Vec<T>,
    /// Number of groups the input was split into
    pub total_groups: usize,
}

impl<T, R> AggregateResult<T, R> {
    fn new(total_groups: usize) -> Self {
        Self {
            processed: Vec::new(),
            failed: Vec::new(),
            total_groups,
        }
    }

    fn absorb(&mut self, group: GroupOutcome<T, R>) {
        self.processed.extend(group.processed);
        self.failed.extend(group.failed);
    }

    /// `true` when no item was left behind.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

struct GroupOutcome<T, R> {
    processed: Vec<R>,
    failed: Vec<T>,
}

/// Drives a step function over a large list of items.
///
/// Items are cut into groups of `batch_size`. Groups are admitted in order
/// into a window of up to `max_concurrency`; once the window is full (or the
/// input is exhausted) every group in it is awaited before the next window
/// opens. A slot freed early is not refilled until the whole window drains,
/// so throughput dips while the slowest group of a window finishes. The
/// bound itself is never exceeded.
///
/// Each group retries its unprocessed items up to `max_retries` times with
/// exponential backoff. Errors from the step are logged and retried, never
/// returned: whatever is still unprocessed at the end lands in
/// [`AggregateResult::failed`].
///
/// All groups run cooperatively on the calling task, so neither items,
/// results nor the step's futures need to be `Send`.
///
/// # Example
///
/// ```no_run
/// use sqsbulk::batch::{BatchConfig, BatchProcessor, StepOutcome};
///
/// # async fn example() -> Result<(), sqsbulk::batch::ConfigError> {
/// let processor = BatchProcessor::new(BatchConfig::default())?;
///
/// let result = processor
///     .process((0..25).collect(), &|batch: Vec<u32>| async move {
///         Ok::<_, String>(StepOutcome::completed(batch))
///     })
///     .await;
///
/// assert_eq!(result.total_groups, 3);
/// assert!(result.failed.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct BatchProcessor {
    config: BatchConfig,
    logger: Box<dyn BatchLogger>,
    jitter: Box<dyn JitterSource>,
}

impl std::fmt::Debug for BatchProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchProcessor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BatchProcessor {
    /// Validates `config` and builds a quiet processor with random jitter.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the batch size or concurrency is zero.
    pub fn new(config: BatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            logger: Box::new(NoopLogger),
            jitter: Box::new(RandomJitter),
        })
    }

    /// Replaces the logger that receives progress messages in verbose mode.
    pub fn with_logger(mut self, logger: impl BatchLogger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    /// Replaces the source of backoff jitter.
    pub fn with_jitter(mut self, jitter: impl JitterSource + 'static) -> Self {
        self.jitter = Box::new(jitter);
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Runs `step` over every item and reports what went through.
    pub async fn process<T, R, S>(&self, items: Vec<T>, step: &S) -> AggregateResult<T, R>
    where
        T: Clone,
        S: BatchStep<T, R>,
    {
        let total_items = items.len();
        let groups = chunk(items, self.config.batch_size);
        let total_groups = groups.len();
        let mut result = AggregateResult::new(total_groups);

        self.log(|| {
            format!(
                "processing {total_items} items in {total_groups} groups (batch size {}, concurrency {}, max retries {})",
                self.config.batch_size, self.config.max_concurrency, self.config.max_retries
            )
        });

        let mut window = Vec::with_capacity(self.config.max_concurrency.min(total_groups));
        for (index, group) in groups.into_iter().enumerate() {
            window.push(self.run_group(index + 1, total_groups, group, step));

            if window.len() == self.config.max_concurrency || index + 1 == total_groups {
                for outcome in join_all(window.drain(..)).await {
                    result.absorb(outcome);
                }
            }
        }

        self.log(|| {
            format!(
                "finished: {} processed, {} failed across {total_groups} groups",
                result.processed.len(),
                result.failed.len()
            )
        });

        result
    }

    async fn run_group<T, R, S>(
        &self,
        number: usize,
        total_groups: usize,
        group: Vec<T>,
        step: &S,
    ) -> GroupOutcome<T, R>
    where
        T: Clone,
        S: BatchStep<T, R>,
    {
        let group_size = group.len();
        let mut remaining = group;
        let mut processed = Vec::new();
        let mut retry_count = 0;

        loop {
            let attempt = retry_count + 1;
            match step.execute(remaining.clone()).await {
                Ok(outcome) => {
                    processed.extend(outcome.processed);
                    remaining = outcome.unprocessed;
                }
                Err(e) => self.log(|| {
                    format!("group {number}/{total_groups}: attempt {attempt} failed: {e}")
                }),
            }

            self.log(|| {
                format!(
                    "group {number}/{total_groups}: {}/{group_size} items processed after attempt {attempt}",
                    processed.len()
                )
            });

            if remaining.is_empty() || retry_count >= self.config.max_retries {
                break;
            }

            retry_count += 1;
            let delay = backoff_delay(retry_count, self.jitter.jitter_ms());
            self.log(|| {
                format!(
                    "group {number}/{total_groups}: retrying {} items in {}ms (retry {retry_count}/{})",
                    remaining.len(),
                    delay.as_millis(),
                    self.config.max_retries
                )
            });
            tokio::time::sleep(delay).await;
        }

        if !remaining.is_empty() {
            self.log(|| {
                format!(
                    "group {number}/{total_groups}: giving up on {} items after {retry_count} retries",
                    remaining.len()
                )
            });
        }

        GroupOutcome {
            processed,
            failed: remaining,
        }
    }

    fn log(&self, message: impl FnOnce() -> String) {
        if self.config.verbose {
            self.logger.log(&message());
        }
    }
}
