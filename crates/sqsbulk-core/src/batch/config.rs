use std::fmt;

/// Default number of retries granted to each group after its first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default group size; matches the SQS per-request entry cap.
pub const DEFAULT_BATCH_SIZE: usize = 10;
/// Default number of groups processed at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Settings for one [`BatchProcessor`](super::BatchProcessor).
///
/// A config is fixed for the lifetime of the processor it was validated
/// into. Use [`BatchConfig::default`] for the SQS-friendly defaults
/// (3 retries, groups of 10, 10 groups at a time, quiet).
///
/// # Example
///
/// ```
/// use sqsbulk::batch::BatchConfig;
///
/// let config = BatchConfig {
///     max_retries: 5,
///     ..BatchConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Retries allowed per group after the first attempt
    pub max_retries: u32,
    /// Maximum number of items handed to one step invocation
    pub batch_size: usize,
    /// Maximum number of groups in flight at once
    pub max_concurrency: usize,
    /// Emit progress through the injected logger
    pub verbose: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            verbose: false,
        }
    }
}

impl BatchConfig {
    pub fn new(max_retries: u32, batch_size: usize, max_concurrency: usize, verbose: bool) -> Self {
        Self {
            max_retries,
            batch_size,
            max_concurrency,
            verbose,
        }
    }

    /// Rejects settings the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBatchSize`] or [`ConfigError::ZeroConcurrency`]
    /// when the corresponding value is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroBatchSize,
    ZeroConcurrency,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroBatchSize => write!(f, "batch size must be at least 1"),
            ConfigError::ZeroConcurrency => write!(f, "max concurrency must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
