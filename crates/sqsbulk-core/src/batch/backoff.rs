use rand::Rng;
use std::time::Duration;

/// Delay before the first retry is `BASE_DELAY_MS * 2`.
pub const BASE_DELAY_MS: u64 = 1_000;
/// Upper bound (exclusive) of the random jitter added to every delay.
pub const JITTER_RANGE_MS: u64 = 1_000;
/// No backoff delay ever exceeds this.
pub const MAX_DELAY_MS: u64 = 30_000;

/// Source of the random jitter added to backoff delays.
///
/// Implementations must return a value in `0..JITTER_RANGE_MS`.
pub trait JitterSource: Send + Sync {
    fn jitter_ms(&self) -> u64;
}

/// Uniform jitter drawn from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl JitterSource for RandomJitter {
    fn jitter_ms(&self) -> u64 {
        rand::thread_rng().gen_range(0..JITTER_RANGE_MS)
    }
}

/// Always returns the same jitter. Useful when delays must be predictable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedJitter(pub u64);

impl JitterSource for FixedJitter {
    fn jitter_ms(&self) -> u64 {
        self.0.min(JITTER_RANGE_MS - 1)
    }
}

/// Delay to wait before retry number `retry` (1 for the first retry).
///
/// `min(1000 * 2^retry + jitter_ms, 30000)` milliseconds.
pub fn backoff_delay(retry: u32, jitter_ms: u64) -> Duration {
    let exponential = 2u64
        .checked_pow(retry)
        .and_then(|factor| factor.checked_mul(BASE_DELAY_MS))
        .unwrap_or(u64::MAX);
    Duration::from_millis(exponential.saturating_add(jitter_ms).min(MAX_DELAY_MS))
}
