use std::fmt;
use std::future::Future;

/// What one step invocation achieved for the batch it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome<T, R> {
    /// Success records for the items that went through
    pub processed: Vec<R>,
    /// Items that still need another attempt
    pub unprocessed: Vec<T>,
}

impl<T, R> StepOutcome<T, R> {
    pub fn new(processed: Vec<R>, unprocessed: Vec<T>) -> Self {
        Self {
            processed,
            unprocessed,
        }
    }

    /// Every item of the batch succeeded.
    pub fn completed(processed: Vec<R>) -> Self {
        Self::new(processed, Vec::new())
    }

    /// Nothing succeeded, but the call itself did not fail.
    pub fn untouched(unprocessed: Vec<T>) -> Self {
        Self::new(Vec::new(), unprocessed)
    }
}

impl<T, R> Default for StepOutcome<T, R> {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

/// One attempt at pushing a batch of items through a remote API.
///
/// An `Err` means the whole attempt failed and every item in `batch` is
/// still unprocessed. The engine logs the error and retries; it never
/// surfaces it to the caller.
///
/// Any `Fn(Vec<T>) -> impl Future<Output = Result<StepOutcome<T, R>, E>>`
/// implements this trait, so most callers just pass a closure:
///
/// ```
/// use sqsbulk::batch::{BatchStep, StepOutcome};
///
/// fn assert_step<S: BatchStep<u32, u32>>(_: &S) {}
///
/// let double = |batch: Vec<u32>| async move {
///     Ok::<_, String>(StepOutcome::completed(batch.into_iter().map(|n| n * 2).collect()))
/// };
/// assert_step(&double);
/// ```
pub trait BatchStep<T, R> {
    type Error: fmt::Display;

    fn execute(
        &self,
        batch: Vec<T>,
    ) -> impl Future<Output = Result<StepOutcome<T, R>, Self::Error>>;
}

impl<T, R, E, F, Fut> BatchStep<T, R> for F
where
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = Result<StepOutcome<T, R>, E>>,
    E: fmt::Display,
{
    type Error = E;

    fn execute(&self, batch: Vec<T>) -> impl Future<Output = Result<StepOutcome<T, R>, E>> {
        self(batch)
    }
}
