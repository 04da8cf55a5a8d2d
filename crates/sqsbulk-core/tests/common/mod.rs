#![allow(dead_code)]

use sqsbulk::batch::{BatchConfig, BatchProcessor, FixedJitter, StepOutcome};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Processor with zero jitter so paused-clock tests see exact delays.
pub fn processor(max_retries: u32, batch_size: usize, max_concurrency: usize) -> BatchProcessor {
    BatchProcessor::new(BatchConfig::new(max_retries, batch_size, max_concurrency, false))
        .unwrap()
        .with_jitter(FixedJitter(0))
}

/// Tracks how many step invocations are in flight at once.
#[derive(Debug, Default)]
pub struct ConcurrencyTracker {
    current: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl ConcurrencyTracker {
    pub fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    pub fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub type BoxedAttempt = Pin<Box<dyn Future<Output = Result<StepOutcome<u32, u32>, String>>>>;

/// Step that takes `latency` per call and succeeds for every item.
pub fn tracked_step(
    tracker: Arc<ConcurrencyTracker>,
    latency: Duration,
) -> impl Fn(Vec<u32>) -> BoxedAttempt {
    move |batch| {
        let tracker = Arc::clone(&tracker);
        Box::pin(async move {
            tracker.enter();
            tokio::time::sleep(latency).await;
            tracker.exit();
            Ok(StepOutcome::completed(batch))
        })
    }
}

/// Counts how many times each item was handed to the step.
#[derive(Debug, Default)]
pub struct AttemptLog {
    seen: Mutex<HashMap<u32, usize>>,
}

impl AttemptLog {
    /// Records `batch` and returns, per item, how often it had been seen before.
    pub fn record(&self, batch: &[u32]) -> Vec<(u32, usize)> {
        let mut seen = self.seen.lock().unwrap();
        batch
            .iter()
            .map(|&item| {
                let count = seen.entry(item).or_insert(0);
                let previous = *count;
                *count += 1;
                (item, previous)
            })
            .collect()
    }

    pub fn attempts(&self, item: u32) -> usize {
        self.seen.lock().unwrap().get(&item).copied().unwrap_or(0)
    }
}
