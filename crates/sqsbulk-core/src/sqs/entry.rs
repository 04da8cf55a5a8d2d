//! Batch entry ids and mapping batch responses back to the items they came from.

use crate::batch::StepOutcome;
use aws_sdk_sqs::types::BatchResultErrorEntry;

/// Id of one entry inside an SQS batch request.
///
/// SQS requires ids to be unique within a request, at most 80 characters,
/// and made of alphanumerics, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchId(String);

impl BatchId {
    pub fn new<S: Into<String>>(id: S) -> Result<Self, String> {
        let id_str = id.into();
        if id_str.is_empty() {
            return Err("Batch ID cannot be empty".to_string());
        }
        if id_str.len() > 80 {
            return Err(format!(
                "Batch ID exceeds maximum length: {} > 80 characters",
                id_str.len()
            ));
        }
        for c in id_str.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' {
                return Err(format!(
                    "Invalid character in Batch ID: '{}'. Allowed: alphanumeric, '-', '_'",
                    c
                ));
            }
        }
        Ok(Self(id_str))
    }

    /// Id for the entry at `index` within its request.
    pub fn for_index(index: usize) -> Self {
        Self(format!("entry-{index}"))
    }
}

impl AsRef<str> for BatchId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Pairs every item with the id of its batch entry.
pub(crate) fn label<T>(items: Vec<T>) -> Vec<(BatchId, T)> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| (BatchId::for_index(index), item))
        .collect()
}

/// Splits labelled items into processed and unprocessed.
///
/// `accept` hands back `Ok(record)` for an entry the response lists as
/// successful and `Err(item)` otherwise. Entries that are neither in the
/// successful nor the failed list of the response count as unprocessed too.
pub(crate) fn settle<T, R, F>(entries: Vec<(BatchId, T)>, mut accept: F) -> StepOutcome<T, R>
where
    F: FnMut(&BatchId, T) -> Result<R, T>,
{
    let mut outcome = StepOutcome::default();
    for (id, item) in entries {
        match accept(&id, item) {
            Ok(record) => outcome.processed.push(record),
            Err(item) => outcome.unprocessed.push(item),
        }
    }
    outcome
}

pub(crate) fn log_failures(operation: &str, failed: &[BatchResultErrorEntry]) {
    for entry in failed {
        log::debug!(
            "{} entry {} failed: {} (sender fault: {}){}",
            operation,
            entry.id(),
            entry.code(),
            entry.sender_fault(),
            entry.message().map(|m| format!(" {m}")).unwrap_or_default()
        );
    }
}
