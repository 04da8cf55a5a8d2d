use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use sqsbulk::batch::{
    AggregateResult, BatchConfig, BatchProcessor, BatchStep, LogLogger, DEFAULT_BATCH_SIZE,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_RETRIES,
};
use sqsbulk::{MessageHandle, MAX_BATCH_ENTRIES};

/// Batching flags shared by every bulk command.
#[derive(Debug, Clone, clap::Args)]
pub struct BulkArgs {
    /// Retries per batch after its first attempt
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_RETRIES,
        value_parser = clap::value_parser!(u32).range(0..=10)
    )]
    pub max_retries: u32,

    /// Entries per SQS request
    #[arg(
        long,
        default_value_t = DEFAULT_BATCH_SIZE as u32,
        value_parser = clap::value_parser!(u32).range(1..=MAX_BATCH_ENTRIES as i64)
    )]
    pub batch_size: u32,

    /// Batches in flight at once
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_CONCURRENCY as u32,
        value_parser = clap::value_parser!(u32).range(1..=20)
    )]
    pub max_concurrency: u32,
}

/// Where `send`, `delete` and `visibility` put the items they gave up on.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FailedFileArgs {
    /// Write items that could not be processed to this file, in the same
    /// format the command reads, so it can be fed straight back in
    #[arg(long)]
    pub failed_file: Option<PathBuf>,
}

impl FailedFileArgs {
    pub fn path(&self) -> Option<&Path> {
        self.failed_file.as_deref()
    }
}

/// An item that can be written back as one line of its command's input.
pub trait InputLine {
    fn to_input_line(&self) -> anyhow::Result<String>;
}

/// Message bodies are read verbatim, one per line.
impl InputLine for String {
    fn to_input_line(&self) -> anyhow::Result<String> {
        Ok(self.clone())
    }
}

impl InputLine for MessageHandle {
    fn to_input_line(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl BulkArgs {
    pub fn processor(&self, verbose: bool) -> anyhow::Result<BatchProcessor> {
        let config = BatchConfig::new(
            self.max_retries,
            self.batch_size as usize,
            self.max_concurrency as usize,
            verbose,
        );
        Ok(BatchProcessor::new(config)
            .context("invalid batch configuration")?
            .with_logger(LogLogger))
    }
}

/// Runs `step` over `items`, giving up on the whole run at Ctrl-C.
///
/// Interrupting drops every in-flight batch; requests already sent to SQS
/// are not rolled back.
pub async fn execute<T, R, S>(
    processor: &BatchProcessor,
    items: Vec<T>,
    step: &S,
) -> anyhow::Result<AggregateResult<T, R>>
where
    T: Clone,
    S: BatchStep<T, R>,
{
    tokio::select! {
        result = processor.process(items, step) => Ok(result),
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("interrupted, in-flight batches were abandoned")
        }
    }
}

/// Prints every processed record as a JSON line, then settles the failures.
///
/// Returns an error when any item failed, after writing the failed items to
/// `failed_file` if one was given. Each failed item is written the way its
/// command reads input, so rerunning the command on that file retries them.
pub fn report<T, R>(
    verb: &str,
    result: &AggregateResult<T, R>,
    failed_file: Option<&Path>,
) -> anyhow::Result<()>
where
    T: InputLine,
    R: Serialize,
{
    for record in &result.processed {
        println!("{}", serde_json::to_string(record)?);
    }

    log::info!(
        "{} {} items, {} failed, {} batches",
        verb,
        result.processed.len(),
        result.failed.len(),
        result.total_groups
    );

    if result.is_complete_success() {
        return Ok(());
    }

    if let Some(path) = failed_file {
        write_input_lines(path, &result.failed)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    anyhow::bail!(
        "{} items could not be {} after retries",
        result.failed.len(),
        verb
    )
}

fn write_input_lines<T: InputLine>(path: &Path, items: &[T]) -> anyhow::Result<()> {
    let mut out = String::new();
    for item in items {
        out.push_str(&item.to_input_line()?);
        out.push('\n');
    }
    std::fs::write(path, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> BulkArgs {
        BulkArgs {
            max_retries: 2,
            batch_size: 5,
            max_concurrency: 3,
        }
    }

    #[test]
    fn builds_processor_from_flags() {
        let processor = args().processor(true).unwrap();
        assert_eq!(*processor.config(), BatchConfig::new(2, 5, 3, true));
    }

    #[test]
    fn report_succeeds_without_failures() {
        let result = AggregateResult::<String, String> {
            processed: vec!["ok".to_string()],
            failed: Vec::new(),
            total_groups: 1,
        };
        assert!(report("sent", &result, None).is_ok());
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sqsbulk-{}-{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn failed_bodies_can_be_sent_again() {
        let path = temp_path("failed-bodies");
        let result = AggregateResult::<String, String> {
            processed: Vec::new(),
            failed: vec!["hello world".to_string(), r#"{"id": "b \"quoted\""}"#.to_string()],
            total_groups: 1,
        };

        let err = report("sent", &result, Some(&path)).unwrap_err();
        assert_eq!(err.to_string(), "2 items could not be sent after retries");

        let bodies = crate::reader::read_bodies(Some(&path)).await.unwrap();
        assert_eq!(bodies, result.failed);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn failed_handles_can_be_deleted_again() {
        let path = temp_path("failed-handles");
        let result = AggregateResult::<MessageHandle, MessageHandle> {
            processed: Vec::new(),
            failed: vec![
                MessageHandle::new("rh-1"),
                MessageHandle {
                    message_id: Some("m-2".to_string()),
                    receipt_handle: "rh-2".to_string(),
                },
            ],
            total_groups: 1,
        };

        report("deleted", &result, Some(&path)).unwrap_err();

        let handles = crate::reader::read_handles(Some(&path)).await.unwrap();
        assert_eq!(handles, result.failed);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn execute_returns_the_aggregate() {
        let processor = args().processor(false).unwrap();
        let step = |batch: Vec<u32>| async move {
            Ok::<_, String>(sqsbulk::batch::StepOutcome::completed(batch))
        };

        let result = execute(&processor, (0..12).collect(), &step).await.unwrap();

        assert_eq!(result.total_groups, 3);
        assert_eq!(result.processed.len(), 12);
    }
}
