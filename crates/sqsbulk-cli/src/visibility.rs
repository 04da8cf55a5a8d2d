use std::path::PathBuf;

use sqsbulk::QueueClient;

use crate::bulk::{self, BulkArgs, FailedFileArgs};
use crate::reader;

#[derive(Debug, clap::Args)]
pub struct VisibilityArgs {
    /// New visibility timeout in seconds; 0 releases the messages immediately
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=43_200))]
    pub timeout: i32,

    /// File with one receipt handle or received-message JSON per line
    /// (reads stdin if omitted)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub bulk: BulkArgs,

    #[command(flatten)]
    pub failed: FailedFileArgs,
}

pub async fn run(queue: &QueueClient, args: VisibilityArgs, verbose: bool) -> anyhow::Result<()> {
    let queue_url = queue.resolve_queue_url(None).await?;
    let processor = args.bulk.processor(verbose)?;
    let handles = reader::read_handles(args.file.as_deref()).await?;

    let url = queue_url.as_str();
    let timeout = args.timeout;
    let result = bulk::execute(&processor, handles, &move |batch| {
        queue.change_visibility_batch(url, batch, timeout)
    })
    .await?;

    bulk::report("updated", &result, args.failed.path())
}
