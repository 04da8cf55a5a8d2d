use std::path::PathBuf;

use sqsbulk::QueueClient;

use crate::bulk::{self, BulkArgs, FailedFileArgs};
use crate::reader;

#[derive(Debug, clap::Args)]
pub struct DeleteArgs {
    /// File with one receipt handle or received-message JSON per line
    /// (reads stdin if omitted)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub bulk: BulkArgs,

    #[command(flatten)]
    pub failed: FailedFileArgs,
}

pub async fn run(queue: &QueueClient, args: DeleteArgs, verbose: bool) -> anyhow::Result<()> {
    let queue_url = queue.resolve_queue_url(None).await?;
    let processor = args.bulk.processor(verbose)?;
    let handles = reader::read_handles(args.file.as_deref()).await?;

    let url = queue_url.as_str();
    let result = bulk::execute(&processor, handles, &move |batch| {
        queue.delete_batch(url, batch)
    })
    .await?;

    bulk::report("deleted", &result, args.failed.path())
}
