use std::path::PathBuf;

use sqsbulk::QueueClient;

use crate::bulk::{self, BulkArgs, FailedFileArgs};
use crate::reader;

#[derive(Debug, clap::Args)]
pub struct SendArgs {
    /// File with one message body per line (reads stdin if omitted)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub bulk: BulkArgs,

    #[command(flatten)]
    pub failed: FailedFileArgs,
}

pub async fn run(queue: &QueueClient, args: SendArgs, verbose: bool) -> anyhow::Result<()> {
    let queue_url = queue.resolve_queue_url(None).await?;
    let processor = args.bulk.processor(verbose)?;
    let bodies = reader::read_bodies(args.file.as_deref()).await?;

    let url = queue_url.as_str();
    let result = bulk::execute(&processor, bodies, &move |batch| {
        queue.send_batch(url, batch)
    })
    .await?;

    bulk::report("sent", &result, args.failed.path())
}
