use sqsbulk::{QueueClient, ReceiveOptions};

use crate::bulk::{self, BulkArgs};

#[derive(Debug, clap::Args)]
pub struct ReceiveArgs {
    /// Number of messages to receive
    #[arg(long, short = 'n', default_value_t = 10)]
    pub count: usize,

    /// Seconds received messages stay hidden from other consumers
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(i32).range(0..=43_200))]
    pub visibility_timeout: i32,

    /// Seconds each request long-polls for messages
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i32).range(0..=20))]
    pub wait_time: i32,

    #[command(flatten)]
    pub bulk: BulkArgs,
}

/// Receives `count` messages, one slot per wanted message.
///
/// Slots still empty after retries mean the queue had nothing more to give;
/// they are reported as not received. There is nothing to retry later, so
/// `receive` takes no `--failed-file`.
pub async fn run(queue: &QueueClient, args: ReceiveArgs, verbose: bool) -> anyhow::Result<()> {
    let queue_url = queue.resolve_queue_url(None).await?;
    let processor = args.bulk.processor(verbose)?;
    let options = ReceiveOptions {
        visibility_timeout: args.visibility_timeout,
        wait_time: args.wait_time,
    };

    let url = queue_url.as_str();
    let slots: Vec<usize> = (0..args.count).collect();
    let result = bulk::execute(&processor, slots, &move |batch| {
        queue.receive_batch(url, batch, options)
    })
    .await?;

    for message in &result.processed {
        println!("{}", serde_json::to_string(message)?);
    }

    if !result.failed.is_empty() {
        log::warn!(
            "received {} of {} requested messages",
            result.processed.len(),
            args.count
        );
    }

    Ok(())
}
