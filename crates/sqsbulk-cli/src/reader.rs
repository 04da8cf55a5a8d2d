use std::path::Path;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Lines buffered between the reader task and the command.
const LINE_BUFFER: usize = 100;

/// Spawns a task that reads lines from `reader` and sends them over a bounded
/// channel.
///
/// Lines are sent without their trailing newline. The task stops at EOF, at
/// the first I/O error (returned through the handle), or when the receiver
/// is dropped.
pub fn concurrent_lines<R: AsyncRead + Unpin + Send + 'static>(
    reader: R,
    channel_capacity: usize,
) -> (JoinHandle<std::io::Result<()>>, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel::<String>(channel_capacity);
    let buffer = BufReader::new(reader);

    let task = tokio::spawn(async move {
        let mut lines = buffer.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        log::debug!("line receiver dropped, stopping reader");
                        return Ok(());
                    }
                }
                Ok(None) => {
                    log::trace!("Reached EOF, exiting reader task");
                    return Ok(());
                }
                Err(e) => {
                    log::error!("I/O error while reading lines: {e}. Stopping reader.");
                    return Err(e);
                }
            }
        }
    });

    (task, rx)
}

/// Collects every line from `file`, or from stdin when no file is given.
pub async fn read_lines(file: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let (handle, mut rx) = match file {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open {}", path.display()))?;
            concurrent_lines(file, LINE_BUFFER)
        }
        None => concurrent_lines(tokio::io::stdin(), LINE_BUFFER),
    };

    let mut lines = Vec::new();
    while let Some(line) = rx.recv().await {
        lines.push(line);
    }

    handle
        .await
        .context("reader task panicked")?
        .context("failed to read input")?;

    Ok(lines)
}

/// Reads message bodies for `send`: every non-empty line.
pub async fn read_bodies(file: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let mut lines = read_lines(file).await?;
    lines.retain(|line| !line.is_empty());
    Ok(lines)
}

/// Reads message handles for `delete` and `visibility`.
///
/// Each line is a JSON object with a `receipt_handle` (as printed by
/// `receive`) or a bare receipt handle.
pub async fn read_handles(file: Option<&Path>) -> anyhow::Result<Vec<sqsbulk::MessageHandle>> {
    read_lines(file)
        .await?
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            sqsbulk::MessageHandle::parse(line).map(|parsed| {
                parsed.with_context(|| format!("invalid handle on line {}", index + 1))
            })
        })
        .collect()
}
