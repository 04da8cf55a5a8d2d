use super::entry::{label, log_failures, settle};
use super::{QueueClient, SentMessage, SqsError};
use crate::batch::StepOutcome;
use aws_sdk_sqs::types::{SendMessageBatchRequestEntry, SendMessageBatchResultEntry};
use std::collections::HashMap;

impl QueueClient {
    /// Sends one batch of message bodies with `SendMessageBatch`.
    ///
    /// Bodies SQS rejected individually come back as unprocessed; a failed
    /// request is an error.
    pub async fn send_batch(
        &self,
        queue_url: &str,
        messages: Vec<String>,
    ) -> Result<StepOutcome<String, SentMessage>, SqsError> {
        // SQS doesn't allow empty batch requests
        if messages.is_empty() {
            return Ok(StepOutcome::default());
        }

        let entries = label(messages);
        let request: Result<Vec<_>, SqsError> = entries
            .iter()
            .map(|(id, body)| {
                SendMessageBatchRequestEntry::builder()
                    .id(id.as_ref())
                    .message_body(body)
                    .build()
                    .map_err(|e| SqsError::BuildEntryFailed(e.to_string()))
            })
            .collect();

        let output = self
            .client
            .send_message_batch()
            .queue_url(queue_url)
            .set_entries(Some(request?))
            .send()
            .await?;

        log_failures("SendMessageBatch", output.failed());

        let successful: HashMap<&str, &SendMessageBatchResultEntry> = output
            .successful()
            .iter()
            .map(|entry| (entry.id(), entry))
            .collect();

        Ok(settle(entries, |id, body| match successful.get(id.as_ref()) {
            Some(entry) => Ok(SentMessage {
                message_id: entry.message_id().to_string(),
                md5_of_body: entry.md5_of_message_body().to_string(),
                body,
            }),
            None => Err(body),
        }))
    }
}
