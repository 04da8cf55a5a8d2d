use super::entry::{label, log_failures, settle};
use super::{MessageHandle, QueueClient, SqsError};
use crate::batch::StepOutcome;
use aws_sdk_sqs::types::DeleteMessageBatchRequestEntry;
use std::collections::HashSet;

impl QueueClient {
    /// Deletes one batch of messages with `DeleteMessageBatch`.
    pub async fn delete_batch(
        &self,
        queue_url: &str,
        handles: Vec<MessageHandle>,
    ) -> Result<StepOutcome<MessageHandle, MessageHandle>, SqsError> {
        if handles.is_empty() {
            return Ok(StepOutcome::default());
        }

        let entries = label(handles);
        let request: Result<Vec<_>, SqsError> = entries
            .iter()
            .map(|(id, handle)| {
                DeleteMessageBatchRequestEntry::builder()
                    .id(id.as_ref())
                    .receipt_handle(&handle.receipt_handle)
                    .build()
                    .map_err(|e| SqsError::BuildEntryFailed(e.to_string()))
            })
            .collect();

        let output = self
            .client
            .delete_message_batch()
            .queue_url(queue_url)
            .set_entries(Some(request?))
            .send()
            .await?;

        log_failures("DeleteMessageBatch", output.failed());

        let successful: HashSet<&str> = output.successful().iter().map(|e| e.id()).collect();
        Ok(settle(entries, |id, handle| {
            if successful.contains(id.as_ref()) {
                Ok(handle)
            } else {
                Err(handle)
            }
        }))
    }
}
