use super::entry::{label, log_failures, settle};
use super::{MessageHandle, QueueClient, SqsError};
use crate::batch::StepOutcome;
use aws_sdk_sqs::types::ChangeMessageVisibilityBatchRequestEntry;
use std::collections::HashSet;

impl QueueClient {
    /// Sets the visibility timeout of one batch of messages with
    /// `ChangeMessageVisibilityBatch`. A timeout of 0 makes them visible again
    /// right away.
    pub async fn change_visibility_batch(
        &self,
        queue_url: &str,
        handles: Vec<MessageHandle>,
        timeout_secs: i32,
    ) -> Result<StepOutcome<MessageHandle, MessageHandle>, SqsError> {
        if handles.is_empty() {
            return Ok(StepOutcome::default());
        }

        let entries = label(handles);
        let request: Result<Vec<_>, SqsError> = entries
            .iter()
            .map(|(id, handle)| {
                ChangeMessageVisibilityBatchRequestEntry::builder()
                    .id(id.as_ref())
                    .receipt_handle(&handle.receipt_handle)
                    .visibility_timeout(timeout_secs)
                    .build()
                    .map_err(|e| SqsError::BuildEntryFailed(e.to_string()))
            })
            .collect();

        let output = self
            .client
            .change_message_visibility_batch()
            .queue_url(queue_url)
            .set_entries(Some(request?))
            .send()
            .await?;

        log_failures("ChangeMessageVisibilityBatch", output.failed());

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

#[cfg(test)]
mod tests {
    use crate::sqs::ReceiveOptions;
    use crate::test_utils::setup;

    #[tokio::test]
    #[ignore = "requires Docker for LocalStack"]
    async fn releases_messages_back_to_the_queue() {
        let (queue, queue_url, _) = setup("test-visibility").await;
        queue
            .send_batch(&queue_url, vec!["hidden".to_string()])
            .await
            .unwrap();
        let options = ReceiveOptions {
            visibility_timeout: 300,
            wait_time: 1,
        };
        let received = queue
            .receive_batch(&queue_url, vec![0], options)
            .await
            .unwrap();
        let handles: Vec<_> = received.processed.iter().map(|m| m.handle()).collect();
        assert_eq!(handles.len(), 1);

        let outcome = queue
            .change_visibility_batch(&queue_url, handles, 0)
            .await
            .unwrap();
        assert_eq!(outcome.processed.len(), 1);

        let again = queue
            .receive_batch(&queue_url, vec![0], options)
            .await
            .unwrap();
        assert_eq!(again.processed[0].body, "hidden");
    }
}
