use super::{MessageModel, QueueClient, SqsError, MAX_BATCH_ENTRIES};
use crate::batch::StepOutcome;
use aws_sdk_sqs::types::MessageSystemAttributeName;

/// Settings applied to every `ReceiveMessage` call of a bulk receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveOptions {
    /// Seconds received messages stay hidden from other consumers
    pub visibility_timeout: i32,
    /// Seconds to long-poll for messages; 0 returns immediately
    pub wait_time: i32,
}

impl Default for ReceiveOptions {
    fn default() -> Self {
        Self {
            visibility_timeout: 15,
            wait_time: 0,
        }
    }
}

impl QueueClient {
    /// Fills as many of `slots` as one `ReceiveMessage` call allows.
    ///
    /// Each slot stands for one message still wanted. Slots the queue could
    /// not fill (because it is empty or the messages are in flight) come
    /// back as unprocessed so the engine asks again after a backoff.
    /// Messages missing required fields are skipped with a warning.
    pub async fn receive_batch(
        &self,
        queue_url: &str,
        mut slots: Vec<usize>,
        options: ReceiveOptions,
    ) -> Result<StepOutcome<usize, MessageModel>, SqsError> {
        if slots.is_empty() {
            return Ok(StepOutcome::default());
        }

        let wanted = slots.len().min(MAX_BATCH_ENTRIES);
        let output = self
            .client
            .receive_message()
            .queue_url(queue_url)
            .max_number_of_messages(wanted as i32)
            .visibility_timeout(options.visibility_timeout)
            .wait_time_seconds(options.wait_time)
            .message_system_attribute_names(MessageSystemAttributeName::All)
            .send()
            .await?;

        let received: Vec<MessageModel> = output
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|message| match MessageModel::from_aws_message(message) {
                Ok(model) => Some(model),
                Err(e) => {
                    log::warn!("skipping received message: {e}");
                    None
                }
            })
            .take(wanted)
            .collect();

        let unfilled = slots.split_off(received.len());
        Ok(StepOutcome::new(received, unfilled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup;

    #[tokio::test]
    #[ignore = "requires Docker for LocalStack"]
    async fn receives_up_to_the_requested_slots() {
        let (queue, queue_url, _) = setup("test-receive").await;
        let bodies: Vec<String> = (0..4).map(|i| format!("Test message {i}")).collect();
        queue.send_batch(&queue_url, bodies).await.unwrap();

        let outcome = queue
            .receive_batch(&queue_url, (0..6).collect(), ReceiveOptions::default())
            .await
            .unwrap();

        assert_eq!(outcome.processed.len() + outcome.unprocessed.len(), 6);
        assert!(outcome.processed.len() <= 4);
        assert!(outcome
            .processed
            .iter()
            .all(|m| m.body.starts_with("Test message")));
    }

    #[tokio::test]
    #[ignore = "requires Docker for LocalStack"]
    async fn empty_queue_leaves_every_slot_unfilled() {
        let (queue, queue_url, _) = setup("test-receive-empty").await;

        let outcome = queue
            .receive_batch(&queue_url, vec![0, 1, 2], ReceiveOptions::default())
            .await
            .unwrap();

        assert!(outcome.processed.is_empty());
        assert_eq!(outcome.unprocessed, vec![0, 1, 2]);
    }
}
