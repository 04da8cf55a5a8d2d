use super::SqsError;
use serde::{Deserialize, Serialize};

/// Serializable representation of a received SQS message.
///
/// Printed as one JSON object per line by `receive`. The output can be fed
/// back into `delete` or `visibility`, which only read `message_id` and
/// `receipt_handle`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageModel {
    /// Unique identifier for the message assigned by SQS
    pub message_id: String,
    /// Handle used to delete or change visibility of the message
    pub receipt_handle: String,
    /// MD5 digest of the message body for integrity verification
    pub md5_of_body: String,
    /// The actual message content
    pub body: String,
    /// MD5 digest of message attributes (if any)
    pub md5_of_message_attributes: Option<String>,
}

impl MessageModel {
    /// Converts an AWS SDK Message into a MessageModel.
    ///
    /// # Errors
    ///
    /// Returns [`SqsError::MissingField`] if the message lacks its id, receipt
    /// handle, body digest or body.
    ///
    /// # See Also
    ///
    /// - [AWS SQS Message API Reference](https://docs.aws.amazon.com/AWSSimpleQueueService/latest/APIReference/API_Message.html)
    pub fn from_aws_message(message: aws_sdk_sqs::types::Message) -> Result<Self, SqsError> {
        Ok(Self {
            message_id: message
                .message_id
                .ok_or(SqsError::MissingField("message_id"))?,
            receipt_handle: message
                .receipt_handle
                .ok_or(SqsError::MissingField("receipt_handle"))?,
            md5_of_body: message
                .md5_of_body
                .ok_or(SqsError::MissingField("md5_of_body"))?,
            body: message.body.ok_or(SqsError::MissingField("body"))?,
            md5_of_message_attributes: message.md5_of_message_attributes,
        })
    }

    pub fn handle(&self) -> MessageHandle {
        MessageHandle {
            message_id: Some(self.message_id.clone()),
            receipt_handle: self.receipt_handle.clone(),
        }
    }
}

/// Enough of a received message to delete it or change its visibility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHandle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub receipt_handle: String,
}

impl MessageHandle {
    pub fn new(receipt_handle: impl Into<String>) -> Self {
        Self {
            message_id: None,
            receipt_handle: receipt_handle.into(),
        }
    }

    /// Reads a handle from one input line.
    ///
    /// A line starting with `{` must be a JSON object with a `receipt_handle`
    /// field (extra fields are ignored, so `receive` output works as-is).
    /// Anything else is taken as a bare receipt handle. Blank lines yield
    /// `None`.
    pub fn parse(line: &str) -> Option<Result<Self, serde_json::Error>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if line.starts_with('{') {
            return Some(serde_json::from_str(line));
        }
        Some(Ok(Self::new(line)))
    }
}

/// Confirmation of one message accepted by `SendMessageBatch`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SentMessage {
    /// Id SQS assigned to the new message
    pub message_id: String,
    /// MD5 digest SQS computed over the body
    pub md5_of_body: String,
    pub body: String,
}
