use aws_sdk_sqs::error::{DisplayErrorContext, SdkError};
use std::fmt;

#[derive(Debug)]
pub enum SqsError {
    MissingQueueUrl,
    BuildEntryFailed(String),
    MissingField(&'static str),
    Service(String),
}

impl fmt::Display for SqsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqsError::MissingQueueUrl => write!(f, "queue URL was not specified"),
            SqsError::BuildEntryFailed(msg) => write!(f, "failed to build batch entry: {}", msg),
            SqsError::MissingField(field) => write!(f, "SQS response is missing {}", field),
            SqsError::Service(msg) => write!(f, "AWS SDK error: {}", msg),
        }
    }
}

impl std::error::Error for SqsError {}

impl<E, R> From<SdkError<E, R>> for SqsError
where
    E: std::error::Error + 'static,
    R: fmt::Debug,
{
    fn from(err: SdkError<E, R>) -> Self {
        SqsError::Service(DisplayErrorContext(&err).to_string())
    }
}
