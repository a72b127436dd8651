use std::time::Duration;

use thiserror::Error;

use crate::record::FIELDS_PER_RECORD;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong between receiving a notification and
/// handing the parsed batch to the sink. Variants are distinct enough for
/// the platform to decide on retry vs dead-letter.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("S3 event record is missing {0}")]
    MissingEventField(&'static str),

    #[error("object key {0:?} is not valid percent-encoding")]
    InvalidKey(String),

    #[error("object s3://{bucket}/{key} did not become visible within {timeout:?}")]
    ObjectUnavailable {
        bucket: String,
        key: String,
        timeout: Duration,
    },

    #[error("head object failed for s3://{bucket}/{key}")]
    Head {
        bucket: String,
        key: String,
        #[source]
        source: aws_sdk_s3::Error,
    },

    #[error("fetching s3://{bucket}/{key} failed")]
    Fetch {
        bucket: String,
        key: String,
        #[source]
        source: aws_sdk_s3::Error,
    },

    #[error("reading body of s3://{bucket}/{key} failed")]
    Body {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("object body is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("token count {tokens} is not a multiple of {FIELDS_PER_RECORD}")]
    MalformedPayload { tokens: usize },

    #[error("record sink rejected the batch")]
    Sink(#[source] BoxError),
}
