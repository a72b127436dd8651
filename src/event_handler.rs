use aws_lambda_events::event::s3::S3Event;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{tracing, LambdaEvent};

use crate::config::Config;
use crate::error::IngestError;
use crate::record::parse_records;
use crate::s3;
use crate::sink::RecordSink;

/// S3 notification keys arrive URL-encoded with spaces as '+'
/// (unquote_plus semantics).
fn decode_object_key(raw: &str) -> Result<String, IngestError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|key| key.into_owned())
        .map_err(|_| IngestError::InvalidKey(raw.to_string()))
}

pub(crate) async fn function_handler<S: RecordSink>(
    event: LambdaEvent<S3Event>,
    s3_client: &S3Client,
    config: &Config,
    sink: &S,
) -> Result<(), IngestError> {
    let context = &event.context;
    tracing::info!(
        request_id = %context.request_id,
        log_stream = %context.env_config.log_stream,
        log_group = %context.env_config.log_group,
        memory_limit_mb = context.env_config.memory,
        "received S3 notification"
    );

    let payload = event.payload;
    let Some(record) = payload.records.first() else {
        tracing::warn!("No records found in S3 event");
        return Ok(());
    };
    let bucket = record
        .s3
        .bucket
        .name
        .clone()
        .ok_or(IngestError::MissingEventField("bucket name"))?;
    let raw_key = record
        .s3
        .object
        .key
        .as_deref()
        .ok_or(IngestError::MissingEventField("object key"))?;
    let key = decode_object_key(raw_key)?;

    // Notifications can outrun object visibility; confirm before reading.
    s3::wait_for_object(
        s3_client,
        &bucket,
        &key,
        config.wait_timeout,
        config.wait_interval,
    )
    .await?;

    let (fetch_bucket, fetch_key) = if config.fetch_event_object {
        (bucket.as_str(), key.as_str())
    } else {
        (config.source_bucket.as_str(), config.source_key.as_str())
    };
    tracing::info!(bucket = fetch_bucket, key = fetch_key, "fetching source object");
    let bytes = s3::fetch_object(s3_client, fetch_bucket, fetch_key).await?;

    let text = std::str::from_utf8(&bytes)?;
    let records = parse_records(text)?;
    tracing::info!(records = records.len(), "assembled fixed-stride records");

    sink.publish(&records).await.map_err(IngestError::Sink)?;
    Ok(())
}
