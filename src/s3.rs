use std::time::Duration;

use aws_sdk_s3::Client as S3Client;
use lambda_runtime::tracing;
use tokio::time::sleep;

use crate::error::IngestError;

/// Checks whether the key is readable in the bucket. A missing object is
/// `Ok(false)`; any other service error is surfaced.
async fn object_exists(client: &S3Client, bucket: &str, key: &str) -> Result<bool, IngestError> {
    match client.head_object().bucket(bucket).key(key).send().await {
        Ok(_) => Ok(true),
        Err(e) if e.as_service_error().map(|e| e.is_not_found()) == Some(true) => Ok(false),
        Err(e) => Err(IngestError::Head {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source: e.into(),
        }),
    }
}

/// Bounded polling wait for the notified object to become readable.
/// S3 notifications can race the object's visibility, so the handler
/// confirms existence before reading anything.
pub(crate) async fn wait_for_object(
    client: &S3Client,
    bucket: &str,
    key: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<(), IngestError> {
    let max_attempts = (timeout.as_millis() / interval.as_millis().max(1)).max(1) as u32;
    for attempt in 1..=max_attempts {
        if object_exists(client, bucket, key).await? {
            tracing::debug!(bucket, key, attempt, "object is visible");
            return Ok(());
        }
        tracing::debug!(bucket, key, attempt, max_attempts, "object not visible yet");
        if attempt < max_attempts {
            sleep(interval).await;
        }
    }
    Err(IngestError::ObjectUnavailable {
        bucket: bucket.to_string(),
        key: key.to_string(),
        timeout,
    })
}

/// Downloads the object and returns its full body.
pub(crate) async fn fetch_object(
    client: &S3Client,
    bucket: &str,
    key: &str,
) -> Result<Vec<u8>, IngestError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| IngestError::Fetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source: e.into(),
        })?;
    let body = resp.body.collect().await.map_err(|e| IngestError::Body {
        bucket: bucket.to_string(),
        key: key.to_string(),
        source: Box::new(e),
    })?;
    Ok(body.into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::operation::get_object::GetObjectOutput;
    use aws_sdk_s3::operation::head_object::{HeadObjectError, HeadObjectOutput};
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::types::error::NotFound;
    use aws_smithy_mocks::{mock, mock_client};

    #[tokio::test]
    async fn wait_returns_once_object_becomes_visible() {
        let head_rule = mock!(aws_sdk_s3::Client::head_object)
            .sequence()
            .error(|| HeadObjectError::NotFound(NotFound::builder().build()))
            .error(|| HeadObjectError::NotFound(NotFound::builder().build()))
            .output(|| HeadObjectOutput::builder().build())
            .build();
        let s3 = mock_client!(aws_sdk_s3, [&head_rule]);

        wait_for_object(
            &s3,
            "bg-glue",
            "aurora/homes.csv",
            Duration::from_millis(5),
            Duration::from_millis(1),
        )
        .await
        .unwrap();
        assert_eq!(head_rule.num_calls(), 3);
    }

    #[tokio::test]
    async fn wait_times_out_when_object_never_appears() {
        let head_rule = mock!(aws_sdk_s3::Client::head_object)
            .sequence()
            .error(|| HeadObjectError::NotFound(NotFound::builder().build()))
            .error(|| HeadObjectError::NotFound(NotFound::builder().build()))
            .error(|| HeadObjectError::NotFound(NotFound::builder().build()))
            .build();
        let s3 = mock_client!(aws_sdk_s3, [&head_rule]);

        let err = wait_for_object(
            &s3,
            "bg-glue",
            "aurora/homes.csv",
            Duration::from_millis(3),
            Duration::from_millis(1),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, IngestError::ObjectUnavailable { .. }));
        assert_eq!(head_rule.num_calls(), 3);
    }

    #[tokio::test]
    async fn fetch_returns_full_body() {
        let get_rule = mock!(aws_sdk_s3::Client::get_object).then_output(|| {
            GetObjectOutput::builder()
                .body(ByteStream::from_static(b"100 120 80 5 3 2 10 0.5 1200"))
                .build()
        });
        let s3 = mock_client!(aws_sdk_s3, [&get_rule]);

        let bytes = fetch_object(&s3, "bg-glue", "aurora/homes.csv")
            .await
            .unwrap();
        assert_eq!(bytes, b"100 120 80 5 3 2 10 0.5 1200");
    }
}
