use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretError {
    /// Service errors pass through untouched so the caller can match on
    /// the concrete code (ResourceNotFoundException and friends).
    #[error(transparent)]
    Aws(#[from] aws_sdk_secretsmanager::Error),
    #[error("secret {0:?} has neither a string nor a binary value")]
    Empty(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SecretValue {
    String(String),
    Binary(Vec<u8>),
}

/// Fetches a secret by id. String secrets are returned as-is; binary
/// secrets come back already base64-decoded by the SDK.
pub async fn get_secret(
    client: &SecretsManagerClient,
    secret_id: &str,
) -> Result<SecretValue, SecretError> {
    let resp = client
        .get_secret_value()
        .secret_id(secret_id)
        .send()
        .await
        .map_err(aws_sdk_secretsmanager::Error::from)?;

    if let Some(value) = resp.secret_string() {
        return Ok(SecretValue::String(value.to_string()));
    }
    if let Some(blob) = resp.secret_binary() {
        return Ok(SecretValue::Binary(blob.clone().into_inner()));
    }
    Err(SecretError::Empty(secret_id.to_string()))
}
