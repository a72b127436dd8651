use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, tracing, Error};

mod config;
mod discovery;
mod error;
mod event_handler;
mod record;
mod s3;
mod secrets;
mod sink;

use config::Config;
use event_handler::function_handler;
use sink::LogSink;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::subscriber::fmt().json().init();
    let config = Config::from_env()?;
    let shared_config = aws_config::load_defaults(BehaviorVersion::v2025_01_17()).await;
    let s3_client = S3Client::new(&shared_config);

    if let Some(stack) = config.stack_name.as_deref() {
        let cloudformation = aws_sdk_cloudformation::Client::new(&shared_config);
        match discovery::get_stack_output(&cloudformation, stack, &config.jdbc_output_key).await? {
            Some(endpoint) => tracing::info!(
                stack,
                output_key = %config.jdbc_output_key,
                %endpoint,
                "resolved database endpoint"
            ),
            None => tracing::warn!(
                stack,
                output_key = %config.jdbc_output_key,
                "stack exports no such output"
            ),
        }
    }
    if let Some(secret_id) = config.db_secret_name.as_deref() {
        let secretsmanager = aws_sdk_secretsmanager::Client::new(&shared_config);
        let kind = match secrets::get_secret(&secretsmanager, secret_id).await? {
            secrets::SecretValue::String(_) => "string",
            secrets::SecretValue::Binary(_) => "binary",
        };
        tracing::info!(secret_id, kind, "database credentials are available");
    }

    let sink = LogSink;
    run(service_fn(|event| async {
        function_handler(event, &s3_client, &config, &sink)
            .await
            .map_err(Error::from)
    }))
    .await
}
