use std::env;
use std::time::Duration;

use thiserror::Error;

/// Fixed object read by default on every invocation, matching the deployed
/// trigger's reference file.
const DEFAULT_SOURCE_BUCKET: &str = "bg-glue";
const DEFAULT_SOURCE_KEY: &str = "aurora/homes.csv";

/// Defaults mirror the SDK object-exists waiter: 5 second polls for up to
/// 100 seconds.
const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 100;
const DEFAULT_WAIT_INTERVAL_SECS: u64 = 5;

pub const DEFAULT_JDBC_OUTPUT_KEY: &str = "JDBCAuroraConnectionString";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be an integer number of seconds, got {value:?}")]
    InvalidSeconds { var: &'static str, value: String },
}

/// Runtime configuration, read once at cold start.
#[derive(Clone, Debug)]
pub struct Config {
    /// Bucket of the fixed object fetched when `fetch_event_object` is off.
    pub source_bucket: String,
    /// Key of the fixed object fetched when `fetch_event_object` is off.
    pub source_key: String,
    /// When set, fetch the object named by the notification instead of the
    /// fixed source object.
    pub fetch_event_object: bool,
    pub wait_timeout: Duration,
    pub wait_interval: Duration,
    /// CloudFormation stack to resolve the database endpoint from at startup.
    pub stack_name: Option<String>,
    pub jdbc_output_key: String,
    /// Secrets Manager id holding the database credentials, checked at startup.
    pub db_secret_name: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            source_bucket: lookup("SOURCE_BUCKET")
                .unwrap_or_else(|| DEFAULT_SOURCE_BUCKET.to_string()),
            source_key: lookup("SOURCE_KEY").unwrap_or_else(|| DEFAULT_SOURCE_KEY.to_string()),
            fetch_event_object: lookup("FETCH_EVENT_OBJECT")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            wait_timeout: seconds_var(&lookup, "WAIT_TIMEOUT_SECS", DEFAULT_WAIT_TIMEOUT_SECS)?,
            wait_interval: seconds_var(&lookup, "WAIT_INTERVAL_SECS", DEFAULT_WAIT_INTERVAL_SECS)?,
            stack_name: lookup("STACK_NAME").filter(|v| !v.is_empty()),
            jdbc_output_key: lookup("JDBC_OUTPUT_KEY")
                .unwrap_or_else(|| DEFAULT_JDBC_OUTPUT_KEY.to_string()),
            db_secret_name: lookup("DB_SECRET_NAME").filter(|v| !v.is_empty()),
        })
    }
}

fn seconds_var(
    lookup: impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    match lookup(var) {
        None => Ok(Duration::from_secs(default)),
        Some(value) => value
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidSeconds { var, value }),
    }
}
