use lambda_runtime::tracing;

use crate::error::BoxError;
use crate::record::HomeRecord;

/// Output port for a parsed batch. The database/queue writer goes behind
/// this seam; tests capture batches through it.
pub(crate) trait RecordSink {
    async fn publish(&self, records: &[HomeRecord]) -> Result<(), BoxError>;
}

/// Emits every record as a JSON log line, one per record. Placeholder for
/// the Aurora staging-table writer.
pub(crate) struct LogSink;

impl RecordSink for LogSink {
    async fn publish(&self, records: &[HomeRecord]) -> Result<(), BoxError> {
        for record in records {
            tracing::info!(record = %serde_json::to_string(record)?, "parsed record");
        }
        Ok(())
    }
}
