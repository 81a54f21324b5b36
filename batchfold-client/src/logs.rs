//! Job logs

use batchfold_core::domain::log::{BATCH_LOG_GROUP, JobLogs};
use tracing::warn;

use crate::FoldClient;
use crate::error::Result;

impl FoldClient {
    /// Get the log events of a job's log stream
    ///
    /// A stream that does not exist yet is not an error: the job has simply
    /// not started writing, and `JobLogs::Pending` carries a message to retry
    /// later.
    pub async fn get_job_logs(&self, log_stream_name: &str) -> Result<JobLogs> {
        match self
            .logs
            .get_log_events(BATCH_LOG_GROUP, log_stream_name)
            .await
        {
            Ok(events) => Ok(JobLogs::from_events(events)),
            Err(e) if e.is_not_found() => {
                warn!("Log stream {} does not exist yet", log_stream_name);
                Ok(JobLogs::pending(log_stream_name))
            }
            Err(e) => Err(e),
        }
    }
}
