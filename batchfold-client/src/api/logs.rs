//! Log service

use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::Client;
use batchfold_core::domain::log::LogEvent;

use crate::error::{ClientError, Result};

/// Trait for reading job log streams
#[async_trait]
pub trait LogApi: Send + Sync {
    /// Fetches the events of a log stream
    ///
    /// # Errors
    /// `ClientError::NotFound` if the stream has not been created yet.
    async fn get_log_events(&self, log_group: &str, log_stream: &str) -> Result<Vec<LogEvent>>;
}

/// CloudWatch Logs implementation of LogApi
#[derive(Debug, Clone)]
pub struct AwsLogs {
    client: Client,
}

impl AwsLogs {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogApi for AwsLogs {
    async fn get_log_events(&self, log_group: &str, log_stream: &str) -> Result<Vec<LogEvent>> {
        let output = self
            .client
            .get_log_events()
            .log_group_name(log_group)
            .log_stream_name(log_stream)
            .send()
            .await
            .map_err(|e| {
                if e
                    .as_service_error()
                    .is_some_and(|se| se.is_resource_not_found_exception())
                {
                    ClientError::NotFound(format!("log stream {}", log_stream))
                } else {
                    ClientError::service("logs", e)
                }
            })?;

        Ok(output
            .events()
            .iter()
            .map(|event| LogEvent {
                timestamp: event.timestamp(),
                message: event.message().unwrap_or_default().to_string(),
                ingestion_time: event.ingestion_time(),
            })
            .collect())
    }
}
