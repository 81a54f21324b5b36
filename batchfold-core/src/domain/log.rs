//! Log domain types

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Log group the batch service writes container output to
pub const BATCH_LOG_GROUP: &str = "/aws/batch/job";

/// A raw event as returned by the log service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    /// Event time in epoch milliseconds
    pub timestamp: Option<i64>,
    pub message: String,
    /// Ingestion time in epoch milliseconds
    pub ingestion_time: Option<i64>,
}

/// One row of the formatted log table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// `None` when the event carried no timestamp or one out of range
    pub timestamp: Option<DateTime<Local>>,
    pub message: String,
}

impl LogRecord {
    /// Converts a raw event, dropping the ingestion time
    pub fn from_event(event: LogEvent) -> Self {
        Self {
            timestamp: event
                .timestamp
                .and_then(|millis| Local.timestamp_millis_opt(millis).single()),
            message: event.message,
        }
    }
}

/// Outcome of fetching the logs of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobLogs {
    /// Events of the stream, in the order the service returned them
    Records(Vec<LogRecord>),
    /// The stream does not exist yet
    Pending(String),
}

impl JobLogs {
    pub fn pending(log_stream_name: &str) -> Self {
        JobLogs::Pending(format!(
            "Log stream {} does not exist. Please try again in a few minutes",
            log_stream_name
        ))
    }

    pub fn from_events(events: Vec<LogEvent>) -> Self {
        JobLogs::Records(events.into_iter().map(LogRecord::from_event).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_events_converts_timestamps() {
        let logs = JobLogs::from_events(vec![
            LogEvent {
                timestamp: Some(1_700_000_000_000),
                message: "first".to_string(),
                ingestion_time: Some(1_700_000_000_500),
            },
            LogEvent {
                timestamp: Some(1_700_000_001_000),
                message: "second".to_string(),
                ingestion_time: None,
            },
        ]);

        let JobLogs::Records(rows) = logs else {
            panic!("expected records");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].message, "first");
        assert_eq!(
            rows[0].timestamp.map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );
        assert_eq!(
            rows[1].timestamp.map(|t| t.timestamp_millis()),
            Some(1_700_000_001_000)
        );
    }

    #[test]
    fn test_events_without_usable_timestamp_are_kept() {
        let logs = JobLogs::from_events(vec![
            LogEvent {
                timestamp: Some(i64::MAX),
                message: "out of range".to_string(),
                ingestion_time: None,
            },
            LogEvent {
                timestamp: None,
                message: "missing".to_string(),
                ingestion_time: None,
            },
            LogEvent {
                timestamp: Some(0),
                message: "epoch".to_string(),
                ingestion_time: None,
            },
        ]);

        let JobLogs::Records(rows) = logs else {
            panic!("expected records");
        };
        let messages: Vec<&str> = rows.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["out of range", "missing", "epoch"]);
        assert!(rows[0].timestamp.is_none());
        assert!(rows[1].timestamp.is_none());
        assert_eq!(rows[2].timestamp.map(|t| t.timestamp_millis()), Some(0));
    }

    #[test]
    fn test_pending_message_names_stream() {
        let JobLogs::Pending(message) = JobLogs::pending("fold/default/123") else {
            panic!("expected pending");
        };
        assert!(message.contains("fold/default/123"));
        assert!(message.contains("try again"));
    }
}
