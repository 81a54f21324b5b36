//! Job domain types

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::submit::JobDependency;

/// Batch job status as reported by the batch service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Submitted,
    Pending,
    Runnable,
    Starting,
    Running,
    Succeeded,
    Failed,
    /// Any status string this crate does not know about
    #[serde(untagged)]
    Other(String),
}

impl JobStatus {
    /// Whether the job has progressed far enough to own a container,
    /// and therefore a log stream.
    pub fn has_container(&self) -> bool {
        matches!(
            self,
            JobStatus::Starting | JobStatus::Running | JobStatus::Succeeded | JobStatus::Failed
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Submitted => "SUBMITTED",
            JobStatus::Pending => "PENDING",
            JobStatus::Runnable => "RUNNABLE",
            JobStatus::Starting => "STARTING",
            JobStatus::Running => "RUNNING",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::Other(s) => s,
        }
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "SUBMITTED" => JobStatus::Submitted,
            "PENDING" => JobStatus::Pending,
            "RUNNABLE" => JobStatus::Runnable,
            "STARTING" => JobStatus::Starting,
            "RUNNING" => JobStatus::Running,
            "SUCCEEDED" => JobStatus::Succeeded,
            "FAILED" => JobStatus::Failed,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl FromStr for JobStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(JobStatus::from(s))
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job description as returned by the batch service
///
/// Only the members this crate projects are carried over from the service
/// response.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDescription {
    pub job_arn: Option<String>,
    pub job_name: String,
    pub job_id: String,
    pub status: JobStatus,
    /// Creation time in epoch milliseconds
    pub created_at: Option<i64>,
    pub depends_on: Vec<JobDependency>,
    pub tags: BTreeMap<String, String>,
    pub log_stream_name: Option<String>,
}

/// Fixed projection of a job description shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub job_arn: Option<String>,
    pub job_name: String,
    pub job_id: String,
    pub status: JobStatus,
    /// Creation time as ISO-8601 UTC (`%Y-%m-%dT%H:%M:%SZ`)
    pub created_at: Option<String>,
    pub depends_on: Vec<JobDependency>,
    pub tags: BTreeMap<String, String>,
    /// Present only once the job has a container
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_stream_name: Option<String>,
}

impl From<JobDescription> for JobInfo {
    fn from(desc: JobDescription) -> Self {
        let log_stream_name = if desc.status.has_container() {
            desc.log_stream_name
        } else {
            None
        };

        JobInfo {
            job_arn: desc.job_arn,
            job_name: desc.job_name,
            job_id: desc.job_id,
            created_at: desc.created_at.and_then(format_epoch_millis_utc),
            status: desc.status,
            depends_on: desc.depends_on,
            tags: desc.tags,
            log_stream_name,
        }
    }
}

/// Formats epoch milliseconds as `YYYY-MM-DDThh:mm:ssZ`
pub fn format_epoch_millis_utc(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}
