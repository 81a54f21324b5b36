//! Batchfold Client
//!
//! Submits fold and database-download jobs to AWS Batch and inspects their
//! results, resolving batch resources from the deployed stack.
//!
//! The client holds one configured handle per external service (batch,
//! stack inventory, logs, object storage), built once and reused across calls.
//!
//! # Example
//!
//! ```no_run
//! use batchfold_client::{AwsSettings, FoldClient};
//! use batchfold_core::dto::fold::FoldJobParams;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = FoldClient::from_settings(&AwsSettings::default()).await;
//!
//!     let key = client
//!         .upload_fasta(&["MKVLAT".to_string()], &["query".to_string()], "my-bucket", Some("job1"))
//!         .await?;
//!     let response = client
//!         .submit_fold_job(FoldJobParams::new("job1", key, "my-bucket"), None)
//!         .await?;
//!
//!     println!("Submitted job {}", response.job_id);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
mod jobs;
mod logs;
mod stacks;
mod storage;

#[cfg(test)]
mod mock;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use storage::DownloadedAlignments;

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::api::{
    AwsBatch, AwsLogs, AwsObjectStore, AwsStacks, BatchApi, LogApi, ObjectStore, StackApi,
};

/// Explicit region and credential selection for the AWS clients
#[derive(Debug, Clone, Default)]
pub struct AwsSettings {
    /// Region override; the default provider chain decides when unset
    pub region: Option<String>,
    /// Named profile from the shared config files
    pub profile: Option<String>,
}

impl AwsSettings {
    /// Resolve the shared SDK configuration
    pub async fn load(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        loader.load().await
    }
}

/// Client for the fold deployment
///
/// Methods are organized into logical groups:
/// - Stack discovery and batch resource lookup
/// - Job submission, description and logs
/// - Sequence upload and result download
#[derive(Clone)]
pub struct FoldClient {
    batch: Arc<dyn BatchApi>,
    stacks: Arc<dyn StackApi>,
    logs: Arc<dyn LogApi>,
    storage: Arc<dyn ObjectStore>,
}

impl FoldClient {
    /// Create a client from explicit service implementations
    pub fn new(
        batch: Arc<dyn BatchApi>,
        stacks: Arc<dyn StackApi>,
        logs: Arc<dyn LogApi>,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            batch,
            stacks,
            logs,
            storage,
        }
    }

    /// Create AWS-backed clients sharing one SDK configuration
    pub fn from_sdk_config(config: &SdkConfig) -> Self {
        Self::new(
            Arc::new(AwsBatch::new(aws_sdk_batch::Client::new(config))),
            Arc::new(AwsStacks::new(aws_sdk_cloudformation::Client::new(config))),
            Arc::new(AwsLogs::new(aws_sdk_cloudwatchlogs::Client::new(config))),
            Arc::new(AwsObjectStore::new(aws_sdk_s3::Client::new(config))),
        )
    }

    /// Resolve the SDK configuration and create AWS-backed clients
    pub async fn from_settings(settings: &AwsSettings) -> Self {
        let config = settings.load().await;
        Self::from_sdk_config(&config)
    }
}
