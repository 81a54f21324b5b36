//! Object storage service

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::{ClientError, Result};

/// Trait for moving whole files in and out of object storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads a local file to `bucket/key`
    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> Result<()>;

    /// Downloads `bucket/key` to a local file, replacing it if present
    ///
    /// # Errors
    /// `ClientError::NotFound` if the object does not exist.
    async fn download_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()>;
}

/// S3 implementation of ObjectStore
#[derive(Debug, Clone)]
pub struct AwsObjectStore {
    client: Client,
}

impl AwsObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for AwsObjectStore {
    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> Result<()> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| ClientError::service("s3", e))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::service("s3", e))?;

        Ok(())
    }

    async fn download_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    ClientError::NotFound(format!("s3://{}/{}", bucket, key))
                } else {
                    ClientError::service("s3", e)
                }
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| ClientError::service("s3", e))?
            .into_bytes();
        tokio::fs::write(path, data).await?;

        Ok(())
    }
}
