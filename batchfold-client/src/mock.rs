//! In-memory fakes of the service traits for tests

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use batchfold_core::domain::job::JobDescription;
use batchfold_core::domain::log::LogEvent;
use batchfold_core::domain::resources::LogicalResource;
use batchfold_core::domain::stack::{FOLD_STACK_MARKER, StackResource, StackSummary};
use batchfold_core::dto::submit::{SubmitJobRequest, SubmitJobResponse};

use crate::FoldClient;
use crate::api::{BatchApi, LogApi, ObjectStore, StackApi};
use crate::error::{ClientError, Result};

#[derive(Clone, Default)]
pub struct MockServices {
    pub stacks: Arc<Mutex<Vec<StackSummary>>>,
    pub requested_statuses: Arc<Mutex<Vec<String>>>,
    pub resources: Arc<Mutex<HashMap<String, Vec<StackResource>>>>,
    pub submitted: Arc<Mutex<Vec<SubmitJobRequest>>>,
    pub jobs: Arc<Mutex<HashMap<String, JobDescription>>>,
    pub log_streams: Arc<Mutex<HashMap<String, Vec<LogEvent>>>>,
    pub requested_log_groups: Arc<Mutex<Vec<String>>>,
    pub objects: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
}

impl MockServices {
    pub fn client(&self) -> FoldClient {
        let services = Arc::new(self.clone());
        FoldClient::new(
            services.clone(),
            services.clone(),
            services.clone(),
            services,
        )
    }

    /// Registers a deployed fold stack whose resources are named `<stack>-<logical id>`
    pub fn add_fold_stack(&self, name: &str) {
        self.stacks.lock().unwrap().push(StackSummary {
            stack_id: Some(format!("arn:aws:cloudformation:::stack/{}", name)),
            stack_name: name.to_string(),
            status: "CREATE_COMPLETE".to_string(),
            template_description: Some(format!("{} (reduced)", FOLD_STACK_MARKER)),
        });

        let resources = LogicalResource::ALL
            .iter()
            .map(|r| StackResource::new(r.logical_id(), format!("{}-{}", name, r.logical_id())))
            .collect();
        self.resources
            .lock()
            .unwrap()
            .insert(name.to_string(), resources);
    }

    pub fn put_object(&self, bucket: &str, key: &str, body: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body.as_bytes().to_vec());
    }
}

#[async_trait]
impl BatchApi for MockServices {
    async fn submit_job(&self, request: &SubmitJobRequest) -> Result<SubmitJobResponse> {
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(request.clone());
        let job_id = format!("job-{}", submitted.len());

        Ok(SubmitJobResponse {
            job_arn: Some(format!("arn:aws:batch:us-east-1:123456789012:job/{}", job_id)),
            job_name: request.job_name.clone(),
            job_id,
        })
    }

    async fn describe_job(&self, job_id: &str) -> Result<JobDescription> {
        self.jobs
            .lock()
            .unwrap()
            .get(job_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("job {}", job_id)))
    }
}

#[async_trait]
impl StackApi for MockServices {
    async fn list_stacks(&self, statuses: &[&str]) -> Result<Vec<StackSummary>> {
        *self.requested_statuses.lock().unwrap() =
            statuses.iter().map(|s| s.to_string()).collect();

        Ok(self
            .stacks
            .lock()
            .unwrap()
            .iter()
            .filter(|s| statuses.contains(&s.status.as_str()))
            .cloned()
            .collect())
    }

    async fn list_stack_resources(&self, stack_name: &str) -> Result<Vec<StackResource>> {
        self.resources
            .lock()
            .unwrap()
            .get(stack_name)
            .cloned()
            .ok_or_else(|| ClientError::Service {
                service: "cloudformation",
                message: format!("Stack with id {} does not exist", stack_name),
            })
    }
}

#[async_trait]
impl LogApi for MockServices {
    async fn get_log_events(&self, log_group: &str, log_stream: &str) -> Result<Vec<LogEvent>> {
        self.requested_log_groups
            .lock()
            .unwrap()
            .push(log_group.to_string());

        self.log_streams
            .lock()
            .unwrap()
            .get(log_stream)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("log stream {}", log_stream)))
    }
}

#[async_trait]
impl ObjectStore for MockServices {
    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> Result<()> {
        let body = std::fs::read(path)?;
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body);
        Ok(())
    }

    async fn download_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        let body = self
            .objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("s3://{}/{}", bucket, key)))?;
        std::fs::write(path, body)?;
        Ok(())
    }
}
