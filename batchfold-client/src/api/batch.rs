//! Batch service
//!
//! Job submission and job description.

use async_trait::async_trait;
use aws_sdk_batch::Client;
use aws_sdk_batch::types::{
    ArrayJobDependency, ContainerOverrides as SdkContainerOverrides,
    JobDependency as SdkJobDependency, JobDetail, ResourceRequirement, ResourceType,
};
use batchfold_core::domain::job::{JobDescription, JobStatus};
use batchfold_core::dto::submit::{
    ContainerOverrides, DependencyType, JobDependency, SubmitJobRequest, SubmitJobResponse,
};

use crate::error::{ClientError, Result};

/// Trait for batch job operations
#[async_trait]
pub trait BatchApi: Send + Sync {
    /// Submits a job and returns the service response unchanged
    async fn submit_job(&self, request: &SubmitJobRequest) -> Result<SubmitJobResponse>;

    /// Fetches the description of a single job
    ///
    /// # Errors
    /// `ClientError::NotFound` if the service does not know the job.
    async fn describe_job(&self, job_id: &str) -> Result<JobDescription>;
}

/// AWS Batch implementation of BatchApi
#[derive(Debug, Clone)]
pub struct AwsBatch {
    client: Client,
}

impl AwsBatch {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Container overrides in the SDK's shape
fn to_sdk_overrides(overrides: &ContainerOverrides) -> Result<SdkContainerOverrides> {
    let mut builder = SdkContainerOverrides::builder().set_command(Some(overrides.command.clone()));
    for requirement in &overrides.resource_requirements {
        let requirement = ResourceRequirement::builder()
            .value(&requirement.value)
            .r#type(ResourceType::from(requirement.kind.as_str()))
            .build();
        builder = builder.resource_requirements(requirement);
    }
    Ok(builder.build())
}

fn to_sdk_dependency(dependency: &JobDependency) -> SdkJobDependency {
    SdkJobDependency::builder()
        .job_id(&dependency.job_id)
        .set_type(dependency.kind.map(|kind| ArrayJobDependency::from(kind.as_str())))
        .build()
}

#[async_trait]
impl BatchApi for AwsBatch {
    async fn submit_job(&self, request: &SubmitJobRequest) -> Result<SubmitJobResponse> {
        let mut call = self
            .client
            .submit_job()
            .job_definition(&request.job_definition)
            .job_name(&request.job_name)
            .job_queue(&request.job_queue)
            .container_overrides(to_sdk_overrides(&request.container_overrides)?);

        for dependency in request.depends_on.iter().flatten() {
            call = call.depends_on(to_sdk_dependency(dependency));
        }

        let output = call
            .send()
            .await
            .map_err(|e| ClientError::service("batch", e))?;

        Ok(SubmitJobResponse {
            job_arn: output.job_arn().map(str::to_string),
            job_name: output.job_name().to_string(),
            job_id: output.job_id().to_string(),
        })
    }

    async fn describe_job(&self, job_id: &str) -> Result<JobDescription> {
        let output = self
            .client
            .describe_jobs()
            .jobs(job_id)
            .send()
            .await
            .map_err(|e| ClientError::service("batch", e))?;

        output
            .jobs()
            .first()
            .map(to_description)
            .ok_or_else(|| ClientError::NotFound(format!("job {}", job_id)))
    }
}

fn to_description(detail: &JobDetail) -> JobDescription {
    JobDescription {
        job_arn: detail.job_arn().map(str::to_string),
        job_name: detail.job_name().to_string(),
        job_id: detail.job_id().to_string(),
        status: JobStatus::from(detail.status().as_str()),
        created_at: detail.created_at(),
        depends_on: detail
            .depends_on()
            .iter()
            .filter_map(|d| {
                Some(JobDependency {
                    job_id: d.job_id()?.to_string(),
                    kind: d.r#type().and_then(|t| match t {
                        ArrayJobDependency::Sequential => Some(DependencyType::Sequential),
                        ArrayJobDependency::NToN => Some(DependencyType::NToN),
                        _ => None,
                    }),
                })
            })
            .collect(),
        tags: detail
            .tags()
            .map(|tags| tags.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default(),
        log_stream_name: detail
            .container()
            .and_then(|c| c.log_stream_name())
            .map(str::to_string),
    }
}
