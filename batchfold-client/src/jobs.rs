//! Job submission and inspection

use batchfold_core::domain::job::JobInfo;
use batchfold_core::dto::download::DownloadJobParams;
use batchfold_core::dto::fold::FoldJobParams;
use batchfold_core::dto::submit::{SubmitJobRequest, SubmitJobResponse};
use tracing::info;

use crate::FoldClient;
use crate::error::Result;

impl FoldClient {
    // =============================================================================
    // Job Submission
    // =============================================================================

    /// Build the submission for a fold job without sending it
    ///
    /// Resolves the stack and its batch resources, then routes the job to
    /// the GPU pool when GPUs are requested and to the CPU pool otherwise.
    pub async fn prepare_fold_job(
        &self,
        params: FoldJobParams,
        stack_name: Option<&str>,
    ) -> Result<SubmitJobRequest> {
        let stack_name = self.resolve_stack_name(stack_name).await?;
        let resources = self.get_batch_resources(&stack_name).await?;

        Ok(params.into_request(&resources))
    }

    /// Submit a fold job
    ///
    /// # Arguments
    /// * `params` - Fold parameters, sizing and optional predecessor job
    /// * `stack_name` - Stack to submit against; the first fold stack when `None`
    ///
    /// # Returns
    /// The batch service response, including the new job id
    pub async fn submit_fold_job(
        &self,
        params: FoldJobParams,
        stack_name: Option<&str>,
    ) -> Result<SubmitJobResponse> {
        let request = self.prepare_fold_job(params, stack_name).await?;
        self.submit(&request).await
    }

    /// Build the submission for a database download job without sending it
    pub async fn prepare_download_job(
        &self,
        params: DownloadJobParams,
        stack_name: Option<&str>,
    ) -> Result<SubmitJobRequest> {
        let stack_name = self.resolve_stack_name(stack_name).await?;
        let resources = self.get_batch_resources(&stack_name).await?;

        Ok(params.into_request(&resources))
    }

    /// Submit a database download job to the download queue
    pub async fn submit_download_job(
        &self,
        params: DownloadJobParams,
        stack_name: Option<&str>,
    ) -> Result<SubmitJobResponse> {
        let request = self.prepare_download_job(params, stack_name).await?;
        self.submit(&request).await
    }

    /// Send a prepared submission to the batch service
    pub async fn submit(&self, request: &SubmitJobRequest) -> Result<SubmitJobResponse> {
        info!(
            "Submitting job {} to queue {} with overrides {}",
            request.job_name,
            request.job_queue,
            serde_json::to_string(&request.container_overrides).unwrap_or_default()
        );

        let response = self.batch.submit_job(request).await?;
        info!("Submitted job {} ({})", response.job_name, response.job_id);

        Ok(response)
    }

    // =============================================================================
    // Job Inspection
    // =============================================================================

    /// Get a fixed projection of a job's description
    ///
    /// The log stream name is only included once the job has a container.
    pub async fn get_job_info(&self, job_id: &str) -> Result<JobInfo> {
        let description = self.batch.describe_job(job_id).await?;

        Ok(JobInfo::from(description))
    }
}
