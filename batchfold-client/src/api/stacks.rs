//! Stack inventory service

use async_trait::async_trait;
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::types::StackStatus;
use batchfold_core::domain::stack::{StackResource, StackSummary};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Trait for reading deployed stacks and their resources
#[async_trait]
pub trait StackApi: Send + Sync {
    /// Lists every stack in one of the given statuses
    async fn list_stacks(&self, statuses: &[&str]) -> Result<Vec<StackSummary>>;

    /// Lists every resource declared by a stack
    async fn list_stack_resources(&self, stack_name: &str) -> Result<Vec<StackResource>>;
}

/// CloudFormation implementation of StackApi
#[derive(Debug, Clone)]
pub struct AwsStacks {
    client: Client,
}

impl AwsStacks {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StackApi for AwsStacks {
    async fn list_stacks(&self, statuses: &[&str]) -> Result<Vec<StackSummary>> {
        let mut summaries = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut call = self.client.list_stacks().set_next_token(next_token.take());
            for status in statuses {
                call = call.stack_status_filter(StackStatus::from(*status));
            }

            let output = call
                .send()
                .await
                .map_err(|e| ClientError::service("cloudformation", e))?;

            for stack in output.stack_summaries() {
                summaries.push(StackSummary {
                    stack_id: stack.stack_id().map(str::to_string),
                    stack_name: stack.stack_name().to_string(),
                    status: stack.stack_status().as_str().to_string(),
                    template_description: stack.template_description().map(str::to_string),
                });
            }

            match output.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!("Listed {} stack(s)", summaries.len());
        Ok(summaries)
    }

    async fn list_stack_resources(&self, stack_name: &str) -> Result<Vec<StackResource>> {
        let mut resources = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_stack_resources()
                .stack_name(stack_name)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| ClientError::service("cloudformation", e))?;

            for resource in output.stack_resource_summaries() {
                resources.push(StackResource {
                    logical_id: resource.logical_resource_id().to_string(),
                    physical_id: resource.physical_resource_id().map(str::to_string),
                });
            }

            match output.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!("Stack {} declares {} resource(s)", stack_name, resources.len());
        Ok(resources)
    }
}
