//! Stack discovery and batch resource lookup

use batchfold_core::domain::resources::BatchResources;
use batchfold_core::domain::stack::{DEPLOYED_STACK_STATUSES, StackSummary};
use tracing::debug;

use crate::FoldClient;
use crate::error::{ClientError, Result};

impl FoldClient {
    /// List deployed stacks created from the fold template
    ///
    /// # Returns
    /// Every matching stack, in the order the service listed them
    pub async fn list_fold_stacks(&self) -> Result<Vec<StackSummary>> {
        let stacks = self.stacks.list_stacks(&DEPLOYED_STACK_STATUSES).await?;

        Ok(stacks.into_iter().filter(StackSummary::is_fold_stack).collect())
    }

    /// Resolve the stack to submit against
    ///
    /// An explicit name is used as is; otherwise the first discovered fold
    /// stack is picked.
    pub async fn resolve_stack_name(&self, stack_name: Option<&str>) -> Result<String> {
        if let Some(name) = stack_name {
            return Ok(name.to_string());
        }

        let stack = self
            .list_fold_stacks()
            .await?
            .into_iter()
            .next()
            .ok_or(ClientError::NoFoldStack)?;
        debug!("Using discovered stack {}", stack.stack_name);

        Ok(stack.stack_name)
    }

    /// Get the batch resources deployed by a stack
    ///
    /// # Errors
    /// Fails with a `MissingResource` error naming the first absent
    /// logical resource.
    pub async fn get_batch_resources(&self, stack_name: &str) -> Result<BatchResources> {
        let resources = self.stacks.list_stack_resources(stack_name).await?;

        Ok(BatchResources::from_resources(&resources)?)
    }
}
