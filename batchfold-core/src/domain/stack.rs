//! Compute stack domain types

use serde::{Deserialize, Serialize};

/// Marker found in the template description of every fold deployment
pub const FOLD_STACK_MARKER: &str = "Alphafold on AWS Batch";

/// Stack statuses that count as fully deployed
pub const DEPLOYED_STACK_STATUSES: [&str; 2] = ["CREATE_COMPLETE", "UPDATE_COMPLETE"];

/// Summary of a deployed stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSummary {
    pub stack_id: Option<String>,
    pub stack_name: String,
    pub status: String,
    pub template_description: Option<String>,
}

impl StackSummary {
    /// Whether this stack was created from the fold deployment template
    pub fn is_fold_stack(&self) -> bool {
        self.template_description
            .as_deref()
            .is_some_and(|d| d.contains(FOLD_STACK_MARKER))
    }
}

/// One resource declared by a stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackResource {
    pub logical_id: String,
    pub physical_id: Option<String>,
}

impl StackResource {
    pub fn new(logical_id: impl Into<String>, physical_id: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            physical_id: Some(physical_id.into()),
        }
    }
}
