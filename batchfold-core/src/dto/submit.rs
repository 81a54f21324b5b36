//! Job submission request and response

use serde::{Deserialize, Serialize};

use crate::domain::resources::ComputeTarget;

/// Kind of a container resource requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceType {
    Vcpu,
    Memory,
    Gpu,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Vcpu => "VCPU",
            ResourceType::Memory => "MEMORY",
            ResourceType::Gpu => "GPU",
        }
    }
}

/// A single container resource requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirement {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
}

impl ResourceRequirement {
    pub fn new(kind: ResourceType, value: impl ToString) -> Self {
        Self {
            value: value.to_string(),
            kind,
        }
    }
}

/// Compute sizing requested for a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSizing {
    pub vcpus: u32,
    /// Memory in GB; submitted as MB (`memory_gb * 1000`)
    pub memory_gb: u32,
    pub gpus: u32,
}

impl ResourceSizing {
    /// Memory in MB, widened so any GB value converts exactly
    pub fn memory_mb(&self) -> u64 {
        u64::from(self.memory_gb) * 1000
    }

    /// Requirement list: vCPU, memory, and a GPU entry only when `gpus > 0`
    pub fn requirements(&self) -> Vec<ResourceRequirement> {
        let mut requirements = vec![
            ResourceRequirement::new(ResourceType::Vcpu, self.vcpus),
            ResourceRequirement::new(ResourceType::Memory, self.memory_mb()),
        ];
        if self.gpus > 0 {
            requirements.push(ResourceRequirement::new(ResourceType::Gpu, self.gpus));
        }
        requirements
    }
}

/// Container command and resource overrides for a submitted job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerOverrides {
    pub command: Vec<String>,
    pub resource_requirements: Vec<ResourceRequirement>,
}

/// Dependency type between two jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DependencyType {
    /// The predecessor must complete successfully before this job starts
    Sequential,
    NToN,
}

impl DependencyType {
    pub fn as_str(self) -> &'static str {
        match self {
            DependencyType::Sequential => "SEQUENTIAL",
            DependencyType::NToN => "N_TO_N",
        }
    }
}

/// A dependency of one job on another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDependency {
    pub job_id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<DependencyType>,
}

impl JobDependency {
    pub fn sequential(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            kind: Some(DependencyType::Sequential),
        }
    }
}

/// A fully parameterized job submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitJobRequest {
    pub job_definition: String,
    pub job_name: String,
    pub job_queue: String,
    pub container_overrides: ContainerOverrides,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<JobDependency>>,
}

impl SubmitJobRequest {
    pub fn new(
        job_name: impl Into<String>,
        target: ComputeTarget,
        container_overrides: ContainerOverrides,
    ) -> Self {
        Self {
            job_definition: target.job_definition,
            job_name: job_name.into(),
            job_queue: target.job_queue,
            container_overrides,
            depends_on: None,
        }
    }

    /// Attaches a sequential dependency on `predecessor`, if any
    pub fn with_predecessor(mut self, predecessor: Option<String>) -> Self {
        self.depends_on = predecessor.map(|id| vec![JobDependency::sequential(id)]);
        self
    }
}

/// Batch service response to a submission, returned verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitJobResponse {
    pub job_arn: Option<String>,
    pub job_name: String,
    pub job_id: String,
}
