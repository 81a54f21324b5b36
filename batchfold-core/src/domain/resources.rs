//! Batch resources deployed by a fold stack

use serde::{Deserialize, Serialize};

use super::stack::StackResource;
use crate::error::{CoreError, Result};

/// Logical identifiers of the six batch resources a fold stack declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalResource {
    GpuJobDefinition,
    GpuJobQueue,
    CpuJobDefinition,
    CpuJobQueue,
    DownloadJobDefinition,
    DownloadJobQueue,
}

impl LogicalResource {
    pub const ALL: [LogicalResource; 6] = [
        LogicalResource::GpuJobDefinition,
        LogicalResource::GpuJobQueue,
        LogicalResource::CpuJobDefinition,
        LogicalResource::CpuJobQueue,
        LogicalResource::DownloadJobDefinition,
        LogicalResource::DownloadJobQueue,
    ];

    /// Logical resource id used in the stack template
    pub fn logical_id(self) -> &'static str {
        match self {
            LogicalResource::GpuJobDefinition => "GPUFoldingJobDefinition",
            LogicalResource::GpuJobQueue => "PrivateGPUJobQueue",
            LogicalResource::CpuJobDefinition => "CPUFoldingJobDefinition",
            LogicalResource::CpuJobQueue => "PrivateCPUJobQueue",
            LogicalResource::DownloadJobDefinition => "CPUDownloadJobDefinition",
            LogicalResource::DownloadJobQueue => "PublicCPUJobQueue",
        }
    }
}

/// A job definition together with the queue it is submitted to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeTarget {
    pub job_definition: String,
    pub job_queue: String,
}

/// Physical identifiers of a stack's batch resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResources {
    pub gpu_job_definition: String,
    pub gpu_job_queue: String,
    pub cpu_job_definition: String,
    pub cpu_job_queue: String,
    pub download_job_definition: String,
    pub download_job_queue: String,
}

impl BatchResources {
    /// Picks the six resources out of a stack's resource summaries.
    ///
    /// If a logical id appears more than once the last match wins. A logical
    /// id with no match, or with no physical id yet, is an error.
    pub fn from_resources(resources: &[StackResource]) -> Result<Self> {
        let find = |wanted: LogicalResource| -> Result<String> {
            resources
                .iter()
                .rev()
                .find(|r| r.logical_id == wanted.logical_id())
                .and_then(|r| r.physical_id.clone())
                .ok_or_else(|| CoreError::MissingResource(wanted.logical_id().to_string()))
        };

        Ok(Self {
            gpu_job_definition: find(LogicalResource::GpuJobDefinition)?,
            gpu_job_queue: find(LogicalResource::GpuJobQueue)?,
            cpu_job_definition: find(LogicalResource::CpuJobDefinition)?,
            cpu_job_queue: find(LogicalResource::CpuJobQueue)?,
            download_job_definition: find(LogicalResource::DownloadJobDefinition)?,
            download_job_queue: find(LogicalResource::DownloadJobQueue)?,
        })
    }

    pub fn gpu(&self) -> ComputeTarget {
        ComputeTarget {
            job_definition: self.gpu_job_definition.clone(),
            job_queue: self.gpu_job_queue.clone(),
        }
    }

    pub fn cpu(&self) -> ComputeTarget {
        ComputeTarget {
            job_definition: self.cpu_job_definition.clone(),
            job_queue: self.cpu_job_queue.clone(),
        }
    }

    pub fn download(&self) -> ComputeTarget {
        ComputeTarget {
            job_definition: self.download_job_definition.clone(),
            job_queue: self.download_job_queue.clone(),
        }
    }
}
