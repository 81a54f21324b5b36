//! Database download job parameters

use serde::{Deserialize, Serialize};

use super::submit::{ContainerOverrides, ResourceSizing, SubmitJobRequest};
use crate::domain::resources::BatchResources;

/// Parameters of a reference-database download job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadJobParams {
    pub job_name: String,
    /// Download script inside the container
    pub script: String,
    pub download_dir: String,
    /// `reduced_db` or `full_db`
    pub download_mode: String,
    pub vcpus: u32,
    pub memory_gb: u32,
}

impl Default for DownloadJobParams {
    fn default() -> Self {
        Self {
            job_name: "download_job".to_string(),
            script: "scripts/download_all_data.sh".to_string(),
            download_dir: "/fsx".to_string(),
            download_mode: "reduced_db".to_string(),
            vcpus: 4,
            memory_gb: 16,
        }
    }
}

impl DownloadJobParams {
    /// Positional container command: script, download dir, mode
    pub fn command(&self) -> Vec<String> {
        vec![
            self.script.clone(),
            self.download_dir.clone(),
            self.download_mode.clone(),
        ]
    }

    /// Always targets the download pool, never requests a GPU
    pub fn into_request(self, resources: &BatchResources) -> SubmitJobRequest {
        let sizing = ResourceSizing {
            vcpus: self.vcpus,
            memory_gb: self.memory_gb,
            gpus: 0,
        };
        let overrides = ContainerOverrides {
            command: self.command(),
            resource_requirements: sizing.requirements(),
        };
        SubmitJobRequest::new(self.job_name, resources.download(), overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let resources = BatchResources {
            gpu_job_definition: "gpu-def".to_string(),
            gpu_job_queue: "gpu-queue".to_string(),
            cpu_job_definition: "cpu-def".to_string(),
            cpu_job_queue: "cpu-queue".to_string(),
            download_job_definition: "dl-def".to_string(),
            download_job_queue: "dl-queue".to_string(),
        };

        let request = DownloadJobParams::default().into_request(&resources);
        assert_eq!(request.job_name, "download_job");
        assert_eq!(request.job_definition, "dl-def");
        assert_eq!(request.job_queue, "dl-queue");
        assert!(request.depends_on.is_none());

        let json = serde_json::to_value(&request.container_overrides).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "command": ["scripts/download_all_data.sh", "/fsx", "reduced_db"],
                "resourceRequirements": [
                    {"value": "4", "type": "VCPU"},
                    {"value": "16000", "type": "MEMORY"}
                ]
            })
        );
    }
}
