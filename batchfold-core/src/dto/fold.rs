//! Fold job parameters
//!
//! Every flag the fold container understands, with defaults pointing at the
//! database mount paths baked into the stack's job definitions.

use std::fmt;
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::submit::{ContainerOverrides, ResourceSizing, SubmitJobRequest};
use crate::domain::resources::{BatchResources, ComputeTarget};

/// Genetic database configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DbPreset {
    #[default]
    ReducedDbs,
    FullDbs,
}

impl fmt::Display for DbPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbPreset::ReducedDbs => f.write_str("reduced_dbs"),
            DbPreset::FullDbs => f.write_str("full_dbs"),
        }
    }
}

impl FromStr for DbPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reduced_dbs" => Ok(DbPreset::ReducedDbs),
            "full_dbs" => Ok(DbPreset::FullDbs),
            other => Err(format!(
                "unknown db preset '{}', expected reduced_dbs or full_dbs",
                other
            )),
        }
    }
}

/// Model configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelPreset {
    #[default]
    Monomer,
    MonomerCasp14,
    MonomerPtm,
    Multimer,
}

impl fmt::Display for ModelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelPreset::Monomer => "monomer",
            ModelPreset::MonomerCasp14 => "monomer_casp14",
            ModelPreset::MonomerPtm => "monomer_ptm",
            ModelPreset::Multimer => "multimer",
        };
        f.write_str(s)
    }
}

impl FromStr for ModelPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monomer" => Ok(ModelPreset::Monomer),
            "monomer_casp14" => Ok(ModelPreset::MonomerCasp14),
            "monomer_ptm" => Ok(ModelPreset::MonomerPtm),
            "multimer" => Ok(ModelPreset::Multimer),
            other => Err(format!("unknown model preset '{}'", other)),
        }
    }
}

/// Parameters of a fold job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldJobParams {
    pub job_name: String,
    /// Object key(s) of the input FASTA file(s)
    pub fasta_paths: String,
    pub s3_bucket: String,
    pub is_prokaryote_list: Option<String>,
    pub data_dir: String,
    pub output_dir: String,
    pub uniref90_database_path: String,
    pub mgnify_database_path: String,
    pub small_bfd_database_path: String,
    pub pdb70_database_path: String,
    pub template_mmcif_dir: String,
    /// `YYYY-MM-DD`; defaults to today at construction time
    pub max_template_date: String,
    pub obsolete_pdbs_path: String,
    pub db_preset: DbPreset,
    pub model_preset: ModelPreset,
    pub benchmark: bool,
    pub use_precomputed_msas: bool,
    pub features_paths: Option<String>,
    pub run_features_only: bool,
    pub logtostderr: bool,
    pub sizing: ResourceSizing,
    /// Job that must succeed before this one starts
    pub depends_on: Option<String>,
}

impl FoldJobParams {
    pub fn new(
        job_name: impl Into<String>,
        fasta_paths: impl Into<String>,
        s3_bucket: impl Into<String>,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            fasta_paths: fasta_paths.into(),
            s3_bucket: s3_bucket.into(),
            is_prokaryote_list: None,
            data_dir: "/mnt/data_dir/fsx".to_string(),
            output_dir: "alphafold".to_string(),
            uniref90_database_path: "/mnt/uniref90_database_path/uniref90.fasta".to_string(),
            mgnify_database_path: "/mnt/mgnify_database_path/mgy_clusters_2018_12.fa".to_string(),
            small_bfd_database_path:
                "/mnt/small_bfd_database_path/bfd-first_non_consensus_sequences.fasta".to_string(),
            pdb70_database_path: "/mnt/pdb70_database_path/pdb70".to_string(),
            template_mmcif_dir: "/mnt/template_mmcif_dir/mmcif_files".to_string(),
            max_template_date: Local::now().format("%Y-%m-%d").to_string(),
            obsolete_pdbs_path: "/mnt/obsolete_pdbs_path/obsolete.dat".to_string(),
            db_preset: DbPreset::default(),
            model_preset: ModelPreset::default(),
            benchmark: false,
            use_precomputed_msas: false,
            features_paths: None,
            run_features_only: false,
            logtostderr: true,
            sizing: ResourceSizing {
                vcpus: 4,
                memory_gb: 16,
                gpus: 1,
            },
            depends_on: None,
        }
    }

    /// Container command: `--key=value` tokens, then bare flags that are set
    pub fn command(&self) -> Vec<String> {
        let mut command = vec![
            format!("--fasta_paths={}", self.fasta_paths),
            format!("--uniref90_database_path={}", self.uniref90_database_path),
            format!("--mgnify_database_path={}", self.mgnify_database_path),
            format!("--pdb70_database_path={}", self.pdb70_database_path),
            format!("--small_bfd_database_path={}", self.small_bfd_database_path),
            format!("--data_dir={}", self.data_dir),
            format!("--template_mmcif_dir={}", self.template_mmcif_dir),
            format!("--obsolete_pdbs_path={}", self.obsolete_pdbs_path),
            format!("--output_dir={}", self.output_dir),
            format!("--max_template_date={}", self.max_template_date),
            format!("--db_preset={}", self.db_preset),
            format!("--model_preset={}", self.model_preset),
            format!("--s3_bucket={}", self.s3_bucket),
        ];

        if let Some(list) = &self.is_prokaryote_list {
            command.push(format!("--is_prokaryote_list={}", list));
        }
        if self.benchmark {
            command.push("--benchmark".to_string());
        }
        if self.use_precomputed_msas {
            command.push("--use_precomputed_msas".to_string());
        }
        if let Some(paths) = &self.features_paths {
            command.push(format!("--features_paths={}", paths));
        }
        if self.run_features_only {
            command.push("--run_features_only".to_string());
        }
        if self.logtostderr {
            command.push("--logtostderr".to_string());
        }

        command
    }

    /// GPU pool when any GPU is requested, CPU pool otherwise
    pub fn target(&self, resources: &BatchResources) -> ComputeTarget {
        if self.sizing.gpus > 0 {
            resources.gpu()
        } else {
            resources.cpu()
        }
    }

    pub fn into_request(self, resources: &BatchResources) -> SubmitJobRequest {
        let target = self.target(resources);
        let overrides = ContainerOverrides {
            command: self.command(),
            resource_requirements: self.sizing.requirements(),
        };
        SubmitJobRequest::new(self.job_name, target, overrides).with_predecessor(self.depends_on)
    }
}
