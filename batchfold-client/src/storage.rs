//! Sequence upload and result download

use std::io::Write;
use std::path::{Path, PathBuf};

use batchfold_core::fasta::{SequenceRecord, write_fasta};
use batchfold_core::msa::{ALIGNMENT_FILES, Alignment};
use batchfold_core::naming::fasta_object_key;
use tracing::{debug, info};
use uuid::Uuid;

use crate::FoldClient;
use crate::error::Result;

/// Predicted structure written by the fold job, best model first
pub const STRUCTURE_FILE: &str = "ranked_0.pdb";

/// Alignments downloaded for one job
#[derive(Debug, Clone)]
pub struct DownloadedAlignments {
    /// Local copies, in [`ALIGNMENT_FILES`] order
    pub paths: Vec<PathBuf>,
    /// Parsed alignments, same order
    pub alignments: Vec<Alignment>,
}

impl FoldClient {
    // =============================================================================
    // Upload
    // =============================================================================

    /// Serialize sequences to FASTA and upload them for a job
    ///
    /// # Arguments
    /// * `sequences` - Sequences, paired by position with `ids`
    /// * `ids` - FASTA record identifiers
    /// * `bucket` - Destination bucket
    /// * `job_name` - Key namespace; a fresh UUID when `None`
    ///
    /// # Returns
    /// The object key, `<job_name>/<job_name>.fasta`
    pub async fn upload_fasta(
        &self,
        sequences: &[String],
        ids: &[String],
        bucket: &str,
        job_name: Option<&str>,
    ) -> Result<String> {
        let records = SequenceRecord::pair(sequences, ids)?;
        let job_name = job_name
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        // Uniquely named, removed on drop
        let mut file = tempfile::Builder::new().suffix(".fasta").tempfile()?;
        write_fasta(&mut file, &records)?;
        file.flush()?;

        let key = fasta_object_key(&job_name);
        self.storage.upload_file(file.path(), bucket, &key).await?;
        info!("Sequence file uploaded to s3://{}/{}", bucket, key);

        Ok(key)
    }

    // =============================================================================
    // Download
    // =============================================================================

    /// Download the three alignment hit files of a job and parse them
    ///
    /// Files land in `data_dir` under their fixed names; the directory is
    /// created if absent.
    pub async fn fetch_alignments(
        &self,
        bucket: &str,
        job_name: &str,
        data_dir: &Path,
    ) -> Result<DownloadedAlignments> {
        tokio::fs::create_dir_all(data_dir).await?;

        let mut paths = Vec::with_capacity(ALIGNMENT_FILES.len());
        let mut alignments = Vec::with_capacity(ALIGNMENT_FILES.len());
        for file in ALIGNMENT_FILES {
            let key = format!("{}/msas/{}", job_name, file);
            let path = data_dir.join(file);
            debug!("Downloading s3://{}/{} to {}", bucket, key, path.display());
            self.storage.download_file(bucket, &key, &path).await?;

            let text = tokio::fs::read_to_string(&path).await?;
            alignments.push(Alignment::parse_stockholm(&text)?);
            paths.push(path);
        }

        Ok(DownloadedAlignments { paths, alignments })
    }

    /// Download the top-ranked predicted structure of a job
    ///
    /// # Returns
    /// The local path and the file contents
    pub async fn fetch_structure(
        &self,
        bucket: &str,
        job_name: &str,
        data_dir: &Path,
    ) -> Result<(PathBuf, String)> {
        tokio::fs::create_dir_all(data_dir).await?;

        let key = format!("{}/{}", job_name, STRUCTURE_FILE);
        let path = data_dir.join(STRUCTURE_FILE);
        info!("Downloading PDB file from s3://{}/{}", bucket, key);
        self.storage.download_file(bucket, &key, &path).await?;

        let text = tokio::fs::read_to_string(&path).await?;
        Ok((path, text))
    }
}
