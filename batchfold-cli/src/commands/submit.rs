//! Job submission
//!
//! Fold and database download jobs, with a dry-run mode that prints the
//! request instead of sending it.

use anyhow::Result;
use batchfold_client::FoldClient;
use batchfold_core::dto::download::DownloadJobParams;
use batchfold_core::dto::fold::{DbPreset, FoldJobParams, ModelPreset};
use batchfold_core::dto::submit::SubmitJobRequest;
use batchfold_core::naming::create_job_name;
use clap::{Args, Subcommand};
use colored::*;

use super::connect;
use crate::config::Config;

/// Submit subcommands
#[derive(Subcommand)]
pub enum SubmitCommands {
    /// Submit a fold job
    Fold(FoldArgs),
    /// Submit a database download job
    Download(DownloadArgs),
}

#[derive(Args)]
pub struct FoldArgs {
    /// Key of the uploaded FASTA file within the bucket
    #[arg(long)]
    fasta: String,

    /// Job name; a fresh timestamped name when unset
    #[arg(long)]
    job_name: Option<String>,

    #[arg(long, default_value_t = DbPreset::default())]
    db_preset: DbPreset,

    #[arg(long, default_value_t = ModelPreset::default())]
    model_preset: ModelPreset,

    /// Latest template release date (YYYY-MM-DD); today when unset
    #[arg(long)]
    max_template_date: Option<String>,

    /// Prokaryote flags for multimer chains, e.g. "true,false"
    #[arg(long)]
    is_prokaryote_list: Option<String>,

    /// Precomputed features to reuse
    #[arg(long)]
    features_paths: Option<String>,

    #[arg(long)]
    benchmark: bool,

    #[arg(long)]
    use_precomputed_msas: bool,

    /// Stop after feature generation
    #[arg(long)]
    run_features_only: bool,

    #[arg(long)]
    vcpus: Option<u32>,

    #[arg(long)]
    memory_gb: Option<u32>,

    /// GPUs to request; zero routes the job to the CPU queue
    #[arg(long)]
    gpus: Option<u32>,

    /// Job that must finish first
    #[arg(long)]
    depends_on: Option<String>,

    /// Print the request without submitting it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
pub struct DownloadArgs {
    #[arg(long)]
    job_name: Option<String>,

    /// reduced_db or full_db
    #[arg(long)]
    download_mode: Option<String>,

    #[arg(long)]
    download_dir: Option<String>,

    #[arg(long)]
    vcpus: Option<u32>,

    #[arg(long)]
    memory_gb: Option<u32>,

    /// Print the request without submitting it
    #[arg(long)]
    dry_run: bool,
}

pub async fn handle_submit_command(command: SubmitCommands, config: &Config) -> Result<()> {
    let client = connect(config).await;

    match command {
        SubmitCommands::Fold(args) => {
            let dry_run = args.dry_run;
            let params = fold_params(args, config.require_bucket()?);
            let request = client.prepare_fold_job(params, config.stack_name()).await?;
            submit_or_print(&client, &request, dry_run).await
        }
        SubmitCommands::Download(args) => {
            let dry_run = args.dry_run;
            let request = client
                .prepare_download_job(download_params(args), config.stack_name())
                .await?;
            submit_or_print(&client, &request, dry_run).await
        }
    }
}

fn fold_params(args: FoldArgs, bucket: &str) -> FoldJobParams {
    let job_name = args.job_name.unwrap_or_else(|| create_job_name(None));
    let mut params = FoldJobParams::new(job_name, args.fasta, bucket);

    params.db_preset = args.db_preset;
    params.model_preset = args.model_preset;
    if let Some(date) = args.max_template_date {
        params.max_template_date = date;
    }
    params.is_prokaryote_list = args.is_prokaryote_list;
    params.features_paths = args.features_paths;
    params.benchmark = args.benchmark;
    params.use_precomputed_msas = args.use_precomputed_msas;
    params.run_features_only = args.run_features_only;
    if let Some(vcpus) = args.vcpus {
        params.sizing.vcpus = vcpus;
    }
    if let Some(memory_gb) = args.memory_gb {
        params.sizing.memory_gb = memory_gb;
    }
    if let Some(gpus) = args.gpus {
        params.sizing.gpus = gpus;
    }
    params.depends_on = args.depends_on;
    params
}

fn download_params(args: DownloadArgs) -> DownloadJobParams {
    let mut params = DownloadJobParams::default();
    if let Some(job_name) = args.job_name {
        params.job_name = job_name;
    }
    if let Some(mode) = args.download_mode {
        params.download_mode = mode;
    }
    if let Some(dir) = args.download_dir {
        params.download_dir = dir;
    }
    if let Some(vcpus) = args.vcpus {
        params.vcpus = vcpus;
    }
    if let Some(memory_gb) = args.memory_gb {
        params.memory_gb = memory_gb;
    }
    params
}

async fn submit_or_print(client: &FoldClient, request: &SubmitJobRequest, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("{}", serde_json::to_string_pretty(request)?);
        return Ok(());
    }

    let response = client.submit(request).await?;
    println!(
        "{} {} ({})",
        "✓ Submitted".green(),
        response.job_name.bold(),
        response.job_id
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: SubmitCommands,
    }

    fn parse(args: &[&str]) -> SubmitCommands {
        TestCli::try_parse_from(std::iter::once("submit").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_fold_args_override_defaults() {
        let SubmitCommands::Fold(args) = parse(&[
            "fold",
            "--fasta",
            "job1/job1.fasta",
            "--job-name",
            "job1",
            "--model-preset",
            "multimer",
            "--gpus",
            "0",
            "--memory-gb",
            "32",
            "--depends-on",
            "abc",
        ]) else {
            panic!("expected fold");
        };

        let params = fold_params(args, "bucket");
        assert_eq!(params.job_name, "job1");
        assert_eq!(params.fasta_paths, "job1/job1.fasta");
        assert_eq!(params.s3_bucket, "bucket");
        assert_eq!(params.model_preset, ModelPreset::Multimer);
        assert_eq!(params.db_preset, DbPreset::ReducedDbs);
        assert_eq!(params.sizing.gpus, 0);
        assert_eq!(params.sizing.memory_gb, 32);
        assert_eq!(params.sizing.vcpus, 4);
        assert_eq!(params.depends_on.as_deref(), Some("abc"));
    }

    #[test]
    fn test_fold_rejects_unknown_preset() {
        let result = TestCli::try_parse_from([
            "submit",
            "fold",
            "--fasta",
            "k",
            "--db-preset",
            "tiny_dbs",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_download_defaults() {
        let SubmitCommands::Download(args) = parse(&["download", "--download-mode", "full_db"]) else {
            panic!("expected download");
        };

        let params = download_params(args);
        assert_eq!(params.job_name, "download_job");
        assert_eq!(params.download_mode, "full_db");
        assert_eq!(params.download_dir, "/fsx");
    }
}
