//! Batchfold CLI
//!
//! Command-line interface for running structure predictions on AWS Batch:
//! stack discovery, sequence upload, job submission and inspection, and
//! plots of the alignments and predicted structures a job produces.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "batchfold")]
#[command(about = "Structure prediction jobs on AWS Batch", long_about = None)]
struct Cli {
    /// AWS region; the default provider chain decides when unset
    #[arg(long, global = true, env = "BATCHFOLD_REGION")]
    region: Option<String>,

    /// Named AWS profile
    #[arg(long, global = true, env = "BATCHFOLD_PROFILE")]
    profile: Option<String>,

    /// Stack to use; the first deployed fold stack when unset
    #[arg(long, global = true, env = "BATCHFOLD_STACK")]
    stack: Option<String>,

    /// Bucket holding job inputs and outputs
    #[arg(long, global = true, env = "BATCHFOLD_BUCKET")]
    bucket: Option<String>,

    /// Local directory for downloaded results and rendered plots
    #[arg(long, global = true, env = "BATCHFOLD_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "batchfold=info,batchfold_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        region: cli.region,
        profile: cli.profile,
        stack_name: cli.stack,
        bucket: cli.bucket,
        data_dir: cli.data_dir,
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
