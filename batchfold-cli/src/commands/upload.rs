//! Sequence upload

use anyhow::Result;
use clap::Args;
use colored::*;

use super::connect;
use crate::config::Config;

#[derive(Args)]
pub struct UploadArgs {
    /// Amino acid sequence; repeat for multimers
    #[arg(long = "sequence", required = true)]
    sequences: Vec<String>,

    /// Record identifier, one per sequence
    #[arg(long = "id", required = true)]
    ids: Vec<String>,

    /// Key namespace; a random UUID when unset
    #[arg(long)]
    job_name: Option<String>,
}

pub async fn handle_upload(args: UploadArgs, config: &Config) -> Result<()> {
    let bucket = config.require_bucket()?;
    let client = connect(config).await;

    let key = client
        .upload_fasta(&args.sequences, &args.ids, bucket, args.job_name.as_deref())
        .await?;

    println!("{} s3://{}/{}", "✓ Uploaded".green(), bucket, key);

    Ok(())
}
