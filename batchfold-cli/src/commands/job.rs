//! Job command handlers
//!
//! Job naming, job descriptions and container logs.

use anyhow::{Result, anyhow};
use batchfold_client::FoldClient;
use batchfold_core::domain::job::{JobInfo, JobStatus};
use batchfold_core::domain::log::{JobLogs, LogRecord};
use batchfold_core::naming::create_job_name;
use clap::Subcommand;
use colored::*;

use super::connect;
use crate::config::Config;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Print a fresh timestamped job name
    Name {
        /// Suffix appended after sanitizing
        suffix: Option<String>,
    },
    /// Get job details
    Info {
        /// Batch job id
        id: String,

        /// Print the raw projection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get job logs
    Logs {
        /// Batch job id, or a log stream name with --stream
        id: String,

        /// Treat the argument as a log stream name
        #[arg(long)]
        stream: bool,
    },
}

pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    match command {
        JobCommands::Name { suffix } => {
            println!("{}", create_job_name(suffix.as_deref()));
            Ok(())
        }
        JobCommands::Info { id, json } => get_job(&connect(config).await, &id, json).await,
        JobCommands::Logs { id, stream } => get_job_logs(&connect(config).await, &id, stream).await,
    }
}

async fn get_job(client: &FoldClient, id: &str, json: bool) -> Result<()> {
    let info = client.get_job_info(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print_job_details(&info);
    }

    Ok(())
}

async fn get_job_logs(client: &FoldClient, id: &str, is_stream: bool) -> Result<()> {
    let stream = if is_stream {
        id.to_string()
    } else {
        client
            .get_job_info(id)
            .await?
            .log_stream_name
            .ok_or_else(|| anyhow!("Job {} has no log stream yet", id))?
    };

    match client.get_job_logs(&stream).await? {
        JobLogs::Pending(message) => println!("{}", message.yellow()),
        JobLogs::Records(records) if records.is_empty() => {
            println!("{}", "No log events in this stream.".yellow());
        }
        JobLogs::Records(records) => {
            println!("{}", format!("Logs for stream {}:", stream).bold());
            println!("{}", "─".repeat(80).dimmed());
            for record in records {
                print_log_record(&record);
            }
            println!("{}", "─".repeat(80).dimmed());
        }
    }

    Ok(())
}

fn print_job_details(info: &JobInfo) {
    println!("{}", "Job Details".bold().underline());
    println!();
    println!("  {}         {}", "Name:".bold(), info.job_name);
    println!("  {}           {}", "ID:".bold(), info.job_id);
    if let Some(arn) = &info.job_arn {
        println!("  {}          {}", "ARN:".bold(), arn.dimmed());
    }
    println!("  {}       {}", "Status:".bold(), colorize_status(&info.status));
    if let Some(created) = &info.created_at {
        println!("  {}      {}", "Created:".bold(), created);
    }
    if !info.depends_on.is_empty() {
        let ids: Vec<&str> = info.depends_on.iter().map(|d| d.job_id.as_str()).collect();
        println!("  {}   {}", "Depends on:".bold(), ids.join(", "));
    }
    for (key, value) in &info.tags {
        println!("  {}          {}={}", "Tag:".bold(), key, value);
    }
    if let Some(stream) = &info.log_stream_name {
        println!("  {}   {}", "Log stream:".bold(), stream);
    }
}

fn print_log_record(record: &LogRecord) {
    let timestamp = record
        .timestamp
        .map(|t| t.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| "-".repeat(23));
    println!("{} {}", timestamp.dimmed(), record.message);
}

/// Colorize job status for display
fn colorize_status(status: &JobStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        JobStatus::Succeeded => status_str.green(),
        JobStatus::Failed => status_str.red(),
        JobStatus::Running | JobStatus::Starting => status_str.cyan(),
        JobStatus::Submitted | JobStatus::Pending | JobStatus::Runnable => status_str.yellow(),
        JobStatus::Other(_) => status_str.normal(),
    }
}
