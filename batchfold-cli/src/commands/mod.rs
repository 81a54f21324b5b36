//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod plot;
mod stack;
mod submit;
mod upload;

pub use job::JobCommands;
pub use plot::PlotCommands;
pub use stack::StackCommands;
pub use submit::SubmitCommands;
pub use upload::UploadArgs;

use anyhow::Result;
use batchfold_client::FoldClient;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Deployed fold stacks and their batch resources
    Stack {
        #[command(subcommand)]
        command: StackCommands,
    },
    /// Job names, descriptions and logs
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Upload sequences as a FASTA file
    Upload(UploadArgs),
    /// Submit fold or database download jobs
    Submit {
        #[command(subcommand)]
        command: SubmitCommands,
    },
    /// Plot alignments and predicted structures of a finished job
    Plot {
        #[command(subcommand)]
        command: PlotCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Stack { command } => stack::handle_stack_command(command, config).await,
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Upload(args) => upload::handle_upload(args, config).await,
        Commands::Submit { command } => submit::handle_submit_command(command, config).await,
        Commands::Plot { command } => plot::handle_plot_command(command, config).await,
    }
}

/// Client for the configured region and profile
async fn connect(config: &Config) -> FoldClient {
    FoldClient::from_settings(&config.aws_settings()).await
}
