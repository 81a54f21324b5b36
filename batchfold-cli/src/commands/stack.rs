//! Stack command handlers

use anyhow::Result;
use batchfold_client::FoldClient;
use batchfold_core::domain::stack::StackSummary;
use clap::Subcommand;
use colored::*;

use super::connect;
use crate::config::Config;

/// Stack subcommands
#[derive(Subcommand)]
pub enum StackCommands {
    /// List deployed fold stacks
    List,
    /// Show the batch resources of the configured or first fold stack
    Resources,
}

pub async fn handle_stack_command(command: StackCommands, config: &Config) -> Result<()> {
    let client = connect(config).await;

    match command {
        StackCommands::List => list_stacks(&client).await,
        StackCommands::Resources => show_resources(&client, config.stack_name()).await,
    }
}

async fn list_stacks(client: &FoldClient) -> Result<()> {
    let stacks = client.list_fold_stacks().await?;

    if stacks.is_empty() {
        println!("{}", "No fold stacks found.".yellow());
    } else {
        println!("{}", format!("Found {} fold stack(s):", stacks.len()).bold());
        println!();
        for stack in stacks {
            print_stack_summary(&stack);
        }
    }

    Ok(())
}

async fn show_resources(client: &FoldClient, stack_name: Option<&str>) -> Result<()> {
    let stack_name = client.resolve_stack_name(stack_name).await?;
    let resources = client.get_batch_resources(&stack_name).await?;

    println!("{}", format!("Batch resources of {}:", stack_name).bold());
    println!();
    for (label, target) in [
        ("GPU fold", resources.gpu()),
        ("CPU fold", resources.cpu()),
        ("Download", resources.download()),
    ] {
        println!("  {} {}", "▸".cyan(), label.bold());
        println!("    Definition:   {}", target.job_definition);
        println!("    Queue:        {}", target.job_queue);
    }

    Ok(())
}

fn print_stack_summary(stack: &StackSummary) {
    println!("  {} {}", "▸".cyan(), stack.stack_name.bold());
    println!("    Status:       {}", stack.status.green());
    if let Some(id) = &stack.stack_id {
        println!("    ID:           {}", id.dimmed());
    }
    println!();
}
