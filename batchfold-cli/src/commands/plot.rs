//! Plot command handlers
//!
//! Downloads the results of a finished fold job into the data directory and
//! renders them next to the downloaded files.

use std::path::PathBuf;

use anyhow::Result;
use batchfold_client::{DownloadedAlignments, FoldClient};
use batchfold_core::msa::{
    Alignment, CoverageProfile, MsaInfo, dedupe_sequences, distinct_rows, encode_msa_info,
};
use batchfold_render::{
    ColorScheme, ViewOptions, plot_coverage, plot_msa_info, plot_plddt_legend,
    write_structure_view,
};
use clap::{Args, Subcommand};
use colored::*;
use tracing::info;

use super::connect;
use crate::config::Config;

/// Plot subcommands
#[derive(Subcommand)]
pub enum PlotCommands {
    /// Per-position non-gap counts over the job's alignments
    Msa {
        /// Fold job name
        job_name: String,

        /// Output SVG; `<data-dir>/msa_coverage.svg` when unset
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Alignment rows colored by identity to the query
    MsaInfo {
        /// Fold job name
        job_name: String,

        /// Output SVG; `<data-dir>/msa_info.svg` when unset
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Interactive 3D view of the top-ranked structure
    Structure(StructureArgs),
}

#[derive(Args)]
pub struct StructureArgs {
    /// Fold job name
    job_name: String,

    /// lDDT, chain or rainbow
    #[arg(long, default_value_t = ColorScheme::Lddt)]
    color: ColorScheme,

    #[arg(long)]
    show_sidechains: bool,

    #[arg(long)]
    show_mainchains: bool,

    /// Color hydrophobic side chains
    #[arg(long)]
    color_hp: bool,

    /// Residues per chain, for multimers
    #[arg(long, value_delimiter = ',')]
    chain_lengths: Option<Vec<usize>>,

    /// Number of chains to color
    #[arg(long)]
    chains: Option<usize>,

    #[arg(long, default_value_t = 0.5)]
    vmin: f64,

    #[arg(long, default_value_t = 0.9)]
    vmax: f64,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Output HTML; `<data-dir>/<job>.html` when unset
    #[arg(long)]
    output: Option<PathBuf>,
}

impl StructureArgs {
    fn view_options(&self) -> ViewOptions {
        ViewOptions {
            show_sidechains: self.show_sidechains,
            show_mainchains: self.show_mainchains,
            color: self.color,
            chains: self.chains,
            chain_lengths: self.chain_lengths.clone(),
            vmin: self.vmin,
            vmax: self.vmax,
            color_hp: self.color_hp,
            size: (self.width, self.height),
        }
    }
}

pub async fn handle_plot_command(command: PlotCommands, config: &Config) -> Result<()> {
    let bucket = config.require_bucket()?;
    let client = connect(config).await;

    match command {
        PlotCommands::Msa { job_name, output } => {
            let output = output.unwrap_or_else(|| config.data_dir.join("msa_coverage.svg"));
            plot_msa(&client, bucket, &job_name, config, output).await
        }
        PlotCommands::MsaInfo { job_name, output } => {
            let output = output.unwrap_or_else(|| config.data_dir.join("msa_info.svg"));
            plot_msa_identity(&client, bucket, &job_name, config, output).await
        }
        PlotCommands::Structure(args) => plot_structure(&client, bucket, args, config).await,
    }
}

async fn fetch(
    client: &FoldClient,
    bucket: &str,
    job_name: &str,
    config: &Config,
) -> Result<DownloadedAlignments> {
    let downloaded = client
        .fetch_alignments(bucket, job_name, &config.data_dir)
        .await?;
    for path in &downloaded.paths {
        info!("Downloaded {}", path.display());
    }
    Ok(downloaded)
}

async fn plot_msa(
    client: &FoldClient,
    bucket: &str,
    job_name: &str,
    config: &Config,
    output: PathBuf,
) -> Result<()> {
    let downloaded = fetch(client, bucket, job_name, config).await?;
    let profile = CoverageProfile::from_alignments(&downloaded.alignments)?;

    println!(
        "{}",
        format!("{} Sequences Found in Total", profile.total_sequences).bold()
    );
    plot_coverage(&output, &profile)?;
    println!("{} {}", "✓ Wrote".green(), output.display());

    Ok(())
}

async fn plot_msa_identity(
    client: &FoldClient,
    bucket: &str,
    job_name: &str,
    config: &Config,
    output: PathBuf,
) -> Result<()> {
    let downloaded = fetch(client, bucket, job_name, config).await?;
    let (total, info) = summarize_identity(&downloaded.alignments);

    println!("{}", format!("{} Sequences Found in Total", total).bold());
    let Some(info) = info else {
        println!("{}", "Unable to display MSA of length 1".yellow());
        return Ok(());
    };

    plot_msa_info(&output, &info)?;
    println!("{} {}", "✓ Wrote".green(), output.display());

    Ok(())
}

/// Distinct row count and, when there are at least two rows, the heatmap data
fn summarize_identity(alignments: &[Alignment]) -> (usize, Option<MsaInfo>) {
    let matrix: Vec<Vec<u8>> = dedupe_sequences(alignments)
        .iter()
        .map(|s| encode_msa_info(s))
        .collect();
    (distinct_rows(&matrix).len(), MsaInfo::from_matrix(&matrix))
}

async fn plot_structure(
    client: &FoldClient,
    bucket: &str,
    args: StructureArgs,
    config: &Config,
) -> Result<()> {
    let (path, pdb) = client
        .fetch_structure(bucket, &args.job_name, &config.data_dir)
        .await?;
    info!("Downloaded {}", path.display());

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.data_dir.join(format!("{}.html", args.job_name)));
    write_structure_view(&output, &pdb, &args.view_options())?;
    println!("{} {}", "✓ Wrote".green(), output.display());

    if args.color == ColorScheme::Lddt {
        let legend = output.with_extension("legend.svg");
        plot_plddt_legend(&legend)?;
        println!("{} {}", "✓ Wrote".green(), legend.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: PlotCommands,
    }

    #[test]
    fn test_structure_args_to_view_options() {
        let cli = TestCli::try_parse_from([
            "plot",
            "structure",
            "job1",
            "--color",
            "chain",
            "--chain-lengths",
            "120,80",
            "--show-sidechains",
        ])
        .unwrap();
        let PlotCommands::Structure(args) = cli.command else {
            panic!("expected structure");
        };

        let options = args.view_options();
        assert_eq!(options.color, ColorScheme::Chain);
        assert_eq!(options.chain_lengths, Some(vec![120, 80]));
        assert_eq!(options.chain_count(), 2);
        assert!(options.show_sidechains);
        assert_eq!(options.size, (800, 480));
        assert_eq!(options.vmin, 0.5);
    }

    #[test]
    fn test_summarize_identity_counts_single_row() {
        let alignment = Alignment::parse_stockholm("query MKV\nhit MKV\n").unwrap();
        let (total, info) = summarize_identity(&[alignment]);
        assert_eq!(total, 1);
        assert!(info.is_none());

        let alignment = Alignment::parse_stockholm("query MKV\nhit M-V\n").unwrap();
        let (total, info) = summarize_identity(&[alignment]);
        assert_eq!(total, 2);
        assert_eq!(info.map(|i| i.rows.len()), Some(2));
    }

    #[test]
    fn test_structure_rejects_unknown_color() {
        let result = TestCli::try_parse_from(["plot", "structure", "job1", "--color", "plasma"]);
        assert!(result.is_err());
    }
}
