//! Alignment coverage line chart

use anyhow::Result;
use batchfold_core::msa::CoverageProfile;
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1200, 300);
const TITLE: &str = "Per-Residue Count of Non-Gap Amino Acids in the MSA for Sequence";

/// Draws the per-position non-gap count of the combined alignments as an SVG
pub fn plot_coverage(path: &Path, profile: &CoverageProfile) -> Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    if profile.total_sequences == 0 || profile.non_gap_counts.is_empty() {
        root.draw(&Text::new(
            "No alignment data",
            (SIZE.0 as i32 / 2, SIZE.1 as i32 / 2),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))?;
        root.present()?;
        return Ok(());
    }

    let width = profile.non_gap_counts.len() as i32;
    let total = profile.total_sequences as i32;
    let ticks: Vec<i32> = profile.ticks.iter().map(|&t| t as i32).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 18))
        .margin(15)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0..width, (0..total).with_key_points(ticks))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Non-Gap Count")
        .draw()?;

    chart.draw_series(LineSeries::new(
        profile
            .non_gap_counts
            .iter()
            .enumerate()
            .map(|(x, &count)| (x as i32, count as i32)),
        &BLACK,
    ))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchfold_core::msa::Alignment;

    #[test]
    fn test_plot_coverage_writes_svg() {
        let alignment = Alignment::parse_stockholm("q MKVL\nh1 MK--\nh2 -KVL\n").unwrap();
        let profile = CoverageProfile::from_alignments(&[alignment]).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coverage.svg");
        plot_coverage(&path, &profile).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Non-Gap Count"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_plot_coverage_empty_profile() {
        let profile = CoverageProfile {
            total_sequences: 0,
            non_gap_counts: Vec::new(),
            ticks: vec![0],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        plot_coverage(&path, &profile).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("No alignment data"));
    }
}
