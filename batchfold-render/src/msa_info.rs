//! Alignment identity heatmap

use crate::colors::rainbow_r;
use anyhow::Result;
use batchfold_core::msa::MsaInfo;
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (800, 500);
const COLORBAR_STEPS: usize = 100;

/// Draws the distinct alignment rows, ordered by identity to the query, as an SVG heatmap.
///
/// Residue cells are colored by their row's identity with a reversed rainbow
/// map over `[0, 1]`; gaps stay blank. The per-position non-gap count is
/// overlaid as a black line.
pub fn plot_msa_info(path: &Path, info: &MsaInfo) -> Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (main, bar) = root.split_horizontally(700);

    let width = info.width.max(1) as f64;
    let height = info.rows.len().max(1) as f64;

    let mut chart = ChartBuilder::on(&main)
        .caption("Sequence coverage", ("sans-serif", 18))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..width, 0f64..height)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Positions")
        .y_desc("Sequences")
        .draw()?;

    chart.draw_series(row_segments(info).into_iter().map(|(row, start, end)| {
        let y = row as f64;
        Rectangle::new(
            [(start as f64, y), (end as f64, y + 1.0)],
            rainbow_r(info.identity[row]).filled(),
        )
    }))?;

    chart.draw_series(LineSeries::new(
        info.non_gap_counts
            .iter()
            .enumerate()
            .map(|(x, &count)| (x as f64, count as f64)),
        &BLACK,
    ))?;

    let mut colorbar = ChartBuilder::on(&bar)
        .margin_top(45)
        .margin_bottom(55)
        .margin_right(10)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..1f64, 0f64..1f64)?;

    colorbar
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("Sequence identity to query")
        .draw()?;

    let step = 1.0 / COLORBAR_STEPS as f64;
    colorbar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let lo = i as f64 * step;
        Rectangle::new([(0.0, lo), (1.0, lo + step)], rainbow_r(lo).filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Runs of consecutive residue cells per row as `(row, start, end)`.
///
/// A row has one color, so each run becomes a single rectangle.
fn row_segments(info: &MsaInfo) -> Vec<(usize, usize, usize)> {
    let mut segments = Vec::new();
    for row in 0..info.rows.len() {
        let mut start = None;
        for column in 0..=info.width {
            match (info.cell(row, column).is_some(), start) {
                (true, None) => start = Some(column),
                (false, Some(s)) => {
                    segments.push((row, s, column));
                    start = None;
                }
                _ => {}
            }
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchfold_core::msa::MSA_INFO_GAP;

    const G: u8 = MSA_INFO_GAP;

    fn sample() -> MsaInfo {
        MsaInfo::from_matrix(&[vec![0, 1, 2, 3], vec![0, G, 2, G], vec![G, G, 2, 3]]).unwrap()
    }

    #[test]
    fn test_row_segments_merge_runs() {
        let info = sample();
        let segments = row_segments(&info);

        // every residue cell is covered by exactly one segment
        let covered: usize = segments.iter().map(|(_, s, e)| e - s).sum();
        let residues: usize = info.non_gap_counts.iter().sum();
        assert_eq!(covered, residues);

        // query row is the most identical, so it sorts last, as one full run
        assert_eq!(segments.last(), Some(&(2, 0, 4)));
    }

    #[test]
    fn test_plot_msa_info_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msa_info.svg");
        plot_msa_info(&path, &sample()).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Sequence coverage"));
        assert!(svg.contains("Sequence identity to query"));
        assert!(svg.contains("Positions"));
    }
}
