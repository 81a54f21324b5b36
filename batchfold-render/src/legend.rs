//! pLDDT color legend

use crate::colors::{PLDDT_LEGEND, parse_hex};
use anyhow::{Result, anyhow};
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (720, 30);
const SWATCH: i32 = 12;
const COLUMN: i32 = 120;

/// Draws the single-row confidence legend that accompanies the lDDT-colored view
pub fn plot_plddt_legend(path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let top = (SIZE.1 as i32 - SWATCH) / 2;
    for (i, (label, hex)) in PLDDT_LEGEND.iter().enumerate() {
        let color = parse_hex(hex).ok_or_else(|| anyhow!("invalid legend color {hex}"))?;
        let x = i as i32 * COLUMN + 4;

        root.draw(&Rectangle::new(
            [(x, top), (x + SWATCH, top + SWATCH)],
            color.filled(),
        ))?;
        root.draw(&Text::new(
            *label,
            (x + SWATCH + 6, top),
            ("sans-serif", 12).into_font().color(&BLACK),
        ))?;
    }

    root.present()?;
    Ok(())
}
