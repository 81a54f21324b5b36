//! Batchfold Render
//!
//! Visualizations of fold job outputs:
//! - Alignment coverage line chart and identity heatmap (SVG)
//! - pLDDT color legend (SVG)
//! - Interactive 3D cartoon view of a predicted structure (HTML + 3Dmol.js)

pub mod colors;
pub mod coverage;
pub mod legend;
pub mod msa_info;
pub mod viewer;

pub use coverage::plot_coverage;
pub use legend::plot_plddt_legend;
pub use msa_info::plot_msa_info;
pub use viewer::{ColorScheme, ViewOptions, write_structure_view};
