//! Interactive 3D structure view.
//!
//! Produces a standalone HTML page that loads 3Dmol.js and draws the
//! renumbered model as a cartoon, optionally with side chain and main chain
//! sticks.

use crate::colors::CHAIN_COLORS;
use anyhow::{Context, Result};
use batchfold_core::pdb::{CHAIN_ALPHABET, renumber};
use serde_json::{Value, json};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const VIEWER_JS: &str = "https://3dmol.org/build/3Dmol.js";
const BACKBONE: [&str; 3] = ["C", "O", "N"];
const MAIN_CHAIN: [&str; 4] = ["C", "O", "N", "CA"];
const HYDROPHOBIC: [&str; 11] = [
    "ALA", "GLY", "VAL", "ILE", "LEU", "PHE", "MET", "PRO", "TRP", "CYS", "TYR",
];
const STICK_RADIUS: f64 = 0.3;

/// How the cartoon is colored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorScheme {
    /// Per-residue confidence from the B-factor column
    #[default]
    Lddt,
    /// Spectrum along the sequence
    Rainbow,
    /// One palette color per chain
    Chain,
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::Lddt => write!(f, "lDDT"),
            ColorScheme::Rainbow => write!(f, "rainbow"),
            ColorScheme::Chain => write!(f, "chain"),
        }
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s.eq_ignore_ascii_case("lddt") => Ok(ColorScheme::Lddt),
            "rainbow" => Ok(ColorScheme::Rainbow),
            "chain" => Ok(ColorScheme::Chain),
            _ => Err("Color must be 'lDDT' (default), 'chain', or 'rainbow'".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub show_sidechains: bool,
    pub show_mainchains: bool,
    pub color: ColorScheme,
    /// Number of chains to color; defaults to the number of chain lengths, or 1
    pub chains: Option<usize>,
    /// Residue counts per chain, used to relabel chains while renumbering
    pub chain_lengths: Option<Vec<usize>>,
    /// Lower bound of the lDDT gradient
    pub vmin: f64,
    /// Upper bound of the lDDT gradient
    pub vmax: f64,
    /// Color hydrophobic side chains yellow
    pub color_hp: bool,
    /// Viewer width and height in pixels
    pub size: (u32, u32),
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_sidechains: false,
            show_mainchains: false,
            color: ColorScheme::default(),
            chains: None,
            chain_lengths: None,
            vmin: 0.5,
            vmax: 0.9,
            color_hp: false,
            size: (800, 480),
        }
    }
}

impl ViewOptions {
    pub fn chain_count(&self) -> usize {
        self.chains
            .unwrap_or_else(|| self.chain_lengths.as_ref().map_or(1, Vec::len))
    }
}

/// A single viewer styling call
#[derive(Debug, Clone, PartialEq)]
pub enum StyleCall {
    /// Replaces the style of the selected atoms
    Set { selection: Value, style: Value },
    /// Layers a style on top of the selected atoms
    Add { selection: Value, style: Value },
}

impl StyleCall {
    fn set(selection: Value, style: Value) -> Self {
        StyleCall::Set { selection, style }
    }

    fn add(selection: Value, style: Value) -> Self {
        StyleCall::Add { selection, style }
    }

    fn to_js(&self) -> String {
        let (method, selection, style) = match self {
            StyleCall::Set { selection, style } => ("setStyle", selection, style),
            StyleCall::Add { selection, style } => ("addStyle", selection, style),
        };
        format!("viewer.{method}({selection}, {style});")
    }
}

fn stick(colorscheme: &str) -> Value {
    json!({"stick": {"colorscheme": colorscheme, "radius": STICK_RADIUS}})
}

fn sphere(colorscheme: &str) -> Value {
    json!({"sphere": {"colorscheme": colorscheme, "radius": STICK_RADIUS}})
}

/// Styling calls for the given options, in the order they are applied
pub fn style_calls(options: &ViewOptions) -> Vec<StyleCall> {
    let mut calls = Vec::new();

    match options.color {
        ColorScheme::Lddt => calls.push(StyleCall::set(
            json!({}),
            json!({"cartoon": {"colorscheme": {
                "prop": "b",
                "gradient": "roygb",
                "min": options.vmin,
                "max": options.vmax,
            }}}),
        )),
        ColorScheme::Rainbow => calls.push(StyleCall::set(
            json!({}),
            json!({"cartoon": {"color": "spectrum"}}),
        )),
        ColorScheme::Chain => {
            let chains = CHAIN_ALPHABET.chars().zip(CHAIN_COLORS);
            for (chain, color) in chains.take(options.chain_count()) {
                calls.push(StyleCall::set(
                    json!({"chain": chain.to_string()}),
                    json!({"cartoon": {"color": color}}),
                ));
            }
        }
    }

    if options.show_sidechains {
        if options.color_hp {
            calls.push(StyleCall::add(
                json!({"and": [{"resn": HYDROPHOBIC}, {"atom": BACKBONE, "invert": true}]}),
                stick("yellowCarbon"),
            ));
            calls.push(StyleCall::add(
                json!({"and": [
                    {"resn": HYDROPHOBIC, "invert": true},
                    {"atom": BACKBONE, "invert": true},
                ]}),
                stick("whiteCarbon"),
            ));
            calls.push(StyleCall::add(
                json!({"and": [{"resn": "GLY"}, {"atom": "CA"}]}),
                sphere("yellowCarbon"),
            ));
            calls.push(StyleCall::add(
                json!({"and": [{"resn": "PRO"}, {"atom": ["C", "O"], "invert": true}]}),
                stick("yellowCarbon"),
            ));
        } else {
            calls.push(StyleCall::add(
                json!({"and": [
                    {"resn": ["GLY", "PRO"], "invert": true},
                    {"atom": BACKBONE, "invert": true},
                ]}),
                stick("WhiteCarbon"),
            ));
            calls.push(StyleCall::add(
                json!({"and": [{"resn": "GLY"}, {"atom": "CA"}]}),
                sphere("WhiteCarbon"),
            ));
            calls.push(StyleCall::add(
                json!({"and": [{"resn": "PRO"}, {"atom": ["C", "O"], "invert": true}]}),
                stick("WhiteCarbon"),
            ));
        }
    }

    if options.show_mainchains {
        calls.push(StyleCall::add(json!({"atom": MAIN_CHAIN}), stick("WhiteCarbon")));
    }

    calls
}

/// Renders an HTML page showing an already renumbered model
pub fn render_html(pdb: &str, options: &ViewOptions) -> Result<String> {
    // keep "</script>" inside the model text from closing the script element
    let model = serde_json::to_string(pdb)?.replace("</", "<\\/");
    let (width, height) = options.size;

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<script src=\"{VIEWER_JS}\"></script>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<div id=\"viewer\" style=\"width: {width}px; height: {height}px; position: relative;\"></div>\n"
    ));
    html.push_str("<script>\n");
    html.push_str("const viewer = $3Dmol.createViewer(document.getElementById(\"viewer\"));\n");
    html.push_str(&format!("viewer.addModel({model}, \"pdb\");\n"));
    for call in style_calls(options) {
        html.push_str(&call.to_js());
        html.push('\n');
    }
    html.push_str("viewer.zoomTo();\nviewer.render();\n</script>\n</body>\n</html>\n");
    Ok(html)
}

/// Renumbers `pdb` and writes the viewer page to `path`
pub fn write_structure_view(path: &Path, pdb: &str, options: &ViewOptions) -> Result<()> {
    let model = renumber(pdb, options.chain_lengths.as_deref())?;
    let html = render_html(&model, options)?;
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDB: &str = "\
ATOM      1  N   MET A   1      11.104  13.207   2.100  1.00 0.91           N
ATOM      2  CA  MET A   1      12.560  13.207   2.100  1.00 0.91           C
ATOM      3  N   LYS A   2      13.104  14.207   3.100  1.00 0.62           N
ATOM      4  N   GLY A   3      14.104  15.207   4.100  1.00 0.45           N
TER
END
";

    #[test]
    fn test_color_scheme_parse() {
        assert_eq!("lDDT".parse::<ColorScheme>().unwrap(), ColorScheme::Lddt);
        assert_eq!("chain".parse::<ColorScheme>().unwrap(), ColorScheme::Chain);
        assert_eq!("rainbow".parse::<ColorScheme>().unwrap(), ColorScheme::Rainbow);
        assert_eq!(
            "plasma".parse::<ColorScheme>().unwrap_err(),
            "Color must be 'lDDT' (default), 'chain', or 'rainbow'"
        );
    }

    #[test]
    fn test_default_lddt_style() {
        let calls = style_calls(&ViewOptions::default());
        assert_eq!(
            calls,
            vec![StyleCall::Set {
                selection: json!({}),
                style: json!({"cartoon": {"colorscheme": {
                    "prop": "b", "gradient": "roygb", "min": 0.5, "max": 0.9
                }}}),
            }]
        );
    }

    #[test]
    fn test_chain_colors_follow_chain_count() {
        let options = ViewOptions {
            color: ColorScheme::Chain,
            chain_lengths: Some(vec![10, 20, 5]),
            ..Default::default()
        };
        let calls = style_calls(&options);
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[2],
            StyleCall::Set {
                selection: json!({"chain": "C"}),
                style: json!({"cartoon": {"color": "#ff33cc"}}),
            }
        );

        let explicit = ViewOptions {
            chains: Some(1),
            ..options
        };
        assert_eq!(style_calls(&explicit).len(), 1);
    }

    #[test]
    fn test_sidechain_and_mainchain_styles() {
        let options = ViewOptions {
            color: ColorScheme::Rainbow,
            show_sidechains: true,
            show_mainchains: true,
            ..Default::default()
        };
        let calls = style_calls(&options);
        // base style, three side chain layers, one main chain layer
        assert_eq!(calls.len(), 5);
        assert!(matches!(calls[0], StyleCall::Set { .. }));
        assert!(calls[1..].iter().all(|c| matches!(c, StyleCall::Add { .. })));
        assert_eq!(
            calls[4],
            StyleCall::Add {
                selection: json!({"atom": ["C", "O", "N", "CA"]}),
                style: json!({"stick": {"colorscheme": "WhiteCarbon", "radius": 0.3}}),
            }
        );

        let hp = ViewOptions {
            color_hp: true,
            show_mainchains: false,
            ..options
        };
        let calls = style_calls(&hp);
        assert_eq!(calls.len(), 5);
        assert!(calls[1].to_js().contains("yellowCarbon"));
        assert!(calls[2].to_js().contains("whiteCarbon"));
    }

    #[test]
    fn test_render_html() {
        let html = render_html(PDB, &ViewOptions::default()).unwrap();
        assert!(html.contains(VIEWER_JS));
        assert!(html.contains("width: 800px; height: 480px"));
        assert!(html.contains("viewer.addModel(\"ATOM"));
        assert!(html.contains("viewer.setStyle({}, "));
        assert!(html.find("viewer.zoomTo()") > html.find("viewer.setStyle"));
    }

    #[test]
    fn test_write_structure_view_renumbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranked_0.html");
        let options = ViewOptions {
            chain_lengths: Some(vec![2, 1]),
            ..Default::default()
        };
        write_structure_view(&path, PDB, &options).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("GLY B   3"));
        assert!(!html.contains("TER"));
    }
}
