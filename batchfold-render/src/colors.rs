//! Color tables and maps

use plotters::style::RGBColor;

/// Chain colors, assigned to chains in alphabet order
pub const CHAIN_COLORS: [&str; 40] = [
    "#33ff33", "#00ffff", "#ff33cc", "#ffff00", "#ff9999", "#e5e5e5", "#7f7fff", "#ff7f00",
    "#7fff7f", "#199999", "#ff007f", "#ffdd5e", "#8c3f99", "#b2b2b2", "#007fff", "#c4b200",
    "#8cb266", "#00bfbf", "#b27f7f", "#fcd1a5", "#ff7f7f", "#ffbfdd", "#7fffff", "#ffff7f",
    "#00ff7f", "#337fcc", "#d8337f", "#bfff3f", "#ff7fff", "#d8d8ff", "#3fffbf", "#b78c4c",
    "#339933", "#66b2b2", "#ba8c84", "#84bf00", "#b24c66", "#7f7f7f", "#3f3fa5", "#a5512b",
];

/// pLDDT legend entries: label and swatch color
pub const PLDDT_LEGEND: [(&str, &str); 6] = [
    ("plDDT:", "#FFFFFF"),
    ("Very low (<50)", "#FF0000"),
    ("Low (60)", "#FFFF00"),
    ("OK (70)", "#00FF00"),
    ("Confident (80)", "#00FFFF"),
    ("Very high (>90)", "#0000FF"),
];

/// Parses `#rrggbb`
pub fn parse_hex(hex: &str) -> Option<RGBColor> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Reversed rainbow map: 0 is red, 1 is violet.
///
/// Channels follow the gnuplot rainbow formulae (`|2x - 0.5|`, `sin(pi x)`,
/// `cos(pi x / 2)`) evaluated at `1 - t`.
pub fn rainbow_r(t: f64) -> RGBColor {
    let x = 1.0 - t.clamp(0.0, 1.0);
    let r = (2.0 * x - 0.5).abs();
    let g = (std::f64::consts::PI * x).sin();
    let b = (std::f64::consts::FRAC_PI_2 * x).cos();
    let to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBColor(to_u8(r), to_u8(g), to_u8(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let RGBColor(r, g, b) = parse_hex("#33ff00").unwrap();
        assert_eq!((r, g, b), (0x33, 0xff, 0x00));
        assert!(parse_hex("33ff00").is_none());
        assert!(parse_hex("#33ff0").is_none());
        assert!(parse_hex("#zzzzzz").is_none());
    }

    #[test]
    fn test_palette_parses() {
        assert!(CHAIN_COLORS.iter().all(|c| parse_hex(c).is_some()));
        assert!(PLDDT_LEGEND.iter().all(|(_, c)| parse_hex(c).is_some()));
    }

    #[test]
    fn test_rainbow_r_endpoints() {
        let RGBColor(r, g, b) = rainbow_r(0.0);
        assert_eq!((r, g, b), (255, 0, 0));
        let RGBColor(r, g, b) = rainbow_r(1.0);
        assert_eq!((r, g, b), (128, 0, 255));
    }
}
