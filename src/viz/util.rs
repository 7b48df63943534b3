//! Color parsing and coordinate helpers shared by the SVG export and the GUI.

use plotters::prelude::*;

/// Named colors the chart uses besides `#rrggbb`.
const NAMED: [(&str, (u8, u8, u8)); 2] = [("black", (0, 0, 0)), ("white", (255, 255, 255))];

/// Parse `#rrggbb`, `#rgb` or one of a few names; anything else is black.
pub fn rgb_components(spec: &str) -> (u8, u8, u8) {
    let s = spec.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return (0, 0, 0);
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return (0, 0, 0),
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        return match (channel(0), channel(2), channel(4)) {
            (Some(r), Some(g), Some(b)) => (r, g, b),
            _ => (0, 0, 0),
        };
    }
    NAMED
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map(|(_, rgb)| *rgb)
        .unwrap_or((0, 0, 0))
}

pub fn rgb_color(spec: &str) -> RGBColor {
    let (r, g, b) = rgb_components(spec);
    RGBColor(r, g, b)
}

/// Scene coordinates to backend pixels.
#[inline]
pub fn to_px(p: (f64, f64)) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mark_fill() {
        assert_eq!(rgb_components("#2E9AFE"), (0x2e, 0x9a, 0xfe));
        assert_eq!(rgb_components("#fff"), (255, 255, 255));
        assert_eq!(rgb_components("White"), (255, 255, 255));
        assert_eq!(rgb_components("#zzzzzz"), (0, 0, 0));
    }
}
