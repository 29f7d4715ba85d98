//! Color conversion to SVG color strings.
//!
//! Every channel is scaled to 0..255, clamped, then rounded, so out-of-range
//! operands never produce invalid colors.

/// Device color spaces reachable from PostScript color operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceGray,
    DeviceRgb,
    DeviceCmyk,
}

impl ColorSpace {
    /// Guess the space from a component count: 1 is gray, 4 is CMYK,
    /// anything else is treated as RGB.
    pub const fn from_components(n: usize) -> Self {
        match n {
            1 => Self::DeviceGray,
            4 => Self::DeviceCmyk,
            _ => Self::DeviceRgb,
        }
    }
}

fn channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

fn format_rgb(r: f64, g: f64, b: f64) -> String {
    format!("rgb({}, {}, {})", channel(r), channel(g), channel(b))
}

/// RGB components in 0..1.
pub fn rgb_to_color(r: f64, g: f64, b: f64) -> String {
    format_rgb(r * 255.0, g * 255.0, b * 255.0)
}

pub fn gray_to_color(gray: f64) -> String {
    rgb_to_color(gray, gray, gray)
}

/// Naive CMYK conversion: `r = 255 (1 - c)(1 - k)` and likewise for g, b.
pub fn cmyk_to_color(c: f64, m: f64, y: f64, k: f64) -> String {
    format_rgb(
        255.0 * (1.0 - c) * (1.0 - k),
        255.0 * (1.0 - m) * (1.0 - k),
        255.0 * (1.0 - y) * (1.0 - k),
    )
}

/// Convert a component list, picking the space from its length.
/// Missing components read as 0.
pub fn components_to_color(components: &[f64]) -> String {
    let at = |i: usize| components.get(i).copied().unwrap_or(0.0);
    match ColorSpace::from_components(components.len()) {
        ColorSpace::DeviceGray => gray_to_color(at(0)),
        ColorSpace::DeviceCmyk => cmyk_to_color(at(0), at(1), at(2), at(3)),
        ColorSpace::DeviceRgb => rgb_to_color(at(0), at(1), at(2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_clamps_before_rounding() {
        assert_eq!(rgb_to_color(-1.0, 0.5, 2.0), rgb_to_color(0.0, 0.5, 1.0));
        assert_eq!(rgb_to_color(0.0, 0.5, 1.0), "rgb(0, 128, 255)");
    }

    #[test]
    fn test_gray() {
        assert_eq!(gray_to_color(0.0), "rgb(0, 0, 0)");
        assert_eq!(gray_to_color(1.0), "rgb(255, 255, 255)");
    }

    #[test]
    fn test_cmyk() {
        assert_eq!(cmyk_to_color(0.0, 0.0, 0.0, 0.0), "rgb(255, 255, 255)");
        assert_eq!(cmyk_to_color(1.0, 0.0, 0.0, 0.0), "rgb(0, 255, 255)");
        assert_eq!(cmyk_to_color(0.0, 0.0, 0.0, 1.0), "rgb(0, 0, 0)");
    }

    #[test]
    fn test_components_pick_space() {
        assert_eq!(components_to_color(&[0.5]), "rgb(128, 128, 128)");
        assert_eq!(components_to_color(&[1.0, 0.0, 0.0]), "rgb(255, 0, 0)");
        assert_eq!(components_to_color(&[0.0, 1.0, 0.0, 0.0]), "rgb(255, 0, 255)");
        assert_eq!(ColorSpace::from_components(2), ColorSpace::DeviceRgb);
    }
}
