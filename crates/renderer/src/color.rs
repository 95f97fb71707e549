//! Colors, categorical palettes and continuous colormaps.

use plotters::style::{RGBColor, BLACK, WHITE};

/// Default series color
pub const SERIES_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);

/// Outline for grouped boxes and violins
pub const OUTLINE: RGBColor = RGBColor(0x3f, 0x3f, 0x3f);

/// Major grid lines, drawn at 0.3 alpha
pub const GRID_COLOR: RGBColor = RGBColor(0xb0, 0xb0, 0xb0);

/// Ten-color categorical cycle
pub const CATEGORY_PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

/// Color for the `index`-th category, cycling through the palette.
pub fn category_color(index: usize) -> RGBColor {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

/// Diverging blue-to-red colormap, light grey at the midpoint.
const COOLWARM_STOPS: [(f64, RGBColor); 5] = [
    (0.0, RGBColor(59, 76, 192)),
    (0.25, RGBColor(141, 176, 254)),
    (0.5, RGBColor(221, 221, 221)),
    (0.75, RGBColor(244, 153, 122)),
    (1.0, RGBColor(180, 4, 38)),
];

/// Sample the coolwarm colormap at `t` in `[0, 1]` (clamped).
pub fn coolwarm(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };

    for pair in COOLWARM_STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            return interpolate_color(c0, c1, (t - t0) / (t1 - t0));
        }
    }
    COOLWARM_STOPS[COOLWARM_STOPS.len() - 1].1
}

/// Map `value` onto `[0, 1]` with `center` at 0.5.
///
/// The half-range is the larger distance from `center` to either bound so
/// the scale stays symmetric.
pub fn centered_norm(value: f64, vmin: f64, vmax: f64, center: f64) -> f64 {
    let half = (vmax - center).abs().max((center - vmin).abs());
    if half == 0.0 {
        return 0.5;
    }
    0.5 + (value - center) / (2.0 * half)
}

/// Relative luminance in `[0, 1]` (sRGB coefficients, no gamma).
pub fn luminance(color: RGBColor) -> f64 {
    let RGBColor(r, g, b) = color;
    (0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64) / 255.0
}

/// Black or white, whichever reads better on top of `background`.
pub fn contrasting_text(background: RGBColor) -> RGBColor {
    if luminance(background) > 0.408 {
        BLACK
    } else {
        WHITE
    }
}

/// Linear color interpolation
fn interpolate_color(color1: RGBColor, color2: RGBColor, t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| ((a as f64 * t_inv) + (b as f64 * t)).round() as u8;

    RGBColor(
        mix(color1.0, color2.0),
        mix(color1.1, color2.1),
        mix(color1.2, color2.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(category_color(0), SERIES_COLOR);
        assert_eq!(category_color(0), category_color(10));
        assert_ne!(category_color(0), category_color(1));
    }

    #[test]
    fn test_coolwarm_endpoints() {
        assert_eq!(coolwarm(0.0), RGBColor(59, 76, 192));
        assert_eq!(coolwarm(0.5), RGBColor(221, 221, 221));
        assert_eq!(coolwarm(1.0), RGBColor(180, 4, 38));
        assert_eq!(coolwarm(2.0), coolwarm(1.0));
        assert_eq!(coolwarm(f64::NAN), coolwarm(0.5));
    }

    #[test]
    fn test_centered_norm_is_symmetric() {
        assert_eq!(centered_norm(0.0, -0.2, 1.0, 0.0), 0.5);
        assert_eq!(centered_norm(1.0, -0.2, 1.0, 0.0), 1.0);
        assert!((centered_norm(-0.2, -0.2, 1.0, 0.0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_contrasting_text() {
        assert_eq!(contrasting_text(RGBColor(180, 4, 38)), WHITE);
        assert_eq!(contrasting_text(RGBColor(221, 221, 221)), BLACK);
    }
}
