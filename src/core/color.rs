use std::fmt;

use peniko::color::{Srgb, parse_color};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses any CSS color string: hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`,
    /// `hwb()`, `lab()`/`lch()`/`oklab()`/`oklch()` or a CSS named color.
    ///
    /// Colors outside sRGB are converted to it.
    pub fn parse(input: &str) -> ChartResult<Self> {
        let parsed = parse_color(&input.trim().to_ascii_lowercase())
            .map_err(|_| ChartError::InvalidColor(input.to_owned()))?;
        let [red, green, blue, alpha] = parsed.to_alpha_color::<Srgb>().components;
        Ok(Self::rgba(
            f64::from(red).clamp(0.0, 1.0),
            f64::from(green).clamp(0.0, 1.0),
            f64::from(blue).clamp(0.0, 1.0),
            f64::from(alpha).clamp(0.0, 1.0),
        ))
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Channel-wise linear interpolation; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
            alpha: mix(self.alpha, other.alpha),
        }
    }

    fn channel_u8(value: f64) -> u8 {
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// Formats as `rgb(r, g, b)` when opaque and `rgba(r, g, b, a)` otherwise.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = (
            Self::channel_u8(self.red),
            Self::channel_u8(self.green),
            Self::channel_u8(self.blue),
        );
        if self.alpha >= 1.0 {
            write!(f, "rgb({r}, {g}, {b})")
        } else {
            let alpha = (self.alpha.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
            write!(f, "rgba({r}, {g}, {b}, {alpha})")
        }
    }
}
