use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One-dimensional interval.
///
/// For domains `min <= max` is expected. Pixel ranges may be reversed
/// (`min > max`) when a scale maps increasing data values to decreasing
/// pixels, as the y axis does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    #[must_use]
    pub fn is_zero_span(self) -> bool {
        self.min == self.max
    }

    /// Returns `true` when `value` lies within the interval, whatever its orientation.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        value >= lo && value <= hi
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        Self::new(self.max, self.min)
    }

    /// Validates the bounds as a data domain: finite and `min <= max`.
    pub fn validate_domain(self) -> ChartResult<Self> {
        if !self.is_finite() {
            return Err(ChartError::InvalidDomain {
                min: self.min,
                max: self.max,
                reason: "domain bounds must be finite",
            });
        }
        if self.min > self.max {
            return Err(ChartError::InvalidDomain {
                min: self.min,
                max: self.max,
                reason: "domain min must not exceed max",
            });
        }
        Ok(self)
    }

    /// Validates the bounds as a pixel range: both ends finite.
    pub fn validate_range(self) -> ChartResult<Self> {
        if !self.is_finite() {
            return Err(ChartError::InvalidRange {
                start: self.min,
                end: self.max,
            });
        }
        Ok(self)
    }
}

/// Bounds where either side may be left unspecified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialBounds {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl PartialBounds {
    #[must_use]
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn min(min: f64) -> Self {
        Self::new(Some(min), None)
    }

    #[must_use]
    pub const fn max(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    #[must_use]
    pub const fn both(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// Per-side override: sides set on `self` win over `fallback`.
    #[must_use]
    pub fn or(self, fallback: PartialBounds) -> Self {
        Self {
            min: self.min.or(fallback.min),
            max: self.max.or(fallback.max),
        }
    }

    /// Fills still-unresolved sides with `0`.
    #[must_use]
    pub fn resolve_or_zero(self) -> Bounds {
        Bounds::new(self.min.unwrap_or(0.0), self.max.unwrap_or(0.0))
    }
}

impl From<Bounds> for PartialBounds {
    fn from(value: Bounds) -> Self {
        Self::both(value.min, value.max)
    }
}

/// Which cartesian axis a configuration or gradient refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    X,
    Y,
}

/// Space reserved around the drawing area inside the chart container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartInset {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartInset {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Drawing rectangle in pixel space, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawingRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DrawingRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Derives the drawing area of a `width` x `height` container after removing `inset`.
    ///
    /// Insets larger than the container collapse the area to zero size rather than
    /// producing negative extents.
    #[must_use]
    pub fn from_container(width: f64, height: f64, inset: ChartInset) -> Self {
        Self {
            x: inset.left,
            y: inset.top,
            width: (width - inset.left - inset.right).max(0.0),
            height: (height - inset.top - inset.bottom).max(0.0),
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}
