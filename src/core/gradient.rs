use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::core::color::Color;
use crate::core::scale::Scale;
use crate::core::types::{AxisKind, Bounds};
use crate::error::{ChartError, ChartResult};

/// Color stop positioned in data space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl GradientStop {
    #[must_use]
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
            opacity: default_opacity(),
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

pub type GradientStopsFn = dyn Fn(Bounds) -> Vec<GradientStop> + Send + Sync;

/// Static stops, or stops computed from the scale domain.
#[derive(Clone)]
pub enum GradientStops {
    Static(Vec<GradientStop>),
    Dynamic(Arc<GradientStopsFn>),
}

impl GradientStops {
    fn resolve(&self, domain: Bounds) -> Vec<GradientStop> {
        match self {
            Self::Static(stops) => stops.clone(),
            Self::Dynamic(stops) => stops(domain),
        }
    }
}

impl fmt::Debug for GradientStops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(stops) => f.debug_tuple("Static").field(stops).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl PartialEq for GradientStops {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Static(lhs), Self::Static(rhs)) => lhs == rhs,
            (Self::Dynamic(lhs), Self::Dynamic(rhs)) => Arc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl<'de> Deserialize<'de> for GradientStops {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<GradientStop>::deserialize(deserializer).map(Self::Static)
    }
}

/// Declarative gradient laid along one axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradientDefinition {
    pub axis: AxisKind,
    pub stops: GradientStops,
}

impl GradientDefinition {
    #[must_use]
    pub fn new(axis: AxisKind, stops: Vec<GradientStop>) -> Self {
        Self {
            axis,
            stops: GradientStops::Static(stops),
        }
    }

    #[must_use]
    pub fn dynamic(
        axis: AxisKind,
        stops: impl Fn(Bounds) -> Vec<GradientStop> + Send + Sync + 'static,
    ) -> Self {
        Self {
            axis,
            stops: GradientStops::Dynamic(Arc::new(stops)),
        }
    }
}

/// Gradient ready for a linear-gradient fill: positions normalized to `[0, 1]`
/// along the scale's pixel range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedGradient {
    pub colors: Vec<String>,
    pub positions: Vec<f64>,
}

/// Resolves `definition` against `scale`, logging failures and returning `None`.
#[must_use]
pub fn resolve_gradient(definition: &GradientDefinition, scale: &Scale) -> Option<ProcessedGradient> {
    try_resolve_gradient(definition, scale)
        .inspect_err(|err| warn!(error = %err, "gradient resolution failed"))
        .ok()
}

/// Resolves `definition` into colors and normalized pixel positions.
///
/// Stops sharing an offset stay adjacent at the same position, producing a
/// hard color boundary. Opacity other than `1` is folded into the color.
pub fn try_resolve_gradient(
    definition: &GradientDefinition,
    scale: &Scale,
) -> ChartResult<ProcessedGradient> {
    let stops = effective_stops(definition, scale)?;
    let mut colors = Vec::with_capacity(stops.len());
    let mut positions = Vec::with_capacity(stops.len());

    for stop in &stops {
        positions.push(normalized_position(scale, stop.offset)?);
        if stop.opacity == 1.0 {
            colors.push(stop.color.clone());
        } else {
            let color = Color::parse(&stop.color)?;
            let opacity = stop.opacity.clamp(0.0, 1.0);
            colors.push(color.with_alpha(color.alpha * opacity).to_string());
        }
    }

    Ok(ProcessedGradient { colors, positions })
}

/// Color of the gradient at `value`, logging failures and returning `None`.
#[must_use]
pub fn sample_gradient_color(
    definition: &GradientDefinition,
    value: f64,
    scale: &Scale,
) -> Option<String> {
    try_sample_gradient_color(definition, value, scale)
        .inspect_err(|err| warn!(error = %err, value, "gradient sampling failed"))
        .ok()
}

/// Color of the gradient at data `value`.
///
/// Values outside the stops clamp to the nearest end color. On a hard
/// transition the last color defined at that offset wins. Stop opacity is
/// ignored here; it only shapes the rendered gradient.
pub fn try_sample_gradient_color(
    definition: &GradientDefinition,
    value: f64,
    scale: &Scale,
) -> ChartResult<String> {
    let stops = effective_stops(definition, scale)?;
    let positions = stops
        .iter()
        .map(|stop| normalized_position(scale, stop.offset))
        .collect::<ChartResult<Vec<f64>>>()?;
    let position = normalized_position(scale, value)?;

    let Some(index) = positions.iter().rposition(|stop| *stop <= position) else {
        return Ok(stops[0].color.clone());
    };
    if index == stops.len() - 1 {
        return Ok(stops[index].color.clone());
    }

    let (from, to) = (positions[index], positions[index + 1]);
    let progress = (position - from) / (to - from);
    if progress <= 0.0 {
        return Ok(stops[index].color.clone());
    }

    let start = Color::parse(&stops[index].color)?;
    let end = Color::parse(&stops[index + 1].color)?;
    Ok(start.lerp(end, progress).to_string())
}

/// Concrete, validated stops of `definition` for `scale`.
///
/// A single stop is expanded with a transparent copy at the domain edge
/// (`min` for offsets >= 0, `max` otherwise) so it fades in from that edge.
pub fn effective_stops(
    definition: &GradientDefinition,
    scale: &Scale,
) -> ChartResult<Vec<GradientStop>> {
    let domain = gradient_domain(scale);
    let mut stops = definition.stops.resolve(domain);

    if stops.is_empty() {
        return Err(ChartError::InvalidGradient(
            "gradient requires at least one stop".to_owned(),
        ));
    }
    if stops.iter().any(|stop| !stop.offset.is_finite()) {
        return Err(ChartError::InvalidGradient(
            "gradient stop offsets must be finite".to_owned(),
        ));
    }
    if stops
        .windows(2)
        .any(|pair| pair[1].offset < pair[0].offset)
    {
        return Err(ChartError::InvalidGradient(
            "gradient stop offsets must be non-decreasing".to_owned(),
        ));
    }

    let range = scale.range();
    if range.is_zero_span() {
        return Err(ChartError::InvalidRange {
            start: range.min,
            end: range.max,
        });
    }

    if stops.len() == 1 {
        let stop = &stops[0];
        let edge = if stop.offset >= 0.0 {
            domain.min
        } else {
            domain.max
        };
        let baseline = GradientStop {
            offset: edge,
            color: stop.color.clone(),
            opacity: 0.0,
        };
        stops.insert(0, baseline);
    }

    Ok(stops)
}

/// Data domain a gradient is resolved against.
#[must_use]
pub fn gradient_domain(scale: &Scale) -> Bounds {
    match scale {
        Scale::Numeric(numeric) => numeric.domain(),
        Scale::Band(band) => band.category_bounds(),
    }
}

fn normalized_position(scale: &Scale, offset: f64) -> ChartResult<f64> {
    let pixel = match scale {
        Scale::Numeric(numeric) => numeric.apply(offset),
        Scale::Band(band) => band.apply_center(offset),
    };
    if !pixel.is_finite() {
        return Err(ChartError::InvalidGradient(format!(
            "offset {offset} cannot be projected by the scale"
        )));
    }
    // Offsets beyond either end of the range clamp to that end.
    let range = scale.range();
    let position = (pixel - range.min) / (range.max - range.min);
    Ok(position.clamp(0.0, 1.0))
}
