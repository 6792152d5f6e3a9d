use std::fmt;
use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::scale::{
    DEFAULT_BAND_PADDING, NICE_TICK_COUNT, NumericScaleKind, Scale, ScaleType,
    build_categorical_scale, build_numeric_scale,
};
use crate::core::series::{DEFAULT_AXIS_ID, Series, stack_series};
use crate::core::types::{AxisKind, Bounds, DrawingRect, PartialBounds};
use crate::error::ChartResult;

/// Post-processing hook receiving the computed bounds and returning the final ones.
pub type BoundsTransformFn = dyn Fn(Bounds) -> Bounds + Send + Sync;

/// User override of an axis domain or range.
#[derive(Clone)]
pub enum BoundsOverride {
    /// Sides set here replace the computed ones; unset sides fall through.
    Bounds(PartialBounds),
    /// Receives the computed bounds (unresolved sides as `0`).
    Transform(Arc<BoundsTransformFn>),
}

impl BoundsOverride {
    #[must_use]
    pub fn transform(f: impl Fn(Bounds) -> Bounds + Send + Sync + 'static) -> Self {
        Self::Transform(Arc::new(f))
    }

    /// Applies the override on top of the computed `base`.
    #[must_use]
    pub fn apply(&self, base: PartialBounds) -> Bounds {
        match self {
            Self::Bounds(bounds) => bounds.or(base).resolve_or_zero(),
            Self::Transform(transform) => transform(base.resolve_or_zero()),
        }
    }
}

impl From<PartialBounds> for BoundsOverride {
    fn from(value: PartialBounds) -> Self {
        Self::Bounds(value)
    }
}

impl fmt::Debug for BoundsOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounds(bounds) => f.debug_tuple("Bounds").field(bounds).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

impl PartialEq for BoundsOverride {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bounds(lhs), Self::Bounds(rhs)) => lhs == rhs,
            (Self::Transform(lhs), Self::Transform(rhs)) => Arc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl<'de> Deserialize<'de> for BoundsOverride {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        PartialBounds::deserialize(deserializer).map(Self::Bounds)
    }
}

/// Explicit per-point axis data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisData {
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

/// Rounding policy of numeric domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainLimit {
    /// Round the domain outward to human-friendly values.
    Nice,
    /// Use the exact computed min/max.
    Strict,
}

impl DomainLimit {
    #[must_use]
    pub fn default_for(axis: AxisKind) -> Self {
        match axis {
            AxisKind::X => Self::Strict,
            AxisKind::Y => Self::Nice,
        }
    }
}

/// User-supplied partial axis configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AxisConfigProps {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub scale_type: Option<ScaleType>,
    #[serde(default)]
    pub data: Option<AxisData>,
    #[serde(default)]
    pub domain: Option<BoundsOverride>,
    #[serde(default)]
    pub range: Option<BoundsOverride>,
    #[serde(default)]
    pub domain_limit: Option<DomainLimit>,
    #[serde(default)]
    pub category_padding: Option<f64>,
}

impl AxisConfigProps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_scale_type(mut self, scale_type: ScaleType) -> Self {
        self.scale_type = Some(scale_type);
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: AxisData) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<BoundsOverride>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: impl Into<BoundsOverride>) -> Self {
        self.range = Some(range.into());
        self
    }

    #[must_use]
    pub fn with_domain_limit(mut self, domain_limit: DomainLimit) -> Self {
        self.domain_limit = Some(domain_limit);
        self
    }

    #[must_use]
    pub fn with_category_padding(mut self, padding: f64) -> Self {
        self.category_padding = Some(padding);
        self
    }

    /// Explicit numeric x-values, when the axis carries them.
    #[must_use]
    pub fn numeric_data(&self) -> Option<&[f64]> {
        match &self.data {
            Some(AxisData::Numbers(values)) => Some(values),
            _ => None,
        }
    }
}

/// Axis description resolved for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub id: String,
    pub axis: AxisKind,
    pub scale_type: ScaleType,
    pub domain: Bounds,
    pub range: Bounds,
    pub data: Option<AxisData>,
    pub category_padding: f64,
    pub domain_limit: DomainLimit,
}

impl AxisConfig {
    /// Merges `props` with the defaults of `axis` and resolves domain and range.
    #[must_use]
    pub fn resolve(
        props: &AxisConfigProps,
        series: &[Series],
        rect: DrawingRect,
        axis: AxisKind,
    ) -> Self {
        Self {
            id: props
                .id
                .clone()
                .unwrap_or_else(|| DEFAULT_AXIS_ID.to_owned()),
            axis,
            scale_type: props.scale_type.unwrap_or_default(),
            domain: resolve_domain(props, series, axis),
            range: resolve_range(props, rect, axis),
            data: props.data.clone(),
            category_padding: props.category_padding.unwrap_or(DEFAULT_BAND_PADDING),
            domain_limit: props
                .domain_limit
                .unwrap_or_else(|| DomainLimit::default_for(axis)),
        }
    }

    /// String labels of a categorical axis.
    #[must_use]
    pub fn labels(&self) -> Option<&[String]> {
        match &self.data {
            Some(AxisData::Labels(labels)) => Some(labels),
            _ => None,
        }
    }

    /// Builds the scale of this axis.
    ///
    /// The y range is inverted so larger values map to smaller pixel rows.
    /// `nice` rounding only applies to numeric scales.
    pub fn build_scale(&self) -> ChartResult<Scale> {
        let range = match self.axis {
            AxisKind::X => self.range,
            AxisKind::Y => self.range.reversed(),
        };

        let kind = match self.scale_type {
            ScaleType::Band => {
                return build_categorical_scale(self.domain, range, self.category_padding)
                    .map(Scale::from);
            }
            ScaleType::Linear => NumericScaleKind::Linear,
            ScaleType::Log => NumericScaleKind::Log,
        };

        let scale = build_numeric_scale(self.domain, range, kind)?;
        let scale = match self.domain_limit {
            DomainLimit::Nice => scale.nice(NICE_TICK_COUNT),
            DomainLimit::Strict => scale,
        };
        Ok(scale.into())
    }
}

/// Computes the effective data domain of an axis.
///
/// Precedence: explicit numeric data, explicit labels (`[0, len - 1]`), then the
/// series. A `domain` override is applied on top of that result.
#[must_use]
pub fn resolve_domain(props: &AxisConfigProps, series: &[Series], axis: AxisKind) -> Bounds {
    let base = base_domain(props.data.as_ref(), series, axis);
    match &props.domain {
        Some(domain) => domain.apply(base),
        None => base.resolve_or_zero(),
    }
}

/// Computes the effective pixel range of an axis before y inversion.
#[must_use]
pub fn resolve_range(props: &AxisConfigProps, rect: DrawingRect, axis: AxisKind) -> Bounds {
    let base = match axis {
        AxisKind::X => Bounds::new(rect.x, rect.x + rect.width),
        AxisKind::Y => Bounds::new(rect.y, rect.y + rect.height),
    };
    match &props.range {
        Some(range) => range.apply(base.into()),
        None => base,
    }
}

fn base_domain(data: Option<&AxisData>, series: &[Series], axis: AxisKind) -> PartialBounds {
    match data {
        Some(AxisData::Numbers(values)) => {
            let bounds = finite_extent(values.iter().copied());
            if bounds.min.is_some() {
                return bounds;
            }
        }
        Some(AxisData::Labels(labels)) if !labels.is_empty() => {
            return PartialBounds::both(0.0, (labels.len() - 1) as f64);
        }
        _ => {}
    }

    match axis {
        AxisKind::X => {
            let longest = series.iter().map(Series::len).max().unwrap_or(0);
            if longest == 0 {
                PartialBounds::default()
            } else {
                PartialBounds::both(0.0, (longest - 1) as f64)
            }
        }
        AxisKind::Y => {
            let stacked = stack_series(series);
            finite_extent(stacked.iter().flat_map(Series::y_values))
        }
    }
}

fn finite_extent(values: impl Iterator<Item = f64>) -> PartialBounds {
    let mut min: Option<OrderedFloat<f64>> = None;
    let mut max: Option<OrderedFloat<f64>> = None;
    for value in values.filter(|value| value.is_finite()).map(OrderedFloat) {
        min = Some(min.map_or(value, |current| current.min(value)));
        max = Some(max.map_or(value, |current| current.max(value)));
    }
    PartialBounds::new(min.map(|v| v.0), max.map(|v| v.0))
}

#[cfg(test)]
mod tests {
    use super::finite_extent;
    use crate::core::types::PartialBounds;

    #[test]
    fn extent_skips_non_finite_values() {
        let extent = finite_extent([3.0, f64::NAN, -1.0, f64::INFINITY, 2.0].into_iter());
        assert_eq!(extent, PartialBounds::both(-1.0, 3.0));
    }

    #[test]
    fn extent_of_nothing_is_unresolved() {
        assert_eq!(finite_extent(std::iter::empty()), PartialBounds::default());
    }
}
