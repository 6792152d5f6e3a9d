use serde::{Deserialize, Serialize};

use crate::core::types::Bounds;
use crate::error::{ChartError, ChartResult};

/// Default inner/outer padding ratio of band scales.
pub const DEFAULT_BAND_PADDING: f64 = 0.1;
/// Tick count used by `nice` when rounding a numeric domain.
pub const NICE_TICK_COUNT: usize = 10;
/// Upper bound on the number of categories a band scale accepts.
pub const MAX_BAND_CATEGORIES: usize = 1_000_000;

const MAX_BAND_PADDING: f64 = 1.0 - f64::EPSILON;
const MAX_NICE_ITERATIONS: usize = 10;

/// User-facing scale selector of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    #[default]
    Linear,
    Log,
    Band,
}

/// Mapping family of a numeric scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericScaleKind {
    #[default]
    Linear,
    /// Natural-log mapping; the domain must be strictly positive.
    Log,
}

/// Continuous data-to-pixel mapping (linear or logarithmic).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericScale {
    kind: NumericScaleKind,
    domain: Bounds,
    range: Bounds,
}

/// Builds a linear or log scale mapping `domain` onto `range`.
pub fn build_numeric_scale(
    domain: Bounds,
    range: Bounds,
    kind: NumericScaleKind,
) -> ChartResult<NumericScale> {
    NumericScale::new(domain, range, kind)
}

/// Builds a band scale with one band per integer category in `domain`.
pub fn build_categorical_scale(
    domain: Bounds,
    range: Bounds,
    padding: f64,
) -> ChartResult<BandScale> {
    BandScale::new(domain, range, padding)
}

impl NumericScale {
    pub fn new(domain: Bounds, range: Bounds, kind: NumericScaleKind) -> ChartResult<Self> {
        let domain = domain.validate_domain()?;
        let range = range.validate_range()?;
        if kind == NumericScaleKind::Log && domain.min <= 0.0 {
            return Err(ChartError::InvalidDomain {
                min: domain.min,
                max: domain.max,
                reason: "log scale domain must be strictly positive",
            });
        }
        Ok(Self {
            kind,
            domain,
            range,
        })
    }

    #[must_use]
    pub fn kind(self) -> NumericScaleKind {
        self.kind
    }

    #[must_use]
    pub fn domain(self) -> Bounds {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> Bounds {
        self.range
    }

    /// Maps a data value to a pixel coordinate.
    ///
    /// Zero-span domains map every value to the middle of the range. Log scales
    /// return `NaN` for non-positive values.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let d0 = self.transform(self.domain.min);
        let d1 = self.transform(self.domain.max);
        let span = d1 - d0;
        if span == 0.0 {
            return self.range.min + self.range.span() / 2.0;
        }
        let normalized = (self.transform(value) - d0) / span;
        self.range.min + normalized * self.range.span()
    }

    /// Maps a pixel coordinate back to a data value.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let range_span = self.range.span();
        if range_span == 0.0 || self.domain.is_zero_span() {
            return self.domain.min;
        }
        let d0 = self.transform(self.domain.min);
        let d1 = self.transform(self.domain.max);
        let normalized = (pixel - self.range.min) / range_span;
        self.untransform(d0 + normalized * (d1 - d0))
    }

    /// Returns human-friendly tick values inside the domain, about `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        match self.kind {
            NumericScaleKind::Linear => linear_ticks(self.domain.min, self.domain.max, count),
            NumericScaleKind::Log => log_ladder_ticks(self.domain.min, self.domain.max, count),
        }
    }

    /// Returns a copy whose domain is extended outward to round values.
    ///
    /// The rounded domain always contains the original one.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let domain = match self.kind {
            NumericScaleKind::Linear => nice_linear_domain(self.domain, count),
            NumericScaleKind::Log => nice_log_domain(self.domain),
        };
        Self { domain, ..self }
    }

    fn transform(self, value: f64) -> f64 {
        match self.kind {
            NumericScaleKind::Linear => value,
            NumericScaleKind::Log => {
                if value > 0.0 {
                    value.ln()
                } else {
                    f64::NAN
                }
            }
        }
    }

    fn untransform(self, value: f64) -> f64 {
        match self.kind {
            NumericScaleKind::Linear => value,
            NumericScaleKind::Log => value.exp(),
        }
    }
}

/// Categorical scale reserving one padded band per integer category.
///
/// Inner and outer padding both use the same ratio, and leftover space is split
/// evenly between both ends of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    domain: Bounds,
    range: Bounds,
    padding: f64,
    count: usize,
    first_category: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
    reversed: bool,
}

impl BandScale {
    pub fn new(domain: Bounds, range: Bounds, padding: f64) -> ChartResult<Self> {
        let domain = domain.validate_domain()?;
        let range = range.validate_range()?;
        let padding = if padding.is_finite() {
            padding.clamp(0.0, MAX_BAND_PADDING)
        } else {
            DEFAULT_BAND_PADDING
        };

        let first_category = domain.min.round();
        let last_category = domain.max.round();
        let category_span = (last_category - first_category).max(0.0);
        if category_span >= MAX_BAND_CATEGORIES as f64 {
            return Err(ChartError::InvalidDomain {
                min: domain.min,
                max: domain.max,
                reason: "band scale has too many categories",
            });
        }
        let count = category_span as usize + 1;
        let n = count as f64;

        let reversed = range.max < range.min;
        let (lo, hi) = if reversed {
            (range.max, range.min)
        } else {
            (range.min, range.max)
        };
        let span = hi - lo;
        let step = span / (n + padding).max(1.0);
        let start = lo + (span - step * (n - padding)) / 2.0;
        let bandwidth = step * (1.0 - padding);

        Ok(Self {
            domain,
            range,
            padding,
            count,
            first_category,
            start,
            step,
            bandwidth,
            reversed,
        })
    }

    #[must_use]
    pub fn domain(self) -> Bounds {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> Bounds {
        self.range
    }

    #[must_use]
    pub fn padding(self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.bandwidth
    }

    /// Distance between the starts of two adjacent bands.
    #[must_use]
    pub fn step(self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn category_count(self) -> usize {
        self.count
    }

    /// First and last category value.
    #[must_use]
    pub fn category_bounds(self) -> Bounds {
        Bounds::new(
            self.first_category,
            self.first_category + (self.count - 1) as f64,
        )
    }

    /// Category values (integers) covered by the scale, in order.
    #[must_use]
    pub fn categories(self) -> Vec<f64> {
        (0..self.count)
            .map(|index| self.first_category + index as f64)
            .collect()
    }

    /// Maps a category value to the start of its band, extended linearly for
    /// fractional and out-of-domain values.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let index = value - self.first_category;
        let slot = if self.reversed {
            (self.count as f64 - 1.0) - index
        } else {
            index
        };
        self.start + self.step * slot
    }

    /// Maps a category value to the centre of its band.
    #[must_use]
    pub fn apply_center(self, value: f64) -> f64 {
        self.apply(value) + self.bandwidth / 2.0
    }

    /// Returns the band start of `category`, or `None` when it is outside the domain.
    #[must_use]
    pub fn band_start(self, category: f64) -> Option<f64> {
        self.category_index(category).map(|_| self.apply(category))
    }

    #[must_use]
    pub fn band_center(self, category: f64) -> Option<f64> {
        self.band_start(category)
            .map(|start| start + self.bandwidth / 2.0)
    }

    /// Zero-based slot of `category`, when it is an in-domain integer.
    #[must_use]
    pub fn category_index(self, category: f64) -> Option<usize> {
        if !category.is_finite() || category.fract() != 0.0 {
            return None;
        }
        let index = category - self.first_category;
        if index < 0.0 || index >= self.count as f64 {
            return None;
        }
        Some(index as usize)
    }
}

/// Resolved scale of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Numeric(NumericScale),
    Band(BandScale),
}

impl From<NumericScale> for Scale {
    fn from(value: NumericScale) -> Self {
        Self::Numeric(value)
    }
}

impl From<BandScale> for Scale {
    fn from(value: BandScale) -> Self {
        Self::Band(value)
    }
}

impl Scale {
    #[must_use]
    pub fn scale_type(&self) -> ScaleType {
        match self {
            Self::Numeric(scale) => match scale.kind() {
                NumericScaleKind::Linear => ScaleType::Linear,
                NumericScaleKind::Log => ScaleType::Log,
            },
            Self::Band(_) => ScaleType::Band,
        }
    }

    #[must_use]
    pub fn domain(&self) -> Bounds {
        match self {
            Self::Numeric(scale) => scale.domain(),
            Self::Band(scale) => scale.domain(),
        }
    }

    #[must_use]
    pub fn range(&self) -> Bounds {
        match self {
            Self::Numeric(scale) => scale.range(),
            Self::Band(scale) => scale.range(),
        }
    }

    /// Maps a value to pixels; band scales return the band start.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Numeric(scale) => scale.apply(value),
            Self::Band(scale) => scale.apply(value),
        }
    }

    #[must_use]
    pub fn as_numeric(&self) -> Option<&NumericScale> {
        match self {
            Self::Numeric(scale) => Some(scale),
            Self::Band(_) => None,
        }
    }

    #[must_use]
    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            Self::Band(scale) => Some(scale),
            Self::Numeric(_) => None,
        }
    }

    #[must_use]
    pub fn is_band(&self) -> bool {
        matches!(self, Self::Band(_))
    }
}

/// Tick step as `(first multiple, last multiple, increment)`.
///
/// A negative increment `-k` means a step of `1 / k`; dividing by `k` keeps
/// fractional ticks free of accumulated rounding error.
fn tick_layout(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10_f64.powf(-power) / factor;
        i1 = (start * k).round();
        i2 = (stop * k).round();
        if i1 / k < start {
            i1 += 1.0;
        }
        if i2 / k > stop {
            i2 -= 1.0;
        }
        inc = -k;
    } else {
        let k = 10_f64.powf(power) * factor;
        i1 = (start / k).round();
        i2 = (stop / k).round();
        if i1 * k < start {
            i1 += 1.0;
        }
        if i2 * k > stop {
            i2 -= 1.0;
        }
        inc = k;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_layout(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_layout(start, stop, count as f64).2
}

/// Evenly spaced 1/2/5 multiples of a power of ten inside `[start, stop]`.
pub(crate) fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_layout(lo, hi, count as f64);
    if !(i2 >= i1) || !inc.is_finite() {
        return Vec::new();
    }

    let n = ((i2 - i1) as usize).saturating_add(1);
    let mut ticks: Vec<f64> = (0..n)
        .map(|offset| {
            let multiple = i1 + offset as f64;
            if inc < 0.0 {
                multiple / -inc
            } else {
                multiple * inc
            }
        })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

fn nice_linear_domain(domain: Bounds, count: usize) -> Bounds {
    let mut start = domain.min;
    let mut stop = domain.max;
    if !domain.is_finite() || start == stop || count == 0 {
        return domain;
    }

    let mut previous_step = None;
    for _ in 0..MAX_NICE_ITERATIONS {
        let step = tick_increment(start, stop, count);
        if previous_step == Some(step) {
            break;
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }

    if start.is_finite() && stop.is_finite() {
        Bounds::new(start.min(domain.min), stop.max(domain.max))
    } else {
        domain
    }
}

fn nice_log_domain(domain: Bounds) -> Bounds {
    if domain.min <= 0.0 || !domain.is_finite() {
        return domain;
    }
    let min = 10_f64.powf(domain.min.log10().floor());
    let max = 10_f64.powf(domain.max.log10().ceil());
    Bounds::new(min.min(domain.min), max.max(domain.max))
}

/// 1/2/5-per-decade ladder bounded by the domain, sampled down to `tick_count`.
fn log_ladder_ticks(start: f64, end: f64, tick_count: usize) -> Vec<f64> {
    if tick_count == 0 || start <= 0.0 || end <= 0.0 {
        return Vec::new();
    }
    if start == end {
        return vec![start];
    }

    let min = start.min(end);
    let max = start.max(end);
    let min_exp = min.log10().floor() as i32;
    let max_exp = max.log10().ceil() as i32;

    let mut ticks = Vec::new();
    for exp in min_exp..=max_exp {
        let decade = 10_f64.powi(exp);
        for multiplier in [1.0, 2.0, 5.0] {
            let candidate = decade * multiplier;
            if candidate >= min && candidate <= max {
                ticks.push(candidate);
            }
        }
    }
    if ticks.is_empty() {
        ticks.push(min);
        ticks.push(max);
    }

    ticks.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
    ticks.dedup_by(|lhs, rhs| approx_equal(*lhs, *rhs));
    if ticks.len() > tick_count {
        ticks = evenly_sample(&ticks, tick_count);
    }
    ticks
}

fn evenly_sample(values: &[f64], target: usize) -> Vec<f64> {
    if values.len() <= target || target == 0 {
        return values.to_vec();
    }
    if target == 1 {
        return vec![values[0]];
    }

    let last_index = values.len() - 1;
    let mut sampled: Vec<f64> = Vec::with_capacity(target);
    for step in 0..target {
        let ratio = (step as f64) / ((target - 1) as f64);
        let index = (ratio * (last_index as f64)).round() as usize;
        let value = values[index.min(last_index)];
        if sampled
            .last()
            .is_some_and(|previous| approx_equal(*previous, value))
        {
            continue;
        }
        sampled.push(value);
    }
    sampled
}

pub(crate) fn approx_equal(lhs: f64, rhs: f64) -> bool {
    let scale = lhs.abs().max(rhs.abs()).max(1.0);
    (lhs - rhs).abs() <= scale * 1e-12
}

#[cfg(test)]
mod tests {
    use super::{linear_ticks, log_ladder_ticks, nice_linear_domain, tick_increment};
    use crate::core::types::Bounds;

    #[test]
    fn linear_ticks_use_one_two_five_steps() {
        assert_eq!(linear_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(linear_ticks(0.0, 100.0, 4), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(linear_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn linear_ticks_stay_inside_domain() {
        let ticks = linear_ticks(1.2, 97.8, 10);
        assert_eq!(ticks.first().copied(), Some(10.0));
        assert_eq!(ticks.last().copied(), Some(90.0));
    }

    #[test]
    fn fractional_increment_is_encoded_as_negative_reciprocal() {
        assert_eq!(tick_increment(0.0, 1.0, 10), -10.0);
        assert_eq!(tick_increment(0.0, 100.0, 10), 10.0);
    }

    #[test]
    fn nice_domain_rounds_outward() {
        let nice = nice_linear_domain(Bounds::new(1.2, 97.8), 10);
        assert_eq!(nice, Bounds::new(0.0, 100.0));
    }

    #[test]
    fn log_ladder_covers_decades() {
        let ticks = log_ladder_ticks(1.0, 1000.0, 20);
        assert_eq!(
            ticks,
            vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0]
        );
        let sampled = log_ladder_ticks(1.0, 1000.0, 4);
        assert_eq!(sampled.len(), 4);
        assert_eq!(sampled.first().copied(), Some(1.0));
        assert_eq!(sampled.last().copied(), Some(1000.0));
    }
}
