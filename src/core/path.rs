use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::curve::{CurveType, PathWriter, SegmentStart, write_curve};
use crate::core::scale::Scale;
use crate::core::series::SeriesPoint;

/// Curve and gap handling of a generated path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStyle {
    #[serde(default)]
    pub curve: CurveType,
    /// Skip gaps and join the surrounding defined points instead of breaking the path.
    #[serde(default)]
    pub connect_nulls: bool,
}

impl PathStyle {
    #[must_use]
    pub const fn new(curve: CurveType) -> Self {
        Self {
            curve,
            connect_nulls: false,
        }
    }

    #[must_use]
    pub const fn with_connect_nulls(mut self, connect_nulls: bool) -> Self {
        self.connect_nulls = connect_nulls;
        self
    }
}

/// Projected entry: pixel x, pixel y of the high value and of the low value.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ProjectedPoint {
    x: f64,
    high: f64,
    low: f64,
}

/// Builds an SVG line path; gaps break the line.
#[must_use]
pub fn build_line_path(
    points: &[SeriesPoint],
    x_scale: &Scale,
    y_scale: &Scale,
    curve: CurveType,
    x_data: Option<&[f64]>,
) -> String {
    build_line_path_with(points, x_scale, y_scale, x_data, PathStyle::new(curve))
}

/// Builds an SVG line path through the high value of every defined entry.
///
/// Runs of a single point are emitted as `M x,y Z` so round line caps still
/// render a dot.
#[must_use]
pub fn build_line_path_with(
    points: &[SeriesPoint],
    x_scale: &Scale,
    y_scale: &Scale,
    x_data: Option<&[f64]>,
    style: PathStyle,
) -> String {
    let baseline = y_scale.domain().min;
    let projected = project(points, x_scale, y_scale, x_data, baseline);

    let mut path = PathWriter::new();
    for run in runs(&projected, style.connect_nulls) {
        let line: Vec<(f64, f64)> = run.iter().map(|p| (p.x, p.high)).collect();
        write_curve(style.curve, &line, SegmentStart::Move, &mut path);
        if line.len() == 1 || style.curve == CurveType::LinearClosed {
            path.close();
        }
    }
    path.finish()
}

/// Builds a closed SVG area path between the low and high value of every entry.
#[must_use]
pub fn build_area_path(
    points: &[SeriesPoint],
    x_scale: &Scale,
    y_scale: &Scale,
    curve: CurveType,
    x_data: Option<&[f64]>,
) -> String {
    build_area_path_with(points, x_scale, y_scale, x_data, PathStyle::new(curve))
}

/// Builds a closed SVG area path.
///
/// Single values use the y domain minimum as their low value; ranges supply
/// both ends. Each run walks the upper edge forward and the lower edge backward.
#[must_use]
pub fn build_area_path_with(
    points: &[SeriesPoint],
    x_scale: &Scale,
    y_scale: &Scale,
    x_data: Option<&[f64]>,
    style: PathStyle,
) -> String {
    let baseline = y_scale.domain().min;
    let projected = project(points, x_scale, y_scale, x_data, baseline);
    let upper_curve = match style.curve {
        CurveType::LinearClosed => CurveType::Linear,
        other => other,
    };

    let mut path = PathWriter::new();
    for run in runs(&projected, style.connect_nulls) {
        let upper: Vec<(f64, f64)> = run.iter().map(|p| (p.x, p.high)).collect();
        let lower: Vec<(f64, f64)> = run.iter().rev().map(|p| (p.x, p.low)).collect();
        write_curve(upper_curve, &upper, SegmentStart::Move, &mut path);
        write_curve(upper_curve.reversed(), &lower, SegmentStart::Line, &mut path);
        path.close();
    }
    path.finish()
}

fn project(
    points: &[SeriesPoint],
    x_scale: &Scale,
    y_scale: &Scale,
    x_data: Option<&[f64]>,
    baseline: f64,
) -> Vec<Option<ProjectedPoint>> {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let value = (*point)?;
            let x = match x_scale {
                Scale::Band(band) => band.apply_center(index as f64),
                Scale::Numeric(numeric) => {
                    let x_value = x_data
                        .and_then(|data| data.get(index).copied())
                        .unwrap_or(index as f64);
                    numeric.apply(x_value)
                }
            };
            let projected = ProjectedPoint {
                x,
                high: y_scale.apply(value.high()),
                low: y_scale.apply(value.low_or(baseline)),
            };
            if projected.x.is_finite() && projected.high.is_finite() && projected.low.is_finite() {
                Some(projected)
            } else {
                trace!(index, "treating non-projectable entry as a gap");
                None
            }
        })
        .collect()
}

/// Splits projected entries into continuous runs of defined points.
fn runs(projected: &[Option<ProjectedPoint>], connect_nulls: bool) -> Vec<Vec<ProjectedPoint>> {
    if connect_nulls {
        let defined: Vec<ProjectedPoint> = projected.iter().flatten().copied().collect();
        return if defined.is_empty() {
            Vec::new()
        } else {
            vec![defined]
        };
    }

    projected
        .split(Option::is_none)
        .filter(|run| !run.is_empty())
        .map(|run| run.iter().flatten().copied().collect())
        .collect()
}
