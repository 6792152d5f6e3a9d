use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::gradient::GradientDefinition;

/// Axis id used when a series or axis does not name one.
pub const DEFAULT_AXIS_ID: &str = "default";

/// One defined data entry: a single value or a `[low, high]` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Value(f64),
    Range([f64; 2]),
}

impl DataValue {
    #[must_use]
    pub const fn range(low: f64, high: f64) -> Self {
        Self::Range([low, high])
    }

    /// Value used by line paths: the value itself or the high end of a range.
    #[must_use]
    pub fn high(self) -> f64 {
        match self {
            Self::Value(value) => value,
            Self::Range([_, high]) => high,
        }
    }

    /// Low end of a range, or `baseline` for single values.
    #[must_use]
    pub fn low_or(self, baseline: f64) -> f64 {
        match self {
            Self::Value(_) => baseline,
            Self::Range([low, _]) => low,
        }
    }

    fn extent(self) -> impl Iterator<Item = f64> {
        let (first, second) = match self {
            Self::Value(value) => (value, None),
            Self::Range([low, high]) => (low, Some(high)),
        };
        std::iter::once(first).chain(second)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<[f64; 2]> for DataValue {
    fn from(value: [f64; 2]) -> Self {
        Self::Range(value)
    }
}

/// Entry of a series; `None` is a gap.
pub type SeriesPoint = Option<DataValue>;

/// Ordered data owned by the caller plus its identifying metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    #[serde(default)]
    pub data: Vec<SeriesPoint>,
    #[serde(default)]
    pub y_axis_id: Option<String>,
    #[serde(default)]
    pub stack_id: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, skip_serializing)]
    pub gradient: Option<GradientDefinition>,
}

impl Series {
    #[must_use]
    pub fn new(id: impl Into<String>, data: Vec<SeriesPoint>) -> Self {
        Self {
            id: id.into(),
            data,
            y_axis_id: None,
            stack_id: None,
            color: None,
            gradient: None,
        }
    }

    /// Builds a series from plain values, mapping non-finite values to gaps.
    #[must_use]
    pub fn from_values(id: impl Into<String>, values: &[f64]) -> Self {
        let data = values
            .iter()
            .map(|value| value.is_finite().then_some(DataValue::Value(*value)))
            .collect();
        Self::new(id, data)
    }

    #[must_use]
    pub fn with_y_axis_id(mut self, y_axis_id: impl Into<String>) -> Self {
        self.y_axis_id = Some(y_axis_id.into());
        self
    }

    #[must_use]
    pub fn with_stack_id(mut self, stack_id: impl Into<String>) -> Self {
        self.stack_id = Some(stack_id.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_gradient(mut self, gradient: GradientDefinition) -> Self {
        self.gradient = Some(gradient);
        self
    }

    /// The y axis this series is plotted against.
    #[must_use]
    pub fn y_axis(&self) -> &str {
        self.y_axis_id.as_deref().unwrap_or(DEFAULT_AXIS_ID)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Finite y-values of every defined entry, both ends for ranges.
    pub fn y_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data
            .iter()
            .flatten()
            .flat_map(|value| value.extent())
            .filter(|value| value.is_finite())
    }
}

/// Stacks series sharing a `stack_id` into cumulative `[low, high]` ranges.
///
/// Series are stacked in input order; at each index the low of a series is the
/// high of the previous defined entry of its stack (starting at `0`). Series
/// without a `stack_id` and gaps are returned unchanged, and a gap does not
/// advance the running total of its stack.
#[must_use]
pub fn stack_series(series: &[Series]) -> Vec<Series> {
    let mut totals: IndexMap<&str, Vec<f64>> = IndexMap::new();

    series
        .iter()
        .map(|entry| {
            let Some(stack_id) = entry.stack_id.as_deref() else {
                return entry.clone();
            };
            let running = totals.entry(stack_id).or_default();
            if running.len() < entry.data.len() {
                running.resize(entry.data.len(), 0.0);
            }

            let data = entry
                .data
                .iter()
                .zip(running.iter_mut())
                .map(|(point, total)| {
                    point.map(|value| {
                        let delta = value.high() - value.low_or(0.0);
                        let low = *total;
                        let high = low + delta;
                        *total = high;
                        DataValue::range(low, high)
                    })
                })
                .collect();

            Series {
                data,
                ..entry.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DataValue, Series, stack_series};

    #[test]
    fn data_value_deserializes_numbers_and_pairs() {
        let parsed: Vec<Option<DataValue>> =
            serde_json::from_str("[1.5, [2, 4], null]").expect("parse");
        assert_eq!(
            parsed,
            vec![
                Some(DataValue::Value(1.5)),
                Some(DataValue::range(2.0, 4.0)),
                None
            ]
        );
    }

    #[test]
    fn unstacked_series_are_untouched() {
        let series = vec![Series::from_values("a", &[1.0, 2.0])];
        assert_eq!(stack_series(&series), series);
    }

    #[test]
    fn gaps_do_not_advance_running_total() {
        let series = vec![
            Series::new("a", vec![Some(1.0.into()), None]).with_stack_id("s"),
            Series::new("b", vec![Some(2.0.into()), Some(3.0.into())]).with_stack_id("s"),
        ];
        let stacked = stack_series(&series);
        assert_eq!(stacked[0].data, vec![Some(DataValue::range(0.0, 1.0)), None]);
        assert_eq!(
            stacked[1].data,
            vec![
                Some(DataValue::range(1.0, 3.0)),
                Some(DataValue::range(0.0, 3.0))
            ]
        );
    }
}
