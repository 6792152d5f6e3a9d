use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::scale::{BandScale, NumericScale, Scale};
use crate::core::types::Bounds;
use crate::error::{ChartError, ChartResult};

/// Default cap on synthesized candidates in tick-interval mode.
pub const DEFAULT_TICK_CANDIDATE_CAP: usize = 100;
/// Auto tick count of numeric axes without any tick configuration.
pub const DEFAULT_TICK_COUNT: usize = 5;
/// Lower bound on the tick count of tick-interval mode.
pub const MIN_INTERVAL_TICK_COUNT: usize = 4;

pub type TickPredicateFn = dyn Fn(f64) -> bool + Send + Sync;

/// Explicit tick selection, taking priority over count and interval modes.
#[derive(Clone)]
pub enum TickSelector {
    /// Exact values (category values for band scales).
    Values(Vec<f64>),
    /// Keeps candidates accepted by the predicate.
    Predicate(Arc<TickPredicateFn>),
    /// `true` keeps every candidate, `false` none.
    All(bool),
}

impl TickSelector {
    #[must_use]
    pub fn predicate(f: impl Fn(f64) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }
}

impl fmt::Debug for TickSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Values(values) => f.debug_tuple("Values").field(values).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::All(all) => f.debug_tuple("All").field(all).finish(),
        }
    }
}

impl PartialEq for TickSelector {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Values(lhs), Self::Values(rhs)) => lhs == rhs,
            (Self::Predicate(lhs), Self::Predicate(rhs)) => Arc::ptr_eq(lhs, rhs),
            (Self::All(lhs), Self::All(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

/// Labeled reference point of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Data value, or category value for band scales.
    pub value: f64,
    /// Pixel position; band ticks mark category centres.
    pub position: f64,
}

/// Tick configuration of an axis.
///
/// Modes are tried in order: `ticks`, `requested_tick_count`, `tick_interval`.
/// Count and interval modes are ignored by band scales.
#[derive(Debug, Clone, PartialEq)]
pub struct TickConfig {
    pub ticks: Option<TickSelector>,
    pub possible_tick_values: Option<Vec<f64>>,
    pub requested_tick_count: Option<usize>,
    /// Desired pixel spacing between ticks.
    pub tick_interval: Option<f64>,
    /// Maximum number of synthesized candidates in tick-interval mode.
    pub candidate_cap: usize,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            ticks: None,
            possible_tick_values: None,
            requested_tick_count: None,
            tick_interval: None,
            candidate_cap: DEFAULT_TICK_CANDIDATE_CAP,
        }
    }
}

impl TickConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_values(mut self, values: Vec<f64>) -> Self {
        self.ticks = Some(TickSelector::Values(values));
        self
    }

    #[must_use]
    pub fn with_predicate(mut self, f: impl Fn(f64) -> bool + Send + Sync + 'static) -> Self {
        self.ticks = Some(TickSelector::predicate(f));
        self
    }

    #[must_use]
    pub fn with_all(mut self, all: bool) -> Self {
        self.ticks = Some(TickSelector::All(all));
        self
    }

    #[must_use]
    pub fn with_possible_tick_values(mut self, values: Vec<f64>) -> Self {
        self.possible_tick_values = Some(values);
        self
    }

    #[must_use]
    pub fn with_requested_tick_count(mut self, count: usize) -> Self {
        self.requested_tick_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_tick_interval(mut self, interval_px: f64) -> Self {
        self.tick_interval = Some(interval_px);
        self
    }

    #[must_use]
    pub fn with_candidate_cap(mut self, cap: usize) -> Self {
        self.candidate_cap = cap;
        self
    }

    fn validate(&self) -> ChartResult<()> {
        if let Some(interval) = self.tick_interval {
            if !interval.is_finite() || interval <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "tick interval must be finite and > 0, got {interval}"
                )));
            }
        }
        if self.candidate_cap < 2 {
            return Err(ChartError::InvalidData(
                "tick candidate cap must be >= 2".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Generates ticks, logging invalid configuration and returning no ticks for it.
#[must_use]
pub fn generate_ticks(scale: &Scale, config: &TickConfig) -> Vec<Tick> {
    try_generate_ticks(scale, config).unwrap_or_else(|err| {
        warn!(error = %err, "tick generation skipped");
        Vec::new()
    })
}

/// Generates the ordered ticks of `scale` for `config`.
pub fn try_generate_ticks(scale: &Scale, config: &TickConfig) -> ChartResult<Vec<Tick>> {
    config.validate()?;
    let ticks = match scale {
        Scale::Numeric(numeric) => numeric_ticks(*numeric, config),
        Scale::Band(band) => band_ticks(*band, config),
    };
    Ok(ticks)
}

fn numeric_ticks(scale: NumericScale, config: &TickConfig) -> Vec<Tick> {
    let domain = scale.domain();
    let auto_count = config.requested_tick_count.unwrap_or(DEFAULT_TICK_COUNT);

    let values = match &config.ticks {
        Some(TickSelector::Values(values)) => {
            let kept: Vec<f64> = values
                .iter()
                .copied()
                .filter(|value| value.is_finite() && domain.contains(*value))
                .collect();
            if kept.len() != values.len() {
                trace!(
                    dropped = values.len() - kept.len(),
                    "dropped explicit ticks outside the domain"
                );
            }
            kept
        }
        Some(TickSelector::Predicate(predicate)) => {
            let candidates = match &config.possible_tick_values {
                Some(possible) => finite_values(possible),
                None => scale.ticks(auto_count),
            };
            candidates
                .into_iter()
                .filter(|value| predicate(*value))
                .collect()
        }
        Some(TickSelector::All(true)) => config
            .possible_tick_values
            .as_deref()
            .map(finite_values)
            .unwrap_or_default(),
        Some(TickSelector::All(false)) => Vec::new(),
        None => match (config.requested_tick_count, config.tick_interval) {
            (Some(count), _) => scale.ticks(count),
            (None, Some(interval)) => {
                let candidates = match &config.possible_tick_values {
                    Some(possible) => finite_values(possible),
                    None => synthesize_candidates(domain, config.candidate_cap),
                };
                let range_span = scale.range().span().abs();
                let from_space = (range_span / interval).floor() as usize;
                let tick_count = from_space.max(MIN_INTERVAL_TICK_COUNT);
                select_space_between(&candidates, tick_count)
            }
            (None, None) => scale.ticks(DEFAULT_TICK_COUNT),
        },
    };

    values
        .into_iter()
        .map(|value| Tick {
            value,
            position: scale.apply(value),
        })
        .collect()
}

fn band_ticks(scale: BandScale, config: &TickConfig) -> Vec<Tick> {
    let categories: Vec<f64> = match &config.ticks {
        Some(TickSelector::Values(values)) => {
            let kept: Vec<f64> = values
                .iter()
                .copied()
                .filter(|value| scale.category_index(*value).is_some())
                .collect();
            if kept.len() != values.len() {
                trace!(
                    dropped = values.len() - kept.len(),
                    "dropped explicit ticks outside the categories"
                );
            }
            kept
        }
        Some(TickSelector::Predicate(predicate)) => scale
            .categories()
            .into_iter()
            .filter(|value| predicate(*value))
            .collect(),
        Some(TickSelector::All(false)) => Vec::new(),
        Some(TickSelector::All(true)) | None => scale.categories(),
    };

    categories
        .into_iter()
        .map(|value| Tick {
            value,
            position: scale.apply_center(value),
        })
        .collect()
}

fn finite_values(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .collect()
}

/// Integer candidates spanning the domain, down-sampled to at most `cap`.
///
/// When down-sampling, the exact domain max is always the last candidate.
fn synthesize_candidates(domain: Bounds, cap: usize) -> Vec<f64> {
    let first = domain.min.ceil();
    let last = domain.max.floor();
    if last < first {
        let mut values = vec![domain.min, domain.max];
        values.dedup();
        return values;
    }

    // Compared in f64: spans past `usize::MAX` must not wrap.
    let integer_span = last - first;
    if integer_span < cap as f64 {
        let integer_count = (integer_span as usize).saturating_add(1);
        return (0..integer_count).map(|i| first + i as f64).collect();
    }

    let slots = cap - 1;
    let stride = integer_span / slots as f64;
    let mut values: Vec<f64> = (0..slots)
        .map(|i| first + (i as f64 * stride).round())
        .collect();
    values.push(domain.max);
    values.dedup();
    values
}

/// Picks `tick_count` candidates spread evenly by index, always keeping both ends.
pub(crate) fn select_space_between(candidates: &[f64], tick_count: usize) -> Vec<f64> {
    if candidates.len() <= tick_count {
        return candidates.to_vec();
    }
    if tick_count == 0 {
        return Vec::new();
    }
    if tick_count == 1 {
        return vec![candidates[0]];
    }

    let last_index = candidates.len() - 1;
    let mut indices: SmallVec<[usize; 16]> = (0..tick_count)
        .map(|i| {
            if i == tick_count - 1 {
                last_index
            } else {
                ((i * last_index) as f64 / (tick_count - 1) as f64).round() as usize
            }
        })
        .collect();
    indices.dedup();
    indices.into_iter().map(|index| candidates[index]).collect()
}
