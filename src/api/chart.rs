use indexmap::IndexMap;
use tracing::debug;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{
    AxisConfig, AxisConfigProps, AxisKind, ChartInset, DEFAULT_AXIS_ID, DrawingRect,
    PathStyle, ProcessedGradient, Scale, Series, Tick, TickConfig, build_area_path_with,
    build_line_path_with, generate_ticks, resolve_gradient, stack_series,
};
use crate::error::{ChartError, ChartResult};

use super::frame::{AxisFrame, ChartFrame, SeriesFrame};

/// Cartesian chart description: drawing area, series and axis configuration.
///
/// The chart owns configuration only. Every geometry query recomputes from it,
/// so callers can update series or axes between render passes freely.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianChart {
    rect: DrawingRect,
    series: Vec<Series>,
    x_axis: AxisConfigProps,
    y_axes: IndexMap<String, AxisConfigProps>,
    x_ticks: TickConfig,
    y_ticks: IndexMap<String, TickConfig>,
    path_style: PathStyle,
}

impl CartesianChart {
    #[must_use]
    pub fn new(rect: DrawingRect) -> Self {
        Self {
            rect,
            series: Vec::new(),
            x_axis: AxisConfigProps::default(),
            y_axes: IndexMap::new(),
            x_ticks: TickConfig::default(),
            y_ticks: IndexMap::new(),
            path_style: PathStyle::default(),
        }
    }

    /// Chart filling a `width` x `height` container minus `inset`.
    #[must_use]
    pub fn from_container(width: f64, height: f64, inset: ChartInset) -> Self {
        Self::new(DrawingRect::from_container(width, height, inset))
    }

    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, props: AxisConfigProps) -> Self {
        self.x_axis = props;
        self
    }

    /// Adds or replaces a y axis, keyed by `props.id` (the default axis when unset).
    #[must_use]
    pub fn with_y_axis(mut self, props: AxisConfigProps) -> Self {
        let id = props
            .id
            .clone()
            .unwrap_or_else(|| DEFAULT_AXIS_ID.to_owned());
        self.y_axes.insert(id, props);
        self
    }

    #[must_use]
    pub fn with_x_ticks(mut self, config: TickConfig) -> Self {
        self.x_ticks = config;
        self
    }

    #[must_use]
    pub fn with_y_ticks(mut self, axis_id: impl Into<String>, config: TickConfig) -> Self {
        self.y_ticks.insert(axis_id.into(), config);
        self
    }

    #[must_use]
    pub fn with_path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }

    #[must_use]
    pub fn drawing_rect(&self) -> DrawingRect {
        self.rect
    }

    pub fn set_drawing_rect(&mut self, rect: DrawingRect) {
        self.rect = rect;
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn set_series(&mut self, series: Vec<Series>) {
        self.series = series;
    }

    #[must_use]
    pub fn path_style(&self) -> PathStyle {
        self.path_style
    }

    /// Ids of the y axes, the implicit default axis included when none is configured.
    #[must_use]
    pub fn y_axis_ids(&self) -> Vec<String> {
        if self.y_axes.is_empty() {
            vec![DEFAULT_AXIS_ID.to_owned()]
        } else {
            self.y_axes.keys().cloned().collect()
        }
    }

    /// Resolved x axis; its domain covers every series.
    #[must_use]
    pub fn x_axis_config(&self) -> AxisConfig {
        AxisConfig::resolve(&self.x_axis, &self.series, self.rect, AxisKind::X)
    }

    /// Resolved y axis `axis_id`; its domain covers the series plotted against it.
    pub fn y_axis_config(&self, axis_id: &str) -> ChartResult<AxisConfig> {
        let props = self.y_axis_props(axis_id)?;
        let series: Vec<Series> = self
            .series
            .iter()
            .filter(|series| series.y_axis() == axis_id)
            .cloned()
            .collect();
        Ok(AxisConfig::resolve(&props, &series, self.rect, AxisKind::Y))
    }

    pub fn x_scale(&self) -> ChartResult<Scale> {
        self.x_axis_config().build_scale()
    }

    pub fn y_scale(&self, axis_id: &str) -> ChartResult<Scale> {
        self.y_axis_config(axis_id)?.build_scale()
    }

    pub fn x_ticks(&self) -> ChartResult<Vec<Tick>> {
        Ok(generate_ticks(&self.x_scale()?, &self.x_ticks))
    }

    pub fn y_ticks(&self, axis_id: &str) -> ChartResult<Vec<Tick>> {
        let scale = self.y_scale(axis_id)?;
        Ok(generate_ticks(&scale, &self.y_tick_config(axis_id)))
    }

    /// SVG line path of series `series_id`, drawn through its stacked values.
    pub fn line_path(&self, series_id: &str) -> ChartResult<String> {
        let stacked = self.stacked_series(series_id)?;
        let x_scale = self.x_scale()?;
        let y_scale = self.y_scale(stacked.y_axis())?;
        Ok(build_line_path_with(
            &stacked.data,
            &x_scale,
            &y_scale,
            self.x_axis.numeric_data(),
            self.path_style,
        ))
    }

    /// SVG area path of series `series_id`, filled down to its stack floor.
    pub fn area_path(&self, series_id: &str) -> ChartResult<String> {
        let stacked = self.stacked_series(series_id)?;
        let x_scale = self.x_scale()?;
        let y_scale = self.y_scale(stacked.y_axis())?;
        Ok(build_area_path_with(
            &stacked.data,
            &x_scale,
            &y_scale,
            self.x_axis.numeric_data(),
            self.path_style,
        ))
    }

    /// Processed gradient of series `series_id`, `None` when it has none or
    /// the definition cannot be resolved.
    pub fn series_gradient(&self, series_id: &str) -> ChartResult<Option<ProcessedGradient>> {
        let series = self.find_series(series_id)?;
        let Some(gradient) = &series.gradient else {
            return Ok(None);
        };
        let scale = match gradient.axis {
            AxisKind::X => self.x_scale()?,
            AxisKind::Y => self.y_scale(series.y_axis())?,
        };
        Ok(resolve_gradient(gradient, &scale))
    }

    /// Resolves every axis and series into a serializable frame.
    pub fn frame(&self) -> ChartResult<ChartFrame> {
        let x_config = self.x_axis_config();
        let x_scale = x_config.build_scale()?;
        let x_axis = AxisFrame::new(x_config, &x_scale, &self.x_ticks);

        let mut y_axes = IndexMap::new();
        let mut y_scales = IndexMap::new();
        for axis_id in self.y_axis_ids() {
            let config = self.y_axis_config(&axis_id)?;
            let scale = config.build_scale()?;
            let frame = AxisFrame::new(config, &scale, &self.y_tick_config(&axis_id));
            y_scales.insert(axis_id.clone(), scale);
            y_axes.insert(axis_id, frame);
        }

        let stacked = stack_series(&self.series);
        let x_data = self.x_axis.numeric_data();
        let project = |series: &Series| -> ChartResult<(String, SeriesFrame)> {
            let y_scale = y_scales
                .get(series.y_axis())
                .ok_or_else(|| ChartError::UnknownAxis(series.y_axis().to_owned()))?;
            let frame = SeriesFrame::new(series, &x_scale, y_scale, x_data, self.path_style);
            Ok((series.id.clone(), frame))
        };

        #[cfg(feature = "parallel-projection")]
        let projected: Vec<ChartResult<(String, SeriesFrame)>> =
            stacked.par_iter().map(project).collect();

        #[cfg(not(feature = "parallel-projection"))]
        let projected: Vec<ChartResult<(String, SeriesFrame)>> =
            stacked.iter().map(project).collect();

        let series = projected
            .into_iter()
            .collect::<ChartResult<IndexMap<String, SeriesFrame>>>()?;

        debug!(
            series = series.len(),
            y_axes = y_axes.len(),
            "chart frame resolved"
        );

        Ok(ChartFrame {
            rect: self.rect,
            x_axis,
            y_axes,
            series,
        })
    }

    fn y_axis_props(&self, axis_id: &str) -> ChartResult<AxisConfigProps> {
        if let Some(props) = self.y_axes.get(axis_id) {
            return Ok(props.clone());
        }
        if self.y_axes.is_empty() && axis_id == DEFAULT_AXIS_ID {
            return Ok(AxisConfigProps::default());
        }
        Err(ChartError::UnknownAxis(axis_id.to_owned()))
    }

    fn y_tick_config(&self, axis_id: &str) -> TickConfig {
        self.y_ticks.get(axis_id).cloned().unwrap_or_default()
    }

    fn find_series(&self, series_id: &str) -> ChartResult<&Series> {
        self.series
            .iter()
            .find(|series| series.id == series_id)
            .ok_or_else(|| ChartError::UnknownSeries(series_id.to_owned()))
    }

    fn stacked_series(&self, series_id: &str) -> ChartResult<Series> {
        let index = self
            .series
            .iter()
            .position(|series| series.id == series_id)
            .ok_or_else(|| ChartError::UnknownSeries(series_id.to_owned()))?;
        // Stacking depends on every series sharing the stack id that precedes it.
        let mut stacked = stack_series(&self.series[..=index]);
        stacked
            .pop()
            .ok_or_else(|| ChartError::UnknownSeries(series_id.to_owned()))
    }
}
