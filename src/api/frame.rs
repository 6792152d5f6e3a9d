use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{
    AxisConfig, AxisKind, Bounds, DrawingRect, PathStyle, ProcessedGradient, Scale, ScaleType,
    Series, Tick, TickConfig, build_area_path_with, build_line_path_with, generate_ticks,
    resolve_gradient,
};
use crate::error::{ChartError, ChartResult};

pub const CHART_FRAME_JSON_SCHEMA_V1: u32 = 1;

/// Resolved axis: configuration, the scale actually used and its ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    pub config: AxisConfig,
    pub scale_type: ScaleType,
    /// Scale domain after `nice` rounding.
    pub scale_domain: Bounds,
    /// Scale range, inverted for y axes.
    pub scale_range: Bounds,
    pub bandwidth: Option<f64>,
    pub ticks: Vec<Tick>,
}

impl AxisFrame {
    pub(crate) fn new(config: AxisConfig, scale: &Scale, ticks: &TickConfig) -> Self {
        Self {
            config,
            scale_type: scale.scale_type(),
            scale_domain: scale.domain(),
            scale_range: scale.range(),
            bandwidth: scale.as_band().map(|band| band.bandwidth()),
            ticks: generate_ticks(scale, ticks),
        }
    }
}

/// Drawable geometry of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesFrame {
    pub y_axis_id: String,
    pub color: Option<String>,
    pub line_path: String,
    pub area_path: String,
    pub gradient: Option<ProcessedGradient>,
}

impl SeriesFrame {
    pub(crate) fn new(
        series: &Series,
        x_scale: &Scale,
        y_scale: &Scale,
        x_data: Option<&[f64]>,
        style: PathStyle,
    ) -> Self {
        let gradient = series.gradient.as_ref().and_then(|gradient| {
            let scale = match gradient.axis {
                AxisKind::X => x_scale,
                AxisKind::Y => y_scale,
            };
            resolve_gradient(gradient, scale)
        });

        Self {
            y_axis_id: series.y_axis().to_owned(),
            color: series.color.clone(),
            line_path: build_line_path_with(&series.data, x_scale, y_scale, x_data, style),
            area_path: build_area_path_with(&series.data, x_scale, y_scale, x_data, style),
            gradient,
        }
    }
}

/// Serializable geometry of a whole chart for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub rect: DrawingRect,
    pub x_axis: AxisFrame,
    pub y_axes: IndexMap<String, AxisFrame>,
    pub series: IndexMap<String, SeriesFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrameJsonContractV1 {
    pub schema_version: u32,
    pub frame: ChartFrame,
}

impl ChartFrame {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart frame: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartFrameJsonContractV1 {
            schema_version: CHART_FRAME_JSON_SCHEMA_V1,
            frame: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart frame contract v1: {e}"))
        })
    }

    /// Parses either a bare frame or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(frame) = serde_json::from_str::<ChartFrame>(input) {
            return Ok(frame);
        }
        let payload: ChartFrameJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart frame json payload: {e}"))
        })?;
        if payload.schema_version != CHART_FRAME_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart frame schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.frame)
    }

    #[must_use]
    pub fn y_axis(&self, axis_id: &str) -> Option<&AxisFrame> {
        self.y_axes.get(axis_id)
    }

    #[must_use]
    pub fn series_frame(&self, series_id: &str) -> Option<&SeriesFrame> {
        self.series.get(series_id)
    }
}
