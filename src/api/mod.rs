mod chart;
mod frame;

pub use chart::CartesianChart;
pub use frame::{
    AxisFrame, CHART_FRAME_JSON_SCHEMA_V1, ChartFrame, ChartFrameJsonContractV1, SeriesFrame,
};
