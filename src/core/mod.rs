pub mod axis;
pub mod color;
pub mod curve;
pub mod gradient;
pub mod path;
pub mod scale;
pub mod series;
pub mod ticks;
pub mod types;

pub use axis::{
    AxisConfig, AxisConfigProps, AxisData, BoundsOverride, DomainLimit, resolve_domain,
    resolve_range,
};
pub use color::Color;
pub use curve::CurveType;
pub use gradient::{
    GradientDefinition, GradientStop, GradientStops, ProcessedGradient, effective_stops,
    resolve_gradient, sample_gradient_color, try_resolve_gradient, try_sample_gradient_color,
};
pub use path::{
    PathStyle, build_area_path, build_area_path_with, build_line_path, build_line_path_with,
};
pub use scale::{
    BandScale, MAX_BAND_CATEGORIES, NumericScale, NumericScaleKind, Scale, ScaleType,
    build_categorical_scale, build_numeric_scale,
};
pub use series::{DEFAULT_AXIS_ID, DataValue, Series, SeriesPoint, stack_series};
pub use ticks::{Tick, TickConfig, TickSelector, generate_ticks, try_generate_ticks};
pub use types::{AxisKind, Bounds, ChartInset, DrawingRect, PartialBounds};
