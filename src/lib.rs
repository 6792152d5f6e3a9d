//! chart-geom: coordinate geometry for Cartesian charts.
//!
//! The crate turns series data and axis configuration into scales, ticks,
//! SVG path strings and normalized gradients. It does not render anything;
//! hosts consume the computed geometry with their own drawing layer.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{CartesianChart, ChartFrame};
pub use error::{ChartError, ChartResult};
