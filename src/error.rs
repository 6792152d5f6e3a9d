use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid domain: min={min}, max={max} ({reason})")]
    InvalidDomain {
        min: f64,
        max: f64,
        reason: &'static str,
    },

    #[error("invalid range: start={start}, end={end}")]
    InvalidRange { start: f64, end: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("unknown axis id `{0}`")]
    UnknownAxis(String),

    #[error("unknown series id `{0}`")]
    UnknownSeries(String),
}
