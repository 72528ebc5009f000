pub mod config;
pub use config::{Config, ExportConfig, SampleConfig, TestConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sample contains no observations")]
    EmptySample,
    #[error("value {value} outside supported range [{min}, {max}]")]
    OutOfRange { value: i64, min: i64, max: i64 },
    #[error("significance level must lie in (0, 1), got {0}")]
    InvalidSignificance(f64),
    #[error("probability {alpha} outside approximation domain [0.001, 0.999]")]
    Domain { alpha: f64 },
    #[error("degrees of freedom must be positive, got {0}")]
    InvalidDegreesOfFreedom(i64),
    #[error("Config error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FitLensError>;
