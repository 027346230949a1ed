use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} fraction must be a finite non-negative number, got {value}")]
    InvalidFraction { name: &'static str, value: f64 },

    #[error("distribution fractions must sum to 1.0, got {0}")]
    DistributionSum(f64),

    #[error("total locations must be greater than zero")]
    NoLocations,

    #[error("threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
}
