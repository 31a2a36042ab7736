use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("no numeric component in '{0}'")]
    NoNumericComponent(String),

    #[error("numeric component too large: {0}")]
    Overflow(String),
}

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("empty version expectation")]
    Empty,

    #[error("invalid version in expectation: {0}")]
    InvalidVersion(#[from] NormalizeError),

    #[error("unsupported operator in '{0}': use 7.1.0, =7.1.0, >=7.1.0, 6.6..7.1 or *")]
    UnsupportedOperator(String),

    #[error("invalid version bound '{0}': must start with a digit")]
    MalformedBound(String),

    #[error("invalid range '{0}': lower bound is greater than upper bound")]
    InvertedRange(String),

    #[error("invalid version pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
