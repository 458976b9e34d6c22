use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid series: {0:?}")]
    InvalidSeries(String),

    #[error("invalid view name: {0:?}")]
    InvalidViewName(String),

    #[error("invalid key-value pair {0:?} (expected KEY=VALUE)")]
    InvalidKeyValue(String),

    #[error("invalid label pattern: {0}")]
    InvalidPattern(String),
}
