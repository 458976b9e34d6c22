use adeview_model::ModelError;
use thiserror::Error;

/// Why the latest public label could not be determined.
///
/// Every variant leads the resolver to the `-latest` fallback.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to start '{program}': {reason}")]
    Spawn { program: String, reason: String },

    #[error("io error: {0}")]
    Io(String),

    #[error("lookup cancelled")]
    Cancelled,

    #[error("failed to kill stale processes: {0}")]
    Kill(String),

    #[error("showlabels printed no label")]
    NoLabel,

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<std::io::Error> for LookupError {
    fn from(e: std::io::Error) -> Self {
        LookupError::Io(e.to_string())
    }
}
