use adeview_core::resolver::LookupError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid command: {0}")]
    InvalidSpec(String),

    #[error("spawn of '{program}' failed: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("process wait cancelled")]
    Cancelled,

    #[error("kill of pid {pid} failed: {source}")]
    Kill {
        pid: i32,
        #[source]
        source: std::io::Error,
    },

    #[error("process tree scan is not supported on this platform")]
    Unsupported,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ExecError> for LookupError {
    fn from(e: ExecError) -> Self {
        match e {
            ExecError::Spawn { program, source } => LookupError::Spawn {
                program,
                reason: source.to_string(),
            },
            ExecError::Io(e) => LookupError::Io(e.to_string()),
            ExecError::Cancelled => LookupError::Cancelled,
            e @ (ExecError::Kill { .. } | ExecError::Unsupported) => LookupError::Kill(e.to_string()),
            e @ (ExecError::InvalidSpec(_) | ExecError::Internal(_)) => LookupError::Io(e.to_string()),
        }
    }
}
