//! Process-launch seam used by the resolver.
use adeview_model::{Command, Env};
use async_trait::async_trait;

use crate::context::BuildContext;
use crate::resolver::LookupError;

/// Result of a finished child process whose stdout was captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    /// Raw stdout bytes.
    pub stdout: Vec<u8>,
    /// Exit code, `None` when the child was ended by a signal.
    pub status: Option<i32>,
}

/// Starts external commands on behalf of a build.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Runs `cmd` with the build environment, collects its stdout in memory
    /// and waits for it to exit. There is no timeout; the wait ends early
    /// only when the build's cancellation token fires.
    async fn capture(&self, cmd: &Command, build: &BuildContext) -> Result<Captured, LookupError>;

    /// Terminates every process tree whose environment carries all of
    /// `overrides`, returning how many processes were signalled.
    async fn kill(&self, overrides: &Env) -> Result<usize, LookupError>;
}
