use std::fmt;

use adeview_model::Env;
use tokio_util::sync::CancellationToken;

/// Per-build state handed to the resolver and its collaborators.
///
/// The resolver never interprets it directly: the environment feeds view
/// name templates and child processes, the token interrupts a running
/// lookup.
#[derive(Clone, Default)]
pub struct BuildContext {
    env: Env,
    cancel: CancellationToken,
}

impl BuildContext {
    pub fn new(env: Env, cancel: CancellationToken) -> Self {
        Self { env, cancel }
    }

    /// Build environment (`JOB_NAME`, `BUILD_NUMBER`, ...).
    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn cancel(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn with_env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("env_len", &self.env.len())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}
