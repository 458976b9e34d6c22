use std::{fmt, path::PathBuf, process::Stdio};

use adeview_model::{Command, Env};
use tracing::trace;

use crate::ExecError;

/// Everything needed to spawn one `ade` invocation.
#[derive(Debug, Clone)]
pub struct SubprocessConfig {
    /// Executable, looked up on `PATH`.
    pub(crate) program: String,
    /// Subcommand and its arguments.
    pub(crate) args: Vec<String>,
    /// Added on top of the inherited environment; later entries win.
    pub(crate) env: Env,
    /// Working directory; inherited when `None`.
    pub(crate) cwd: Option<PathBuf>,
}

impl SubprocessConfig {
    pub fn from_command(cmd: &Command, env: &Env, cwd: Option<PathBuf>) -> Self {
        Self {
            program: cmd.program().to_string(),
            args: cmd.args().to_vec(),
            env: env.clone(),
            cwd,
        }
    }

    /// The program must be a non-blank name.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.program.trim().is_empty() {
            return Err(ExecError::InvalidSpec("program is empty".into()));
        }
        Ok(())
    }

    /// Builds the tokio command with the given stdout disposition. Stdin is
    /// closed and stderr goes to our own stderr, which the build log captures.
    pub(crate) fn to_command(&self, stdout: Stdio) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        for kv in self.env.iter() {
            cmd.env(kv.key(), kv.value());
        }
        cmd.stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        cmd
    }

    pub fn trace_state(&self) {
        trace!(
            program = %self.program,
            args = ?self.args,
            cwd = ?self.cwd,
            env_len = self.env.len(),
            "subprocess config resolved"
        );
    }
}

impl fmt::Display for SubprocessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SubprocessConfig(program='{}', args={}, env={}, cwd={:?})",
            self.program,
            self.args.len(),
            self.env.len(),
            self.cwd,
        )
    }
}
