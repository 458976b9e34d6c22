use std::{path::PathBuf, process::Stdio};

use adeview_core::context::BuildContext;
use adeview_core::launcher::{Captured, Launcher};
use adeview_core::resolver::LookupError;
use adeview_model::{Command, Env};
use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::ExecError;
use crate::subprocess::SubprocessConfig;

/// Runs `ade` as a local child process.
#[derive(Debug, Clone, Default)]
pub struct SubprocessLauncher {
    cwd: Option<PathBuf>,
}

impl SubprocessLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Children start in `cwd` instead of the current directory.
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }

    fn config(&self, cmd: &Command, env: &Env) -> Result<SubprocessConfig, ExecError> {
        let cfg = SubprocessConfig::from_command(cmd, env, self.cwd.clone());
        cfg.validate()?;
        cfg.trace_state();
        Ok(cfg)
    }

    fn spawn(cfg: &SubprocessConfig, stdout: Stdio) -> Result<tokio::process::Child, ExecError> {
        cfg.to_command(stdout)
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: cfg.program.clone(),
                source,
            })
    }

    /// Runs `cmd` to completion, collecting stdout in memory.
    pub async fn capture_output(
        &self,
        cmd: &Command,
        env: &Env,
        cancel: &CancellationToken,
    ) -> Result<Captured, ExecError> {
        let cfg = self.config(cmd, env)?;
        let mut child = Self::spawn(&cfg, Stdio::piped())?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExecError::Internal("stdout was not piped".into()))?;

        let mut buf = Vec::new();
        let run = async {
            let read = stdout.read_to_end(&mut buf).await;
            let status = child.wait().await;
            read.and(status)
        };

        tokio::select! {
            res = run => {
                let status = res?;
                debug!(program = %cfg.program, status = ?status.code(), "subprocess exited");
                Ok(Captured { stdout: buf, status: status.code() })
            }
            _ = cancel.cancelled() => {
                debug!(program = %cfg.program, "cancellation requested; killing subprocess");
                if let Err(e) = child.kill().await {
                    debug!("failed to kill subprocess: {e}");
                }
                Err(ExecError::Cancelled)
            }
        }
    }

    /// Runs `cmd` with stdout and stderr attached to ours and returns its
    /// exit code (`None` when ended by a signal).
    pub async fn run(
        &self,
        cmd: &Command,
        env: &Env,
        cancel: &CancellationToken,
    ) -> Result<Option<i32>, ExecError> {
        let cfg = self.config(cmd, env)?;
        let mut child = Self::spawn(&cfg, Stdio::inherit())?;

        tokio::select! {
            res = child.wait() => {
                let status = res?;
                debug!(program = %cfg.program, status = ?status.code(), "subprocess exited");
                Ok(status.code())
            }
            _ = cancel.cancelled() => {
                debug!(program = %cfg.program, "cancellation requested; killing subprocess");
                if let Err(e) = child.kill().await {
                    debug!("failed to kill subprocess: {e}");
                }
                Err(ExecError::Cancelled)
            }
        }
    }
}

#[async_trait]
impl Launcher for SubprocessLauncher {
    async fn capture(&self, cmd: &Command, build: &BuildContext) -> Result<Captured, LookupError> {
        Ok(self.capture_output(cmd, build.env(), build.cancel()).await?)
    }

    async fn kill(&self, overrides: &Env) -> Result<usize, LookupError> {
        let overrides = overrides.clone();
        let killed = tokio::task::spawn_blocking(move || crate::kill_matching(&overrides))
            .await
            .map_err(|e| ExecError::Internal(format!("kill task failed: {e}")))??;
        Ok(killed)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Duration;

    use super::*;

    fn sh(script: &str) -> Command {
        Command::new("sh", "-c").arg(script)
    }

    #[tokio::test]
    async fn captures_stdout_and_status() {
        let launcher = SubprocessLauncher::new();
        let out = launcher
            .capture_output(
                &sh("printf 'A_1.0\\nS_2.1\\n'; exit 3"),
                &Env::new(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(out.stdout, b"A_1.0\nS_2.1\n");
        assert_eq!(out.status, Some(3));
    }

    #[tokio::test]
    async fn passes_build_environment() {
        let launcher = SubprocessLauncher::new();
        let out = launcher
            .capture_output(
                &sh("printf '%s' \"$ADE_VIEW_NAME\""),
                &Env::single("ADE_VIEW_NAME", "nightly_42"),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(out.stdout, b"nightly_42");
    }

    #[tokio::test]
    async fn runs_in_configured_directory() {
        let launcher = SubprocessLauncher::with_cwd("/");
        let out = launcher
            .capture_output(&sh("pwd"), &Env::new(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(out.stdout, b"/\n");
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let launcher = SubprocessLauncher::new();
        let err = launcher
            .capture_output(
                &Command::new("adeview-no-such-tool", "showlabels"),
                &Env::new(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ExecError::Spawn { ref program, .. } if program == "adeview-no-such-tool"));
    }

    #[tokio::test]
    async fn cancellation_interrupts_wait() {
        let launcher = SubprocessLauncher::new();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = launcher
            .capture_output(&sh("sleep 30"), &Env::new(), &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, ExecError::Cancelled));
    }

    #[tokio::test]
    async fn run_returns_exit_code() {
        let launcher = SubprocessLauncher::new();
        let code = launcher
            .run(&sh("exit 7"), &Env::new(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(code, Some(7));
    }

    #[tokio::test]
    async fn launcher_trait_maps_errors() {
        let launcher = SubprocessLauncher::new();
        let err = launcher
            .capture(
                &Command::new("adeview-no-such-tool", "showlabels"),
                &BuildContext::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Spawn { .. }));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn launcher_trait_kills_marked_processes() {
        let marker = format!("launcher-{}", std::process::id());
        let mut child = std::process::Command::new("sleep")
            .arg("30")
            .env("ADEVIEW_TEST_MARKER", &marker)
            .spawn()
            .unwrap();
        let overrides = Env::single("ADEVIEW_TEST_MARKER", marker.as_str());
        let launcher = SubprocessLauncher::new();

        // The marker is visible only once the child has exec'd.
        let mut killed = Ok(0);
        for _ in 0..50 {
            killed = Launcher::kill(&launcher, &overrides).await;
            if !matches!(killed, Ok(0)) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        assert!(matches!(killed, Ok(1)), "unexpected kill result: {killed:?}");
        assert!(!child.wait().unwrap().success());
    }

    #[cfg(target_os = "linux")]
    mod ade_on_path {
        use std::os::unix::fs::PermissionsExt;

        use adeview_core::prelude::*;
        use adeview_model::{Env, Series};

        use crate::SubprocessLauncher;

        /// Installs an `ade` that prints `$ADEVIEW_STUB_OUTPUT` and returns the
        /// build environment that finds it first on `PATH`.
        fn stub_ade(dir: &tempfile::TempDir, output: &str) -> Env {
            let path = dir.path().join("ade");
            std::fs::write(&path, "#!/bin/sh\nprintf '%s\\n' \"$ADEVIEW_STUB_OUTPUT\"\n").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

            let inherited = std::env::var("PATH").unwrap_or_default();
            let mut env = Env::new();
            env.push("PATH", format!("{}:{inherited}", dir.path().display()));
            env.push("ADEVIEW_STUB_OUTPUT", output);
            env
        }

        async fn resolve_with(output: &str, view: &str) -> Vec<String> {
            let dir = tempfile::tempdir().unwrap();
            let build = BuildContext::default().with_env(stub_ade(&dir, output));
            let config =
                StaticViewConfig::new(Series::new("S").unwrap(), view, Env::new()).unwrap();

            resolve_view_command(&build, &SubprocessLauncher::new(), &TracingListener, &config)
                .await
                .into_tokens()
        }

        #[tokio::test]
        async fn public_label_from_ade_is_used() {
            let view = format!("adeview_match_{}", std::process::id());
            let cmd = resolve_with("S_3.5", &view).await;

            assert_eq!(cmd, ["ade", "createview", "-force", "-label", "S_3.5", view.as_str()]);
        }

        #[tokio::test]
        async fn suspect_label_from_ade_survives_real_kill() {
            let view = format!("adeview_suspect_{}", std::process::id());
            let cmd = resolve_with("garbage", &view).await;

            assert_eq!(cmd, ["ade", "createview", "-force", "-label", "garbage", view.as_str()]);
        }
    }
}
