mod args;
mod config;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use adeview_core::prelude::*;
use adeview_exec::SubprocessLauncher;
use adeview_model::{Env, KeyValue};
use adeview_observe::{init_local_offset, init_logger};

use crate::args::{Args, Output};
use crate::config::AppConfig;

fn main() -> anyhow::Result<ExitCode> {
    // Offset detection only works while the process is single-threaded.
    init_local_offset();

    let args = Args::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    // 1) configuration + logger
    let app = AppConfig::load(args.config.as_deref())?.with_args(&args);
    init_logger(&app.logger)?;
    let view_config = app.resolver.into_view_config()?;

    // 2) build context, interrupted by Ctrl-C
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; cancelling");
            trigger.cancel();
        }
    });
    let build = BuildContext::new(build_env(&args.env), cancel.clone());

    // 3) resolution
    let launcher = match &args.cwd {
        Some(cwd) => SubprocessLauncher::with_cwd(cwd),
        None => SubprocessLauncher::new(),
    };
    let resolved = resolve_view(&launcher, &TracingListener, &build, &view_config).await;

    match args.output {
        Output::Text => println!("{}", resolved.command),
        Output::Json => println!("{}", serde_json::to_string(&resolved)?),
    }

    if !args.exec {
        return Ok(ExitCode::SUCCESS);
    }

    // 4) optional view creation
    info!(command = %resolved.command, "creating view");
    let code = launcher
        .run(&resolved.command, build.env(), &cancel)
        .await
        .context("view creation failed")?;
    Ok(exit_code(code))
}

/// Process environment followed by `--env` entries, which win on lookup.
fn build_env(extra: &[KeyValue]) -> Env {
    let inherited: Env = std::env::vars_os()
        .map(|(k, v)| KeyValue::new(k.to_string_lossy(), v.to_string_lossy()))
        .collect();
    inherited.merged(&extra.iter().cloned().collect())
}

fn exit_code(code: Option<i32>) -> ExitCode {
    match code {
        Some(0) => ExitCode::SUCCESS,
        Some(c) => ExitCode::from(u8::try_from(c).unwrap_or(1)),
        None => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_env_overrides_process_env() {
        let env = build_env(&[KeyValue::new("PATH", "/adeview/test")]);
        assert_eq!(env.get("PATH"), Some("/adeview/test"));
    }

    #[test]
    fn exit_codes_are_propagated() {
        assert_eq!(exit_code(Some(0)), ExitCode::SUCCESS);
        assert_eq!(exit_code(Some(3)), ExitCode::from(3));
        assert_eq!(exit_code(Some(300)), ExitCode::from(1));
        assert_eq!(exit_code(None), ExitCode::FAILURE);
    }
}
