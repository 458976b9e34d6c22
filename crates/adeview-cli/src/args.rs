use std::path::PathBuf;

use adeview_model::{KeyValue, Series};
use adeview_observe::{LoggerFormat, LoggerLevel};
use clap::{Parser, ValueEnum};

/// Print the `ade createview` command for a build, preferring the latest
/// public label of the series and falling back to `-latest`.
#[derive(Debug, Parser)]
#[command(name = "adeview", version, about)]
pub struct Args {
    /// JSON configuration file.
    #[arg(short, long, env = "ADEVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Release line to resolve labels for.
    #[arg(long, env = "ADE_SERIES")]
    pub series: Option<Series>,

    /// View name template; `$NAME` and `${NAME}` expand from the build env.
    #[arg(long, env = "ADEVIEW_VIEW_NAME")]
    pub view_name: Option<String>,

    /// Build environment entry, added on top of the process environment.
    #[arg(long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<KeyValue>,

    /// Variable identifying processes started for this build.
    #[arg(long = "override", value_name = "KEY=VALUE")]
    pub overrides: Vec<KeyValue>,

    /// Working directory for `ade` invocations.
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    #[arg(long, env = "ADEVIEW_LOG_FORMAT")]
    pub log_format: Option<LoggerFormat>,

    #[arg(long, env = "ADEVIEW_LOG")]
    pub log_level: Option<LoggerLevel>,

    /// How the resolved command is printed on stdout.
    #[arg(long, value_enum, default_value_t = Output::Text)]
    pub output: Output,

    /// Run the resolved command and exit with its status.
    #[arg(long)]
    pub exec: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Output {
    /// Tokens joined by spaces.
    Text,
    /// Resolution, view and command tokens as one JSON object.
    Json,
}
