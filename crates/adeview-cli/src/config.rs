use std::path::{Path, PathBuf};

use adeview_core::config::ResolverConfig;
use adeview_model::Env;
use adeview_observe::LoggerConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::args::Args;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Contents of the configuration file.
///
/// ```json
/// {
///   "series": "MAIN",
///   "view_name": "${JOB_NAME}_${BUILD_NUMBER}",
///   "env_overrides": [{"key": "BUILD_TAG", "value": "ci-42"}],
///   "logger": {"format": "json", "level": "adeview_core=debug,info"}
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub resolver: ResolverConfig,
    pub logger: LoggerConfig,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Command-line values take precedence over the file.
    pub fn with_args(self, args: &Args) -> Self {
        let flags = ResolverConfig {
            series: args.series.clone(),
            view_name: args.view_name.clone(),
            env_overrides: args.overrides.iter().cloned().collect::<Env>(),
        };
        let mut logger = self.logger;
        if let Some(format) = args.log_format {
            logger.format = format;
        }
        if let Some(level) = &args.log_level {
            logger.level = level.clone();
        }
        Self {
            resolver: self.resolver.merged(flags),
            logger,
        }
    }
}
