//! Configuration seen by the resolver.
//!
//! [`ViewConfig`] is the seam the resolver reads from. [`StaticViewConfig`]
//! is the implementation backed by a [`ResolverConfig`] file section.
mod template;
pub use template::expand;

use adeview_model::{ADE_VIEW_NAME_VAR, Env, ModelError, Series, ViewName};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::context::BuildContext;

/// Per-job settings consulted during resolution.
pub trait ViewConfig: Send + Sync {
    /// Release line whose labels are considered.
    fn series(&self) -> &Series;

    /// View to create for `build`.
    fn view_name(&self, build: &BuildContext) -> ViewName;

    /// Environment variables that identify processes started for `build`.
    fn env_overrides(&self, build: &BuildContext) -> Env;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Resolver section of the configuration file.
///
/// ```json
/// {
///   "series": "MAIN",
///   "view_name": "${JOB_NAME}_${BUILD_NUMBER}",
///   "env_overrides": [{"key": "BUILD_TAG", "value": "ci-42"}]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub series: Option<Series>,
    /// View name template; `$NAME` and `${NAME}` expand from the build env.
    pub view_name: Option<String>,
    pub env_overrides: Env,
}

impl ResolverConfig {
    /// Fields set in `other` replace the ones in `self`; overrides are
    /// appended.
    pub fn merged(self, other: ResolverConfig) -> ResolverConfig {
        ResolverConfig {
            series: other.series.or(self.series),
            view_name: other.view_name.or(self.view_name),
            env_overrides: self.env_overrides.merged(&other.env_overrides),
        }
    }

    pub fn into_view_config(self) -> Result<StaticViewConfig, ConfigError> {
        let series = self.series.ok_or(ConfigError::MissingField("series"))?;
        let template = self
            .view_name
            .ok_or(ConfigError::MissingField("view_name"))?;
        Ok(StaticViewConfig::new(series, template, self.env_overrides)?)
    }
}

/// [`ViewConfig`] with a fixed series, a view name template and a fixed
/// set of overrides.
#[derive(Debug, Clone)]
pub struct StaticViewConfig {
    series: Series,
    template: ViewName,
    overrides: Env,
}

impl StaticViewConfig {
    /// The unexpanded template must itself be a valid view name; it is used
    /// as-is when an expansion produces an invalid one.
    pub fn new(
        series: Series,
        template: impl Into<String>,
        overrides: Env,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            series,
            template: ViewName::new(template)?,
            overrides,
        })
    }
}

impl ViewConfig for StaticViewConfig {
    fn series(&self) -> &Series {
        &self.series
    }

    fn view_name(&self, build: &BuildContext) -> ViewName {
        let expanded = expand(self.template.as_str(), build.env());
        ViewName::new(expanded).unwrap_or_else(|e| {
            warn!(template = %self.template, error = %e, "view name expansion is invalid; using template");
            self.template.clone()
        })
    }

    /// Configured overrides followed by `ADE_VIEW_NAME=<view name>`.
    fn env_overrides(&self, build: &BuildContext) -> Env {
        let mut env = self.overrides.clone();
        env.push(ADE_VIEW_NAME_VAR, self.view_name(build).as_str());
        env
    }
}
