//! Chooses the label a build's view is created from.
//!
//! The latest public label is preferred so that a build never checks out a
//! label that is still being populated. Any failure of that lookup degrades
//! to `ade createview -latest`, which is always available.
mod error;
pub use error::LookupError;

mod lookup;
pub use lookup::find_latest_public_label;

use adeview_model::{Command, Label, Series, ViewName};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ViewConfig;
use crate::context::BuildContext;
use crate::launcher::Launcher;
use crate::listener::BuildListener;

/// Which label the view is created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "resolution", content = "label", rename_all = "snake_case")]
pub enum Resolution {
    /// A specific public label.
    Resolved(Label),
    /// Whatever the client considers latest for the series.
    UseLatest,
}

impl Resolution {
    pub fn label(&self) -> Option<&Label> {
        match self {
            Resolution::Resolved(label) => Some(label),
            Resolution::UseLatest => None,
        }
    }

    pub fn command(&self, series: &Series, view: &ViewName) -> Command {
        match self {
            Resolution::Resolved(label) => Command::create_view_from_label(label, view),
            Resolution::UseLatest => Command::create_view_from_latest(series, view),
        }
    }
}

/// Resolution together with the `createview` command it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedView {
    #[serde(flatten)]
    pub resolution: Resolution,
    pub view: ViewName,
    pub command: Command,
}

/// Runs the lookup and maps every failure to [`Resolution::UseLatest`].
pub async fn resolve(
    launcher: &dyn Launcher,
    listener: &dyn BuildListener,
    build: &BuildContext,
    config: &dyn ViewConfig,
) -> Resolution {
    match find_latest_public_label(launcher, listener, build, config).await {
        Ok(label) => {
            info!(label = %label, "using latest public label");
            Resolution::Resolved(label)
        }
        Err(e) => {
            warn!(error = %e, series = %config.series(), "label lookup failed; falling back to -latest");
            Resolution::UseLatest
        }
    }
}

pub async fn resolve_view(
    launcher: &dyn Launcher,
    listener: &dyn BuildListener,
    build: &BuildContext,
    config: &dyn ViewConfig,
) -> ResolvedView {
    let view = config.view_name(build);
    let resolution = resolve(launcher, listener, build, config).await;
    let command = resolution.command(config.series(), &view);
    ResolvedView {
        resolution,
        view,
        command,
    }
}

/// The `ade createview` command for `build`.
///
/// Never fails: either `-label <label>` or `-latest -series <series>`.
pub async fn resolve_view_command(
    build: &BuildContext,
    launcher: &dyn Launcher,
    listener: &dyn BuildListener,
    config: &dyn ViewConfig,
) -> Command {
    resolve_view(launcher, listener, build, config).await.command
}
