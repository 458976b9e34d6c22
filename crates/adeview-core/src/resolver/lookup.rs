use adeview_model::{Command, Label, LabelPattern};
use tracing::{debug, trace, warn};

use crate::config::ViewConfig;
use crate::context::BuildContext;
use crate::launcher::Launcher;
use crate::listener::BuildListener;
use crate::resolver::LookupError;

/// Asks `ade showlabels -latest -public` for the newest published label of
/// the configured series.
///
/// The last non-empty line of the output is the candidate and is always
/// reported to the build log. A candidate that does not look like a label
/// of the series is still returned, after the processes carrying the
/// build's environment overrides have been killed.
pub async fn find_latest_public_label(
    launcher: &dyn Launcher,
    listener: &dyn BuildListener,
    build: &BuildContext,
    config: &dyn ViewConfig,
) -> Result<Label, LookupError> {
    let series = config.series();
    let cmd = Command::show_latest_public_labels(series);
    trace!(command = %cmd, "querying latest public label");

    let captured = launcher.capture(&cmd, build).await?;
    debug!(
        status = ?captured.status,
        stdout_len = captured.stdout.len(),
        "showlabels finished"
    );

    let candidate = last_non_empty_line(&captured.stdout);
    listener.line(&format!(
        "The latest public label is {}",
        candidate.as_deref().unwrap_or("null")
    ));
    let label = Label::new(candidate.ok_or(LookupError::NoLabel)?);

    let pattern = LabelPattern::for_series(series)?;
    if !pattern.matches(&label) {
        let overrides = config.env_overrides(build);
        warn!(
            label = %label,
            pattern = pattern.as_str(),
            overrides = overrides.len(),
            "label does not match series pattern; killing processes of this view"
        );
        let killed = launcher.kill(&overrides).await?;
        debug!(killed, "stale process kill finished");
    }
    Ok(label)
}

/// Lines end at `\n`, `\r\n` or a lone `\r`. Whitespace-only lines count.
fn last_non_empty_line(stdout: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stdout)
        .split(['\n', '\r'])
        .rev()
        .find(|line| !line.is_empty())
        .map(str::to_owned)
}
