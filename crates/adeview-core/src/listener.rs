use tracing::info;

/// Sink for lines that belong in the build-visible log.
pub trait BuildListener: Send + Sync {
    fn line(&self, text: &str);
}

/// Forwards build log lines to `tracing` under the `build` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl BuildListener for TracingListener {
    fn line(&self, text: &str) {
        info!(target: "build", "{text}");
    }
}
