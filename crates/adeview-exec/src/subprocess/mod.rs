//! `Launcher` implementation backed by `tokio::process`.
mod config;
pub use config::SubprocessConfig;

mod launcher;
pub use launcher::SubprocessLauncher;
