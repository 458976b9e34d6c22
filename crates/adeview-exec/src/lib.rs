mod error;
pub use error::ExecError;

mod proctree;
pub use proctree::kill_matching;

pub mod subprocess;
pub use subprocess::SubprocessLauncher;
