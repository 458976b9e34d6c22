pub mod config;
pub mod context;
pub mod launcher;
pub mod listener;
pub mod resolver;

pub mod prelude {
    pub use crate::config::{ResolverConfig, StaticViewConfig, ViewConfig};
    pub use crate::context::BuildContext;
    pub use crate::launcher::{Captured, Launcher};
    pub use crate::listener::{BuildListener, TracingListener};
    pub use crate::resolver::{
        LookupError, Resolution, ResolvedView, find_latest_public_label, resolve,
        resolve_view, resolve_view_command,
    };
}
