mod domain;
pub use domain::{ADE_TOOL, ADE_VIEW_NAME_VAR};
pub use domain::{Env, KeyValue, Label, LabelPattern, Series, ViewName};

mod error;
pub use error::ModelError;

mod command;
pub use command::Command;
