mod kv;
pub use kv::KeyValue;

mod env;
pub use env::Env;

mod series;
pub use series::Series;

mod label;
pub use label::{Label, LabelPattern};

mod view;
pub use view::ViewName;

mod constants;
pub use constants::{ADE_TOOL, ADE_VIEW_NAME_VAR};
