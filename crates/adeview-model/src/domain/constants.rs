//! Well-known names shared by the model, the resolver and the launcher.

/// Executable name of the configuration-management client.
pub const ADE_TOOL: &str = "ade";

/// Environment variable carrying the view name of a build.
///
/// Every build's environment overrides include it, so processes started
/// for one view can be told apart from processes of another.
pub const ADE_VIEW_NAME_VAR: &str = "ADE_VIEW_NAME";
