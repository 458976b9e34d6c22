use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

use crate::logger::object::{LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Logger section of the resolver configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Filter expression (e.g. `"info"`, `"adeview_exec=trace,info"`).
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
    /// Include module targets in text and json output.
    pub with_targets: bool,
    /// Colorize text output when stderr is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: false,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Color is used only when enabled and stderr is attached to a terminal.
    ///
    /// CI job runners usually capture stderr into a file, so this is
    /// re-evaluated at initialization instead of at parse time.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = LoggerConfig::default();

        assert_eq!(config.format, LoggerFormat::Text);
        assert_eq!(config.tz, LoggerTimeZone::Utc);
        assert_eq!(config.level.as_str(), "info");
        assert!(!config.with_targets);
        assert!(config.use_color);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: LoggerConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.level.as_str(), LoggerLevel::default().as_str());
        assert_eq!(config.format, LoggerFormat::default());
        assert_eq!(config.tz, LoggerTimeZone::default());
    }

    #[test]
    fn partial_section_from_resolver_file() {
        let json = r#"{"format": "json", "level": "adeview_core=debug,warn", "tz": "Local"}"#;
        let config: LoggerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.format, LoggerFormat::Json);
        assert_eq!(config.level.as_str(), "adeview_core=debug,warn");
        assert_eq!(config.tz, LoggerTimeZone::Local);
        assert!(config.use_color);
    }

    #[test]
    fn invalid_level_is_rejected_at_parse_time() {
        let json = r#"{"level": "adeview_core=loud"}"#;
        assert!(serde_json::from_str::<LoggerConfig>(json).is_err());
    }
}
