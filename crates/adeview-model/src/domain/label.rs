use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{ModelError, Series};

/// A label name exactly as printed by `ade showlabels`.
///
/// No validation happens here: a suspect label is still a label, and the
/// resolver decides what to do with it through [`LabelPattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape of a well-formed label of one series:
/// `<series>_<digits>.<digits><anything>`, matched against the whole label.
///
/// The series name is matched literally, so release lines containing `.`
/// or other pattern metacharacters do not widen the match.
#[derive(Debug, Clone)]
pub struct LabelPattern {
    re: Regex,
}

impl LabelPattern {
    pub fn for_series(series: &Series) -> Result<Self, ModelError> {
        let expr = format!(r"^{}_[0-9]+\.[0-9]+.*$", regex::escape(series.as_str()));
        let re = Regex::new(&expr).map_err(|e| ModelError::InvalidPattern(e.to_string()))?;
        Ok(Self { re })
    }

    pub fn matches(&self, label: &Label) -> bool {
        self.re.is_match(label.as_str())
    }

    pub fn as_str(&self) -> &str {
        self.re.as_str()
    }
}
