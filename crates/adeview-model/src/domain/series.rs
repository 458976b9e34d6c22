use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Name of a release line; every label of the line is prefixed with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Series(String);

impl Series {
    /// Rejects empty names and names containing whitespace, which the
    /// client would split into several arguments.
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidSeries(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Series {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Series {
    type Error = ModelError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Series> for String {
    fn from(s: Series) -> Self {
        s.0
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Series;

    #[test]
    fn accepts_release_line_names() {
        for name in ["RDBMS_MAIN", "FUSIONAPPS_PT.V2MIB", "x"] {
            assert_eq!(Series::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        for bad in ["", " ", "MAIN LINE", "MAIN\t"] {
            assert!(Series::new(bad).is_err(), "expected {bad:?} to fail");
        }
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<Series>(r#""""#).is_err());
        let s: Series = serde_json::from_str(r#""MAIN""#).unwrap();
        assert_eq!(s.to_string(), "MAIN");
    }
}
