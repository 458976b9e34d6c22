use serde::{Deserialize, Serialize};

use crate::KeyValue;

/// Ordered list of environment variables.
///
/// Used both for a build's environment and for the overrides that identify
/// the processes started on behalf of a build. Serialized as a plain array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Env(pub Vec<KeyValue>);

impl Env {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn single<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(vec![KeyValue::new(key, value)])
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter()
    }

    /// Value for `key`; the last entry wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|kv| kv.key() == key)
            .map(|kv| kv.value())
    }

    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push(KeyValue::new(key, value));
    }

    /// Concatenation where entries from `other` take precedence.
    pub fn merged(&self, other: &Env) -> Env {
        let mut out = self.0.clone();
        out.extend(other.0.iter().cloned());
        Env(out)
    }

    /// Returns `true` if every effective entry of `wanted` is present in
    /// `self` with the same value.
    ///
    /// An empty `wanted` is never contained: an empty override set must not
    /// select every process on the host.
    pub fn contains_all(&self, wanted: &Env) -> bool {
        !wanted.is_empty()
            && wanted
                .iter()
                .all(|kv| wanted.get(kv.key()) == self.get(kv.key()))
    }
}

impl FromIterator<KeyValue> for Env {
    fn from_iter<I: IntoIterator<Item = KeyValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::Env;

    #[test]
    fn push_and_override_last_wins() {
        let mut env = Env::new();
        env.push("ADE_VIEW_NAME", "one");
        env.push("BUILD_NUMBER", "7");
        env.push("ADE_VIEW_NAME", "two");

        assert_eq!(env.get("ADE_VIEW_NAME"), Some("two"));
        assert_eq!(env.get("BUILD_NUMBER"), Some("7"));
        assert!(env.get("MISSING").is_none());
    }

    #[test]
    fn merged_other_overrides_base() {
        let base = Env::single("JOB_NAME", "base");
        let mut other = Env::new();
        other.push("JOB_NAME", "override");
        other.push("BUILD_NUMBER", "3");

        let merged = base.merged(&other);
        assert_eq!(merged.get("JOB_NAME"), Some("override"));
        assert_eq!(merged.get("BUILD_NUMBER"), Some("3"));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn contains_all_requires_every_override() {
        let mut process = Env::new();
        process.push("PATH", "/usr/bin");
        process.push("ADE_VIEW_NAME", "nightly_42");
        process.push("BUILD_ID", "abc");

        let mut wanted = Env::new();
        wanted.push("ADE_VIEW_NAME", "nightly_42");
        wanted.push("BUILD_ID", "abc");
        assert!(process.contains_all(&wanted));

        wanted.push("BUILD_ID", "other");
        assert!(!process.contains_all(&wanted));
    }

    #[test]
    fn contains_all_rejects_empty_selector() {
        let process = Env::single("ADE_VIEW_NAME", "nightly_42");
        assert!(!process.contains_all(&Env::new()));
    }

    #[test]
    fn serializes_as_array() {
        let env = Env::single("FOO", "bar");
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"[{"key":"FOO","value":"bar"}]"#);

        let back: Env = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);
    }
}
