//! Configuration source port
//!
//! A flat key → string lookup. The resolver never touches the process
//! environment directly; adapters decide where values come from
//! (environment, TOML file, or an injected map in tests).

use std::collections::HashMap;

/// Read-only key/value configuration lookup.
pub trait ConfigSource: Send + Sync {
    /// Raw value for `key`, untrimmed. `None` when the key is not set.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory source, mainly for tests and embedding.
///
/// Keys are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct MapConfigSource {
    values: HashMap<String, String>,
}

impl MapConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.values
            .insert(key.as_ref().to_ascii_uppercase(), value.into());
        self
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for MapConfigSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |source, (k, v)| source.with(k, v))
    }
}

impl ConfigSource for MapConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(&key.to_ascii_uppercase()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source_case_insensitive() {
        let source = MapConfigSource::new().with("content_understanding_endpoint", "https://x");
        assert_eq!(
            source.get("CONTENT_UNDERSTANDING_ENDPOINT").as_deref(),
            Some("https://x")
        );
        assert_eq!(source.get("OTHER"), None);
    }

    #[test]
    fn test_map_source_from_iter() {
        let source: MapConfigSource = [("A", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(source.get("a").as_deref(), Some("1"));
        assert_eq!(source.get("B").as_deref(), Some("2"));
    }
}
