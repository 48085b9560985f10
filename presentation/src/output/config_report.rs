//! Human-readable dump of the effective configuration.

use invoice_tools_domain::config::{
    KEY_ANALYZER_ID, KEY_API_KEY, KEY_API_VERSION, KEY_ENDPOINT, KEY_POLL_INTERVAL,
    KEY_POLL_TIMEOUT, KEY_USER_AGENT,
};
use invoice_tools_domain::{ResolvedConfig, known_keys, lookup_key};
use serde::Serialize;
use std::path::{Path, PathBuf};

const REDACTED: &str = "***";

#[derive(Debug, Clone, Serialize)]
struct Entry {
    key: &'static str,
    value: String,
    description: &'static str,
}

/// The resolved configuration, ready to print.
///
/// Sensitive keys only ever show whether they are set.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    auth: &'static str,
    data_dir: String,
    sources: Vec<String>,
    entries: Vec<Entry>,
}

impl ConfigReport {
    pub fn new(config: &ResolvedConfig, data_dir: &Path, sources: &[PathBuf]) -> Self {
        let entries = known_keys()
            .iter()
            .filter_map(|info| {
                let value = match info.key {
                    KEY_ENDPOINT => config.endpoint().to_string(),
                    KEY_API_KEY => match config.secret() {
                        Some(_) => REDACTED.to_string(),
                        None => "(not set)".to_string(),
                    },
                    KEY_ANALYZER_ID => config.analyzer_id().to_string(),
                    KEY_API_VERSION => config.api_version().to_string(),
                    KEY_USER_AGENT => config.user_agent().to_string(),
                    KEY_POLL_INTERVAL => config.poll_interval_seconds().to_string(),
                    KEY_POLL_TIMEOUT => config.poll_timeout_seconds().to_string(),
                    // Not part of the analysis config; shown in the header instead
                    _ => return None,
                };
                Some(Entry {
                    key: info.key,
                    value,
                    description: info.description,
                })
            })
            .collect();

        Self {
            auth: config.auth_strategy().as_str(),
            data_dir: data_dir.display().to_string(),
            sources: sources.iter().map(|p| p.display().to_string()).collect(),
            entries,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Aligned `KEY = value` lines with a short header.
    pub fn to_text(&self) -> String {
        let width = self.entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
        let mut output = String::new();

        output.push_str(&format!("Authentication: {}\n", self.auth));
        output.push_str(&format!("Data directory: {}\n", self.data_dir));
        if self.sources.is_empty() {
            output.push_str("Config files:   (none)\n");
        } else {
            output.push_str(&format!("Config files:   {}\n", self.sources.join(", ")));
        }
        output.push('\n');

        for entry in &self.entries {
            let sensitive = lookup_key(entry.key).is_some_and(|k| k.sensitive);
            let marker = if sensitive { " (secret)" } else { "" };
            output.push_str(&format!(
                "{:width$} = {}{}\n",
                entry.key,
                entry.value,
                marker,
                width = width
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_tools_domain::Secret;

    #[test]
    fn test_secret_is_redacted() {
        let config = ResolvedConfig::new("https://cu.example.com")
            .unwrap()
            .with_secret(Some(Secret::new("very-secret-key")));
        let report = ConfigReport::new(&config, Path::new("/srv/data"), &[]);

        let text = report.to_text();
        let json = report.to_json().to_string();

        assert!(!text.contains("very-secret-key"));
        assert!(!json.contains("very-secret-key"));
        assert!(text.contains("CONTENT_UNDERSTANDING_API_KEY"));
        assert!(text.contains("Authentication: subscription-key"));
        assert!(text.contains("Config files:   (none)"));
    }

    #[test]
    fn test_delegated_identity_and_defaults() {
        let config = ResolvedConfig::new("https://cu.example.com").unwrap();
        let report = ConfigReport::new(
            &config,
            Path::new("data"),
            &[PathBuf::from("invoice-tools.toml")],
        );
        let text = report.to_text();

        assert!(text.contains("Authentication: managed-identity"));
        assert!(text.contains("(not set)"));
        assert!(text.contains("prebuilt-invoice"));
        assert!(text.contains("invoice-tools.toml"));
        assert!(!text.contains("INVOICE_DATA_DIR"));
    }
}
