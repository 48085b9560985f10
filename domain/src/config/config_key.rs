//! Config key registry.
//!
//! Names of the recognised configuration keys together with a description
//! and the default applied when the key is absent or blank. The names are
//! part of the deployment contract: operators set them as environment
//! variables or as flat keys in a TOML file.

pub const KEY_ENDPOINT: &str = "CONTENT_UNDERSTANDING_ENDPOINT";
pub const KEY_API_KEY: &str = "CONTENT_UNDERSTANDING_API_KEY";
pub const KEY_ANALYZER_ID: &str = "CONTENT_UNDERSTANDING_ANALYZER_ID";
pub const KEY_API_VERSION: &str = "CONTENT_UNDERSTANDING_API_VERSION";
pub const KEY_USER_AGENT: &str = "CONTENT_UNDERSTANDING_USER_AGENT";
pub const KEY_POLL_INTERVAL: &str = "CONTENT_UNDERSTANDING_POLL_INTERVAL_SECONDS";
pub const KEY_POLL_TIMEOUT: &str = "CONTENT_UNDERSTANDING_POLL_TIMEOUT_SECONDS";
pub const KEY_DATA_DIR: &str = "INVOICE_DATA_DIR";

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct ConfigKeyInfo {
    /// Key name (environment variable name)
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Default shown to operators; `None` when the key is required or optional without default.
    pub default: Option<&'static str>,
    /// Whether the value must be redacted when displayed.
    pub sensitive: bool,
}

/// All known config keys with their metadata.
pub fn known_keys() -> &'static [ConfigKeyInfo] {
    &KNOWN_KEYS
}

/// Look up a config key by name (case-insensitive).
pub fn lookup_key(key: &str) -> Option<&'static ConfigKeyInfo> {
    KNOWN_KEYS.iter().find(|k| k.key.eq_ignore_ascii_case(key))
}

static KNOWN_KEYS: [ConfigKeyInfo; 8] = [
    ConfigKeyInfo {
        key: KEY_ENDPOINT,
        description: "Analysis service base address (required)",
        default: None,
        sensitive: false,
    },
    ConfigKeyInfo {
        key: KEY_API_KEY,
        description: "Static API key; when set, replaces identity-based authentication",
        default: None,
        sensitive: true,
    },
    ConfigKeyInfo {
        key: KEY_ANALYZER_ID,
        description: "Default analyzer identifier",
        default: Some(super::DEFAULT_ANALYZER_ID),
        sensitive: false,
    },
    ConfigKeyInfo {
        key: KEY_API_VERSION,
        description: "Analyzer protocol version",
        default: Some(super::DEFAULT_API_VERSION),
        sensitive: false,
    },
    ConfigKeyInfo {
        key: KEY_USER_AGENT,
        description: "Outbound client identification string",
        default: Some(super::DEFAULT_USER_AGENT),
        sensitive: false,
    },
    ConfigKeyInfo {
        key: KEY_POLL_INTERVAL,
        description: "Seconds between operation status checks",
        default: Some("2.0"),
        sensitive: false,
    },
    ConfigKeyInfo {
        key: KEY_POLL_TIMEOUT,
        description: "Seconds before an analysis is abandoned",
        default: Some("180.0"),
        sensitive: false,
    },
    ConfigKeyInfo {
        key: KEY_DATA_DIR,
        description: "Directory that invoice identifiers are resolved against",
        default: Some("data"),
        sensitive: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_key_case_insensitive() {
        let info = lookup_key("content_understanding_api_key").unwrap();
        assert_eq!(info.key, KEY_API_KEY);
        assert!(info.sensitive);
    }

    #[test]
    fn test_lookup_unknown_key() {
        assert!(lookup_key("NOT_A_KEY").is_none());
    }

    #[test]
    fn test_only_secret_is_sensitive() {
        let sensitive: Vec<_> = known_keys().iter().filter(|k| k.sensitive).collect();
        assert_eq!(sensitive.len(), 1);
        assert_eq!(sensitive[0].key, KEY_API_KEY);
    }

    #[test]
    fn test_endpoint_has_no_default() {
        assert!(lookup_key(KEY_ENDPOINT).unwrap().default.is_none());
    }
}
