//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod config_key;
mod resolved;

pub use config_key::{
    ConfigKeyInfo, KEY_ANALYZER_ID, KEY_API_KEY, KEY_API_VERSION, KEY_DATA_DIR, KEY_ENDPOINT,
    KEY_POLL_INTERVAL, KEY_POLL_TIMEOUT, KEY_USER_AGENT, known_keys, lookup_key,
};
pub use resolved::{
    AuthStrategy, ConfigError, DEFAULT_ANALYZER_ID, DEFAULT_API_VERSION,
    DEFAULT_POLL_INTERVAL_SECONDS, DEFAULT_POLL_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
    ResolvedConfig, Secret, is_valid_seconds,
};
