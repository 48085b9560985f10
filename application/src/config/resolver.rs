//! Configuration resolution with override-then-default semantics.
//!
//! Every key is read, trimmed, and used if non-empty; otherwise the typed
//! default applies. The endpoint is the only key without a default.
//!
//! Numeric keys get one extra rule: a value that is present but not a
//! positive finite number is logged and replaced by the default. Bad
//! tuning values never abort resolution. This is intentional.

use crate::ports::config_source::ConfigSource;
use invoice_tools_domain::config::{
    DEFAULT_ANALYZER_ID, DEFAULT_API_VERSION, DEFAULT_POLL_INTERVAL_SECONDS,
    DEFAULT_POLL_TIMEOUT_SECONDS, DEFAULT_USER_AGENT, KEY_ANALYZER_ID, KEY_API_KEY,
    KEY_API_VERSION, KEY_ENDPOINT, KEY_POLL_INTERVAL, KEY_POLL_TIMEOUT, KEY_USER_AGENT,
    is_valid_seconds,
};
use invoice_tools_domain::core::string::non_empty_trimmed;
use invoice_tools_domain::{ConfigError, ResolvedConfig, Secret};
use tracing::{info, warn};

/// Stateless resolver; memoization is the caller's concern.
pub struct ConfigResolver;

impl ConfigResolver {
    /// Read every key from `source` and build a snapshot.
    pub fn resolve_from(source: &dyn ConfigSource) -> Result<ResolvedConfig, ConfigError> {
        let endpoint =
            non_empty_trimmed(source.get(KEY_ENDPOINT).as_deref()).ok_or(ConfigError::MissingEndpoint)?;
        let secret = non_empty_trimmed(source.get(KEY_API_KEY).as_deref()).map(Secret::new);

        let config = ResolvedConfig::new(&endpoint)?
            .with_analyzer_id(string_or_default(source, KEY_ANALYZER_ID, DEFAULT_ANALYZER_ID))
            .with_api_version(string_or_default(source, KEY_API_VERSION, DEFAULT_API_VERSION))
            .with_user_agent(string_or_default(source, KEY_USER_AGENT, DEFAULT_USER_AGENT))
            .with_poll_interval_seconds(seconds_or_default(
                source,
                KEY_POLL_INTERVAL,
                DEFAULT_POLL_INTERVAL_SECONDS,
            ))
            .with_poll_timeout_seconds(seconds_or_default(
                source,
                KEY_POLL_TIMEOUT,
                DEFAULT_POLL_TIMEOUT_SECONDS,
            ))
            .with_secret(secret);

        info!(
            endpoint = %config.endpoint(),
            analyzer_id = %config.analyzer_id(),
            api_version = %config.api_version(),
            auth = %config.auth_strategy(),
            poll_interval = config.poll_interval_seconds(),
            poll_timeout = config.poll_timeout_seconds(),
            "Content Understanding config resolved"
        );

        Ok(config)
    }
}

fn string_or_default(source: &dyn ConfigSource, key: &str, default: &str) -> String {
    non_empty_trimmed(source.get(key).as_deref()).unwrap_or_else(|| default.to_string())
}

fn seconds_or_default(source: &dyn ConfigSource, key: &str, default: f64) -> f64 {
    let Some(raw) = non_empty_trimmed(source.get(key).as_deref()) else {
        return default;
    };

    match raw.parse::<f64>() {
        Ok(value) if is_valid_seconds(value) => value,
        _ => {
            warn!(
                "Ignoring invalid {} value '{}'; using default {:.2}",
                key, raw, default
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::config_source::MapConfigSource;
    use invoice_tools_domain::AuthStrategy;

    fn base() -> MapConfigSource {
        MapConfigSource::new().with(KEY_ENDPOINT, "https://cu.example.com")
    }

    #[test]
    fn test_missing_endpoint_is_fatal() {
        let source = MapConfigSource::new().with(KEY_API_KEY, "key");
        assert_eq!(
            ConfigResolver::resolve_from(&source).unwrap_err(),
            ConfigError::MissingEndpoint
        );

        let blank = MapConfigSource::new().with(KEY_ENDPOINT, "   ");
        assert_eq!(
            ConfigResolver::resolve_from(&blank).unwrap_err(),
            ConfigError::MissingEndpoint
        );
    }

    #[test]
    fn test_defaults_applied() {
        let config = ConfigResolver::resolve_from(&base()).unwrap();
        assert_eq!(config.endpoint(), "https://cu.example.com");
        assert_eq!(config.analyzer_id(), "prebuilt-invoice");
        assert_eq!(config.api_version(), DEFAULT_API_VERSION);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.poll_interval_seconds(), 2.0);
        assert_eq!(config.poll_timeout_seconds(), 180.0);
        assert!(config.secret().is_none());
        assert_eq!(config.auth_strategy(), AuthStrategy::DelegatedIdentity);
    }

    #[test]
    fn test_overrides_are_trimmed() {
        let source = base()
            .with(KEY_ANALYZER_ID, "  custom-analyzer ")
            .with(KEY_API_VERSION, "2024-12-01-preview")
            .with(KEY_USER_AGENT, "my-agent/2.0")
            .with(KEY_POLL_INTERVAL, " 0.5 ")
            .with(KEY_POLL_TIMEOUT, "30")
            .with(KEY_API_KEY, " secret-key ");

        let config = ConfigResolver::resolve_from(&source).unwrap();
        assert_eq!(config.analyzer_id(), "custom-analyzer");
        assert_eq!(config.api_version(), "2024-12-01-preview");
        assert_eq!(config.user_agent(), "my-agent/2.0");
        assert_eq!(config.poll_interval_seconds(), 0.5);
        assert_eq!(config.poll_timeout_seconds(), 30.0);
        assert_eq!(config.secret().unwrap().expose(), "secret-key");
        assert_eq!(config.auth_strategy(), AuthStrategy::StaticKey);
    }

    #[test]
    fn test_blank_overrides_fall_back_to_defaults() {
        let source = base()
            .with(KEY_ANALYZER_ID, "   ")
            .with(KEY_API_VERSION, "")
            .with(KEY_API_KEY, "  ");

        let config = ConfigResolver::resolve_from(&source).unwrap();
        assert_eq!(config.analyzer_id(), DEFAULT_ANALYZER_ID);
        assert_eq!(config.api_version(), DEFAULT_API_VERSION);
        assert_eq!(config.auth_strategy(), AuthStrategy::DelegatedIdentity);
    }

    #[test]
    fn test_invalid_numeric_overrides_replaced_by_default() {
        for bad in ["-5", "abc", "0", "0.0", "NaN", "inf", "-inf", "1e400"] {
            let source = base()
                .with(KEY_POLL_INTERVAL, bad)
                .with(KEY_POLL_TIMEOUT, bad);
            let config = ConfigResolver::resolve_from(&source).unwrap();
            assert_eq!(config.poll_interval_seconds(), 2.0, "interval override {bad}");
            assert_eq!(config.poll_timeout_seconds(), 180.0, "timeout override {bad}");
        }
    }
}
