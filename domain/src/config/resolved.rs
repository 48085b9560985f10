//! Resolved analysis-service configuration.

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ANALYZER_ID: &str = "prebuilt-invoice";
pub const DEFAULT_API_VERSION: &str = "2025-05-01-preview";
pub const DEFAULT_USER_AGENT: &str = "remote-mcp-functions-rust/1.0";
pub const DEFAULT_POLL_INTERVAL_SECONDS: f64 = 2.0;
pub const DEFAULT_POLL_TIMEOUT_SECONDS: f64 = 180.0;

/// Configuration errors that abort resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CONTENT_UNDERSTANDING_ENDPOINT is required to call Azure AI Content Understanding.")]
    MissingEndpoint,
}

/// A secret value that never appears in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the raw value. Only credential code should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

/// How the analysis client authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Pre-shared key sent with every request
    StaticKey,
    /// Bearer token from the ambient identity of the process
    DelegatedIdentity,
}

impl AuthStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthStrategy::StaticKey => "subscription-key",
            AuthStrategy::DelegatedIdentity => "managed-identity",
        }
    }
}

impl std::fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable settings snapshot for the analysis service.
///
/// Invariants: `endpoint` is non-empty and both poll durations are strictly
/// positive and finite. The `with_*` setters keep the current value when
/// handed something that would break an invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    endpoint: String,
    analyzer_id: String,
    api_version: String,
    user_agent: String,
    poll_interval_seconds: f64,
    poll_timeout_seconds: f64,
    secret: Option<Secret>,
}

impl ResolvedConfig {
    /// Create a snapshot with defaults for everything but the endpoint.
    pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        Ok(Self {
            endpoint: endpoint.to_string(),
            analyzer_id: DEFAULT_ANALYZER_ID.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            poll_interval_seconds: DEFAULT_POLL_INTERVAL_SECONDS,
            poll_timeout_seconds: DEFAULT_POLL_TIMEOUT_SECONDS,
            secret: None,
        })
    }

    pub fn with_analyzer_id(mut self, analyzer_id: impl Into<String>) -> Self {
        self.analyzer_id = analyzer_id.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_poll_interval_seconds(mut self, seconds: f64) -> Self {
        if is_valid_seconds(seconds) {
            self.poll_interval_seconds = seconds;
        }
        self
    }

    pub fn with_poll_timeout_seconds(mut self, seconds: f64) -> Self {
        if is_valid_seconds(seconds) {
            self.poll_timeout_seconds = seconds;
        }
        self
    }

    pub fn with_secret(mut self, secret: Option<Secret>) -> Self {
        self.secret = secret;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn analyzer_id(&self) -> &str {
        &self.analyzer_id
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn poll_interval_seconds(&self) -> f64 {
        self.poll_interval_seconds
    }

    pub fn poll_timeout_seconds(&self) -> f64 {
        self.poll_timeout_seconds
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs_f64(self.poll_interval_seconds)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.poll_timeout_seconds)
    }

    pub fn secret(&self) -> Option<&Secret> {
        self.secret.as_ref()
    }

    /// Static key when a secret is configured, delegated identity otherwise.
    pub fn auth_strategy(&self) -> AuthStrategy {
        if self.secret.is_some() {
            AuthStrategy::StaticKey
        } else {
            AuthStrategy::DelegatedIdentity
        }
    }
}

/// Strictly positive and finite; the upper bound keeps `Duration::from_secs_f64` from panicking.
pub fn is_valid_seconds(seconds: f64) -> bool {
    seconds.is_finite() && seconds > 0.0 && seconds < u32::MAX as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_defaults() {
        let config = ResolvedConfig::new(" https://example.cognitiveservices.azure.com/ ").unwrap();
        assert_eq!(config.endpoint(), "https://example.cognitiveservices.azure.com/");
        assert_eq!(config.analyzer_id(), DEFAULT_ANALYZER_ID);
        assert_eq!(config.api_version(), DEFAULT_API_VERSION);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.poll_timeout(), Duration::from_secs(180));
        assert_eq!(config.auth_strategy(), AuthStrategy::DelegatedIdentity);
    }

    #[test]
    fn test_blank_endpoint_rejected() {
        assert_eq!(ResolvedConfig::new("   ").unwrap_err(), ConfigError::MissingEndpoint);
    }

    #[test]
    fn test_invalid_durations_keep_current_value() {
        let config = ResolvedConfig::new("https://x")
            .unwrap()
            .with_poll_interval_seconds(0.0)
            .with_poll_timeout_seconds(f64::NAN)
            .with_poll_interval_seconds(-1.0);
        assert_eq!(config.poll_interval_seconds(), DEFAULT_POLL_INTERVAL_SECONDS);
        assert_eq!(config.poll_timeout_seconds(), DEFAULT_POLL_TIMEOUT_SECONDS);

        let config = config.with_poll_interval_seconds(0.5);
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_secret_selects_static_key_strategy() {
        let config = ResolvedConfig::new("https://x")
            .unwrap()
            .with_secret(Some(Secret::new("abc123")));
        assert_eq!(config.auth_strategy(), AuthStrategy::StaticKey);
        assert_eq!(config.secret().unwrap().expose(), "abc123");
    }

    #[test]
    fn test_secret_redacted_in_debug() {
        let config = ResolvedConfig::new("https://x")
            .unwrap()
            .with_secret(Some(Secret::new("super-secret-key")));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("Secret(***)"));
    }
}
