//! Token credential port
//!
//! A source of short-lived bearer tokens from the ambient identity of the
//! process. Implementations must never fall back to an interactive flow.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use invoice_tools_domain::Secret;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("No ambient credential available: {0}")]
    Unavailable(String),

    #[error("Token request failed: {0}")]
    RequestFailed(String),
}

/// A bearer token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: Secret,
    pub expires_on: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_on: DateTime<Utc>) -> Self {
        Self {
            token: Secret::new(token),
            expires_on,
        }
    }

    /// Whether the token is still valid for at least `margin`.
    pub fn is_fresh(&self, now: DateTime<Utc>, margin: chrono::Duration) -> bool {
        self.expires_on - now > margin
    }
}

#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Short name for logs (e.g. "managed-identity").
    fn name(&self) -> &str;

    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, CredentialError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_fresh() {
        let now = Utc::now();
        let token = AccessToken::new("t", now + chrono::Duration::minutes(10));
        assert!(token.is_fresh(now, chrono::Duration::minutes(5)));
        assert!(!token.is_fresh(now, chrono::Duration::minutes(10)));
        assert!(!token.is_fresh(now + chrono::Duration::minutes(6), chrono::Duration::minutes(5)));
    }
}
