//! Ambient (non-interactive) token credentials.
//!
//! Token acquisition belongs to `azure_identity`. Its default chain tries
//! an environment service principal, then managed identity, then the Azure
//! CLI. [`AmbientCredential`] adapts it to the application's
//! [`TokenCredential`] port.

use async_trait::async_trait;
use azure_core::auth::TokenCredential as AzureTokenCredential;
use chrono::{DateTime, Utc};
use invoice_tools_application::{AccessToken, CredentialError, TokenCredential};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct AmbientCredential {
    inner: Arc<dyn AzureTokenCredential>,
}

impl AmbientCredential {
    pub fn new(inner: Arc<dyn AzureTokenCredential>) -> Self {
        Self { inner }
    }

    /// `azure_identity`'s default credential chain.
    pub fn from_environment() -> Result<Self, CredentialError> {
        let inner = azure_identity::create_default_credential()
            .map_err(|e| CredentialError::Unavailable(e.to_string()))?;
        Ok(Self::new(inner))
    }
}

impl std::fmt::Debug for AmbientCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientCredential").finish_non_exhaustive()
    }
}

/// Convert a token issued by the identity SDK into the port's token.
fn to_access_token(secret: &str, expires_unix: i64) -> Result<AccessToken, CredentialError> {
    let expires_on: DateTime<Utc> = DateTime::from_timestamp(expires_unix, 0).ok_or_else(|| {
        CredentialError::RequestFailed(format!("token expiry out of range: {expires_unix}"))
    })?;
    Ok(AccessToken::new(secret, expires_on))
}

#[async_trait]
impl TokenCredential for AmbientCredential {
    fn name(&self) -> &str {
        "ambient"
    }

    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, CredentialError> {
        let token = self
            .inner
            .get_token(scopes)
            .await
            .map_err(|e| CredentialError::RequestFailed(e.to_string()))?;
        let expires_unix = token.expires_on.unix_timestamp();
        debug!(expires_on = expires_unix, "Acquired ambient access token");
        to_access_token(token.token.secret(), expires_unix)
    }
}
