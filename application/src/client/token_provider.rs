//! Bearer token provider bound to a single scope.

use crate::ports::credential::{AccessToken, CredentialError, TokenCredential};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Tokens are refreshed once they are this close to expiry.
const REFRESH_MARGIN_SECS: i64 = 300;

/// Hands out bearer tokens for one scope, refreshing them before they expire.
///
/// Cheap to clone; clones share the cached token.
#[derive(Clone)]
pub struct BearerTokenProvider {
    credential: Arc<dyn TokenCredential>,
    scope: String,
    cached: Arc<Mutex<Option<AccessToken>>>,
}

impl BearerTokenProvider {
    pub fn new(credential: Arc<dyn TokenCredential>, scope: impl Into<String>) -> Self {
        Self {
            credential,
            scope: scope.into(),
            cached: Arc::new(Mutex::new(None)),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// A valid token, from cache when possible.
    ///
    /// Concurrent callers wait on the same refresh instead of each hitting
    /// the identity provider.
    pub async fn token(&self) -> Result<String, CredentialError> {
        let mut cached = self.cached.lock().await;
        let margin = chrono::Duration::seconds(REFRESH_MARGIN_SECS);

        if let Some(token) = cached.as_ref()
            && token.is_fresh(Utc::now(), margin)
        {
            return Ok(token.token.expose().to_string());
        }

        let fresh = self.credential.get_token(&[self.scope.as_str()]).await?;
        debug!(
            credential = self.credential.name(),
            expires_on = %fresh.expires_on,
            "Acquired bearer token"
        );
        let value = fresh.token.expose().to_string();
        *cached = Some(fresh);
        Ok(value)
    }
}

impl std::fmt::Debug for BearerTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenProvider")
            .field("credential", &self.credential.name())
            .field("scope", &self.scope)
            .finish()
    }
}
