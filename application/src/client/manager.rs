//! Client manager: strategy selection and once-only construction.
//!
//! ```text
//! config.secret()
//!   ├─ Some(key) → factory.static_key_client(config, key)
//!   └─ None      → factory.ambient_credential()
//!                    → BearerTokenProvider(credential, COGNITIVE_SERVICES_SCOPE)
//!                    → factory.bearer_client(config, provider)
//! ```
//!
//! The handle is built on first use and cached for the life of the manager.
//! Configuration is assumed constant; call [`ClientManager::invalidate`]
//! before resolving against a different one.

use super::token_provider::BearerTokenProvider;
use crate::ports::analyzer::AnalyzerClient;
use crate::ports::client_factory::{AnalyzerClientFactory, ClientSetupError};
use crate::ports::credential::TokenCredential;
use invoice_tools_domain::{AuthStrategy, ResolvedConfig};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

/// Authentication scope for Azure AI services.
pub const COGNITIVE_SERVICES_SCOPE: &str = "https://cognitiveservices.azure.com/.default";

/// A ready client and, for delegated identity, the credential behind it.
///
/// The two share one lifetime: some identity providers refresh in the
/// background for as long as the credential object is alive.
#[derive(Clone)]
pub struct ClientHandle {
    client: Arc<dyn AnalyzerClient>,
    credential: Option<Arc<dyn TokenCredential>>,
    strategy: AuthStrategy,
}

impl ClientHandle {
    pub fn client(&self) -> &dyn AnalyzerClient {
        self.client.as_ref()
    }

    pub fn credential(&self) -> Option<&Arc<dyn TokenCredential>> {
        self.credential.as_ref()
    }

    pub fn strategy(&self) -> AuthStrategy {
        self.strategy
    }
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientHandle")
            .field("strategy", &self.strategy)
            .field("credential", &self.credential.as_ref().map(|c| c.name()))
            .finish()
    }
}

pub struct ClientManager {
    factory: Arc<dyn AnalyzerClientFactory>,
    handle: OnceCell<ClientHandle>,
}

impl ClientManager {
    pub fn new(factory: Arc<dyn AnalyzerClientFactory>) -> Self {
        Self {
            factory,
            handle: OnceCell::new(),
        }
    }

    /// The cached handle, building it on first call.
    ///
    /// Concurrent first calls are serialized; exactly one of them builds.
    /// A failed build is not cached, so the next call tries again.
    pub async fn get_client(&self, config: &ResolvedConfig) -> Result<&ClientHandle, ClientSetupError> {
        self.handle
            .get_or_try_init(|| async { self.build(config) })
            .await
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.initialized()
    }

    /// Drop the cached handle; the next [`get_client`](Self::get_client) rebuilds it.
    pub fn invalidate(&mut self) {
        if self.handle.take().is_some() {
            info!("Analysis client invalidated");
        }
    }

    fn build(&self, config: &ResolvedConfig) -> Result<ClientHandle, ClientSetupError> {
        let handle = match config.secret() {
            Some(key) => ClientHandle {
                client: self.factory.static_key_client(config, key)?,
                credential: None,
                strategy: AuthStrategy::StaticKey,
            },
            None => {
                let credential = self.factory.ambient_credential()?;
                let tokens = BearerTokenProvider::new(credential.clone(), COGNITIVE_SERVICES_SCOPE);
                ClientHandle {
                    client: self.factory.bearer_client(config, tokens)?,
                    credential: Some(credential),
                    strategy: AuthStrategy::DelegatedIdentity,
                }
            }
        };

        info!(
            endpoint = %config.endpoint(),
            auth = %handle.strategy,
            "Analysis client created"
        );
        Ok(handle)
    }
}
