//! Process-scoped analysis context.
//!
//! Holds the two lazily built singletons, the resolved configuration and the
//! client handle, behind compute-once cells. First construction is
//! serialized; every later read is lock-free. Nothing here is a global:
//! the binary builds one context and shares it by `Arc`.

use crate::client::{ClientHandle, ClientManager};
use crate::config::ConfigResolver;
use crate::ports::client_factory::{AnalyzerClientFactory, ClientSetupError};
use crate::ports::config_source::ConfigSource;
use invoice_tools_domain::{ConfigError, ResolvedConfig};
use std::sync::Arc;
use tokio::sync::OnceCell;

pub struct AnalysisContext {
    source: Arc<dyn ConfigSource>,
    config: OnceCell<ResolvedConfig>,
    clients: ClientManager,
}

impl AnalysisContext {
    pub fn new(source: Arc<dyn ConfigSource>, factory: Arc<dyn AnalyzerClientFactory>) -> Self {
        Self {
            source,
            config: OnceCell::new(),
            clients: ClientManager::new(factory),
        }
    }

    /// The resolved configuration, read from the source on first call only.
    pub async fn config(&self) -> Result<&ResolvedConfig, ConfigError> {
        self.config
            .get_or_try_init(|| async { ConfigResolver::resolve_from(self.source.as_ref()) })
            .await
    }

    /// The client handle for an already resolved configuration.
    pub async fn client(&self, config: &ResolvedConfig) -> Result<&ClientHandle, ClientSetupError> {
        self.clients.get_client(config).await
    }

    /// Discard both cached singletons so the next call re-reads the source.
    pub fn reset(&mut self) {
        self.config.take();
        self.clients.invalidate();
    }
}
