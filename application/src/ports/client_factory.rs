//! Analyzer client factory port
//!
//! Builds the concrete client for each authentication strategy. Strategy
//! selection and caching live in [`ClientManager`](crate::client::ClientManager);
//! the factory only knows how to construct things.

use super::analyzer::AnalyzerClient;
use super::credential::{CredentialError, TokenCredential};
use crate::client::BearerTokenProvider;
use invoice_tools_domain::{ResolvedConfig, Secret};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientSetupError {
    #[error("Failed to build analysis client: {0}")]
    Build(String),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

pub trait AnalyzerClientFactory: Send + Sync {
    /// Client that authenticates every request with a pre-shared key.
    fn static_key_client(
        &self,
        config: &ResolvedConfig,
        key: &Secret,
    ) -> Result<Arc<dyn AnalyzerClient>, ClientSetupError>;

    /// Non-interactive credential from the execution environment.
    fn ambient_credential(&self) -> Result<Arc<dyn TokenCredential>, ClientSetupError>;

    /// Client that authenticates with bearer tokens from `tokens`.
    fn bearer_client(
        &self,
        config: &ResolvedConfig,
        tokens: BearerTokenProvider,
    ) -> Result<Arc<dyn AnalyzerClient>, ClientSetupError>;
}
