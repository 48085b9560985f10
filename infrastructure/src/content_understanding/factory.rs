//! Production [`AnalyzerClientFactory`].

use super::client::{ClientAuth, ContentUnderstandingClient, REQUEST_TIMEOUT};
use crate::credential::AmbientCredential;
use invoice_tools_application::{
    AnalyzerClient, AnalyzerClientFactory, BearerTokenProvider, ClientSetupError, TokenCredential,
};
use invoice_tools_domain::{ResolvedConfig, Secret};
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// Builds reqwest-backed Content Understanding clients.
///
/// One HTTP connection pool is shared by every client the factory builds.
#[derive(Debug, Clone)]
pub struct ContentUnderstandingClientFactory {
    http: Client,
}

impl ContentUnderstandingClientFactory {
    pub fn new() -> Result<Self, ClientSetupError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientSetupError::Build(e.to_string()))?;
        Ok(Self { http })
    }

    pub fn with_http(http: Client) -> Self {
        Self { http }
    }
}

impl AnalyzerClientFactory for ContentUnderstandingClientFactory {
    fn static_key_client(
        &self,
        config: &ResolvedConfig,
        key: &Secret,
    ) -> Result<Arc<dyn AnalyzerClient>, ClientSetupError> {
        Ok(Arc::new(ContentUnderstandingClient::with_http(
            self.http.clone(),
            config,
            ClientAuth::SubscriptionKey(key.clone()),
        )))
    }

    fn ambient_credential(&self) -> Result<Arc<dyn TokenCredential>, ClientSetupError> {
        let credential = AmbientCredential::from_environment()?;
        debug!("Using the default Azure credential chain");
        Ok(Arc::new(credential))
    }

    fn bearer_client(
        &self,
        config: &ResolvedConfig,
        tokens: BearerTokenProvider,
    ) -> Result<Arc<dyn AnalyzerClient>, ClientSetupError> {
        Ok(Arc::new(ContentUnderstandingClient::with_http(
            self.http.clone(),
            config,
            ClientAuth::Bearer(tokens),
        )))
    }
}
