//! Azure AI Content Understanding REST client.
//!
//! # Protocol
//!
//! ```text
//! POST {endpoint}/contentunderstanding/analyzers/{id}:analyze?api-version={v}
//!   body: raw file bytes            ──▶ 202 + Operation-Location
//! GET  {Operation-Location}          ──▶ {"status": "Running" | "Succeeded" | "Failed", ...}
//! ```
//!
//! Every request carries `x-ms-useragent` and either
//! `Ocp-Apim-Subscription-Key` or `Authorization: Bearer`.

use async_trait::async_trait;
use invoice_tools_application::{
    AnalyzeJob, AnalyzerClient, AnalyzerError, BearerTokenProvider, OperationHandle,
    OperationStatus,
};
use invoice_tools_domain::{ResolvedConfig, Secret};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde_json::Value;
use std::io;
use std::time::Duration;
use tracing::debug;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const USER_AGENT_HEADER: &str = "x-ms-useragent";
const OPERATION_LOCATION_HEADER: &str = "Operation-Location";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// How requests are authenticated.
#[derive(Debug, Clone)]
pub enum ClientAuth {
    SubscriptionKey(Secret),
    Bearer(BearerTokenProvider),
}

#[derive(Debug, Clone)]
pub struct ContentUnderstandingClient {
    http: Client,
    endpoint: String,
    api_version: String,
    user_agent: String,
    auth: ClientAuth,
}

impl ContentUnderstandingClient {
    pub fn new(config: &ResolvedConfig, auth: ClientAuth) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_http(http, config, auth))
    }

    pub fn with_http(http: Client, config: &ResolvedConfig, auth: ClientAuth) -> Self {
        Self {
            http,
            endpoint: config.endpoint().trim_end_matches('/').to_string(),
            api_version: config.api_version().to_string(),
            user_agent: config.user_agent().to_string(),
            auth,
        }
    }

    /// The analyzer id is pushed as one encoded path segment, so it can
    /// never select a different path on the service host.
    fn analyze_url(&self, analyzer_id: &str) -> Result<Url, AnalyzerError> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            AnalyzerError::Transport(format!("Invalid Content Understanding endpoint: {e}"))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AnalyzerError::Transport(format!(
                    "Content Understanding endpoint cannot carry a path: {}",
                    self.endpoint
                ))
            })?
            .pop_if_empty()
            .extend(["contentunderstanding", "analyzers"])
            .push(&format!("{analyzer_id}:analyze"));
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, AnalyzerError> {
        let request = request.header(USER_AGENT_HEADER, &self.user_agent);
        match &self.auth {
            ClientAuth::SubscriptionKey(key) => {
                Ok(request.header(SUBSCRIPTION_KEY_HEADER, key.expose()))
            }
            ClientAuth::Bearer(tokens) => {
                let token = tokens
                    .token()
                    .await
                    .map_err(|e| AnalyzerError::Credential(e.to_string()))?;
                Ok(request.bearer_auth(token))
            }
        }
    }
}

async fn ensure_success(response: Response, what: &str) -> Result<Response, AnalyzerError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(AnalyzerError::Transport(format!(
        "Content Understanding {what} returned {status}: {text}"
    )))
}

/// Interpret one status document.
fn parse_status(body: Value) -> Result<OperationStatus, AnalyzerError> {
    let status = body
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AnalyzerError::Transport("Operation response missing status field".to_string())
        })?
        .to_string();

    match status.to_ascii_lowercase().as_str() {
        "succeeded" => Ok(OperationStatus::Succeeded(body)),
        "failed" => {
            let reason = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| body.get("error").map(Value::to_string))
                .unwrap_or(status);
            Ok(OperationStatus::Failed(reason))
        }
        _ => Ok(OperationStatus::Running(status)),
    }
}

#[async_trait]
impl AnalyzerClient for ContentUnderstandingClient {
    async fn begin_analyze(&self, job: &AnalyzeJob) -> Result<OperationHandle, AnalyzerError> {
        let data = tokio::fs::read(&job.file_path)
            .await
            .map_err(|e| AnalyzerError::FileRead {
                path: job.file_path.clone(),
                not_found: e.kind() == io::ErrorKind::NotFound,
                message: e.to_string(),
            })?;

        let url = self.analyze_url(&job.analyzer_id)?;
        debug!(url = %url, bytes = data.len(), "Submitting analyze request");

        let content_type = job.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE);
        let request = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data);

        let response = self
            .authorize(request)
            .await?
            .send()
            .await
            .map_err(|e| AnalyzerError::Transport(format!("Content Understanding submit failed: {e}")))?;
        let response = ensure_success(response, "submit").await?;

        let location = response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AnalyzerError::Transport(
                    "Content Understanding response missing Operation-Location header".to_string(),
                )
            })?;

        Ok(OperationHandle::new(location))
    }

    async fn poll_status(&self, operation: &OperationHandle) -> Result<OperationStatus, AnalyzerError> {
        let request = self.http.get(operation.location());
        let response = self
            .authorize(request)
            .await?
            .send()
            .await
            .map_err(|e| AnalyzerError::Transport(format!("Content Understanding poll failed: {e}")))?;
        let response = ensure_success(response, "poll").await?;

        let body: Value = response.json().await.map_err(|e| {
            AnalyzerError::Transport(format!("Content Understanding response parse failed: {e}"))
        })?;

        parse_status(body)
    }
}
