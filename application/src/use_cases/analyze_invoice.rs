//! Analyze Invoice use case
//!
//! Orchestrates one analysis: resolve configuration and client, re-check
//! the file, pick the analyzer, submit, poll to completion, and assemble
//! the outcome.
//!
//! ```text
//! context.config() ─▶ context.client() ─▶ store.exists() ─▶ analyzer id
//!        │                                                     │
//!        ▼                                                     ▼
//!  MissingEndpoint                                      begin_analyze()
//!                                                              │
//!                        ┌─────────── poll_status() ◀──────────┘
//!                        │   Running → sleep(interval), until deadline
//!                        ├─ Succeeded(payload) → AnalysisOutcome
//!                        ├─ Failed(reason)     → AnalysisFailed
//!                        └─ deadline passed    → PollTimeout
//! ```
//!
//! Every failure is wrapped in a single [`AnalyzeInvoiceError`] whose message
//! names the analyzer, endpoint and file. The secret never appears.

use crate::context::AnalysisContext;
use crate::ports::analyzer::{AnalyzeJob, AnalyzerClient, AnalyzerError, OperationHandle, OperationStatus};
use crate::ports::client_factory::ClientSetupError;
use crate::ports::invoice_store::InvoiceStore;
use invoice_tools_domain::core::string::first_non_empty;
use invoice_tools_domain::{AnalysisOutcome, AnalysisRequest, ConfigError, ResolvedConfig};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Classified cause of an analysis failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisFailure {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ClientSetup(#[from] ClientSetupError),

    #[error("Invoice file not found: {}", .0.display())]
    FileMissing(PathBuf),

    #[error("Analyzer ID is required for invoice analysis.")]
    MissingAnalyzer,

    #[error("{0}")]
    TransportFailure(String),

    #[error("Analyzer reported failure: {0}")]
    AnalysisFailed(String),

    #[error("Analysis did not complete within {0:.1}s")]
    PollTimeout(f64),

    #[error("Analysis cancelled")]
    Cancelled,
}

impl AnalysisFailure {
    /// Short category name for logs.
    pub fn category(&self) -> &'static str {
        match self {
            AnalysisFailure::Config(ConfigError::MissingEndpoint) => "MissingEndpoint",
            AnalysisFailure::ClientSetup(_) => "ClientSetup",
            AnalysisFailure::FileMissing(_) => "FileMissing",
            AnalysisFailure::MissingAnalyzer => "MissingAnalyzer",
            AnalysisFailure::TransportFailure(_) => "TransportFailure",
            AnalysisFailure::AnalysisFailed(_) => "AnalysisFailed",
            AnalysisFailure::PollTimeout(_) => "PollTimeout",
            AnalysisFailure::Cancelled => "Cancelled",
        }
    }
}

impl From<AnalyzerError> for AnalysisFailure {
    fn from(error: AnalyzerError) -> Self {
        match error {
            AnalyzerError::Transport(message) => AnalysisFailure::TransportFailure(message),
            AnalyzerError::FileRead {
                path,
                not_found: true,
                ..
            } => AnalysisFailure::FileMissing(path),
            e @ AnalyzerError::FileRead { .. } => AnalysisFailure::TransportFailure(e.to_string()),
            AnalyzerError::Credential(message) => {
                AnalysisFailure::TransportFailure(format!("Unable to acquire access token: {message}"))
            }
        }
    }
}

const UNRESOLVED: &str = "<unresolved>";

/// Orchestration-level error returned to the tool boundary.
#[derive(Error, Debug, Clone)]
#[error(
    "Failed to analyze invoice: {failure} (analyzerId={analyzer_id}, endpoint={endpoint}, file={file})"
)]
pub struct AnalyzeInvoiceError {
    pub failure: AnalysisFailure,
    pub analyzer_id: String,
    pub endpoint: String,
    pub file: String,
}

impl AnalyzeInvoiceError {
    pub fn failure(&self) -> &AnalysisFailure {
        &self.failure
    }
}

/// What was known at the time of failure, for the error message.
struct Diagnostics {
    analyzer_id: Option<String>,
    endpoint: Option<String>,
    file: String,
}

impl Diagnostics {
    fn into_error(self, failure: AnalysisFailure) -> AnalyzeInvoiceError {
        AnalyzeInvoiceError {
            failure,
            analyzer_id: self.analyzer_id.unwrap_or_else(|| UNRESOLVED.to_string()),
            endpoint: self.endpoint.unwrap_or_else(|| UNRESOLVED.to_string()),
            file: self.file,
        }
    }
}

/// Use case for analyzing one invoice file
pub struct AnalyzeInvoiceUseCase {
    context: Arc<AnalysisContext>,
    store: Arc<dyn InvoiceStore>,
}

impl AnalyzeInvoiceUseCase {
    pub fn new(context: Arc<AnalysisContext>, store: Arc<dyn InvoiceStore>) -> Self {
        Self { context, store }
    }

    /// Execute without external cancellation
    pub async fn execute(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, AnalyzeInvoiceError> {
        self.execute_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Execute, aborting the submit or poll wait as soon as `cancel` fires.
    pub async fn execute_with_cancel(
        &self,
        request: &AnalysisRequest,
        cancel: &CancellationToken,
    ) -> Result<AnalysisOutcome, AnalyzeInvoiceError> {
        let mut diagnostics = Diagnostics {
            analyzer_id: None,
            endpoint: None,
            file: request.file_path().display().to_string(),
        };

        match self.run(request, cancel, &mut diagnostics).await {
            Ok(outcome) => Ok(outcome),
            Err(failure) => {
                error!(
                    category = failure.category(),
                    analyzer_id = diagnostics.analyzer_id.as_deref().unwrap_or(UNRESOLVED),
                    endpoint = diagnostics.endpoint.as_deref().unwrap_or(UNRESOLVED),
                    file = %diagnostics.file,
                    "Analyzer request failed: {}",
                    failure
                );
                Err(diagnostics.into_error(failure))
            }
        }
    }

    async fn run(
        &self,
        request: &AnalysisRequest,
        cancel: &CancellationToken,
        diagnostics: &mut Diagnostics,
    ) -> Result<AnalysisOutcome, AnalysisFailure> {
        let config = self.context.config().await?;
        diagnostics.endpoint = Some(config.endpoint().to_string());

        let handle = self.context.client(config).await?;

        // The store checked existence at resolution time; that was a separate call.
        let file_path = request.file_path();
        if !self.store.exists(file_path) {
            return Err(AnalysisFailure::FileMissing(file_path.to_path_buf()));
        }

        let analyzer_id = first_non_empty([request.analyzer_id(), Some(config.analyzer_id())])
            .ok_or(AnalysisFailure::MissingAnalyzer)?;
        diagnostics.analyzer_id = Some(analyzer_id.clone());

        info!(
            file = %request.display_name(),
            analyzer_id = %analyzer_id,
            endpoint = %config.endpoint(),
            api_version = %config.api_version(),
            content_type = request.content_type().unwrap_or("auto-detect"),
            "Submitting invoice for analysis"
        );

        let job = AnalyzeJob {
            analyzer_id: analyzer_id.clone(),
            file_path: file_path.to_path_buf(),
            content_type: request.content_type().map(str::to_string),
        };

        let client = handle.client();
        let operation = tokio::select! {
            _ = cancel.cancelled() => return Err(AnalysisFailure::Cancelled),
            submitted = client.begin_analyze(&job) => submitted?,
        };

        let result = poll_until_complete(client, &operation, config, cancel).await?;

        info!(
            analyzer_id = %analyzer_id,
            file = %file_path.display(),
            bytes = self.store.file_size(file_path),
            "Invoice analysis succeeded"
        );

        Ok(AnalysisOutcome {
            analyzer_id,
            api_version: config.api_version().to_string(),
            content_type: request.content_type().map(str::to_string),
            file_name: Some(request.display_name()),
            result,
        })
    }
}

/// Poll `operation` every `poll_interval` until it finishes or `poll_timeout` elapses.
async fn poll_until_complete(
    client: &dyn AnalyzerClient,
    operation: &OperationHandle,
    config: &ResolvedConfig,
    cancel: &CancellationToken,
) -> Result<serde_json::Value, AnalysisFailure> {
    let interval = config.poll_interval();
    let deadline = Instant::now() + config.poll_timeout();
    let timed_out = || AnalysisFailure::PollTimeout(config.poll_timeout_seconds());

    loop {
        let status = tokio::select! {
            _ = cancel.cancelled() => return Err(AnalysisFailure::Cancelled),
            _ = tokio::time::sleep_until(deadline) => return Err(timed_out()),
            status = client.poll_status(operation) => status?,
        };

        match status {
            OperationStatus::Succeeded(payload) => return Ok(payload),
            OperationStatus::Failed(reason) => return Err(AnalysisFailure::AnalysisFailed(reason)),
            OperationStatus::Running(state) => {
                debug!(operation = operation.location(), status = %state, "Analysis still running");
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(timed_out());
        }
        let wait = interval.min(deadline - now);

        tokio::select! {
            _ = cancel.cancelled() => return Err(AnalysisFailure::Cancelled),
            _ = tokio::time::sleep(wait) => {}
        }
    }
}
