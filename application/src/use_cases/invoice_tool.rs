//! Invoice tool use case
//!
//! Maps the `analyze_invoice` tool arguments onto the orchestrator and its
//! result back onto the response envelope.
//!
//! | Argument | Meaning |
//! |----------|---------|
//! | `invoiceId` | Path reference under the data root; wins over `fileName` |
//! | `fileName` | Path reference when `invoiceId` is absent; always the display name when given |
//! | `contentType` | MIME override; otherwise inferred from the file extension |
//! | `analyzerId` | Analyzer override; otherwise the configured one |

use super::analyze_invoice::AnalyzeInvoiceUseCase;
use crate::ports::invoice_store::InvoiceStore;
use invoice_tools_domain::core::string::first_non_empty;
use invoice_tools_domain::{AnalysisRequest, ReferenceError, ToolCall, ToolResponse};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub const ARG_INVOICE_ID: &str = "invoiceId";
pub const ARG_FILE_NAME: &str = "fileName";
pub const ARG_CONTENT_TYPE: &str = "contentType";
pub const ARG_ANALYZER_ID: &str = "analyzerId";

pub struct AnalyzeInvoiceToolUseCase {
    store: Arc<dyn InvoiceStore>,
    analyze: AnalyzeInvoiceUseCase,
}

impl AnalyzeInvoiceToolUseCase {
    pub fn new(store: Arc<dyn InvoiceStore>, analyze: AnalyzeInvoiceUseCase) -> Self {
        Self { store, analyze }
    }

    pub async fn execute(&self, call: &ToolCall, cancel: &CancellationToken) -> ToolResponse {
        let invoice_id = call.get_trimmed(ARG_INVOICE_ID);
        let file_name = call.get_trimmed(ARG_FILE_NAME);

        let Some(identifier) = first_non_empty([invoice_id, file_name]) else {
            return ToolResponse::error(
                "fileName is required",
                "Provide the file name relative to the data directory, for example invoice_sample.jpg.",
            );
        };

        let stored = match self.store.resolve(&identifier) {
            Ok(stored) => stored,
            Err(ReferenceError::NotFound(path)) => {
                error!(
                    "Invoice '{}' was not found under {} ({})",
                    identifier,
                    self.store.root().display(),
                    path.display()
                );
                return ToolResponse::error(
                    "Invoice sample not found",
                    format!("Add {} to the data directory.", identifier),
                );
            }
            Err(e) => {
                error!("Invalid invoice identifier '{}': {}", identifier, e);
                return ToolResponse::error("Invalid file reference", e.to_string());
            }
        };

        // Caller overrides first; the stored file fills whatever is left blank.
        let request = AnalysisRequest::for_stored_file(&stored);
        let request = match call.get_trimmed(ARG_CONTENT_TYPE) {
            Some(ct) if !ct.is_empty() => request.with_content_type(Some(ct)),
            _ => request,
        };
        let request = match file_name {
            Some(name) if !name.is_empty() => request.with_file_name(Some(name)),
            _ => request,
        };
        let request = request.with_analyzer_id(call.get_trimmed(ARG_ANALYZER_ID));

        info!(
            file = %request.display_name(),
            path = %stored.path.display(),
            content_type = request.content_type().unwrap_or("auto-detect"),
            analyzer_id = request.analyzer_id().unwrap_or("<default>"),
            "Starting invoice analysis"
        );

        match self.analyze.execute_with_cancel(&request, cancel).await {
            Ok(outcome) => ToolResponse::success(outcome),
            Err(e) => ToolResponse::error("Unable to analyze invoice", e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BearerTokenProvider;
    use crate::context::AnalysisContext;
    use crate::ports::analyzer::AnalyzerClient;
    use crate::ports::client_factory::{AnalyzerClientFactory, ClientSetupError};
    use crate::ports::config_source::MapConfigSource;
    use crate::ports::credential::TokenCredential;
    use invoice_tools_domain::config::{KEY_API_KEY, KEY_ENDPOINT};
    use invoice_tools_domain::{InvoiceReference, ResolvedConfig, Secret, StoredFile};
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Factory that counts build attempts and never succeeds.
    struct UnreachableFactory {
        builds: AtomicUsize,
    }

    impl AnalyzerClientFactory for UnreachableFactory {
        fn static_key_client(
            &self,
            _config: &ResolvedConfig,
            _key: &Secret,
        ) -> Result<Arc<dyn AnalyzerClient>, ClientSetupError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            Err(ClientSetupError::Build("network disabled in tests".to_string()))
        }

        fn ambient_credential(&self) -> Result<Arc<dyn TokenCredential>, ClientSetupError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            Err(ClientSetupError::Build("network disabled in tests".to_string()))
        }

        fn bearer_client(
            &self,
            _config: &ResolvedConfig,
            _tokens: BearerTokenProvider,
        ) -> Result<Arc<dyn AnalyzerClient>, ClientSetupError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            Err(ClientSetupError::Build("network disabled in tests".to_string()))
        }
    }

    /// Store backed by a fixed list of relative paths under `/srv/data`.
    struct ListedStore {
        files: Vec<&'static str>,
    }

    impl InvoiceStore for ListedStore {
        fn root(&self) -> &Path {
            Path::new("/srv/data")
        }

        fn resolve(&self, identifier: &str) -> Result<StoredFile, ReferenceError> {
            let reference = InvoiceReference::parse(identifier, "data")?;
            let relative = reference.relative_path();
            let path = self.root().join(&relative);
            if !self.files.iter().any(|f| Path::new(f) == relative) {
                return Err(ReferenceError::NotFound(path));
            }
            Ok(StoredFile {
                content_type: invoice_tools_domain::guess_content_type(reference.file_name())
                    .map(str::to_string),
                file_name: reference.file_name().to_string(),
                path,
            })
        }

        fn exists(&self, path: &Path) -> bool {
            path.strip_prefix(self.root())
                .map(|rel| self.files.iter().any(|f| Path::new(f) == rel))
                .unwrap_or(false)
        }

        fn file_size(&self, _path: &Path) -> Option<u64> {
            None
        }
    }

    fn tool(source: MapConfigSource) -> (AnalyzeInvoiceToolUseCase, Arc<UnreachableFactory>) {
        let store: Arc<dyn InvoiceStore> = Arc::new(ListedStore {
            files: vec!["invoice_sample.jpg"],
        });
        let factory = Arc::new(UnreachableFactory {
            builds: AtomicUsize::new(0),
        });
        let context = Arc::new(AnalysisContext::new(Arc::new(source), factory.clone()));
        let analyze = AnalyzeInvoiceUseCase::new(context, store.clone());
        (AnalyzeInvoiceToolUseCase::new(store, analyze), factory)
    }

    fn configured() -> MapConfigSource {
        MapConfigSource::new()
            .with(KEY_ENDPOINT, "https://cu.example.com")
            .with(KEY_API_KEY, "k")
    }

    #[tokio::test]
    async fn test_missing_file_name() {
        let (tool, factory) = tool(configured());
        let call = ToolCall::new("analyze_invoice").with_arg(ARG_FILE_NAME, "   ");

        let response = tool.execute(&call, &CancellationToken::new()).await;

        assert_eq!(response.error_category(), Some("fileName is required"));
        assert_eq!(factory.builds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_traversal_is_rejected_without_network() {
        let (tool, factory) = tool(configured());
        let call = ToolCall::new("analyze_invoice").with_arg(ARG_INVOICE_ID, "../secrets.txt");

        let response = tool.execute(&call, &CancellationToken::new()).await;

        assert_eq!(response.error_category(), Some("Invalid file reference"));
        assert_eq!(factory.builds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_sample() {
        let (tool, factory) = tool(configured());
        let call = ToolCall::new("analyze_invoice").with_arg(ARG_FILE_NAME, "nope.pdf");

        let response = tool.execute(&call, &CancellationToken::new()).await;

        assert_eq!(response.error_category(), Some("Invoice sample not found"));
        assert_eq!(response.details(), Some("Add nope.pdf to the data directory."));
        assert_eq!(factory.builds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invoice_id_takes_precedence_over_file_name() {
        let (tool, _) = tool(configured());
        let call = ToolCall::new("analyze_invoice")
            .with_arg(ARG_INVOICE_ID, "missing.pdf")
            .with_arg(ARG_FILE_NAME, "invoice_sample.jpg");

        let response = tool.execute(&call, &CancellationToken::new()).await;

        assert_eq!(response.details(), Some("Add missing.pdf to the data directory."));
    }

    #[tokio::test]
    async fn test_missing_endpoint_reports_unable_to_analyze() {
        let (tool, factory) = tool(MapConfigSource::new());
        let call = ToolCall::new("analyze_invoice").with_arg(ARG_FILE_NAME, "data/invoice_sample.jpg");

        let response = tool.execute(&call, &CancellationToken::new()).await;

        assert_eq!(response.error_category(), Some("Unable to analyze invoice"));
        let details = response.details().unwrap();
        assert!(details.starts_with("Failed to analyze invoice: "));
        assert!(details.contains("CONTENT_UNDERSTANDING_ENDPOINT"));
        assert!(details.contains(&PathBuf::from("/srv/data/invoice_sample.jpg").display().to_string()));
        assert_eq!(factory.builds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_client_setup_failure_reports_unable_to_analyze() {
        let (tool, factory) = tool(configured());
        let call = ToolCall::new("analyze_invoice").with_arg(ARG_FILE_NAME, "invoice_sample.jpg");

        let response = tool.execute(&call, &CancellationToken::new()).await;

        assert_eq!(response.error_category(), Some("Unable to analyze invoice"));
        assert!(response.details().unwrap().contains("network disabled in tests"));
        assert_eq!(factory.builds.load(Ordering::SeqCst), 1);
    }
}
