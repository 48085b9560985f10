//! Application layer for invoice-tools
//!
//! This crate contains use cases, port definitions, configuration resolution
//! and the lazily built client container. It depends only on the domain layer.

pub mod client;
pub mod config;
pub mod context;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use client::{BearerTokenProvider, COGNITIVE_SERVICES_SCOPE, ClientHandle, ClientManager};
pub use config::ConfigResolver;
pub use context::AnalysisContext;
pub use ports::{
    analyzer::{AnalyzeJob, AnalyzerClient, AnalyzerError, OperationHandle, OperationStatus},
    client_factory::{AnalyzerClientFactory, ClientSetupError},
    config_source::{ConfigSource, MapConfigSource},
    credential::{AccessToken, CredentialError, TokenCredential},
    invoice_store::InvoiceStore,
    tool_executor::ToolExecutorPort,
};
pub use use_cases::analyze_invoice::{AnalysisFailure, AnalyzeInvoiceError, AnalyzeInvoiceUseCase};
pub use use_cases::invoice_tool::AnalyzeInvoiceToolUseCase;
