//! Infrastructure layer for invoice-tools
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration sources, the local invoice
//! store, the Content Understanding REST client, ambient credentials and
//! the tool host adapter.

pub mod config;
pub mod content_understanding;
pub mod credential;
pub mod storage;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoadError, ConfigLoader, EnvConfigSource, LayeredConfigSource};
pub use content_understanding::{ClientAuth, ContentUnderstandingClient, ContentUnderstandingClientFactory};
pub use credential::AmbientCredential;
pub use storage::LocalInvoiceStore;
pub use tools::InvoiceToolExecutor;
