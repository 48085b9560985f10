//! Domain layer for invoice-tools
//!
//! This crate contains the core entities and value objects for invoice
//! analysis. It has no dependencies on infrastructure or presentation concerns
//! and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Invoice references
//!
//! Callers identify invoices with an untrusted relative identifier.
//! [`InvoiceReference`] performs the lexical validation (no absolute paths,
//! no `..`, optional data-directory prefix) before anything touches disk.
//!
//! ## Resolved configuration
//!
//! [`ResolvedConfig`] is the immutable settings snapshot for the analysis
//! service. The presence of a secret selects the [`AuthStrategy`].
//!
//! ## Tool envelopes
//!
//! Every tool invocation ends in a [`ToolResponse`]: either the structured
//! success payload or an `{error, details}` object.

pub mod config;
pub mod core;
pub mod invoice;
pub mod tool;

// Re-export commonly used types
pub use config::{
    AuthStrategy, ConfigError, ConfigKeyInfo, ResolvedConfig, Secret, known_keys, lookup_key,
};
pub use core::error::ReferenceError;
pub use invoice::{
    content_type::guess_content_type,
    entities::{AnalysisOutcome, AnalysisRequest, StoredFile},
    reference::InvoiceReference,
};
pub use tool::{ToolCall, ToolResponse};
