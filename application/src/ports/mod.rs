//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod analyzer;
pub mod client_factory;
pub mod config_source;
pub mod credential;
pub mod invoice_store;
pub mod tool_executor;
