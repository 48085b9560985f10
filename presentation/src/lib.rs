//! Presentation layer for invoice-tools
//!
//! This crate contains the CLI definition and the formatters that turn
//! tool envelopes and the resolved configuration into text.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::config_report::ConfigReport;
pub use output::formatter::{EnvelopeFormatter, OutputFormatter};
