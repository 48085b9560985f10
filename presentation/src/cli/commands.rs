//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for tool envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON
    Pretty,
    /// Single-line JSON
    Compact,
}

/// CLI arguments for invoice-tools
#[derive(Parser, Debug)]
#[command(name = "invoice-tools")]
#[command(author, version, about = "Invoice analysis with Azure AI Content Understanding")]
#[command(long_about = r#"
invoice-tools resolves invoice files under a data directory and analyzes them
with an Azure AI Content Understanding analyzer.

Settings come from environment variables or flat keys in a TOML file:
  CONTENT_UNDERSTANDING_ENDPOINT          (required)
  CONTENT_UNDERSTANDING_API_KEY           (optional; managed identity otherwise)
  CONTENT_UNDERSTANDING_ANALYZER_ID       (default: prebuilt-invoice)

Configuration files are loaded from (in priority order):
1. --config <path>               Explicit config file
2. ./invoice-tools.toml          Project-level config
3. ~/.config/invoice-tools/config.toml   Global config
Environment variables override all files.

Example:
  invoice-tools analyze invoice_sample.jpg
  invoice-tools call analyze_invoice '{"arguments": {"invoiceId": "data/2024/march.pdf"}}'
  invoice-tools config
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the invoice files (overrides INVOICE_DATA_DIR)
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Analyze one invoice from the data directory
    Analyze {
        /// File name relative to the data directory, e.g. invoice_sample.jpg
        file_name: String,

        /// Path reference used instead of FILE_NAME to locate the file
        #[arg(long)]
        invoice_id: Option<String>,

        /// Analyzer to use instead of the configured one
        #[arg(long)]
        analyzer_id: Option<String>,

        /// MIME type to send instead of the one inferred from the extension
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Invoke a tool with a raw JSON context, as the tool host would
    Call {
        /// Tool name, e.g. analyze_invoice or hello_mcp
        tool: String,

        /// Context JSON of the form {"arguments": {...}}
        #[arg(default_value = "{}")]
        context: String,
    },

    /// Show the resolved configuration (secrets redacted) and exit
    Config,
}
