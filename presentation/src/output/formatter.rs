//! Output formatter for tool envelopes

use crate::cli::commands::OutputFormat;
use invoice_tools_domain::ToolResponse;

/// Trait for formatting tool responses
pub trait OutputFormatter {
    /// Format the envelope the way the caller sees it
    fn format(&self, response: &ToolResponse) -> String;
}

/// Renders the envelope as JSON, which is all the tool host ever returns.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeFormatter {
    format: OutputFormat,
}

impl EnvelopeFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl OutputFormatter for EnvelopeFormatter {
    fn format(&self, response: &ToolResponse) -> String {
        let value = response.to_json();
        let rendered = match self.format {
            OutputFormat::Pretty => serde_json::to_string_pretty(&value),
            OutputFormat::Compact => serde_json::to_string(&value),
        };
        // A serde_json::Value always serializes
        rendered.unwrap_or_else(|_| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compact_error() {
        let response = ToolResponse::error("Invoice sample not found", "Add a.pdf to the data directory.");
        let formatted = EnvelopeFormatter::new(OutputFormat::Compact).format(&response);

        assert!(!formatted.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(
            parsed,
            json!({"error": "Invoice sample not found", "details": "Add a.pdf to the data directory."})
        );
    }

    #[test]
    fn test_pretty_success() {
        let response = ToolResponse::success(json!({"analyzerId": "prebuilt-invoice"}));
        let formatted = EnvelopeFormatter::new(OutputFormat::Pretty).format(&response);

        assert!(formatted.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(parsed, json!({"analyzerId": "prebuilt-invoice"}));
    }
}
