//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A call to a tool with arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, serde_json::Value>,
}

/// Wire shape of the host's trigger context.
#[derive(Deserialize)]
struct ToolContext {
    #[serde(default)]
    arguments: Option<HashMap<String, serde_json::Value>>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    /// Decode the host's `{"arguments": {...}}` context.
    ///
    /// A missing or `null` `arguments` member decodes to an empty map.
    pub fn from_context(
        tool_name: impl Into<String>,
        context: &str,
    ) -> Result<Self, serde_json::Error> {
        let context: ToolContext = serde_json::from_str(context)?;
        Ok(Self {
            tool_name: tool_name.into(),
            arguments: context.arguments.unwrap_or_default(),
        })
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a string argument, trimmed; non-string values count as absent.
    pub fn get_trimmed(&self, key: &str) -> Option<&str> {
        self.get_string(key).map(str::trim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_context() {
        let call = ToolCall::from_context(
            "analyze_invoice",
            r#"{"arguments": {"fileName": " invoice_sample.jpg ", "analyzerId": 42}}"#,
        )
        .unwrap();

        assert_eq!(call.tool_name, "analyze_invoice");
        assert_eq!(call.get_trimmed("fileName"), Some("invoice_sample.jpg"));
        assert_eq!(call.get_trimmed("analyzerId"), None);
        assert_eq!(call.get_trimmed("contentType"), None);
    }

    #[test]
    fn test_from_context_without_arguments() {
        let call = ToolCall::from_context("hello_mcp", "{}").unwrap();
        assert!(call.arguments.is_empty());

        let call = ToolCall::from_context("hello_mcp", r#"{"arguments": null}"#).unwrap();
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn test_from_context_rejects_invalid_json() {
        assert!(ToolCall::from_context("analyze_invoice", "not json").is_err());
        assert!(ToolCall::from_context("analyze_invoice", r#"{"arguments": [1]}"#).is_err());
    }

    #[test]
    fn test_with_arg() {
        let call = ToolCall::new("analyze_invoice").with_arg("invoiceId", "nested/a.pdf");
        assert_eq!(call.get_string("invoiceId"), Some("nested/a.pdf"));
    }
}
