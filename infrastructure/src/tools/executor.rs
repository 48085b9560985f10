//! Invoice tool executor, the concrete implementation of [`ToolExecutorPort`].
//!
//! # Execution Paths
//!
//! ```text
//! execute_context(name, raw JSON)
//!   ├─ undecodable     → {"error": "Invalid request payload"}
//!   └─ ToolCall        → execute()
//!                          ├─ analyze_invoice → AnalyzeInvoiceToolUseCase
//!                          ├─ hello_mcp       → greeting
//!                          └─ otherwise       → {"error": "Unknown tool"}
//! ```

use async_trait::async_trait;
use invoice_tools_application::{AnalyzeInvoiceToolUseCase, ToolExecutorPort};
use invoice_tools_domain::{ToolCall, ToolResponse};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub const ANALYZE_INVOICE: &str = "analyze_invoice";
pub const HELLO: &str = "hello_mcp";
pub const HELLO_GREETING: &str = "Hello I am MCPTool!";

const TOOL_NAMES: [&str; 2] = [ANALYZE_INVOICE, HELLO];

pub struct InvoiceToolExecutor {
    analyze: AnalyzeInvoiceToolUseCase,
}

impl InvoiceToolExecutor {
    pub fn new(analyze: AnalyzeInvoiceToolUseCase) -> Self {
        Self { analyze }
    }

    /// Decode the host's `{"arguments": {...}}` context and execute.
    pub async fn execute_context(
        &self,
        tool_name: &str,
        context: &str,
        cancel: &CancellationToken,
    ) -> ToolResponse {
        match ToolCall::from_context(tool_name, context) {
            Ok(call) => self.execute(&call, cancel).await,
            Err(e) => {
                error!("Failed to decode tool arguments for {}: {}", tool_name, e);
                ToolResponse::error("Invalid request payload", e.to_string())
            }
        }
    }
}

#[async_trait]
impl ToolExecutorPort for InvoiceToolExecutor {
    fn available_tools(&self) -> Vec<&str> {
        TOOL_NAMES.to_vec()
    }

    async fn execute(&self, call: &ToolCall, cancel: &CancellationToken) -> ToolResponse {
        match call.tool_name.as_str() {
            ANALYZE_INVOICE => self.analyze.execute(call, cancel).await,
            HELLO => {
                info!("This is an MCP Tool!");
                ToolResponse::text(HELLO_GREETING)
            }
            other => ToolResponse::error("Unknown tool", format!("No tool named '{}'", other)),
        }
    }
}
