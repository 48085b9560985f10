//! Tool Executor port
//!
//! Defines the interface the host adapter uses to run a named tool.

use async_trait::async_trait;
use invoice_tools_domain::{ToolCall, ToolResponse};
use tokio_util::sync::CancellationToken;

/// Port for tool execution
///
/// Implementations never fail: every outcome, including an unknown tool
/// name, is reported through the returned envelope.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Names of all registered tools
    fn available_tools(&self) -> Vec<&str>;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.available_tools().contains(&name)
    }

    /// Execute a tool call, aborting long-running work when `cancel` fires.
    async fn execute(&self, call: &ToolCall, cancel: &CancellationToken) -> ToolResponse;
}
