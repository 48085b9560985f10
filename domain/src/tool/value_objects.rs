//! Tool domain value objects: the response envelope.
//!
//! | Variant | JSON |
//! |---------|------|
//! | `Success` | the payload itself, e.g. `{analyzerId, apiVersion, contentType, fileName, result}` |
//! | `Error` | `{"error": <category>, "details": <message>}` (`details` omitted when absent) |

use serde::Serialize;

/// Outcome of a tool invocation as seen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Success(serde_json::Value),
    Error {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl ToolResponse {
    /// Serialize `payload` as a success response.
    pub fn success(payload: impl Serialize) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => ToolResponse::Success(value),
            Err(e) => ToolResponse::error("Unable to serialize tool output", e.to_string()),
        }
    }

    /// Plain text output, carried as a JSON string.
    pub fn text(text: impl Into<String>) -> Self {
        ToolResponse::Success(serde_json::Value::String(text.into()))
    }

    pub fn error(error: impl Into<String>, details: impl Into<String>) -> Self {
        ToolResponse::Error {
            error: error.into(),
            details: Some(details.into()),
        }
    }

    pub fn error_only(error: impl Into<String>) -> Self {
        ToolResponse::Error {
            error: error.into(),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResponse::Success(_))
    }

    /// Error category, if this is an error response
    pub fn error_category(&self) -> Option<&str> {
        match self {
            ToolResponse::Error { error, .. } => Some(error),
            ToolResponse::Success(_) => None,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            ToolResponse::Error { details, .. } => details.as_deref(),
            ToolResponse::Success(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ToolResponse::Success(value) => value.clone(),
            ToolResponse::Error { error, details } => {
                let mut object = serde_json::Map::new();
                object.insert("error".to_string(), error.clone().into());
                if let Some(details) = details {
                    object.insert("details".to_string(), details.clone().into());
                }
                serde_json::Value::Object(object)
            }
        }
    }
}

impl std::fmt::Display for ToolResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
