//! Tool domain module
//!
//! The host hands every tool invocation over as a JSON context of the form
//! `{"arguments": {...}}`. [`ToolCall`] is the decoded form of that context and
//! [`ToolResponse`] is what goes back: the structured success payload, or an
//! `{error, details}` object. Nothing else crosses the tool boundary.
//!
//! ```text
//! context JSON ──▶ ToolCall ──▶ (typed request, use case) ──▶ ToolResponse ──▶ JSON
//! ```

pub mod entities;
pub mod value_objects;

pub use entities::ToolCall;
pub use value_objects::ToolResponse;
