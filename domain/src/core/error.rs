//! Domain error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while turning a caller identifier into a stored file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// Malformed or unsafe identifier (caller error)
    #[error("{0}")]
    InvalidReference(String),

    /// Identifier is well-formed but nothing exists at the resolved path
    #[error("Invoice not found: {}", .0.display())]
    NotFound(PathBuf),
}

impl ReferenceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ReferenceError::InvalidReference(message.into())
    }

    /// Check if this error represents a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReferenceError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reference_display_is_message() {
        let error = ReferenceError::invalid("invoiceId must specify a file");
        assert_eq!(error.to_string(), "invoiceId must specify a file");
    }

    #[test]
    fn test_is_not_found_check() {
        assert!(ReferenceError::NotFound(PathBuf::from("/data/a.pdf")).is_not_found());
        assert!(!ReferenceError::invalid("bad").is_not_found());
    }
}
