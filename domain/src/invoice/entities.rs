//! Invoice domain entities

use crate::core::string::non_empty_trimmed;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A caller identifier resolved to a file confined to the data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Canonical absolute path, always a strict descendant of the root
    pub path: PathBuf,
    /// MIME type inferred from the file name, if the extension is known
    pub content_type: Option<String>,
    /// Final path component
    pub file_name: String,
}

/// Caller intent for one analysis invocation.
///
/// Blank optional fields are normalized to `None` on construction so the
/// orchestrator never has to distinguish `Some("")` from `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    file_path: PathBuf,
    content_type: Option<String>,
    file_name: Option<String>,
    analyzer_id: Option<String>,
}

impl AnalysisRequest {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            content_type: None,
            file_name: None,
            analyzer_id: None,
        }
    }

    /// Build a request for a resolved file, carrying its inferred type and name.
    pub fn for_stored_file(file: &StoredFile) -> Self {
        Self::new(&file.path)
            .with_content_type(file.content_type.as_deref())
            .with_file_name(Some(file.file_name.as_str()))
    }

    pub fn with_content_type(mut self, content_type: Option<&str>) -> Self {
        self.content_type = non_empty_trimmed(content_type);
        self
    }

    pub fn with_file_name(mut self, file_name: Option<&str>) -> Self {
        self.file_name = non_empty_trimmed(file_name);
        self
    }

    pub fn with_analyzer_id(mut self, analyzer_id: Option<&str>) -> Self {
        self.analyzer_id = non_empty_trimmed(analyzer_id);
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn analyzer_id(&self) -> Option<&str> {
        self.analyzer_id.as_deref()
    }

    /// Name used in logs and the outcome: the explicit name, else the path's last component.
    pub fn display_name(&self) -> String {
        self.file_name.clone().unwrap_or_else(|| {
            self.file_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.file_path.display().to_string())
        })
    }
}

/// Result envelope of a successful analysis.
///
/// `result` is the analysis service's payload, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    /// The analyzer actually used (request override or configured default)
    pub analyzer_id: String,
    pub api_version: String,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
    pub result: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_overrides_are_normalized() {
        let request = AnalysisRequest::new("/data/a.pdf")
            .with_content_type(Some("  "))
            .with_file_name(Some(""))
            .with_analyzer_id(Some(" custom "));

        assert_eq!(request.content_type(), None);
        assert_eq!(request.file_name(), None);
        assert_eq!(request.analyzer_id(), Some("custom"));
    }

    #[test]
    fn test_for_stored_file() {
        let file = StoredFile {
            path: PathBuf::from("/srv/data/invoice_sample.jpg"),
            content_type: Some("image/jpeg".to_string()),
            file_name: "invoice_sample.jpg".to_string(),
        };
        let request = AnalysisRequest::for_stored_file(&file);

        assert_eq!(request.file_path(), Path::new("/srv/data/invoice_sample.jpg"));
        assert_eq!(request.content_type(), Some("image/jpeg"));
        assert_eq!(request.file_name(), Some("invoice_sample.jpg"));
        assert_eq!(request.analyzer_id(), None);
    }

    #[test]
    fn test_display_name_falls_back_to_path() {
        let request = AnalysisRequest::new("/srv/data/nested/scan.pdf");
        assert_eq!(request.display_name(), "scan.pdf");

        let named = request.with_file_name(Some("Upload.pdf"));
        assert_eq!(named.display_name(), "Upload.pdf");
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = AnalysisOutcome {
            analyzer_id: "prebuilt-invoice".to_string(),
            api_version: "2025-05-01-preview".to_string(),
            content_type: None,
            file_name: Some("a.pdf".to_string()),
            result: json!({"status": "Succeeded"}),
        };

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            json!({
                "analyzerId": "prebuilt-invoice",
                "apiVersion": "2025-05-01-preview",
                "contentType": null,
                "fileName": "a.pdf",
                "result": {"status": "Succeeded"}
            })
        );
    }
}
