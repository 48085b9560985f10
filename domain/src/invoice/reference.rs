//! Lexical validation of caller-supplied invoice identifiers.
//!
//! This is the first half of the security boundary: anything that passes
//! here is a relative, traversal-free path. The second half (canonicalize and
//! confirm the result is still below the data root) needs the filesystem and
//! lives in the store adapter.

use crate::core::error::ReferenceError;
use std::path::{Path, PathBuf};

pub const EMPTY_IDENTIFIER: &str = "invoiceId must be a relative path inside the data directory.";
pub const UNSAFE_IDENTIFIER: &str =
    "invoiceId must not be absolute or traverse outside the data directory.";
pub const ROOT_ONLY_IDENTIFIER: &str = "invoiceId must specify a file within the data directory.";
pub const ESCAPING_IDENTIFIER: &str = "invoiceId must resolve inside the data directory.";

/// A relative invoice path that passed lexical validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceReference {
    /// The trimmed identifier as supplied by the caller
    raw: String,
    /// Normal components only, with any leading root-name segment removed
    segments: Vec<String>,
}

impl InvoiceReference {
    /// Validate `identifier` against the data root's directory name.
    ///
    /// Both `/` and `\` separate segments regardless of platform. `.` and
    /// empty segments are dropped. A leading segment equal to `root_name`
    /// (case-insensitive) is stripped, so `data/a.pdf` and `a.pdf` name the
    /// same file.
    pub fn parse(identifier: &str, root_name: &str) -> Result<Self, ReferenceError> {
        let raw = identifier.trim();
        if raw.is_empty() {
            return Err(ReferenceError::invalid(EMPTY_IDENTIFIER));
        }

        if is_absolute(raw) {
            return Err(ReferenceError::invalid(UNSAFE_IDENTIFIER));
        }

        let mut segments: Vec<String> = raw
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string)
            .collect();

        if segments.iter().any(|s| s == "..") {
            return Err(ReferenceError::invalid(UNSAFE_IDENTIFIER));
        }

        let root_name = root_name.to_lowercase();
        if !root_name.is_empty()
            && segments
                .first()
                .is_some_and(|first| first.to_lowercase() == root_name)
        {
            segments.remove(0);
        }

        if segments.is_empty() {
            return Err(ReferenceError::invalid(ROOT_ONLY_IDENTIFIER));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The validated path relative to the data root.
    pub fn relative_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Last segment, used as the display file name.
    pub fn file_name(&self) -> &str {
        // parse() guarantees at least one segment
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

impl std::fmt::Display for InvoiceReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

fn is_absolute(raw: &str) -> bool {
    if raw.starts_with(['/', '\\']) || Path::new(raw).is_absolute() {
        return true;
    }
    // Drive-letter prefixes (`C:foo`, `C:\foo`) on any platform
    let mut chars = raw.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(drive), Some(':')) if drive.is_ascii_alphabetic()
    )
}
