//! Invoice store port
//!
//! Resolves caller identifiers to files confined to a data root. This is
//! the security boundary: the orchestrator trusts a path only because a
//! store produced it.

use invoice_tools_domain::{ReferenceError, StoredFile};
use std::path::Path;

pub trait InvoiceStore: Send + Sync {
    /// Canonical data root.
    fn root(&self) -> &Path;

    /// Validate `identifier` and resolve it below [`root`](Self::root).
    ///
    /// Fails with `InvalidReference` for unsafe identifiers and with
    /// `NotFound` when the resolved path does not exist.
    fn resolve(&self, identifier: &str) -> Result<StoredFile, ReferenceError>;

    /// Whether `path` currently exists.
    fn exists(&self, path: &Path) -> bool;

    /// Size in bytes, if the file exists and is readable.
    fn file_size(&self, path: &Path) -> Option<u64>;
}
