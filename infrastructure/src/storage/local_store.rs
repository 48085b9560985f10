//! Local filesystem invoice store.
//!
//! Second half of the path-confinement boundary. [`InvoiceReference`] has
//! already rejected absolute and `..` identifiers; this adapter resolves
//! symlinks and checks that the real target is still below the real root.

use invoice_tools_application::InvoiceStore;
use invoice_tools_domain::invoice::reference::ESCAPING_IDENTIFIER;
use invoice_tools_domain::{InvoiceReference, ReferenceError, StoredFile, guess_content_type};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const MAX_LINK_HOPS: usize = 40;

/// Best-effort real location of a path that does not fully exist.
///
/// Dangling symlinks are followed by hand; otherwise the deepest existing
/// ancestor is canonicalized and the missing tail appended to it.
fn real_destination(path: &Path, hops: usize) -> PathBuf {
    if let Ok(real) = path.canonicalize() {
        return real;
    }
    if hops > 0
        && let Ok(link) = fs::read_link(path)
    {
        let next = match path.parent() {
            Some(parent) => parent.join(link),
            None => link,
        };
        return real_destination(&next, hops - 1);
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => real_destination(parent, hops).join(name),
        _ => path.to_path_buf(),
    }
}

/// Invoice files under a data directory on the local disk.
#[derive(Debug, Clone)]
pub struct LocalInvoiceStore {
    /// Canonical absolute root
    root: PathBuf,
    /// Last component of the root, accepted as an optional identifier prefix
    root_name: String,
}

impl LocalInvoiceStore {
    /// Open a store rooted at `root`, which must exist.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { root, root_name })
    }

    fn is_strict_descendant(&self, path: &Path) -> bool {
        path != self.root && path.starts_with(&self.root)
    }
}

impl InvoiceStore for LocalInvoiceStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, identifier: &str) -> Result<StoredFile, ReferenceError> {
        let reference = InvoiceReference::parse(identifier, &self.root_name)?;
        let joined = self.root.join(reference.relative_path());

        let target = match joined.canonicalize() {
            Ok(target) => target,
            Err(e) => {
                debug!("Unable to canonicalize {}: {}", joined.display(), e);
                // Where the path would lead decides between the two errors
                if !self.is_strict_descendant(&real_destination(&joined, MAX_LINK_HOPS)) {
                    return Err(ReferenceError::invalid(ESCAPING_IDENTIFIER));
                }
                return Err(ReferenceError::NotFound(joined));
            }
        };

        if !self.is_strict_descendant(&target) {
            return Err(ReferenceError::invalid(ESCAPING_IDENTIFIER));
        }

        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| reference.file_name().to_string());
        let content_type = guess_content_type(&file_name).map(str::to_string);

        debug!(
            "Resolved invoiceId '{}' to {} (contentType={:?})",
            reference,
            target.display(),
            content_type
        );

        Ok(StoredFile {
            path: target,
            content_type,
            file_name,
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn file_size(&self, path: &Path) -> Option<u64> {
        std::fs::metadata(path).ok().map(|m| m.len())
    }
}
