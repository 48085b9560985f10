//! Invoice subdomain
//!
//! ```text
//! identifier ──▶ InvoiceReference ──▶ StoredFile ──▶ AnalysisRequest ──▶ AnalysisOutcome
//!  (untrusted)     (lexically safe)    (on disk,       (caller intent)     (service result)
//!                                       confined)
//! ```
//!
//! Only the first step is pure. Canonicalization and existence checks belong
//! to the `InvoiceStore` port implemented in the infrastructure layer.

pub mod content_type;
pub mod entities;
pub mod reference;
