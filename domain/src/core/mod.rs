//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ReferenceError`]: invoice reference failures
//! - [`string`]: trimming helpers for caller- and operator-supplied text

pub mod error;
pub mod string;
