//! Output formatting

pub mod config_report;
pub mod formatter;
