//! Application-level configuration.
//!
//! - [`ConfigResolver`]: turns a [`ConfigSource`](crate::ports::config_source::ConfigSource)
//!   into a validated [`ResolvedConfig`](invoice_tools_domain::ResolvedConfig)

pub mod resolver;

pub use resolver::ConfigResolver;
