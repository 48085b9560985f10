//! Authenticated analysis client lifecycle.
//!
//! - [`BearerTokenProvider`]: scoped, caching wrapper around a token credential
//! - [`ClientManager`]: picks the auth strategy and builds the client at most once
//! - [`ClientHandle`]: the client together with the credential that backs it

pub mod manager;
pub mod token_provider;

pub use manager::{COGNITIVE_SERVICES_SCOPE, ClientHandle, ClientManager};
pub use token_provider::BearerTokenProvider;
