//! Azure AI Content Understanding adapter
//!
//! - [`ContentUnderstandingClient`]: the submit/poll REST calls
//! - [`ContentUnderstandingClientFactory`]: builds clients for either auth strategy

mod client;
mod factory;

pub use client::{ClientAuth, ContentUnderstandingClient};
pub use factory::ContentUnderstandingClientFactory;
