//! Configuration sources for invoice-tools
//!
//! Two adapters implement the [`ConfigSource`] port:
//!
//! - [`EnvConfigSource`] reads the process environment on every lookup.
//! - [`LayeredConfigSource`] is a snapshot merged from TOML files and the
//!   environment by [`ConfigLoader`]. Priority (highest to lowest):
//!
//! 1. Environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./invoice-tools.toml` or `./.invoice-tools.toml`
//! 4. Global: `$XDG_CONFIG_HOME/invoice-tools/config.toml`
//!
//! Files use the same flat key names as the environment, e.g.
//! `CONTENT_UNDERSTANDING_ENDPOINT = "https://..."`. Keys are case-insensitive.
//!
//! [`ConfigSource`]: invoice_tools_application::ConfigSource

mod env_source;
mod loader;

pub use env_source::EnvConfigSource;
pub use loader::{ConfigLoadError, ConfigLoader, LayeredConfigSource};
