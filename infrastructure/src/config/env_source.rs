//! Environment-backed configuration source.

use figment::providers::Env;
use invoice_tools_application::ConfigSource;

/// Reads each key straight from the process environment.
///
/// Lookups are live: the value seen is whatever the environment holds at
/// call time. Memoization is the caller's concern.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigSource;

impl EnvConfigSource {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigSource for EnvConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        Env::var(key)
    }
}
