//! Configuration loader with multi-source merging

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use invoice_tools_application::ConfigSource;
use invoice_tools_domain::known_keys;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const APP_DIR: &str = "invoice-tools";
const PROJECT_FILES: [&str; 2] = ["invoice-tools.toml", ".invoice-tools.toml"];

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid config: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// A TOML scalar; everything ends up as the string a variable would hold.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarValue {
    Text(String),
    Flag(bool),
    Number(f64),
}

impl ScalarValue {
    fn into_string(self) -> String {
        match self {
            ScalarValue::Text(s) => s,
            ScalarValue::Flag(b) => b.to_string(),
            ScalarValue::Number(n) => n.to_string(),
        }
    }
}

/// Snapshot of merged configuration values, keyed by upper-case name.
#[derive(Debug, Clone, Default)]
pub struct LayeredConfigSource {
    values: BTreeMap<String, String>,
    origins: Vec<PathBuf>,
}

impl LayeredConfigSource {
    /// Files that contributed values, lowest priority first.
    pub fn origins(&self) -> &[PathBuf] {
        &self.origins
    }

    fn insert(&mut self, key: &str, value: String) {
        self.values.insert(key.to_ascii_uppercase(), value);
    }
}

impl ConfigSource for LayeredConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(&key.to_ascii_uppercase()).cloned()
    }
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Explicit config path (if provided; must exist)
    /// 3. Project root: `./invoice-tools.toml` or `./.invoice-tools.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/invoice-tools/config.toml`
    pub fn load(config_path: Option<&PathBuf>) -> Result<LayeredConfigSource, ConfigLoadError> {
        let mut files: Vec<PathBuf> = Vec::new();
        if let Some(global) = Self::global_config_path()
            && global.exists()
        {
            files.push(global);
        }
        if let Some(project) = Self::project_config_path() {
            files.push(project);
        }
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigLoadError::MissingFile(path.clone()));
            }
            files.push(path.clone());
        }

        Self::load_from(&files, true)
    }

    /// Environment only (for --no-config)
    pub fn load_env_only() -> LayeredConfigSource {
        let mut source = LayeredConfigSource::default();
        Self::merge_env(&mut source);
        source
    }

    /// Merge `files` in order (later wins), then optionally the environment.
    pub fn load_from(
        files: &[PathBuf],
        include_env: bool,
    ) -> Result<LayeredConfigSource, ConfigLoadError> {
        let figment = files
            .iter()
            .fold(Figment::new(), |figment, path| figment.merge(Toml::file(path)));

        let extracted: BTreeMap<String, ScalarValue> = figment.extract().map_err(Box::new)?;

        let mut source = LayeredConfigSource {
            values: BTreeMap::new(),
            origins: files.to_vec(),
        };
        for (key, value) in extracted {
            source.insert(&key, value.into_string());
        }

        if include_env {
            Self::merge_env(&mut source);
        }

        debug!(
            files = ?source.origins,
            keys = source.values.len(),
            "Configuration sources merged"
        );
        Ok(source)
    }

    // Env values are taken verbatim; going through figment's value parsing
    // would turn a key like "0123" into the number 123.
    fn merge_env(source: &mut LayeredConfigSource) {
        let names: Vec<&str> = known_keys().iter().map(|k| k.key).collect();
        for (key, value) in Env::raw().only(&names).iter() {
            source.insert(key.as_str(), value);
        }
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/invoice-tools/config.toml if set,
    /// otherwise falls back to ~/.config/invoice-tools/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_tools_application::ConfigResolver;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_later_file_wins() {
        let dir = TempDir::new().unwrap();
        let global = write(
            &dir,
            "global.toml",
            r#"
CONTENT_UNDERSTANDING_ENDPOINT = "https://global.example.com"
CONTENT_UNDERSTANDING_ANALYZER_ID = "global-analyzer"
"#,
        );
        let explicit = write(
            &dir,
            "explicit.toml",
            r#"CONTENT_UNDERSTANDING_ENDPOINT = "https://explicit.example.com""#,
        );

        let source = ConfigLoader::load_from(&[global, explicit.clone()], false).unwrap();

        assert_eq!(
            source.get("CONTENT_UNDERSTANDING_ENDPOINT").as_deref(),
            Some("https://explicit.example.com")
        );
        assert_eq!(
            source.get("CONTENT_UNDERSTANDING_ANALYZER_ID").as_deref(),
            Some("global-analyzer")
        );
        assert_eq!(source.origins().last(), Some(&explicit));
    }

    #[test]
    fn test_numbers_and_lowercase_keys() {
        let dir = TempDir::new().unwrap();
        let file = write(
            &dir,
            "config.toml",
            r#"
content_understanding_endpoint = "https://cu.example.com"
CONTENT_UNDERSTANDING_POLL_INTERVAL_SECONDS = 0.5
CONTENT_UNDERSTANDING_POLL_TIMEOUT_SECONDS = 30
"#,
        );

        let source = ConfigLoader::load_from(&[file], false).unwrap();
        let config = ConfigResolver::resolve_from(&source).unwrap();

        assert_eq!(config.endpoint(), "https://cu.example.com");
        assert_eq!(config.poll_interval_seconds(), 0.5);
        assert_eq!(config.poll_timeout_seconds(), 30.0);
    }

    #[test]
    fn test_no_files_is_empty() {
        let source = ConfigLoader::load_from(&[], false).unwrap();
        assert_eq!(source.get("CONTENT_UNDERSTANDING_ENDPOINT"), None);
        assert!(source.origins().is_empty());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "bad.toml", "CONTENT_UNDERSTANDING_ENDPOINT = ");

        let result = ConfigLoader::load_from(&[file], false);
        assert!(matches!(result, Err(ConfigLoadError::Invalid(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let missing = PathBuf::from("/definitely/not/here/invoice-tools.toml");
        let result = ConfigLoader::load(Some(&missing));
        assert!(matches!(result, Err(ConfigLoadError::MissingFile(p)) if p == missing));
    }

    #[test]
    fn test_project_config_discovery() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ConfigLoader::project_config_in(dir.path()), None);

        let hidden = write(&dir, ".invoice-tools.toml", "");
        assert_eq!(ConfigLoader::project_config_in(dir.path()), Some(hidden));

        let visible = write(&dir, "invoice-tools.toml", "");
        assert_eq!(ConfigLoader::project_config_in(dir.path()), Some(visible));
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("invoice-tools"));
    }
}
