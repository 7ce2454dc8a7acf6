//! # Client configuration — `medilabo.toml`
//!
//! The only setting the front end needs is where the API lives. It can come
//! from four places, first match wins:
//!
//! 1. the `MEDILABO_API_URL` environment variable at run time (native builds);
//! 2. a `medilabo.toml` file in the working directory (native builds);
//! 3. the same variable at build time, baked in with `option_env!` (WASM
//!    builds have neither a process environment nor a filesystem);
//! 4. the default, `http://localhost:8080`.
//!
//! The file looks like this:
//!
//! ```toml
//! [api]
//! url = "https://medilabo.example.org"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable holding the API base URL.
pub const API_URL_VAR: &str = "MEDILABO_API_URL";

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

/// API section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, without a trailing slash.
    #[serde(default = "default_api_url")]
    pub url: String,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                url: normalize(url.into()),
            },
        }
    }

    /// Resolve from the environment and `medilabo.toml`, falling back to the
    /// default. An unreadable or malformed file is logged and skipped.
    pub fn from_env() -> Self {
        let runtime = std::env::var(API_URL_VAR).ok();
        let file = Self::from_working_dir();
        Self::resolve(runtime, file, option_env!("MEDILABO_API_URL"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_working_dir() -> Option<Self> {
        let path = Path::new(Self::filename());
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring {}: {e}", path.display());
                None
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn from_working_dir() -> Option<Self> {
        None
    }

    /// Apply the precedence rules to already-collected sources.
    pub fn resolve(runtime: Option<String>, file: Option<Self>, build_time: Option<&str>) -> Self {
        if let Some(url) = runtime.filter(|url| !url.trim().is_empty()) {
            return Self::new(url);
        }
        if let Some(config) = file {
            return config;
        }
        match build_time.filter(|url| !url.trim().is_empty()) {
            Some(url) => Self::new(url),
            None => Self::default(),
        }
    }

    /// Read a config file. A missing file is `Ok(None)`.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConfigError::Io(e.to_string())),
        };
        let config = Self::from_toml(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tracing::debug!(url = config.api_url(), "loaded {}", path.display());
        Ok(Some(config))
    }

    pub fn api_url(&self) -> &str {
        &self.api.url
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "medilabo.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.api.url = normalize(config.api.url);
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn normalize(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_localhost() {
        assert_eq!(ClientConfig::default().api_url(), "http://localhost:8080");
        assert_eq!(ClientConfig::from_toml("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        assert_eq!(
            ClientConfig::new("https://api.example.org/").api_url(),
            "https://api.example.org"
        );
        let parsed = ClientConfig::from_toml("[api]\nurl = \"http://10.0.0.2:9000/\"\n").unwrap();
        assert_eq!(parsed.api_url(), "http://10.0.0.2:9000");
    }

    #[test]
    fn test_environment_beats_file_beats_build_time() {
        let file = ClientConfig::new("http://from-file:9000");
        let resolved = ClientConfig::resolve(
            Some("http://from-env:8080/".to_string()),
            Some(file.clone()),
            Some("http://baked-in"),
        );
        assert_eq!(resolved.api_url(), "http://from-env:8080");

        let resolved = ClientConfig::resolve(Some("  ".to_string()), Some(file.clone()), Some("http://baked-in"));
        assert_eq!(resolved, file);

        let resolved = ClientConfig::resolve(None, None, Some("http://baked-in/"));
        assert_eq!(resolved.api_url(), "http://baked-in");
        assert_eq!(ClientConfig::resolve(None, None, None), ClientConfig::default());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ClientConfig::filename());
        assert_eq!(ClientConfig::from_file(&path).unwrap(), None);

        std::fs::write(&path, "[api]\nurl = \"https://medilabo.example.org/\"\n").unwrap();
        let config = ClientConfig::from_file(&path).unwrap().unwrap();
        assert_eq!(config.api_url(), "https://medilabo.example.org");

        std::fs::write(&path, "[api\nurl =").unwrap();
        assert!(matches!(ClientConfig::from_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::new("http://gateway:8080");
        let text = config.to_toml().unwrap();
        assert!(text.contains("url = \"http://gateway:8080\""));
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }
}
