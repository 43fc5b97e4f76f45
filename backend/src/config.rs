//! Configuration file support.
//!
//! `FloatChatConfig` is read from `floatchat.toml` and then overridden by
//! environment variables. Every field has a default, so an empty file (or no
//! file at all) yields a working echo-provider setup.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chat::history::DEFAULT_HISTORY_FILE;
use crate::error::{FloatChatError, FloatChatResult};
use crate::services::responder::CHAT_BASE_REGIONS;

pub const CONFIG_FILE_NAME: &str = "floatchat.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatChatConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Bind address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Chat completion provider and history settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    /// `"echo"` or `"openai"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Pause between echo fragments, in milliseconds.
    #[serde(default)]
    pub echo_delay_ms: u64,
    /// History file; `None` keeps conversations in memory only.
    #[serde(default = "default_history_path")]
    pub history_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Regions whose catalogs make up the chat base dataset.
    #[serde(default = "default_chat_regions")]
    pub chat_regions: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_provider() -> String {
    "echo".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_history_path() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_HISTORY_FILE))
}

fn default_chat_regions() -> Vec<String> {
    CHAT_BASE_REGIONS.iter().map(|r| r.to_string()).collect()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            api_base: default_api_base(),
            echo_delay_ms: 0,
            history_path: default_history_path(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            chat_regions: default_chat_regions(),
        }
    }
}

impl FloatChatConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> FloatChatResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            FloatChatError::Config(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content)
            .map_err(|e| FloatChatError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `floatchat.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> FloatChatResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(FloatChatError::Config(format!(
            "No {} found in standard locations",
            CONFIG_FILE_NAME
        )))
    }

    /// Apply `HOST`, `PORT`, `FLOATCHAT_PROVIDER`, `FLOATCHAT_MODEL`,
    /// `FLOATCHAT_HISTORY_PATH` and `OPENAI_API_KEY`.
    ///
    /// An unparsable `PORT` is ignored. An empty `FLOATCHAT_HISTORY_PATH`
    /// disables persistence.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|s| s.parse().ok()) {
            self.server.port = port;
        }
        if let Ok(provider) = env::var("FLOATCHAT_PROVIDER") {
            self.chat.provider = provider.trim().to_lowercase();
        }
        if let Ok(model) = env::var("FLOATCHAT_MODEL") {
            self.chat.model = model;
        }
        if let Ok(path) = env::var("FLOATCHAT_HISTORY_PATH") {
            self.chat.history_path = if path.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            if !key.trim().is_empty() {
                self.chat.api_key = Some(key);
            }
        }
    }

    /// File configuration (or defaults when no file exists) with environment
    /// overrides applied. A file that exists but does not parse is an error.
    pub fn load() -> FloatChatResult<Self> {
        let mut config = match Self::from_default_location() {
            Ok(config) => config,
            Err(FloatChatError::Config(msg)) if msg.starts_with("No ") => {
                log::debug!("{}; using defaults", msg);
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FloatChatConfig = toml::from_str("").unwrap();
        assert_eq!(config, FloatChatConfig::default());
        assert_eq!(config.chat.provider, "echo");
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(
            config.catalog.chat_regions,
            vec!["arabian_sea", "bay_of_bengal", "indian_ocean"]
        );
        assert_eq!(config.chat.history_path, Some(PathBuf::from("chat_history.json")));
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 9090

[chat]
provider = "openai"
model = "gpt-4o"
echo_delay_ms = 25

[catalog]
chat_regions = ["southern_ocean"]
"#;

        let config: FloatChatConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.chat.provider, "openai");
        assert_eq!(config.chat.model, "gpt-4o");
        assert_eq!(config.chat.echo_delay_ms, 25);
        assert_eq!(config.chat.api_base, "https://api.openai.com/v1");
        assert_eq!(config.catalog.chat_regions, vec!["southern_ocean"]);
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config: FloatChatConfig =
            toml::from_str(include_str!("../floatchat.example.toml")).unwrap();
        assert_eq!(config, FloatChatConfig::default());
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let mut config = FloatChatConfig::default();
        config.chat.api_key = Some("sk-secret".into());
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("sk-secret"));
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[server\nport = ").unwrap();
        assert!(matches!(
            FloatChatConfig::from_file(&path),
            Err(FloatChatError::Config(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let err = FloatChatConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
