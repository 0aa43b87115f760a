//! Runtime configuration.
//!
//! Layering, lowest to highest precedence: built-in defaults, the TOML file
//! (`lumina.toml` in the working directory unless `--config` names another),
//! environment variables, then CLI flags (applied by `main`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assistant::AssistModule;
use crate::error::{AssistError, Result};
use crate::matcher::EmptyQueryPolicy;
use crate::providers::Provider;

pub const DEFAULT_CONFIG_FILE: &str = "lumina.toml";

/// Placeholder shipped in sample `.env` files; treated as "no key".
const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub client: ClientConfig,
    pub matcher: MatcherConfig,
    pub corpus: CorpusConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest request body the `/chat` endpoint will accept.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { host: "127.0.0.1".to_string(), port: 5000, max_body_bytes: 1024 * 1024 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: Provider,
    pub model: String,
    pub api_key: Option<String>,
    /// Override the provider's public API base URL (useful for proxies).
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            kind: Provider::Gemini,
            model: Provider::Gemini.default_model().to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 60,
        }
    }
}

impl ProviderConfig {
    /// The configured key, ignoring blanks and the sample placeholder.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or_else(|| self.kind.default_base_url())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Full URL of the `/chat` endpoint the assistants call first.
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig { endpoint: "http://localhost:5000/chat".to_string(), timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub empty_query: EmptyQueryPolicy,
}

/// Optional per-module corpus files replacing the built-in samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub debugger: Option<PathBuf>,
    pub simplifier: Option<PathBuf>,
    pub checker: Option<PathBuf>,
}

impl CorpusConfig {
    pub fn path_for(&self, module: AssistModule) -> Option<&Path> {
        match module {
            AssistModule::Debugger => self.debugger.as_deref(),
            AssistModule::Simplifier => self.simplifier.as_deref(),
            AssistModule::Checker => self.checker.as_deref(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load the config file and overlay the process environment.
    ///
    /// An explicit `path` must exist. Without one, `lumina.toml` is used when
    /// present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Config::read_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Config::read_file(default_path)?
                } else {
                    debug!("no config file, using defaults");
                    Config::default()
                }
            }
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AssistError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let config = Config::from_toml_str(&text).map_err(|e| AssistError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Overlay environment variables using `lookup`.
    ///
    /// The provider's key variable (`GEMINI_API_KEY` / `OPENAI_API_KEY`) only
    /// fills in a key the file left unset; `LUMINA_ENDPOINT` always wins over
    /// the file.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.provider.api_key().is_none() {
            if let Some(key) = lookup(self.provider.kind.api_key_var()) {
                self.provider.api_key = Some(key);
            }
        }
        if let Some(endpoint) = lookup("LUMINA_ENDPOINT").filter(|e| !e.trim().is_empty()) {
            self.client.endpoint = endpoint;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.provider.kind, Provider::Gemini);
        assert_eq!(cfg.provider.model, "gemini-2.5-flash");
        assert_eq!(cfg.client.endpoint, "http://localhost:5000/chat");
        assert_eq!(cfg.matcher.empty_query, EmptyQueryPolicy::Reject);
        assert!(cfg.corpus.debugger.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let cfg = Config::from_toml_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.client.timeout_secs, 30);
    }

    #[test]
    fn test_full_toml() {
        let text = r#"
[provider]
kind = "openai"
model = "gpt-4o-mini"
api_key = "sk-test"

[client]
endpoint = "http://10.0.0.2:5000/chat"

[matcher]
empty_query = "match-first"

[corpus]
checker = "data/checker.json"
"#;
        let cfg = Config::from_toml_str(text).unwrap();
        assert_eq!(cfg.provider.kind, Provider::Openai);
        assert_eq!(cfg.provider.api_key(), Some("sk-test"));
        assert_eq!(cfg.matcher.empty_query, EmptyQueryPolicy::MatchFirst);
        assert_eq!(
            cfg.corpus.path_for(AssistModule::Checker),
            Some(Path::new("data/checker.json"))
        );
        assert_eq!(cfg.corpus.path_for(AssistModule::Debugger), None);
    }

    #[test]
    fn test_unknown_provider_is_error() {
        assert!(Config::from_toml_str("[provider]\nkind = \"palm\"\n").is_err());
    }

    #[test]
    fn test_placeholder_key_is_ignored() {
        let mut cfg = Config::default();
        cfg.provider.api_key = Some("YOUR_API_KEY_HERE".into());
        assert_eq!(cfg.provider.api_key(), None);
        cfg.provider.api_key = Some("   ".into());
        assert_eq!(cfg.provider.api_key(), None);
    }

    #[test]
    fn test_env_fills_missing_key() {
        let mut cfg = Config::default();
        cfg.apply_env(env(&[("GEMINI_API_KEY", "g-key")]));
        assert_eq!(cfg.provider.api_key(), Some("g-key"));
    }

    #[test]
    fn test_env_does_not_override_file_key() {
        let mut cfg = Config::default();
        cfg.provider.api_key = Some("from-file".into());
        cfg.apply_env(env(&[("GEMINI_API_KEY", "from-env")]));
        assert_eq!(cfg.provider.api_key(), Some("from-file"));
    }

    #[test]
    fn test_env_key_follows_provider_kind() {
        let mut cfg = Config::default();
        cfg.provider.kind = Provider::Openai;
        cfg.apply_env(env(&[("GEMINI_API_KEY", "g"), ("OPENAI_API_KEY", "o")]));
        assert_eq!(cfg.provider.api_key(), Some("o"));
    }

    #[test]
    fn test_env_endpoint_override() {
        let mut cfg = Config::default();
        cfg.apply_env(env(&[("LUMINA_ENDPOINT", "http://backend:9000/chat")]));
        assert_eq!(cfg.client.endpoint, "http://backend:9000/chat");
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let err = Config::load(Some(Path::new("/no/such/lumina.toml"))).unwrap_err();
        assert!(matches!(err, AssistError::Config { .. }));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[server]\nport = 7001\n").unwrap();
        let cfg = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(cfg.server.port, 7001);
    }

    #[test]
    fn test_base_url_defaults_per_provider() {
        let mut cfg = ProviderConfig::default();
        assert_eq!(cfg.base_url(), "https://generativelanguage.googleapis.com");
        cfg.base_url = Some("http://proxy:8080".into());
        assert_eq!(cfg.base_url(), "http://proxy:8080");
    }
}
