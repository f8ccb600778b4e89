//! Configuration and backend factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizgen_core::model::{Difficulty, QuestionSchema};
use quizgen_core::pipeline::PipelineConfig;
use quizgen_core::traits::QuizBackend;

use crate::ollama::{self, OllamaProvider};
use crate::openai::OpenAiProvider;
use crate::server::{self, ServerBackend};

/// Configuration for a single backend.
///
/// Note: Custom Debug impl masks secrets to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Server {
        #[serde(default = "default_server_url")]
        base_url: String,
        #[serde(default)]
        token: Option<String>,
    },
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Server { base_url, token } => f
                .debug_struct("Server")
                .field("base_url", base_url)
                .field("token", &token.as_ref().map(|_| "***"))
                .finish(),
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            ProviderConfig::Ollama { base_url } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

fn default_server_url() -> String {
    server::DEFAULT_BASE_URL.to_string()
}

fn default_ollama_url() -> String {
    ollama::DEFAULT_BASE_URL.to_string()
}

/// Top-level quizgen configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizgenConfig {
    /// Backend configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Default model; empty lets the backend choose.
    #[serde(default)]
    pub default_model: String,
    #[serde(default)]
    pub default_schema: QuestionSchema,
    #[serde(default = "default_num_options")]
    pub default_num_options: usize,
    #[serde(default = "default_num_questions")]
    pub default_num_questions: u32,
    #[serde(default)]
    pub default_difficulty: Difficulty,
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,
    /// Max retries on provider errors.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

fn default_provider() -> String {
    "server".to_string()
}
fn default_num_options() -> usize {
    4
}
fn default_num_questions() -> u32 {
    10
}
fn default_temperature() -> f64 {
    0.7
}
fn default_retries() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    1000
}

impl Default for QuizgenConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: String::new(),
            default_schema: QuestionSchema::default(),
            default_num_options: default_num_options(),
            default_num_questions: default_num_questions(),
            default_difficulty: Difficulty::default(),
            default_temperature: default_temperature(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

impl QuizgenConfig {
    /// Retry settings for the generation pipeline.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            ..PipelineConfig::default()
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::Server { base_url, token } => ProviderConfig::Server {
            base_url: resolve_env_vars(base_url),
            token: token.as_deref().map(resolve_env_vars),
        },
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_deref().map(resolve_env_vars),
            org_id: org_id.as_deref().map(resolve_env_vars),
        },
        ProviderConfig::Ollama { base_url } => ProviderConfig::Ollama {
            base_url: resolve_env_vars(base_url),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizgen.toml` in the current directory
/// 2. `~/.config/quizgen/config.toml`
///
/// Environment variable overrides: `QUIZGEN_SERVER_TOKEN`, `QUIZGEN_OPENAI_KEY`.
pub fn load_config() -> Result<QuizgenConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizgenConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizgen.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => QuizgenConfig::default(),
    };

    apply_env_overrides(&mut config);

    config.providers = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<QuizgenConfig> {
    let config: QuizgenConfig = toml::from_str(content)?;
    anyhow::ensure!(
        config.default_num_options >= 2,
        "default_num_options must be at least 2"
    );
    Ok(config)
}

fn apply_env_overrides(config: &mut QuizgenConfig) {
    if let Ok(token) = std::env::var("QUIZGEN_SERVER_TOKEN") {
        let entry = config
            .providers
            .entry("server".into())
            .or_insert(ProviderConfig::Server {
                base_url: default_server_url(),
                token: None,
            });
        if let ProviderConfig::Server { token: slot, .. } = entry {
            *slot = Some(token);
        }
    }

    if let Ok(key) = std::env::var("QUIZGEN_OPENAI_KEY") {
        let entry = config
            .providers
            .entry("openai".into())
            .or_insert(ProviderConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                org_id: None,
            });
        if let ProviderConfig::OpenAI { api_key, .. } = entry {
            *api_key = key;
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizgen"))
}

/// Create a backend instance from its configuration.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn QuizBackend>> {
    Ok(match config {
        ProviderConfig::Server { base_url, token } => {
            Box::new(ServerBackend::new(base_url, token.clone())?)
        }
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Box::new(OpenAiProvider::new(
            api_key,
            base_url.clone(),
            org_id.clone(),
        )?),
        ProviderConfig::Ollama { base_url } => Box::new(OllamaProvider::new(base_url)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZGEN_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZGEN_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZGEN_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_QUIZGEN_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizgenConfig::default();
        assert_eq!(config.default_provider, "server");
        assert_eq!(config.default_num_options, 4);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.pipeline_config().retry_delay, Duration::from_millis(1000));
    }

    #[test]
    fn parse_provider_config() {
        let toml_str = r#"
default_provider = "openai"
default_model = "gpt-4.1-mini"
default_schema = "truefalse"
default_difficulty = "hard"

[providers.server]
type = "server"
base_url = "https://quiz.example.com"
token = "jwt"

[providers.openai]
type = "openai"
api_key = "sk-openai"

[providers.ollama]
type = "ollama"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.providers.len(), 3);
        assert_eq!(config.default_schema, QuestionSchema::TrueFalse);
        assert_eq!(config.default_difficulty, Difficulty::Hard);
        assert!(matches!(
            config.providers.get("ollama"),
            Some(ProviderConfig::Ollama { base_url }) if base_url == "http://localhost:11434"
        ));
    }

    #[test]
    fn reject_single_option_default() {
        assert!(parse_config("default_num_options = 1").is_err());
    }

    #[test]
    fn debug_masks_secrets() {
        let config = ProviderConfig::Server {
            base_url: "http://localhost:8000".into(),
            token: Some("super-secret".into()),
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizgen.toml");
        std::fs::write(
            &path,
            "default_provider = \"ollama\"\n\n[providers.ollama]\ntype = \"ollama\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_provider, "ollama");
        assert!(load_config_from(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
