//! Application Configuration
//!
//! TOML config with a `[provider]` default section, optional `[roles.*]`
//! per-role overrides, and `[pipeline]` / `[cache]` sections. A missing file
//! yields defaults, so the CLI works out of the box with just an API key in
//! the environment.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sitesmith_core::{CoreError, CoreResult};
use sitesmith_llm::{GenerationOptions, ProviderConfig, ProviderType};

/// Default environment variable per provider, used when `api_key_env` is
/// not set.
fn default_key_env(provider: ProviderType) -> &'static str {
    match provider {
        ProviderType::Gemini => "GEMINI_API_KEY",
        ProviderType::OpenAi => "OPENAI_API_KEY",
        ProviderType::Anthropic => "ANTHROPIC_API_KEY",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    pub provider: ProviderType,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    pub max_attempts: u32,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for RoleConfig {
    fn default() -> Self {
        let options = GenerationOptions::default();
        Self {
            provider: ProviderType::Gemini,
            model: "gemini-2.0-flash".to_string(),
            api_key_env: None,
            max_attempts: 3,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            timeout_secs: 120,
        }
    }
}

impl RoleConfig {
    /// Resolve the provider connection settings, reading the API key from
    /// the environment.
    pub fn provider_config(&self) -> ProviderConfig {
        let env_name = self
            .api_key_env
            .clone()
            .unwrap_or_else(|| default_key_env(self.provider).to_string());
        ProviderConfig {
            provider: self.provider,
            api_key: env::var(&env_name).ok(),
            model: self.model.clone(),
            base_url: None,
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Sparse per-role override; unset fields fall back to `[provider]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleOverride {
    pub provider: Option<ProviderType>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub max_attempts: Option<u32>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub template: String,
    pub auto_fix: bool,
    pub max_fix_iterations: u32,
    pub language: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            template: "landing".to_string(),
            auto_fix: true,
            max_fix_iterations: 3,
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Cache directory; defaults to `<data dir>/sitesmith/cache`.
    pub dir: Option<PathBuf>,
    pub ttl_hours: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            ttl_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: RoleConfig,
    /// Overrides keyed by role, e.g. `[roles.developer]`. Keys are the
    /// snake_case role names: strategist, copywriter, art_director,
    /// developer, reviewer, seo_optimizer, refinement, ab_variant.
    pub roles: HashMap<String, RoleOverride>,
    pub pipeline: PipelineConfig,
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load from an explicit path, or from the default location when `None`.
    /// A missing file is not an error.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)?;
        toml::from_str(&raw)
            .map_err(|e| CoreError::config(format!("{}: {}", path.display(), e)))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sitesmith").join("config.toml"))
    }

    /// Effective settings for one role: the `[provider]` defaults with any
    /// `[roles.<name>]` override applied on top.
    pub fn role_config(&self, role_key: &str) -> RoleConfig {
        let mut config = self.provider.clone();
        if let Some(over) = self.roles.get(role_key) {
            if let Some(provider) = over.provider {
                config.provider = provider;
                // Switching providers invalidates the default model unless
                // the override names one.
                if over.model.is_none() {
                    config.model = default_model(provider).to_string();
                }
            }
            if let Some(model) = &over.model {
                config.model = model.clone();
            }
            if let Some(env_name) = &over.api_key_env {
                config.api_key_env = Some(env_name.clone());
            }
            if let Some(max_attempts) = over.max_attempts {
                config.max_attempts = max_attempts;
            }
            if let Some(temperature) = over.temperature {
                config.temperature = temperature;
            }
            if let Some(max_tokens) = over.max_tokens {
                config.max_tokens = max_tokens;
            }
            if let Some(timeout_secs) = over.timeout_secs {
                config.timeout_secs = timeout_secs;
            }
        }
        config
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("sitesmith")
                .join("cache")
        })
    }
}

fn default_model(provider: ProviderType) -> &'static str {
    match provider {
        ProviderType::Gemini => "gemini-2.0-flash",
        ProviderType::OpenAi => "gpt-4o-mini",
        ProviderType::Anthropic => "claude-3-5-haiku-20241022",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.provider.model, "gemini-2.0-flash");
        assert!(config.pipeline.auto_fix);
        assert_eq!(config.pipeline.max_fix_iterations, 3);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_role_override_merges_onto_defaults() {
        let raw = r#"
            [provider]
            provider = "gemini"
            model = "gemini-2.0-flash"
            max_attempts = 2

            [roles.developer]
            provider = "anthropic"
            model = "claude-sonnet-4-20250514"
            max_tokens = 16384

            [roles.reviewer]
            provider = "openai"

            [pipeline]
            template = "saas"
            language = "es"
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();

        let developer = config.role_config("developer");
        assert_eq!(developer.provider, ProviderType::Anthropic);
        assert_eq!(developer.model, "claude-sonnet-4-20250514");
        assert_eq!(developer.max_tokens, 16384);
        assert_eq!(developer.max_attempts, 2);

        // Provider switch without a model picks that provider's default.
        let reviewer = config.role_config("reviewer");
        assert_eq!(reviewer.provider, ProviderType::OpenAi);
        assert_eq!(reviewer.model, "gpt-4o-mini");

        let strategist = config.role_config("strategist");
        assert_eq!(strategist.provider, ProviderType::Gemini);

        assert_eq!(config.pipeline.template, "saas");
        assert_eq!(config.pipeline.language, "es");
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not [valid toml").unwrap();
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
