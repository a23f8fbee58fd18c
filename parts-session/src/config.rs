//! Configuration for a lookup assistant deployment.

use serde::{Deserialize, Serialize};

use parts_agent::backend::gemini::DEFAULT_BASE_URL;
use parts_agent::{AgentConfig, BackendError, GeminiBackend, GeminiSettings};

/// Error types for configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// YAML could not be parsed or written
    #[error("Invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The API key environment variable is unset or empty
    #[error("Missing API key: environment variable {0} is not set")]
    MissingApiKey(String),

    /// Backend could not be constructed
    #[error("Backend setup failed: {0}")]
    Backend(#[from] BackendError),
}

/// Configuration for the lookup assistant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Generative backend settings
    pub backend: BackendConfig,
    /// Blocked-brand notice
    pub access: AccessConfig,
    /// Admin bootstrap
    pub bootstrap: BootstrapConfig,
    /// User-visible messages
    pub messages: MessagesConfig,
}

impl AssistantConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Settings passed to the agent service.
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            search_timeout_ms: self.backend.search_timeout_ms,
            image_timeout_ms: self.backend.image_timeout_ms,
            temperature: self.backend.temperature,
        }
    }

    /// Gemini settings with the API key read from the environment.
    pub fn gemini_settings(&self) -> Result<GeminiSettings, ConfigError> {
        let key = std::env::var(&self.backend.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(self.backend.api_key_env.clone()))?;
        Ok(self.backend.settings_with_key(key))
    }

    /// Build the Gemini backend.
    pub fn gemini_backend(&self) -> Result<GeminiBackend, ConfigError> {
        Ok(GeminiBackend::new(self.gemini_settings()?)?)
    }
}

/// Generative backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// API root
    pub base_url: String,
    /// Model for structured searches
    pub search_model: String,
    /// Model for product images
    pub image_model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Search timeout (ms)
    pub search_timeout_ms: u64,
    /// Image timeout (ms)
    pub image_timeout_ms: u64,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl BackendConfig {
    fn settings_with_key(&self, api_key: String) -> GeminiSettings {
        let mut settings = GeminiSettings::new(api_key).with_base_url(self.base_url.clone());
        settings.search_model = self.search_model.clone();
        settings.image_model = self.image_model.clone();
        settings
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            api_key_env: "API_KEY".to_string(),
            search_timeout_ms: 30_000,
            image_timeout_ms: 60_000,
            temperature: None,
        }
    }
}

/// Notice shown when a blocked brand is picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub notice: String,
    pub contact: Option<String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            notice: "Bu markaya erişim yetkiniz bulunmuyor. Erişim için yöneticinizle iletişime geçin."
                .to_string(),
            contact: None,
        }
    }
}

/// Admin bootstrap configuration.
///
/// When set, the identity with this identifier is promoted to an approved
/// admin on its first successful login. Unset by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub admin_identifier: Option<String>,
}

/// User-visible messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Shown when a search fails for any reason
    pub search_failed: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            search_failed: "could not retrieve part information".to_string(),
        }
    }
}
