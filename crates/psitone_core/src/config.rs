use crate::error::PsiError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PsitoneConfig {
    pub llm: LlmConfig,
    pub server: ServerConfig,
    pub persona: PersonaConfig,
}

impl PsitoneConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: PsitoneConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("LLM_PROVIDER") {
            match v.parse() {
                Ok(p) => self.llm.provider = p,
                Err(e) => tracing::warn!("Ignoring LLM_PROVIDER: {}", e),
            }
        }
        if let Some(v) = lookup("GEMINI_MODEL") {
            self.llm.model = v;
        }
        if let Some(v) = lookup("LLM_BASE_URL") {
            self.llm.base_url = Some(v);
        }
        if let Some(n) = lookup("LLM_TEMPERATURE").and_then(|v| v.parse().ok()) {
            self.llm.temperature = n;
        }
        if let Some(n) = lookup("LLM_MAX_OUTPUT_TOKENS").and_then(|v| v.parse().ok()) {
            self.llm.max_output_tokens = n;
        }
        if let Some(n) = lookup("LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.llm.timeout_secs = n;
        }
        if let Some(v) = lookup("PSITONE_HOST") {
            self.server.host = v;
        }
        if let Some(n) = lookup("PSITONE_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = n;
        }
        if let Some(v) = lookup("PSITONE_PERSONA") {
            self.persona.identity = v;
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    /// Google Gemini `generateContent` API
    #[default]
    Gemini,
    /// Deterministic offline echo, no credential needed
    Mock,
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "mock" => Ok(Self::Mock),
            other => Err(format!("unknown LLM provider '{}'", other)),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gemini => "gemini",
            Self::Mock => "mock",
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Upper bound on a single generation call; expiry counts as a failed generation.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gemini,
            model: "gemini-1.5-flash".to_string(),
            base_url: None,
            temperature: 0.7,
            max_output_tokens: 2048,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Who the assistant claims to be whenever asked about its identity.
    pub identity: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            identity: "Yohannes Alemayehu's assistant, prompted by Yohannes".to_string(),
        }
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Secrets resolved once at startup.
#[derive(Clone)]
pub struct Credentials {
    api_key: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credentials {
    /// Resolve the credential the configured provider needs from the environment.
    ///
    /// A missing key is a `ConfigurationError`; callers are expected to abort
    /// startup rather than serve requests that can never succeed.
    pub fn resolve(llm: &LlmConfig) -> std::result::Result<Self, PsiError> {
        Self::resolve_with(llm, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        llm: &LlmConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> std::result::Result<Self, PsiError> {
        match llm.provider {
            LlmProvider::Mock => Ok(Self { api_key: None }),
            LlmProvider::Gemini => {
                let key = lookup(GEMINI_API_KEY_ENV)
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| {
                        PsiError::Configuration(format!(
                            "{} is not set in the environment variables!",
                            GEMINI_API_KEY_ENV
                        ))
                    })?;
                Ok(Self { api_key: Some(key) })
            }
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

// ============================================================================
// Tests
// ============================================================================
