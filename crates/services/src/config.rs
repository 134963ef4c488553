use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 30_000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Checked in order; the first non-blank value wins.
pub const API_KEY_VARS: [&str; 3] = ["EXAM_AI_API_KEY", "GEMINI_API_KEY", "API_KEY"];
pub const MODEL_VAR: &str = "EXAM_AI_MODEL";
pub const BASE_URL_VAR: &str = "EXAM_AI_BASE_URL";
pub const TIMEOUT_VAR: &str = "EXAM_AI_TIMEOUT_SECS";

/// Unvalidated generator settings gathered from the environment and command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeminiConfigDraft {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<String>,
    pub max_output_tokens: Option<u32>,
}

impl GeminiConfigDraft {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a draft from any variable lookup. Blank values count as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            api_key: API_KEY_VARS.iter().find_map(|name| non_blank(*name)),
            model: non_blank(MODEL_VAR),
            base_url: non_blank(BASE_URL_VAR),
            timeout_secs: non_blank(TIMEOUT_VAR),
            max_output_tokens: None,
        }
    }

    /// Validate and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a missing key, a base URL that is not absolute
    /// http(s), or a timeout that is not a positive whole number of seconds.
    pub fn validate(self) -> Result<GeminiConfig, ConfigError> {
        let api_key = self
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let model = self
            .model
            .map(|model| model.trim().to_string())
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let raw_url = self
            .base_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_url).map_err(|err| ConfigError::InvalidBaseUrl {
            url: raw_url.clone(),
            reason: err.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw_url,
                reason: format!("unsupported scheme `{}`", base_url.scheme()),
            });
        }

        let timeout_secs = match self.timeout_secs {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        let max_output_tokens = self.max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS);
        if max_output_tokens == 0 {
            return Err(ConfigError::InvalidMaxOutputTokens);
        }

        Ok(GeminiConfig {
            api_key,
            model,
            base_url,
            max_output_tokens,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Validated settings for the Gemini question source.
#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    api_key: String,
    model: String,
    base_url: Url,
    max_output_tokens: u32,
    timeout: Duration,
}

impl GeminiConfig {
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            self.model
        )
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}
