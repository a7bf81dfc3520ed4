//! Client configuration

use crate::error::{Result, VerdictError};
use crate::prompt::ImageDetail;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Public Responses API endpoint, used when no base URL is given.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const API_KEY_ENV: &str = "HAZCAT_API_KEY";
pub const MODEL_ENV: &str = "HAZCAT_MODEL";
pub const BASE_URL_ENV: &str = "HAZCAT_BASE_URL";

#[derive(Debug, Clone)]
pub struct HazCatConfig {
    /// Bearer credential for the model endpoint
    pub api_key: SecretString,

    /// Model identifier sent with every request
    pub model: String,

    /// Endpoint root; requests go to `{base_url}/responses`
    pub base_url: String,

    /// Request timeout. `None` leaves the call unbounded.
    pub timeout: Option<Duration>,

    pub detail: ImageDetail,
}

impl HazCatConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            detail: ImageDetail::default(),
        }
    }

    /// Load from `HAZCAT_API_KEY`, `HAZCAT_MODEL` and optional `HAZCAT_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from the same variables as `from_env`, resolved through `lookup`.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let missing = |name: &str| VerdictError::Config(format!("missing required env: {}", name));

        let api_key = get(API_KEY_ENV).ok_or_else(|| missing(API_KEY_ENV))?;
        let model = get(MODEL_ENV).ok_or_else(|| missing(MODEL_ENV))?;
        let mut config = Self::new(api_key, model);
        if let Some(base_url) = get(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_detail(mut self, detail: ImageDetail) -> Self {
        self.detail = detail;
        self
    }

    /// Check required fields before a client is built
    pub fn validate(&self) -> Result<()> {
        if self.raw_key().is_empty() {
            return Err(VerdictError::Config("api key is empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(VerdictError::Config("model is empty".to_string()));
        }
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(VerdictError::Config(format!(
                "base url must be http(s): {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Full URL of the responses endpoint
    pub fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.trim().trim_end_matches('/'))
    }

    /// The key with any `Bearer` prefix removed
    fn raw_key(&self) -> &str {
        let key = self.api_key.expose_secret().trim();
        match key.strip_prefix("Bearer") {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
            _ => key,
        }
    }

    /// Value for the `Authorization` header
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.raw_key())
    }
}
