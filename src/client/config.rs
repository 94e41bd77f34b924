use std::time::Duration;

use crate::core::{EnvoiceError, Result};

/// Production endpoint.
pub const DEFAULT_API_URL: &str = "https://api.envoice.dev";

/// Per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_API_KEY: &str = "ENVOICE_API_KEY";
const ENV_API_URL: &str = "ENVOICE_API_URL";
const ENV_TIMEOUT_SECS: &str = "ENVOICE_TIMEOUT_SECS";

/// Connection settings for [`EnvoiceClient`](crate::EnvoiceClient).
///
/// ```
/// use std::time::Duration;
/// use envoice::ClientConfig;
///
/// let config = ClientConfig::new("env_sandbox_xxx")
///     .with_api_url("https://sandbox.envoice.dev/")
///     .with_timeout(Duration::from_secs(60));
/// assert_eq!(config.api_url(), "https://sandbox.envoice.dev");
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    api_url: String,
    timeout: Duration,
    user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("envoice-rust/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Read `ENVOICE_API_KEY`, `ENVOICE_API_URL` and `ENVOICE_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// [`EnvoiceError::Config`] if the key is unset or the timeout is not
    /// a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| EnvoiceError::Config(format!("{ENV_API_KEY} is not set")))?;
        let mut config = Self::new(api_key);

        if let Ok(url) = std::env::var(ENV_API_URL) {
            config = config.with_api_url(url);
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                EnvoiceError::Config(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {raw:?}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Base URL; a trailing `/` is dropped.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(EnvoiceError::Config("API key is required".into()));
        }
        if self.api_url.is_empty() {
            return Err(EnvoiceError::Config("API URL must not be empty".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new("env_sandbox_test");
        assert_eq!(config.api_url(), "https://api.envoice.dev");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent().starts_with("envoice-rust/"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::new("k").with_api_url("https://custom.api.url/");
        assert_eq!(config.api_url(), "https://custom.api.url");
    }

    #[test]
    fn empty_or_blank_key_is_rejected() {
        assert!(matches!(
            ClientConfig::new("").validate(),
            Err(EnvoiceError::Config(_))
        ));
        assert!(ClientConfig::new("   ").validate().is_err());
        assert!(ClientConfig::new("env_live_x").validate().is_ok());
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", ClientConfig::new("env_live_secret"));
        assert!(!rendered.contains("env_live_secret"));
    }
}
