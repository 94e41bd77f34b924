//! HTTP client for the envoice.dev API.
//!
//! The client owns two independent transports, one for blocking and one
//! for async calls. Each is created on first use and reused afterwards.
//! No request is retried.

#[cfg(feature = "blocking")]
mod blocking;
mod config;
mod nonblocking;
mod response;

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};

use crate::core::{EnvoiceError, InvoiceBuilder, Result};

pub(crate) const GENERATE_PATH: &str = "/v1/generate";
pub(crate) const VALIDATE_PATH: &str = "/v1/validate";
pub(crate) const ACCOUNT_PATH: &str = "/v1/account";

const API_KEY_HEADER: &str = "x-api-key";

/// Body of `POST /v1/validate`.
#[derive(Serialize)]
pub(crate) struct ValidateRequest<'a> {
    pub(crate) pdf_base64: &'a str,
}

/// Client for generating, validating and accounting invoices.
///
/// ```no_run
/// # async fn run() -> envoice::Result<()> {
/// let mut client = envoice::EnvoiceClient::new("env_sandbox_xxx")?;
/// let account = client.get_account_async().await?;
/// println!("{} invoices left on {}", account.remaining, account.plan);
/// client.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct EnvoiceClient {
    config: ClientConfig,
    headers: HeaderMap,
    #[cfg(feature = "blocking")]
    blocking: OnceLock<reqwest::blocking::Client>,
    nonblocking: OnceLock<reqwest::Client>,
}

impl EnvoiceClient {
    /// Client for the production endpoint with the default timeout.
    ///
    /// # Errors
    ///
    /// [`EnvoiceError::Config`] if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut key = HeaderValue::from_str(config.api_key())
            .map_err(|_| EnvoiceError::Config("API key contains invalid characters".into()))?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        Ok(Self {
            config,
            headers,
            #[cfg(feature = "blocking")]
            blocking: OnceLock::new(),
            nonblocking: OnceLock::new(),
        })
    }

    /// Client configured from `ENVOICE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Start a new invoice.
    pub fn invoice(&self) -> InvoiceBuilder<'_> {
        InvoiceBuilder::new(self)
    }

    pub fn api_url(&self) -> &str {
        self.config.api_url()
    }

    pub fn timeout(&self) -> std::time::Duration {
        self.config.timeout()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url())
    }

    fn async_transport(&self) -> Result<&reqwest::Client> {
        if let Some(client) = self.nonblocking.get() {
            return Ok(client);
        }
        let client = reqwest::Client::builder()
            .timeout(self.config.timeout())
            .user_agent(self.config.user_agent())
            .default_headers(self.headers.clone())
            .build()
            .map_err(|e| EnvoiceError::Config(format!("cannot build HTTP client: {e}")))?;
        tracing::debug!(api_url = self.api_url(), "async transport created");
        Ok(self.nonblocking.get_or_init(|| client))
    }

    #[cfg(feature = "blocking")]
    fn blocking_transport(&self) -> Result<&reqwest::blocking::Client> {
        if let Some(client) = self.blocking.get() {
            return Ok(client);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout())
            .user_agent(self.config.user_agent())
            .default_headers(self.headers.clone())
            .build()
            .map_err(|e| EnvoiceError::Config(format!("cannot build HTTP client: {e}")))?;
        tracing::debug!(api_url = self.api_url(), "blocking transport created");
        Ok(self.blocking.get_or_init(|| client))
    }
}

impl std::fmt::Debug for EnvoiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("EnvoiceClient");
        s.field("config", &self.config);
        #[cfg(feature = "blocking")]
        s.field("blocking_open", &self.blocking.get().is_some());
        s.field("async_open", &self.nonblocking.get().is_some())
            .finish()
    }
}
