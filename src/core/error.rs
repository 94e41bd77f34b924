use thiserror::Error;

/// Errors raised by the client.
///
/// Validation failures (missing fields, or a 422 with details) are not
/// errors: they come back as [`InvoiceResult::Failure`](crate::InvoiceResult).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvoiceError {
    /// Invalid client configuration, detected before any I/O.
    #[error("configuration error: {0}")]
    Config(String),

    /// Non-2xx response from the API.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// Server error code (e.g. "invalid_request").
        code: Option<String>,
        message: String,
    },

    /// HTTP 402: the account has no invoices left on its plan.
    #[error("quota exceeded: {message}")]
    QuotaExceeded { message: String },

    /// Timeout or connection failure.
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// A success body or PDF payload that could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Local file I/O (logo file, saved PDF).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, EnvoiceError>;

impl EnvoiceError {
    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::QuotaExceeded { .. } => Some(402),
            _ => None,
        }
    }

    /// Server error code for API errors.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            Self::QuotaExceeded { .. } => Some("quota_exceeded"),
            _ => None,
        }
    }

    /// True for [`Api`](Self::Api) and [`QuotaExceeded`](Self::QuotaExceeded).
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::QuotaExceeded { .. })
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { source, .. } if source.is_timeout())
    }

    pub(crate) fn network(source: reqwest::Error) -> Self {
        let message = if source.is_timeout() {
            "request timeout".to_string()
        } else {
            source.to_string()
        };
        Self::Network { message, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_exceeded_reports_as_api_error() {
        let err = EnvoiceError::QuotaExceeded {
            message: "Monthly limit reached".into(),
        };
        assert!(err.is_api_error());
        assert_eq!(err.status(), Some(402));
        assert_eq!(err.code(), Some("quota_exceeded"));
        assert_eq!(err.to_string(), "quota exceeded: Monthly limit reached");
    }

    #[test]
    fn api_error_carries_status_and_code() {
        let err = EnvoiceError::Api {
            status: 500,
            code: Some("internal_error".into()),
            message: "Server exploded".into(),
        };
        assert!(err.is_api_error());
        assert!(!err.is_quota_exceeded());
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.code(), Some("internal_error"));
    }

    #[test]
    fn config_error_has_no_status() {
        let err = EnvoiceError::Config("API key is required".into());
        assert!(!err.is_api_error());
        assert_eq!(err.status(), None);
        assert_eq!(err.code(), None);
    }
}
