use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::error::{EnvoiceError, Result};
use super::types::{AccountInfo, GenerateResponse, ValidationError, ValidationResult};

const PDF_DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

/// Outcome of an invoice generation attempt.
///
/// Only input problems end up in `Failure`; every other failure is an
/// [`EnvoiceError`].
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceResult {
    Success(InvoiceSuccess),
    Failure(InvoiceFailure),
}

impl InvoiceResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn as_success(&self) -> Option<&InvoiceSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&InvoiceFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    pub fn into_success(self) -> Option<InvoiceSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }

    pub fn into_failure(self) -> Option<InvoiceFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

impl From<InvoiceSuccess> for InvoiceResult {
    fn from(success: InvoiceSuccess) -> Self {
        Self::Success(success)
    }
}

impl From<InvoiceFailure> for InvoiceResult {
    fn from(failure: InvoiceFailure) -> Self {
        Self::Failure(failure)
    }
}

/// A generated invoice PDF with its compliance report.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSuccess {
    /// Base64-encoded PDF.
    pub pdf_base64: String,
    /// Server-suggested file name (e.g. "invoice-2026-001.pdf").
    pub filename: String,
    pub validation: ValidationResult,
    /// Quota snapshot after this invoice was billed.
    pub account: Option<AccountInfo>,
}

impl InvoiceSuccess {
    /// Decoded PDF bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.pdf_base64.as_bytes())
            .map_err(|e| EnvoiceError::Decode(format!("invalid base64 PDF payload: {e}")))
    }

    /// The PDF as a `data:` URL, e.g. for embedding in an `<iframe>`.
    pub fn to_data_url(&self) -> String {
        format!("{PDF_DATA_URL_PREFIX}{}", self.pdf_base64)
    }

    /// Write the decoded PDF to `path`, creating parent directories.
    pub fn save_pdf(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl From<GenerateResponse> for InvoiceSuccess {
    fn from(resp: GenerateResponse) -> Self {
        Self {
            pdf_base64: resp.pdf_base64,
            filename: resp.filename,
            validation: resp.validation,
            account: resp.account,
        }
    }
}

/// Field-level validation errors, from local checks or a 422 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceFailure {
    errors: Vec<ValidationError>,
}

impl InvoiceFailure {
    /// Returns `None` for an empty list: a failure always carries at least one error.
    pub fn new(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Caller guarantees `errors` is non-empty.
    pub(crate) fn from_nonempty(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// One "- path: message" line per error.
    pub fn to_user_message(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("- {}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for InvoiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "validation failed: {joined}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_failure_is_rejected() {
        assert!(InvoiceFailure::new(Vec::new()).is_none());
    }

    #[test]
    fn failure_display_joins_errors() {
        let failure = InvoiceFailure::new(vec![
            ValidationError::required("$.invoice.number", "Invoice number is required"),
            ValidationError::required("$.invoice.date", "Invoice date is required"),
        ])
        .unwrap();
        assert_eq!(
            failure.to_string(),
            "validation failed: $.invoice.number: Invoice number is required; \
             $.invoice.date: Invoice date is required"
        );
        assert_eq!(
            failure.to_user_message(),
            "- $.invoice.number: Invoice number is required\n\
             - $.invoice.date: Invoice date is required"
        );
    }

    #[test]
    fn invalid_base64_is_decode_error() {
        let success = InvoiceSuccess {
            pdf_base64: "not base64!!".into(),
            filename: "x.pdf".into(),
            validation: ValidationResult {
                status: "valid".into(),
                profile: "EN16931".into(),
                version: "2.3.2".into(),
                warnings: None,
            },
            account: None,
        };
        assert!(matches!(success.to_bytes(), Err(EnvoiceError::Decode(_))));
    }
}
