//! Mapping of HTTP responses onto results and errors.
//!
//! | Response | Outcome |
//! |---|---|
//! | 2xx | `InvoiceResult::Success` |
//! | 402 | `Err(EnvoiceError::QuotaExceeded)` |
//! | 422 with non-empty `details` | `InvoiceResult::Failure` (returned) |
//! | any other status | `Err(EnvoiceError::Api)` |
//!
//! An error body that does not parse is replaced by
//! `{error: "unknown_error", message: "HTTP <status>"}`.

use serde::de::DeserializeOwned;

use crate::core::{
    EnvoiceError, ErrorResponse, GenerateResponse, InvoiceFailure, InvoiceResult, InvoiceSuccess,
    Result,
};

pub(crate) const STATUS_PAYMENT_REQUIRED: u16 = 402;
pub(crate) const STATUS_UNPROCESSABLE: u16 = 422;

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Classify a `POST /v1/generate` response.
pub(crate) fn classify_generate(status: u16, body: &[u8]) -> Result<InvoiceResult> {
    if is_success(status) {
        let resp: GenerateResponse = decode_body(body)?;
        return Ok(InvoiceResult::Success(InvoiceSuccess::from(resp)));
    }

    let error = parse_error_body(status, body);

    if status == STATUS_PAYMENT_REQUIRED {
        return Err(EnvoiceError::QuotaExceeded {
            message: error.message.unwrap_or_else(|| "Quota exceeded".into()),
        });
    }

    if status == STATUS_UNPROCESSABLE {
        if let Some(failure) = error.details.clone().and_then(InvoiceFailure::new) {
            return Ok(InvoiceResult::Failure(failure));
        }
    }

    Err(api_error(status, error))
}

/// Decode a 2xx body, or turn a non-2xx one into [`EnvoiceError::Api`].
pub(crate) fn expect_success<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    if is_success(status) {
        decode_body(body)
    } else {
        Err(api_error(status, parse_error_body(status, body)))
    }
}

pub(crate) fn parse_error_body(status: u16, body: &[u8]) -> ErrorResponse {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(error) => error,
        Err(e) => {
            tracing::warn!(status, error = %e, "unparsable error body, using unknown_error");
            ErrorResponse::unknown(status)
        }
    }
}

pub(crate) fn api_error(status: u16, error: ErrorResponse) -> EnvoiceError {
    let code = Some(error.error).filter(|c| !c.is_empty());
    let message = error
        .message
        .filter(|m| !m.is_empty())
        .or_else(|| code.clone())
        .unwrap_or_else(|| "Unknown error".into());
    EnvoiceError::Api {
        status,
        code,
        message,
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| EnvoiceError::Decode(format!("unexpected response body: {e}")))
}
