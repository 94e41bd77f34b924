//! Blocking operations. The calling thread waits for the HTTP round trip.
//!
//! Do not call these from inside an async runtime; use the `_async`
//! variants there.

use reqwest::blocking::RequestBuilder;

use super::response::{classify_generate, expect_success};
use super::{ACCOUNT_PATH, EnvoiceClient, GENERATE_PATH, VALIDATE_PATH, ValidateRequest};
use crate::core::{
    AccountInfo, EnvoiceError, GenerateRequest, InvoiceResult, PreparedInvoice, Result,
};

impl EnvoiceClient {
    /// Generate an invoice PDF.
    ///
    /// A [`PreparedInvoice::Rejected`] is returned as
    /// [`InvoiceResult::Failure`] without a request being made.
    ///
    /// # Errors
    ///
    /// [`EnvoiceError::QuotaExceeded`] on 402, [`EnvoiceError::Api`] on
    /// other non-2xx responses (except 422 with details, which is a
    /// `Failure`), [`EnvoiceError::Network`] on timeout or connection failure.
    pub fn generate(&self, prepared: impl Into<PreparedInvoice>) -> Result<InvoiceResult> {
        let request = match prepared.into() {
            PreparedInvoice::Ready(request) => request,
            PreparedInvoice::Rejected(failure) => return Ok(InvoiceResult::Failure(failure)),
        };
        let client = self.blocking_transport()?;
        let (status, body) = send(
            client.post(self.url(GENERATE_PATH)).json(&request),
            GENERATE_PATH,
        )?;
        classify_generate(status, &body)
    }

    /// Generate from a hand-built request, bypassing the builder.
    pub fn generate_invoice(&self, request: &GenerateRequest) -> Result<InvoiceResult> {
        self.generate(request.clone())
    }

    /// Check an existing PDF for ZUGFeRD/Factur-X compliance.
    ///
    /// The response body is returned as-is.
    pub fn validate(&self, pdf_base64: &str) -> Result<serde_json::Value> {
        let client = self.blocking_transport()?;
        let (status, body) = send(
            client
                .post(self.url(VALIDATE_PATH))
                .json(&ValidateRequest { pdf_base64 }),
            VALIDATE_PATH,
        )?;
        expect_success(status, &body)
    }

    /// Quota and plan of the account behind the API key.
    pub fn get_account(&self) -> Result<AccountInfo> {
        let client = self.blocking_transport()?;
        let (status, body) = send(client.get(self.url(ACCOUNT_PATH)), ACCOUNT_PATH)?;
        expect_success(status, &body)
    }

    /// Drop the blocking transport. A later call creates a new one.
    pub fn close(&mut self) {
        if self.blocking.take().is_some() {
            tracing::debug!("blocking transport released");
        }
    }
}

fn send(request: RequestBuilder, path: &str) -> Result<(u16, Vec<u8>)> {
    tracing::debug!(path, "sending request");
    let resp = request.send().map_err(EnvoiceError::network)?;
    let status = resp.status().as_u16();
    let body = resp.bytes().map_err(EnvoiceError::network)?;
    tracing::debug!(path, status, "received response");
    Ok((status, body.to_vec()))
}
