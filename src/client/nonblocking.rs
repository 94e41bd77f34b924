//! Async operations, run on the caller's tokio runtime.

use reqwest::RequestBuilder;

use super::response::{classify_generate, expect_success};
use super::{ACCOUNT_PATH, EnvoiceClient, GENERATE_PATH, VALIDATE_PATH, ValidateRequest};
use crate::core::{
    AccountInfo, EnvoiceError, GenerateRequest, InvoiceResult, PreparedInvoice, Result,
};

impl EnvoiceClient {
    /// Async counterpart of `generate`; same classification.
    pub async fn generate_async(
        &self,
        prepared: impl Into<PreparedInvoice>,
    ) -> Result<InvoiceResult> {
        let request = match prepared.into() {
            PreparedInvoice::Ready(request) => request,
            PreparedInvoice::Rejected(failure) => return Ok(InvoiceResult::Failure(failure)),
        };
        let client = self.async_transport()?;
        let (status, body) = send(
            client.post(self.url(GENERATE_PATH)).json(&request),
            GENERATE_PATH,
        )
        .await?;
        classify_generate(status, &body)
    }

    pub async fn generate_invoice_async(&self, request: &GenerateRequest) -> Result<InvoiceResult> {
        self.generate_async(request.clone()).await
    }

    /// Check an existing PDF; the response body is returned as-is.
    pub async fn validate_async(&self, pdf_base64: &str) -> Result<serde_json::Value> {
        let client = self.async_transport()?;
        let (status, body) = send(
            client
                .post(self.url(VALIDATE_PATH))
                .json(&ValidateRequest { pdf_base64 }),
            VALIDATE_PATH,
        )
        .await?;
        expect_success(status, &body)
    }

    pub async fn get_account_async(&self) -> Result<AccountInfo> {
        let client = self.async_transport()?;
        let (status, body) = send(client.get(self.url(ACCOUNT_PATH)), ACCOUNT_PATH).await?;
        expect_success(status, &body)
    }

    /// Drop the async transport, closing its idle connections.
    pub async fn shutdown(&mut self) {
        if self.nonblocking.take().is_some() {
            tracing::debug!("async transport released");
        }
    }
}

async fn send(request: RequestBuilder, path: &str) -> Result<(u16, Vec<u8>)> {
    tracing::debug!(path, "sending request");
    let resp = request.send().await.map_err(EnvoiceError::network)?;
    let status = resp.status().as_u16();
    let body = resp.bytes().await.map_err(EnvoiceError::network)?;
    tracing::debug!(path, status, "received response");
    Ok((status, body.to_vec()))
}
