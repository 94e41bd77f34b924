//! Stub envoice API for integration tests.
//!
//! Serves one canned response for every request on its own thread and
//! runtime, so blocking and async clients can both talk to it.

#![allow(dead_code)]

use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use envoice::{ClientConfig, EnvoiceClient, PartyBuilder};
use serde_json::Value;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

pub const API_KEY: &str = "env_sandbox_test";

/// A request as seen by the stub.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: Bytes,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct StubServer {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Respond with `status` and a JSON body.
    pub fn json(status: u16, body: Value) -> Self {
        Self::spawn(status, serde_json::to_vec(&body).unwrap(), Duration::ZERO)
    }

    /// Respond with `status` and a raw (possibly non-JSON) body.
    pub fn raw(status: u16, body: &str) -> Self {
        Self::spawn(status, body.as_bytes().to_vec(), Duration::ZERO)
    }

    /// Respond after `delay`.
    pub fn delayed(status: u16, body: Value, delay: Duration) -> Self {
        Self::spawn(status, serde_json::to_vec(&body).unwrap(), delay)
    }

    fn spawn(status: u16, body: Vec<u8>, delay: Duration) -> Self {
        let listener = StdTcpListener::bind("127.0.0.1:0").expect("stub bind");
        listener.set_nonblocking(true).expect("stub nonblocking");
        let addr = listener.local_addr().expect("stub addr");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: Bytes::from(body),
            delay,
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(handle).with_state(state);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let join = thread::spawn(move || {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("stub runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("stub listener");
                let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                });
                let _ = server.await;
            });
        });

        Self {
            base_url: format!("http://{addr}"),
            shutdown: Some(shutdown_tx),
            join: Some(join),
            requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    /// Client pointed at this stub.
    pub fn client(&self) -> EnvoiceClient {
        EnvoiceClient::with_config(ClientConfig::new(API_KEY).with_api_url(self.base_url()))
            .expect("client")
    }

    pub fn client_with_timeout(&self, timeout: Duration) -> EnvoiceClient {
        EnvoiceClient::with_config(
            ClientConfig::new(API_KEY)
                .with_api_url(self.base_url())
                .with_timeout(timeout),
        )
        .expect("client")
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

async fn handle(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        api_key: header_str("x-api-key"),
        content_type: header_str("content-type"),
        user_agent: header_str("user-agent"),
        body: serde_json::from_slice(&body).ok(),
    };
    if let Ok(mut requests) = state.requests.lock() {
        requests.push(recorded);
    }

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// "%PDF-1.4\n" base64-encoded.
pub const PDF_BASE64: &str = "JVBERi0xLjQK";

pub fn success_body() -> Value {
    serde_json::json!({
        "pdf_base64": PDF_BASE64,
        "filename": "invoice-2026-001.pdf",
        "validation": {
            "status": "valid",
            "profile": "EN16931",
            "version": "2.3.2"
        },
        "account": {
            "remaining": 499,
            "plan": "starter"
        }
    })
}

pub fn seller() -> PartyBuilder {
    PartyBuilder::new("Acme GmbH")
        .vat_id("DE123456789")
        .city("Berlin")
        .country("DE")
}

pub fn buyer() -> PartyBuilder {
    PartyBuilder::new("Customer AG").city("München").country("DE")
}
