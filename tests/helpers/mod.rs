//! Shared fixtures for route tests: a recording lead endpoint and an
//! in-memory content source.

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use agrolead::{
    AppState, Config,
    config::{
        ContentConfig, I18nConfig, ObservabilityConfig, ServerConfig, SubmissionConfig,
    },
};
use agrolead_content::{ContentQuery, ContentSource};
use agrolead_lead::{Envelope, LeadTransport, SubmissionError};
use agrolead_shared::Result;
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use serde_json::Value;

#[derive(Clone, Default)]
pub struct StubTransport {
    reject_with: Option<u16>,
    calls: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<Value>>>,
}

impl StubTransport {
    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_with: Some(status),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Value> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LeadTransport for StubTransport {
    async fn send(&self, envelope: &Envelope) -> std::result::Result<(), SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let (Ok(mut sent), Ok(body)) = (self.sent.lock(), serde_json::to_value(envelope)) {
            sent.push(body);
        }
        match self.reject_with {
            Some(status) => Err(SubmissionError::Rejected { status }),
            None => Ok(()),
        }
    }
}

/// Serves one product document for every query.
#[derive(Clone)]
pub struct StubContent {
    document: Value,
    calls: Arc<AtomicUsize>,
}

impl StubContent {
    pub fn new(document: Value) -> Self {
        Self {
            document,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for StubContent {
    async fn fetch(&self, _query: &ContentQuery) -> Result<Option<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(self.document.clone()))
    }
}

pub fn config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        submission: SubmissionConfig {
            endpoint: "http://127.0.0.1:9/api/lead".to_string(),
            timeout_secs: 1,
            bot_timeout_secs: 1,
        },
        content: ContentConfig::default(),
        i18n: I18nConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub fn app(transport: &StubTransport, content: Option<Value>) -> Router {
    app_with(
        config(),
        transport,
        content.map(|doc| Arc::new(StubContent::new(doc)) as Arc<dyn ContentSource>),
    )
}

pub fn app_with(
    config: Config,
    transport: &StubTransport,
    content: Option<Arc<dyn ContentSource>>,
) -> Router {
    agrolead::router(AppState {
        config,
        transport: Arc::new(transport.clone()),
        content,
    })
}

pub fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().uri(uri).body(Body::empty())?)
}

pub fn post_json(uri: &str, body: &Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

pub async fn json_body(response: Response<Body>) -> anyhow::Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}
