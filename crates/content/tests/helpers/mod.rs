#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use agrolead_content::{ContentQuery, ContentSource};
use agrolead_shared::Result;
use serde_json::Value;

/// Answers every query with the same document and counts the calls.
#[derive(Clone, Default)]
pub struct StubSource {
    document: Option<Value>,
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl StubSource {
    pub fn new(document: Option<Value>) -> Self {
        Self {
            document,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl ContentSource for StubSource {
    async fn fetch(&self, _query: &ContentQuery) -> Result<Option<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            agrolead_shared::bail!("cms unavailable");
        }
        Ok(self.document.clone())
    }
}
