use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_REVALIDATE_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentQuery {
    pub query: String,
    pub params: BTreeMap<String, Value>,
    pub cache_tags: Vec<String>,
    pub revalidate_secs: u64,
}

impl ContentQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: BTreeMap::new(),
            cache_tags: Vec::new(),
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.cache_tags.push(tag.into());
        self
    }

    pub fn revalidate(mut self, secs: u64) -> Self {
        self.revalidate_secs = secs;
        self
    }

    /// Identifies a query and its parameters for caching.
    pub fn cache_key(&self) -> String {
        let mut key = self.query.clone();
        for (name, value) in &self.params {
            key.push('\u{1f}');
            key.push_str(name);
            key.push('=');
            key.push_str(&value.to_string());
        }
        key
    }
}
