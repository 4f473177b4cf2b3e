mod cache;
mod http;
mod product;
mod query;

pub use cache::*;
pub use http::*;
pub use product::*;
pub use query::*;

use std::sync::Arc;

use agrolead_shared::Result;
use serde_json::Value;

/// Read side of the headless CMS.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Runs `query` and returns its `result`, `None` when the CMS has no
    /// matching document.
    async fn fetch(&self, query: &ContentQuery) -> Result<Option<Value>>;
}

#[async_trait::async_trait]
impl<S: ContentSource + ?Sized> ContentSource for Arc<S> {
    async fn fetch(&self, query: &ContentQuery) -> Result<Option<Value>> {
        (**self).fetch(query).await
    }
}
