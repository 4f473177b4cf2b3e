use std::{
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use agrolead_shared::Result;
use lru::LruCache;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{ContentQuery, ContentSource};

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
struct Entry {
    value: Option<Value>,
    tags: Vec<String>,
    stored_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_fresh(&self) -> bool {
        self.stored_at.elapsed() < self.ttl
    }
}

/// Keeps query results for `revalidate_secs`, dropping them early when one of
/// their cache tags is invalidated. At most `capacity` results are held, the
/// least recently used going first. Failed fetches are not cached.
pub struct CachedContentSource<S> {
    inner: S,
    entries: Mutex<LruCache<String, Entry>>,
}

impl<S> CachedContentSource<S> {
    pub fn new(inner: S) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// A zero `capacity` is raised to one.
    pub fn with_capacity(inner: S, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns how many cached results were dropped.
    pub async fn invalidate_tag(&self, tag: &str) -> usize {
        let mut entries = self.entries.lock().await;
        let keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.tags.iter().any(|t| t == tag))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &keys {
            entries.pop(key);
        }
        tracing::debug!(tag, dropped = keys.len(), "content cache invalidated");
        keys.len()
    }

    /// Drops every expired result, returning how many went.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock().await;
        purge(&mut entries)
    }

    /// Number of results currently held, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

fn purge(entries: &mut LruCache<String, Entry>) -> usize {
    let stale: Vec<String> = entries
        .iter()
        .filter(|(_, entry)| !entry.is_fresh())
        .map(|(key, _)| key.clone())
        .collect();
    for key in &stale {
        entries.pop(key);
    }
    stale.len()
}

#[async_trait::async_trait]
impl<S: ContentSource> ContentSource for CachedContentSource<S> {
    async fn fetch(&self, query: &ContentQuery) -> Result<Option<Value>> {
        let key = query.cache_key();
        {
            let mut entries = self.entries.lock().await;
            match entries.get(&key) {
                Some(entry) if entry.is_fresh() => return Ok(entry.value.clone()),
                Some(_) => {
                    entries.pop(&key);
                }
                None => {}
            }
        }

        let value = self.inner.fetch(query).await?;
        if query.revalidate_secs > 0 {
            let mut entries = self.entries.lock().await;
            purge(&mut entries);
            entries.put(
                key,
                Entry {
                    value: value.clone(),
                    tags: query.cache_tags.clone(),
                    stored_at: Instant::now(),
                    ttl: Duration::from_secs(query.revalidate_secs),
                },
            );
        }

        Ok(value)
    }
}
