use std::sync::Arc;

use async_trait::async_trait;

/// Proof-of-humanity capability. The token is opaque and forwarded verbatim.
#[async_trait]
pub trait BotVerifier: Send + Sync {
    async fn execute(&self, action: &str) -> anyhow::Result<Option<String>>;
}

#[async_trait]
impl<V: BotVerifier + ?Sized> BotVerifier for Arc<V> {
    async fn execute(&self, action: &str) -> anyhow::Result<Option<String>> {
        (**self).execute(action).await
    }
}

/// Used when no verification service is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct Disabled;

#[async_trait]
impl BotVerifier for Disabled {
    async fn execute(&self, _action: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

/// Token already obtained by the browser and posted along with the form.
#[derive(Clone, Debug, Default)]
pub struct ForwardedToken(Option<String>);

impl ForwardedToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.trim().is_empty()))
    }
}

#[async_trait]
impl BotVerifier for ForwardedToken {
    async fn execute(&self, _action: &str) -> anyhow::Result<Option<String>> {
        Ok(self.0.clone())
    }
}
