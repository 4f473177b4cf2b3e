use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{Envelope, SubmissionError};

/// Delivery of a submission envelope to the lead endpoint. One attempt only.
#[async_trait]
pub trait LeadTransport: Send + Sync {
    async fn send(&self, envelope: &Envelope) -> Result<(), SubmissionError>;
}

#[async_trait]
impl<T: LeadTransport + ?Sized> LeadTransport for Arc<T> {
    async fn send(&self, envelope: &Envelope) -> Result<(), SubmissionError> {
        (**self).send(envelope).await
    }
}

/// JSON `POST` to the configured endpoint; any non-2xx answer is a failure.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LeadTransport for HttpTransport {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint, form_type = %envelope.form_type))]
    async fn send(&self, envelope: &Envelope) -> Result<(), SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(envelope)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
