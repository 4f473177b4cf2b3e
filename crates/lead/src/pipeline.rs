//! Submission of a lead form: local validation, bot token, envelope, one
//! network attempt, status transition.

use std::time::Duration;

use agrolead_shared::Locale;
use time::OffsetDateTime;

use crate::{
    BotVerifier, Envelope, FieldErrors, FormController, LeadDraft, LeadFormType, LeadPayload,
    LeadTransport, SubmissionError,
};

pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_BOT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub enum SubmissionResult {
    /// Local validation failed; nothing left the process.
    Invalid(FieldErrors),
    Sent(Envelope),
    Failed(SubmissionError),
    /// A submission is already in flight for this form.
    Busy,
}

impl SubmissionResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

pub struct SubmissionPipeline<V, T> {
    verifier: V,
    transport: T,
    locale: Locale,
    bot_timeout: Duration,
    send_timeout: Duration,
}

impl<V: BotVerifier, T: LeadTransport> SubmissionPipeline<V, T> {
    pub fn new(verifier: V, transport: T, locale: Locale) -> Self {
        Self {
            verifier,
            transport,
            locale,
            bot_timeout: DEFAULT_BOT_TIMEOUT,
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    pub fn with_bot_timeout(mut self, timeout: Duration) -> Self {
        self.bot_timeout = timeout;
        self
    }

    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn validate(&self, draft: &LeadDraft) -> Result<LeadPayload, FieldErrors> {
        draft.validate()
    }

    /// Never fails: an unavailable or slow verifier yields `None`.
    pub async fn acquire_token(&self, form_type: LeadFormType) -> Option<String> {
        let action = form_type.action();
        match tokio::time::timeout(self.bot_timeout, self.verifier.execute(&action)).await {
            Ok(Ok(token)) => token,
            Ok(Err(e)) => {
                tracing::warn!(
                    action = %action,
                    error = %e,
                    "bot verification failed, submitting without token"
                );
                None
            }
            Err(_) => {
                tracing::warn!(
                    action = %action,
                    timeout_ms = self.bot_timeout.as_millis() as u64,
                    "bot verification timed out, submitting without token"
                );
                None
            }
        }
    }

    pub fn build_envelope(
        &self,
        payload: LeadPayload,
        token: Option<String>,
        submitted_at: OffsetDateTime,
    ) -> Result<Envelope, SubmissionError> {
        Envelope::new(payload, token, self.locale, submitted_at)
    }

    pub async fn send(&self, envelope: &Envelope) -> Result<(), SubmissionError> {
        match tokio::time::timeout(self.send_timeout, self.transport.send(envelope)).await {
            Ok(result) => result,
            Err(_) => Err(SubmissionError::Timeout),
        }
    }

    /// Runs every stage against `form`. The draft is cleared on success only,
    /// so a failed attempt can be resubmitted as is.
    #[tracing::instrument(skip_all, fields(form_type = %form.form_type(), locale = %self.locale))]
    pub async fn submit(&self, form: &mut FormController) -> SubmissionResult {
        if form.status().is_submitting() {
            return SubmissionResult::Busy;
        }
        if let Err(e) = form.reset() {
            tracing::error!(error = %e, "unable to reset submission status");
            return SubmissionResult::Busy;
        }

        let payload = match self.validate(form.draft()) {
            Ok(payload) => payload,
            Err(errors) => {
                tracing::debug!(%errors, "lead rejected by local validation");
                form.reject(errors.clone());
                return SubmissionResult::Invalid(errors);
            }
        };

        form.begin();
        let flight = InFlight { form };
        let token = self.acquire_token(payload.form_type()).await;
        let outcome = match self.build_envelope(payload, token, OffsetDateTime::now_utc()) {
            Ok(envelope) => self.send(&envelope).await.map(|()| envelope),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(envelope) => {
                tracing::info!(
                    with_token = envelope.recaptcha_token.is_some(),
                    "lead submitted"
                );
                flight.form.succeed();
                SubmissionResult::Sent(envelope)
            }
            Err(e) => {
                tracing::error!(error = %e, "lead submission failed");
                flight.form.fail();
                SubmissionResult::Failed(e)
            }
        }
    }
}

/// Releases a form whose submission future was dropped mid-flight: the
/// outcome is ignored, the draft kept and the status moved to `error`.
struct InFlight<'a> {
    form: &'a mut FormController,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.form.status().is_submitting() {
            tracing::warn!(
                form_type = %self.form.form_type(),
                "submission abandoned before completion"
            );
            self.form.fail();
        }
    }
}

