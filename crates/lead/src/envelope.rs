use agrolead_shared::Locale;
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Identity, LeadDetails, LeadFormType, LeadPayload, SubmissionError};

/// Outbound body of a lead submission.
///
/// Only built from a [`LeadPayload`], so every envelope carries values that
/// passed their schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub form_type: LeadFormType,
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(flatten)]
    pub details: LeadDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub recaptcha_token: Option<String>,
    pub locale: Locale,
    pub submitted_at: String,
}

impl Envelope {
    pub fn new(
        payload: LeadPayload,
        recaptcha_token: Option<String>,
        locale: Locale,
        submitted_at: OffsetDateTime,
    ) -> Result<Self, SubmissionError> {
        let submitted_at = submitted_at
            .to_offset(time::UtcOffset::UTC)
            .format(&Rfc3339)
            .map_err(|e| SubmissionError::Unexpected(e.to_string()))?;

        Ok(Self {
            form_type: payload.form_type(),
            identity: payload.identity,
            details: payload.details,
            message: payload.message,
            recaptcha_token,
            locale,
            submitted_at,
        })
    }
}
