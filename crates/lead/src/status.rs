use agrolead_shared::Locale;
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::LeadError;

/// `idle -> submitting -> success | error`, with `success` and `error`
/// returning to `idle` on an explicit reset.
#[derive(Display, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Display, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum StatusEvent {
    Begin,
    Succeed,
    Fail,
    Reset,
}

impl SubmissionStatus {
    pub fn transition(self, event: StatusEvent) -> Result<Self, LeadError> {
        use StatusEvent::*;
        use SubmissionStatus::*;

        match (self, event) {
            (Idle, Begin) => Ok(Submitting),
            (Submitting, Succeed) => Ok(Success),
            (Submitting, Fail) => Ok(Error),
            (Idle | Success | Error, Reset) => Ok(Idle),
            (from, event) => Err(LeadError::InvalidTransition { from, event }),
        }
    }

    pub fn apply(&mut self, event: StatusEvent) -> Result<(), LeadError> {
        *self = self.transition(event)?;
        Ok(())
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Danger,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordance {
    None,
    Progress,
    SendAnother,
    Retry,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub status: SubmissionStatus,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub affordance: Affordance,
    pub submit_disabled: bool,
}

/// Maps a submission status onto what the form shows. Performs no I/O.
pub fn present(status: SubmissionStatus, locale: Locale) -> StatusView {
    let (tone, affordance) = match status {
        SubmissionStatus::Idle => (Tone::Neutral, Affordance::None),
        SubmissionStatus::Submitting => (Tone::Info, Affordance::Progress),
        SubmissionStatus::Success => (Tone::Success, Affordance::SendAnother),
        SubmissionStatus::Error => (Tone::Danger, Affordance::Retry),
    };
    let message = match status {
        SubmissionStatus::Idle => None,
        SubmissionStatus::Submitting | SubmissionStatus::Success | SubmissionStatus::Error => Some(
            rust_i18n::t!(format!("status.{}", status.as_ref()), locale = locale.as_ref())
                .into_owned(),
        ),
    };

    StatusView {
        status,
        tone,
        message,
        affordance,
        submit_disabled: status.is_submitting(),
    }
}
