//! Stub bot verifier, recording transport and valid drafts for every lead type.

#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use agrolead_lead::{
    BotVerifier, Envelope, Field, FormController, LeadFormType, LeadTransport, Locale,
    RawPayload, SubmissionError, SubmissionPipeline,
};
use async_trait::async_trait;

#[derive(Clone, Copy, Debug)]
pub enum Reply {
    Accept,
    Reject(u16),
    Unreachable,
    Hang,
}

#[derive(Clone)]
pub struct RecordingTransport {
    reply: Reply,
    calls: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<Envelope>>>,
}

impl RecordingTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::default(),
            sent: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Envelope> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LeadTransport for RecordingTransport {
    async fn send(&self, envelope: &Envelope) -> Result<(), SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(envelope.clone());
        }
        match self.reply {
            Reply::Accept => Ok(()),
            Reply::Reject(status) => Err(SubmissionError::Rejected { status }),
            Reply::Unreachable => Err(SubmissionError::Transport("connection refused".into())),
            Reply::Hang => std::future::pending().await,
        }
    }
}

pub enum Verifier {
    Token(&'static str),
    Failing,
    Hanging,
}

#[async_trait]
impl BotVerifier for Verifier {
    async fn execute(&self, action: &str) -> anyhow::Result<Option<String>> {
        match self {
            Self::Token(token) => Ok(Some(format!("{token}:{action}"))),
            Self::Failing => anyhow::bail!("verification script not loaded"),
            Self::Hanging => std::future::pending().await,
        }
    }
}

pub fn pipeline(
    verifier: Verifier,
    transport: &RecordingTransport,
) -> SubmissionPipeline<Verifier, RecordingTransport> {
    SubmissionPipeline::new(verifier, transport.clone(), Locale::En)
        .with_bot_timeout(Duration::from_millis(50))
        .with_send_timeout(Duration::from_millis(200))
}

/// Values that satisfy every rule of `form_type`.
pub fn valid_raw(form_type: LeadFormType) -> RawPayload {
    let mut raw = RawPayload::from([
        (Field::FirstName, "Awa".to_owned()),
        (Field::LastName, "Koné".to_owned()),
        (Field::Email, "awa.kone@chocolaterie.example".to_owned()),
        (Field::Company, "Chocolaterie du Plateau".to_owned()),
        (Field::Country, "FR".to_owned()),
        (Field::Phone, "+33 1 23 45 67 89".to_owned()),
    ]);
    let details: &[(Field, &str)] = match form_type {
        LeadFormType::Quote => &[
            (Field::Product, "liquor"),
            (Field::Quantity, "5 MT/month"),
            (Field::Incoterm, "FOB"),
        ],
        LeadFormType::Sample => &[
            (Field::Product, "powder"),
            (Field::Purpose, "Reformulation trial"),
            (Field::ShippingAddress, "12 rue des Fèves, 75011 Paris"),
        ],
        LeadFormType::Specs => &[
            (Field::Product, "butter"),
            (Field::Application, "cosmetics"),
            (Field::Certifications, "organic,fairtrade"),
        ],
        LeadFormType::Partnership => &[
            (Field::PartnershipType, "distribution"),
            (Field::AnnualVolume, "300 MT"),
            (Field::Message, "We distribute cocoa products across Benelux."),
        ],
        LeadFormType::Transit => &[
            (Field::Commodity, "Raw cocoa beans"),
            (Field::Volume, "2 x 20ft"),
            (Field::Origin, "San Pedro"),
            (Field::Destination, "Antwerp"),
        ],
    };
    for (field, value) in details {
        raw.insert(*field, (*value).to_owned());
    }
    raw
}

pub fn filled_form(form_type: LeadFormType) -> FormController {
    let mut form = FormController::new(form_type, None);
    for (field, value) in valid_raw(form_type) {
        form.set(field, value).expect("field belongs to the form");
    }
    form
}
