mod controller;
mod draft;
mod envelope;
mod error;
mod field;
mod form_type;
mod payload;
mod pipeline;
pub mod registry;
mod renderer;
mod schema;
mod status;
mod transport;
pub mod verifier;

pub use controller::*;
pub use draft::*;
pub use envelope::*;
pub use error::*;
pub use field::*;
pub use form_type::*;
pub use payload::*;
pub use pipeline::*;
pub use registry::{
    Application, CertificationSet, Certification, Choice, ChoiceOption, Country, Incoterm,
    PartnershipType, Product,
};
pub use renderer::*;
pub use schema::{MESSAGE_MIN_LEN, Schema, validate};
pub use status::*;
pub use transport::*;
pub use verifier::BotVerifier;

pub use agrolead_shared::Locale;

rust_i18n::i18n!("locales", fallback = "en");
