//! One schema per lead form type.
//!
//! Free-text constraints run through `validator` rules; enumerated fields are
//! checked against the registry while being parsed into their typed values.
//! Both feed the same field-keyed [`FieldErrors`].

use std::str::FromStr;

use validator::Validate;

use crate::{
    CertificationSet, ControlKind, DetailsDraft, Field, FieldError, FieldErrors, FieldSpec,
    Identity, IdentityDraft, LeadDetails, LeadDraft, LeadFormType, LeadPayload, RawPayload,
};

pub const MESSAGE_MIN_LEN: u64 = 10;

const IDENTITY: [FieldSpec; 6] = [
    FieldSpec::identity(Field::FirstName, true, ControlKind::Text),
    FieldSpec::identity(Field::LastName, true, ControlKind::Text),
    FieldSpec::identity(Field::Email, true, ControlKind::Email),
    FieldSpec::identity(Field::Company, true, ControlKind::Text),
    FieldSpec::identity(Field::Country, true, ControlKind::Select),
    FieldSpec::identity(Field::Phone, false, ControlKind::Phone),
];

const QUOTE: &[FieldSpec] = &[
    IDENTITY[0],
    IDENTITY[1],
    IDENTITY[2],
    IDENTITY[3],
    IDENTITY[4],
    IDENTITY[5],
    FieldSpec::details(Field::Product, true, ControlKind::Composite),
    FieldSpec::details(Field::Quantity, true, ControlKind::Text),
    FieldSpec::details(Field::Incoterm, false, ControlKind::Composite),
    FieldSpec::message(false),
];

const SAMPLE: &[FieldSpec] = &[
    IDENTITY[0],
    IDENTITY[1],
    IDENTITY[2],
    IDENTITY[3],
    IDENTITY[4],
    IDENTITY[5],
    FieldSpec::details(Field::Product, true, ControlKind::Composite),
    FieldSpec::details(Field::Purpose, true, ControlKind::Text),
    FieldSpec::details(Field::ShippingAddress, true, ControlKind::TextArea),
    FieldSpec::message(false),
];

const SPECS: &[FieldSpec] = &[
    IDENTITY[0],
    IDENTITY[1],
    IDENTITY[2],
    IDENTITY[3],
    IDENTITY[4],
    IDENTITY[5],
    FieldSpec::details(Field::Product, true, ControlKind::Composite),
    FieldSpec::details(Field::Application, true, ControlKind::Select),
    FieldSpec::details(Field::Certifications, false, ControlKind::Chips),
    FieldSpec::message(false),
];

const PARTNERSHIP: &[FieldSpec] = &[
    IDENTITY[0],
    IDENTITY[1],
    IDENTITY[2],
    IDENTITY[3],
    IDENTITY[4],
    IDENTITY[5],
    FieldSpec::details(Field::PartnershipType, true, ControlKind::Composite),
    FieldSpec::details(Field::AnnualVolume, true, ControlKind::Text),
    FieldSpec::message(true),
];

const TRANSIT: &[FieldSpec] = &[
    IDENTITY[0],
    IDENTITY[1],
    IDENTITY[2],
    IDENTITY[3],
    IDENTITY[4],
    IDENTITY[5],
    FieldSpec::details(Field::Commodity, true, ControlKind::Text),
    FieldSpec::details(Field::Volume, false, ControlKind::Text),
    FieldSpec::details(Field::Origin, true, ControlKind::Text),
    FieldSpec::details(Field::Destination, true, ControlKind::Text),
    FieldSpec::message(false),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schema {
    form_type: LeadFormType,
    fields: &'static [FieldSpec],
}

impl Schema {
    pub fn of(form_type: LeadFormType) -> Self {
        let fields = match form_type {
            LeadFormType::Quote => QUOTE,
            LeadFormType::Sample => SAMPLE,
            LeadFormType::Specs => SPECS,
            LeadFormType::Partnership => PARTNERSHIP,
            LeadFormType::Transit => TRANSIT,
        };
        Self { form_type, fields }
    }

    pub fn form_type(&self) -> LeadFormType {
        self.form_type
    }

    /// Identity block first, then the type block, message last.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn spec(&self, field: Field) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.field == field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.spec(field).is_some()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = Field> {
        self.fields
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.field)
    }

    pub fn validate(&self, raw: &RawPayload) -> Result<LeadPayload, FieldErrors> {
        LeadDraft::from_raw(self.form_type, raw).validate()
    }
}

pub fn validate(form_type: LeadFormType, raw: &RawPayload) -> Result<LeadPayload, FieldErrors> {
    Schema::of(form_type).validate(raw)
}

#[derive(Validate)]
struct IdentityRules {
    #[validate(length(min = 2, code = "too_short"))]
    first_name: String,
    #[validate(length(min = 2, code = "too_short"))]
    last_name: String,
    #[validate(email(code = "invalid_email"))]
    email: String,
    #[validate(length(min = 2, code = "too_short"))]
    company: String,
}

#[derive(Validate)]
struct QuoteRules {
    #[validate(length(min = 1, code = "required"))]
    quantity: String,
}

#[derive(Validate)]
struct SampleRules {
    #[validate(length(min = 1, code = "required"))]
    purpose: String,
    #[validate(length(min = 1, code = "required"))]
    shipping_address: String,
}

#[derive(Validate)]
struct PartnershipRules {
    #[validate(length(min = 1, code = "required"))]
    annual_volume: String,
}

#[derive(Validate)]
struct TransitRules {
    #[validate(length(min = 1, code = "required"))]
    commodity: String,
    #[validate(length(min = 1, code = "required"))]
    origin: String,
    #[validate(length(min = 1, code = "required"))]
    destination: String,
}

#[derive(Validate)]
struct MessageRules {
    // keep in sync with MESSAGE_MIN_LEN
    #[validate(length(min = 10, code = "too_short"))]
    message: String,
}

impl LeadDraft {
    pub fn validate(&self) -> Result<LeadPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        let identity = validate_identity(&self.identity, &mut errors);
        let details = validate_details(&self.details, &mut errors);
        let message = validate_message(self.form_type(), &self.message, &mut errors);

        match (identity, details) {
            (Some(identity), Some(details)) if errors.is_empty() => Ok(LeadPayload {
                identity,
                details,
                message,
            }),
            _ => Err(errors),
        }
    }
}

fn check(rules: &impl Validate, errors: &mut FieldErrors) -> bool {
    match rules.validate() {
        Ok(()) => true,
        Err(e) => {
            errors.merge(e.into());
            false
        }
    }
}

fn text(raw: &str) -> String {
    raw.trim().to_owned()
}

fn optional_text(raw: &str) -> Option<String> {
    Some(text(raw)).filter(|v| !v.is_empty())
}

fn required_choice<T: FromStr>(field: Field, raw: &str, errors: &mut FieldErrors) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, FieldError::required());
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, FieldError::invalid_choice());
            None
        }
    }
}

/// `Some(None)` for a blank value, `None` when the value is not an option.
fn optional_choice<T: FromStr>(
    field: Field,
    raw: &str,
    errors: &mut FieldErrors,
) -> Option<Option<T>> {
    if raw.trim().is_empty() {
        return Some(None);
    }
    required_choice(field, raw, errors).map(Some)
}

fn validate_identity(draft: &IdentityDraft, errors: &mut FieldErrors) -> Option<Identity> {
    let rules = IdentityRules {
        first_name: text(&draft.first_name),
        last_name: text(&draft.last_name),
        email: text(&draft.email),
        company: text(&draft.company),
    };
    let valid = check(&rules, errors);
    let country = required_choice(Field::Country, &draft.country, errors)?;
    if !valid {
        return None;
    }

    Some(Identity {
        first_name: rules.first_name,
        last_name: rules.last_name,
        email: rules.email,
        company: rules.company,
        phone: optional_text(&draft.phone),
        country,
    })
}

fn validate_details(draft: &DetailsDraft, errors: &mut FieldErrors) -> Option<LeadDetails> {
    match draft {
        DetailsDraft::Quote {
            product,
            quantity,
            incoterm,
        } => {
            let rules = QuoteRules {
                quantity: text(quantity),
            };
            let valid = check(&rules, errors);
            let product = required_choice(Field::Product, product, errors);
            let incoterm = optional_choice(Field::Incoterm, incoterm, errors);
            let (true, Some(product), Some(incoterm)) = (valid, product, incoterm) else {
                return None;
            };
            Some(LeadDetails::Quote {
                product,
                quantity: rules.quantity,
                incoterm,
            })
        }
        DetailsDraft::Sample {
            product,
            purpose,
            shipping_address,
        } => {
            let rules = SampleRules {
                purpose: text(purpose),
                shipping_address: text(shipping_address),
            };
            let valid = check(&rules, errors);
            let product = required_choice(Field::Product, product, errors);
            let (true, Some(product)) = (valid, product) else {
                return None;
            };
            Some(LeadDetails::Sample {
                product,
                purpose: rules.purpose,
                shipping_address: rules.shipping_address,
            })
        }
        DetailsDraft::Specs {
            product,
            application,
            certifications,
        } => {
            let product = required_choice(Field::Product, product, errors);
            let application = required_choice(Field::Application, application, errors);
            let certifications = match CertificationSet::parse(certifications) {
                Ok(set) => Some(set),
                Err(value) => {
                    tracing::debug!(%value, "unknown certification");
                    errors.add(Field::Certifications, FieldError::invalid_choice());
                    None
                }
            };
            Some(LeadDetails::Specs {
                product: product?,
                application: application?,
                certifications: certifications?,
            })
        }
        DetailsDraft::Partnership {
            partnership_type,
            annual_volume,
        } => {
            let rules = PartnershipRules {
                annual_volume: text(annual_volume),
            };
            let valid = check(&rules, errors);
            let partnership_type =
                required_choice(Field::PartnershipType, partnership_type, errors);
            let (true, Some(partnership_type)) = (valid, partnership_type) else {
                return None;
            };
            Some(LeadDetails::Partnership {
                partnership_type,
                annual_volume: rules.annual_volume,
            })
        }
        DetailsDraft::Transit {
            commodity,
            volume,
            origin,
            destination,
        } => {
            let rules = TransitRules {
                commodity: text(commodity),
                origin: text(origin),
                destination: text(destination),
            };
            if !check(&rules, errors) {
                return None;
            }
            Some(LeadDetails::Transit {
                commodity: rules.commodity,
                volume: optional_text(volume),
                origin: rules.origin,
                destination: rules.destination,
            })
        }
    }
}

/// Blank is accepted unless the type requires a message; anything written
/// must meet the minimum length.
fn validate_message(
    form_type: LeadFormType,
    raw: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    let Some(message) = optional_text(raw) else {
        if form_type.requires_message() {
            errors.add(Field::Message, FieldError::required());
        }
        return None;
    };
    let rules = MessageRules { message };
    check(&rules, errors).then_some(rules.message)
}
