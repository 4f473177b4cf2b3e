//! In-progress form state, one variant per lead form type.

use std::collections::BTreeMap;

use crate::{Field, LeadError, LeadFormType, Product, registry};

/// Field values as submitted by a form, before any type is applied.
pub type RawPayload = BTreeMap<Field, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub country: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsDraft {
    Quote {
        product: String,
        quantity: String,
        incoterm: String,
    },
    Sample {
        product: String,
        purpose: String,
        shipping_address: String,
    },
    Specs {
        product: String,
        application: String,
        /// Comma-joined certification values.
        certifications: String,
    },
    Partnership {
        partnership_type: String,
        annual_volume: String,
    },
    Transit {
        commodity: String,
        volume: String,
        origin: String,
        destination: String,
    },
}

impl DetailsDraft {
    pub fn empty(form_type: LeadFormType) -> Self {
        match form_type {
            LeadFormType::Quote => Self::Quote {
                product: String::new(),
                quantity: String::new(),
                incoterm: String::new(),
            },
            LeadFormType::Sample => Self::Sample {
                product: String::new(),
                purpose: String::new(),
                shipping_address: String::new(),
            },
            LeadFormType::Specs => Self::Specs {
                product: String::new(),
                application: String::new(),
                certifications: String::new(),
            },
            LeadFormType::Partnership => Self::Partnership {
                partnership_type: String::new(),
                annual_volume: String::new(),
            },
            LeadFormType::Transit => Self::Transit {
                commodity: String::new(),
                volume: String::new(),
                origin: String::new(),
                destination: String::new(),
            },
        }
    }

    pub fn form_type(&self) -> LeadFormType {
        match self {
            Self::Quote { .. } => LeadFormType::Quote,
            Self::Sample { .. } => LeadFormType::Sample,
            Self::Specs { .. } => LeadFormType::Specs,
            Self::Partnership { .. } => LeadFormType::Partnership,
            Self::Transit { .. } => LeadFormType::Transit,
        }
    }

    fn slot(&self, field: Field) -> Option<&String> {
        match (self, field) {
            (Self::Quote { product, .. }, Field::Product) => Some(product),
            (Self::Quote { quantity, .. }, Field::Quantity) => Some(quantity),
            (Self::Quote { incoterm, .. }, Field::Incoterm) => Some(incoterm),
            (Self::Sample { product, .. }, Field::Product) => Some(product),
            (Self::Sample { purpose, .. }, Field::Purpose) => Some(purpose),
            (Self::Sample {
                shipping_address, ..
            }, Field::ShippingAddress) => Some(shipping_address),
            (Self::Specs { product, .. }, Field::Product) => Some(product),
            (Self::Specs { application, .. }, Field::Application) => Some(application),
            (Self::Specs { certifications, .. }, Field::Certifications) => Some(certifications),
            (Self::Partnership {
                partnership_type, ..
            }, Field::PartnershipType) => Some(partnership_type),
            (Self::Partnership { annual_volume, .. }, Field::AnnualVolume) => Some(annual_volume),
            (Self::Transit { commodity, .. }, Field::Commodity) => Some(commodity),
            (Self::Transit { volume, .. }, Field::Volume) => Some(volume),
            (Self::Transit { origin, .. }, Field::Origin) => Some(origin),
            (Self::Transit { destination, .. }, Field::Destination) => Some(destination),
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match (self, field) {
            (Self::Quote { product, .. }, Field::Product) => Some(product),
            (Self::Quote { quantity, .. }, Field::Quantity) => Some(quantity),
            (Self::Quote { incoterm, .. }, Field::Incoterm) => Some(incoterm),
            (Self::Sample { product, .. }, Field::Product) => Some(product),
            (Self::Sample { purpose, .. }, Field::Purpose) => Some(purpose),
            (Self::Sample {
                shipping_address, ..
            }, Field::ShippingAddress) => Some(shipping_address),
            (Self::Specs { product, .. }, Field::Product) => Some(product),
            (Self::Specs { application, .. }, Field::Application) => Some(application),
            (Self::Specs { certifications, .. }, Field::Certifications) => Some(certifications),
            (Self::Partnership {
                partnership_type, ..
            }, Field::PartnershipType) => Some(partnership_type),
            (Self::Partnership { annual_volume, .. }, Field::AnnualVolume) => Some(annual_volume),
            (Self::Transit { commodity, .. }, Field::Commodity) => Some(commodity),
            (Self::Transit { volume, .. }, Field::Volume) => Some(volume),
            (Self::Transit { origin, .. }, Field::Origin) => Some(origin),
            (Self::Transit { destination, .. }, Field::Destination) => Some(destination),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadDraft {
    pub identity: IdentityDraft,
    pub details: DetailsDraft,
    pub message: String,
}

impl LeadDraft {
    /// Empty draft for `form_type`, with the product pre-filled when the
    /// type has a product field.
    pub fn new(form_type: LeadFormType, preselected_product: Option<Product>) -> Self {
        let mut draft = Self {
            identity: IdentityDraft::default(),
            details: DetailsDraft::empty(form_type),
            message: String::new(),
        };
        if let (Some(product), Some(slot)) = (
            preselected_product,
            draft.details.slot_mut(Field::Product),
        ) {
            *slot = product.to_string();
        }
        draft
    }

    /// Builds a draft from raw values, dropping every key the type does not
    /// declare.
    pub fn from_raw(form_type: LeadFormType, raw: &RawPayload) -> Self {
        let mut draft = Self::new(form_type, None);
        for (field, value) in raw {
            if let Some(slot) = draft.slot_mut(*field) {
                *slot = value.to_owned();
            }
        }
        draft
    }

    pub fn form_type(&self) -> LeadFormType {
        self.details.form_type()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::FirstName => Some(&self.identity.first_name),
            Field::LastName => Some(&self.identity.last_name),
            Field::Email => Some(&self.identity.email),
            Field::Company => Some(&self.identity.company),
            Field::Country => Some(&self.identity.country),
            Field::Phone => Some(&self.identity.phone),
            Field::Message => Some(&self.message),
            _ => self.details.slot(field),
        };
        value.map(String::as_str)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), LeadError> {
        let form_type = self.form_type();
        let slot = self
            .slot_mut(field)
            .ok_or(LeadError::FieldNotInForm { field, form_type })?;
        *slot = value.into();
        Ok(())
    }

    /// Certification values currently selected, in selection order.
    pub fn certifications(&self) -> Vec<&str> {
        self.details
            .slot(Field::Certifications)
            .map(|raw| registry::split_joined(raw))
            .unwrap_or_default()
    }

    pub fn to_raw(&self) -> RawPayload {
        crate::Schema::of(self.form_type())
            .fields()
            .iter()
            .filter_map(|spec| {
                self.get(spec.field)
                    .map(|value| (spec.field, value.to_owned()))
            })
            .collect()
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::FirstName => Some(&mut self.identity.first_name),
            Field::LastName => Some(&mut self.identity.last_name),
            Field::Email => Some(&mut self.identity.email),
            Field::Company => Some(&mut self.identity.company),
            Field::Country => Some(&mut self.identity.country),
            Field::Phone => Some(&mut self.identity.phone),
            Field::Message => Some(&mut self.message),
            _ => self.details.slot_mut(field),
        }
    }
}
