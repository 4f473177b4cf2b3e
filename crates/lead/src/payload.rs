use serde::Serialize;

use crate::{
    Application, CertificationSet, Country, Incoterm, LeadFormType, PartnershipType, Product,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub country: Country,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum LeadDetails {
    Quote {
        product: Product,
        quantity: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        incoterm: Option<Incoterm>,
    },
    Sample {
        product: Product,
        purpose: String,
        shipping_address: String,
    },
    Specs {
        product: Product,
        application: Application,
        certifications: CertificationSet,
    },
    Partnership {
        partnership_type: PartnershipType,
        annual_volume: String,
    },
    Transit {
        commodity: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        volume: Option<String>,
        origin: String,
        destination: String,
    },
}

impl LeadDetails {
    pub fn form_type(&self) -> LeadFormType {
        match self {
            Self::Quote { .. } => LeadFormType::Quote,
            Self::Sample { .. } => LeadFormType::Sample,
            Self::Specs { .. } => LeadFormType::Specs,
            Self::Partnership { .. } => LeadFormType::Partnership,
            Self::Transit { .. } => LeadFormType::Transit,
        }
    }

    pub fn product(&self) -> Option<Product> {
        match self {
            Self::Quote { product, .. }
            | Self::Sample { product, .. }
            | Self::Specs { product, .. } => Some(*product),
            Self::Partnership { .. } | Self::Transit { .. } => None,
        }
    }
}

/// A draft that passed its type's schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadPayload {
    pub identity: Identity,
    pub details: LeadDetails,
    pub message: Option<String>,
}

impl LeadPayload {
    pub fn form_type(&self) -> LeadFormType {
        self.details.form_type()
    }
}
