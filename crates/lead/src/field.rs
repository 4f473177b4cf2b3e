use agrolead_shared::Locale;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Company,
    Country,
    Phone,
    Product,
    Quantity,
    Incoterm,
    Purpose,
    ShippingAddress,
    Application,
    Certifications,
    PartnershipType,
    AnnualVolume,
    Commodity,
    Volume,
    Origin,
    Destination,
    Message,
}

impl Field {
    /// Resolves the snake_case member name used by validation rules.
    pub(crate) fn from_rule(name: &str) -> Option<Self> {
        let mut key = String::with_capacity(name.len());
        let mut upper = false;
        for c in name.chars() {
            if c == '_' {
                upper = true;
            } else if upper {
                key.push(c.to_ascii_uppercase());
                upper = false;
            } else {
                key.push(c);
            }
        }
        key.parse().ok()
    }

    pub fn label(&self, locale: Locale) -> String {
        rust_i18n::t!(format!("fields.{}", self.as_ref()), locale = locale.as_ref()).into_owned()
    }
}

/// Layout block a field belongs to. Blocks render in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Identity,
    Details,
    Message,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Text,
    Email,
    Phone,
    TextArea,
    Select,
    Chips,
    Composite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub field: Field,
    pub section: Section,
    pub required: bool,
    pub control: ControlKind,
}

impl FieldSpec {
    pub const fn identity(field: Field, required: bool, control: ControlKind) -> Self {
        Self {
            field,
            section: Section::Identity,
            required,
            control,
        }
    }

    pub const fn details(field: Field, required: bool, control: ControlKind) -> Self {
        Self {
            field,
            section: Section::Details,
            required,
            control,
        }
    }

    pub const fn message(required: bool) -> Self {
        Self {
            field: Field::Message,
            section: Section::Message,
            required,
            control: ControlKind::TextArea,
        }
    }
}
