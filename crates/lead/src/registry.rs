//! Static catalogs backing the enumerated lead-form fields.
//!
//! Every catalog serializes to its wire value and carries localized labels
//! through the `options.<group>.<value>` translation keys. Catalogs shown in a
//! composite selector also carry a description.

use std::{fmt, str::FromStr};

use agrolead_shared::Locale;
use serde::{Serialize, Serializer};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::Field;

/// One entry of a selector, already localized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub trait Choice: Copy + AsRef<str> + FromStr + VariantArray + 'static {
    const GROUP: &'static str;

    fn label(&self, locale: Locale) -> String {
        rust_i18n::t!(
            format!("options.{}.{}.label", Self::GROUP, self.as_ref()),
            locale = locale.as_ref()
        )
        .into_owned()
    }

    fn description(&self, _locale: Locale) -> Option<String> {
        None
    }

    fn option(&self, locale: Locale) -> ChoiceOption {
        ChoiceOption {
            value: self.as_ref().to_owned(),
            label: self.label(locale),
            description: self.description(locale),
        }
    }

    fn options(locale: Locale) -> Vec<ChoiceOption> {
        Self::VARIANTS.iter().map(|v| v.option(locale)).collect()
    }
}

fn describe<C: Choice>(choice: &C, locale: Locale) -> Option<String> {
    Some(
        rust_i18n::t!(
            format!("options.{}.{}.description", C::GROUP, choice.as_ref()),
            locale = locale.as_ref()
        )
        .into_owned(),
    )
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Fr,
    Be,
    Ch,
    Lu,
    De,
    Nl,
    It,
    Es,
    Pt,
    Gb,
    Ie,
    At,
    Pl,
    Se,
    Dk,
    No,
    Fi,
    Us,
    Ca,
    Mx,
    Br,
    Cn,
    Jp,
    Kr,
    In,
    Sg,
    Ae,
    Sa,
    Tr,
    Ma,
    Ci,
    Gh,
    Cm,
    Ng,
    Za,
    Au,
}

impl Choice for Country {
    const GROUP: &'static str = "country";
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    Beans,
    Nibs,
    Liquor,
    Butter,
    Powder,
    Cake,
}

impl Choice for Product {
    const GROUP: &'static str = "product";

    fn description(&self, locale: Locale) -> Option<String> {
        describe(self, locale)
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Incoterm {
    Exw,
    Fca,
    Fas,
    Fob,
    Cfr,
    Cif,
    Cpt,
    Cip,
    Dap,
    Dpu,
    Ddp,
}

impl Choice for Incoterm {
    const GROUP: &'static str = "incoterm";

    fn description(&self, locale: Locale) -> Option<String> {
        describe(self, locale)
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Application {
    Chocolate,
    Confectionery,
    Bakery,
    Dairy,
    Beverages,
    Cosmetics,
    Pharmaceuticals,
    Other,
}

impl Choice for Application {
    const GROUP: &'static str = "application";
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Certification {
    Organic,
    Fairtrade,
    RainforestAlliance,
    Halal,
    Kosher,
    Fssc22000,
    Iso22000,
    Haccp,
}

impl Choice for Certification {
    const GROUP: &'static str = "certification";
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum PartnershipType {
    Distribution,
    Agency,
    JointVenture,
    PrivateLabel,
    Sourcing,
}

impl Choice for PartnershipType {
    const GROUP: &'static str = "partnership_type";

    fn description(&self, locale: Locale) -> Option<String> {
        describe(self, locale)
    }
}

/// Option list for an enumerated field, `None` for free-text fields.
pub fn options(field: Field, locale: Locale) -> Option<Vec<ChoiceOption>> {
    match field {
        Field::Country => Some(Country::options(locale)),
        Field::Product => Some(Product::options(locale)),
        Field::Incoterm => Some(Incoterm::options(locale)),
        Field::Application => Some(Application::options(locale)),
        Field::Certifications => Some(Certification::options(locale)),
        Field::PartnershipType => Some(PartnershipType::options(locale)),
        Field::FirstName
        | Field::LastName
        | Field::Email
        | Field::Company
        | Field::Phone
        | Field::Quantity
        | Field::Purpose
        | Field::ShippingAddress
        | Field::AnnualVolume
        | Field::Commodity
        | Field::Volume
        | Field::Origin
        | Field::Destination
        | Field::Message => None,
    }
}

pub const CERTIFICATION_SEPARATOR: &str = ",";

/// Splits a comma-joined certification string into its non-empty members.
pub fn split_joined(raw: &str) -> Vec<&str> {
    let mut values: Vec<&str> = Vec::new();
    for value in raw.split(CERTIFICATION_SEPARATOR).map(str::trim) {
        if !value.is_empty() && !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

/// Adds `value` to the joined string when absent, removes it when present.
pub fn toggle_joined(raw: &str, value: &str) -> String {
    let mut values = split_joined(raw);
    match values.iter().position(|v| *v == value) {
        Some(index) => {
            values.remove(index);
        }
        None => values.push(value),
    }
    values.join(CERTIFICATION_SEPARATOR)
}

/// De-duplicated certification set, serialized as the comma-joined string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificationSet(Vec<Certification>);

impl CertificationSet {
    /// Parses a joined string; the error carries the first unknown member.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut set = Self::default();
        for value in split_joined(raw) {
            let certification = value
                .parse::<Certification>()
                .map_err(|_| value.to_owned())?;
            set.insert(certification);
        }
        Ok(set)
    }

    pub fn insert(&mut self, certification: Certification) {
        if !self.0.contains(&certification) {
            self.0.push(certification);
        }
    }

    pub fn contains(&self, certification: Certification) -> bool {
        self.0.contains(&certification)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Certification> + '_ {
        self.0.iter().copied()
    }

    pub fn joined(&self) -> String {
        let values: Vec<&str> = self.0.iter().map(|c| c.as_ref()).collect();
        values.join(CERTIFICATION_SEPARATOR)
    }
}

impl fmt::Display for CertificationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl Serialize for CertificationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_values_have_no_separator() {
        let values: Vec<&str> = Certification::VARIANTS
            .iter()
            .map(|v| v.as_ref())
            .chain(Product::VARIANTS.iter().map(|v| v.as_ref()))
            .chain(Application::VARIANTS.iter().map(|v| v.as_ref()))
            .collect();
        for value in values {
            assert!(!value.contains(CERTIFICATION_SEPARATOR), "{value}");
        }
    }

    #[test]
    fn parses_wire_values() {
        assert_eq!("liquor".parse::<Product>().ok(), Some(Product::Liquor));
        assert_eq!("FOB".parse::<Incoterm>().ok(), Some(Incoterm::Fob));
        assert_eq!("fob".parse::<Incoterm>().ok(), Some(Incoterm::Fob));
        assert_eq!("CI".parse::<Country>().ok(), Some(Country::Ci));
        assert_eq!(
            "rainforest_alliance".parse::<Certification>().ok(),
            Some(Certification::RainforestAlliance)
        );
        assert!("whisky".parse::<Product>().is_err());
    }

    #[test]
    fn toggle_twice_restores_original() {
        let start = "organic,halal";
        let once = toggle_joined(start, "kosher");
        assert_eq!(once, "organic,halal,kosher");
        assert_eq!(toggle_joined(&once, "kosher"), start);
    }

    #[test]
    fn toggle_round_trip_from_empty() {
        let raw = toggle_joined("", "organic");
        let raw = toggle_joined(&raw, "fairtrade");
        let raw = toggle_joined(&raw, "organic");
        assert_eq!(raw, "fairtrade");
    }

    #[test]
    fn split_skips_blanks_and_duplicates() {
        assert_eq!(
            split_joined(" organic, ,halal,organic "),
            vec!["organic", "halal"]
        );
        assert!(split_joined("").is_empty());
    }

    #[test]
    fn certification_set_round_trips_joined_string() {
        let set = CertificationSet::parse("halal,organic,halal").expect("valid set");
        assert_eq!(set.len(), 2);
        assert_eq!(set.joined(), "halal,organic");
        assert_eq!(CertificationSet::parse(&set.joined()), Ok(set));
        assert_eq!(
            CertificationSet::parse("organic,gmo_free"),
            Err("gmo_free".to_owned())
        );
    }

    #[test]
    fn composite_catalogs_are_described() {
        let option = Product::Liquor.option(Locale::En);
        assert_eq!(option.value, "liquor");
        assert!(option.description.is_some());
        assert!(Application::Bakery.option(Locale::En).description.is_none());
        assert!(options(Field::Quantity, Locale::En).is_none());
        assert_eq!(
            options(Field::Incoterm, Locale::Fr).map(|o| o.len()),
            Some(Incoterm::VARIANTS.len())
        );
    }
}
