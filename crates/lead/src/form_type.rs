use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeadFormType {
    #[default]
    Quote,
    Sample,
    Specs,
    Partnership,
    Transit,
}

impl LeadFormType {
    /// Maps a URL subject onto a form type.
    ///
    /// Only the aliases listed here are recognised; anything else yields
    /// `None` so the caller decides the fallback instead of this function
    /// silently picking another type.
    pub fn from_subject(subject: &str) -> Option<Self> {
        match subject.trim().to_ascii_lowercase().as_str() {
            "quote" | "pricing" => Some(Self::Quote),
            "sample" | "samples" => Some(Self::Sample),
            "specs" | "quality" | "technical" => Some(Self::Specs),
            "partnership" | "partner" | "distribution" => Some(Self::Partnership),
            "transit" | "logistics" => Some(Self::Transit),
            _ => None,
        }
    }

    /// Action name handed to the bot-verification capability.
    pub fn action(&self) -> String {
        format!("lead_{self}")
    }

    pub fn requires_message(&self) -> bool {
        match self {
            Self::Partnership => true,
            Self::Quote | Self::Sample | Self::Specs | Self::Transit => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_aliases() {
        assert_eq!(LeadFormType::from_subject("quality"), Some(LeadFormType::Specs));
        assert_eq!(LeadFormType::from_subject(" Technical "), Some(LeadFormType::Specs));
        assert_eq!(LeadFormType::from_subject("specs"), Some(LeadFormType::Specs));
        assert_eq!(LeadFormType::from_subject("partner"), Some(LeadFormType::Partnership));
        assert_eq!(LeadFormType::from_subject("coa"), None);
    }

    #[test]
    fn every_type_round_trips_through_subject() {
        for form_type in LeadFormType::VARIANTS {
            assert_eq!(LeadFormType::from_subject(form_type.as_ref()), Some(*form_type));
        }
    }

    #[test]
    fn action_is_prefixed() {
        assert_eq!(LeadFormType::Quote.action(), "lead_quote");
        assert_eq!(LeadFormType::Transit.action(), "lead_transit");
    }
}
