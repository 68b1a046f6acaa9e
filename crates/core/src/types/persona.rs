//! Shopper persona classification.

use serde::{Deserialize, Serialize};

/// Purchasing-behavior classification attached to every user.
///
/// Used for display only. Tags the dashboard does not know about are kept
/// verbatim in [`Persona::Other`] instead of failing the whole user list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Persona {
    BudgetConscious,
    LuxuryLover,
    TechEnthusiast,
    FashionForward,
    PracticalBuyer,
    ImpulseShopper,
    ResearchHeavy,
    BrandLoyal,
    TrendFollower,
    Other(String),
}

impl Persona {
    /// Wire tag for this persona (e.g. `budget_conscious`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BudgetConscious => "budget_conscious",
            Self::LuxuryLover => "luxury_lover",
            Self::TechEnthusiast => "tech_enthusiast",
            Self::FashionForward => "fashion_forward",
            Self::PracticalBuyer => "practical_buyer",
            Self::ImpulseShopper => "impulse_shopper",
            Self::ResearchHeavy => "research_heavy",
            Self::BrandLoyal => "brand_loyal",
            Self::TrendFollower => "trend_follower",
            Self::Other(tag) => tag,
        }
    }

    /// Human-readable label (e.g. `Budget Conscious`).
    #[must_use]
    pub fn label(&self) -> String {
        self.as_str()
            .split(['_', '-', ' '])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect::<String>()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether this is one of the known persona tags.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for Persona {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "budget_conscious" => Self::BudgetConscious,
            "luxury_lover" => Self::LuxuryLover,
            "tech_enthusiast" => Self::TechEnthusiast,
            "fashion_forward" => Self::FashionForward,
            "practical_buyer" => Self::PracticalBuyer,
            "impulse_shopper" => Self::ImpulseShopper,
            "research_heavy" => Self::ResearchHeavy,
            "brand_loyal" => Self::BrandLoyal,
            "trend_follower" => Self::TrendFollower,
            _ => Self::Other(tag),
        }
    }
}

impl From<Persona> for String {
    fn from(persona: Persona) -> Self {
        match persona {
            Persona::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl core::fmt::Display for Persona {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags() {
        let persona: Persona = serde_json::from_str("\"tech_enthusiast\"").unwrap();
        assert_eq!(persona, Persona::TechEnthusiast);
        assert!(persona.is_known());
        assert_eq!(persona.label(), "Tech Enthusiast");
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let persona: Persona = serde_json::from_str("\"weekend_hobbyist\"").unwrap();
        assert_eq!(persona, Persona::Other("weekend_hobbyist".to_string()));
        assert!(!persona.is_known());
        assert_eq!(persona.label(), "Weekend Hobbyist");
        assert_eq!(serde_json::to_string(&persona).unwrap(), "\"weekend_hobbyist\"");
    }

    #[test]
    fn test_serialize_known_tag() {
        assert_eq!(
            serde_json::to_string(&Persona::BrandLoyal).unwrap(),
            "\"brand_loyal\""
        );
    }

    #[test]
    fn test_label_of_empty_tag() {
        assert_eq!(Persona::Other(String::new()).label(), "");
    }
}
