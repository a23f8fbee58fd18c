//! Part offer types.
//!
//! Field names serialize in the camelCase wire format the backend schema
//! declares, so a normalized offer can be sent back through the normalizer
//! unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Offer class. Every offer carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum Tier {
    /// Genuine manufacturer part
    #[serde(rename = "Orijinal (OEM)")]
    Original,
    /// Branded aftermarket equivalent
    #[serde(rename = "Kaliteli Muadil")]
    QualityEquivalent,
    /// Budget alternative
    #[serde(rename = "Fiyat/Performans")]
    Budget,
}

impl Tier {
    /// All tiers in offer order.
    pub const ALL: [Tier; 3] = [Self::Original, Self::QualityEquivalent, Self::Budget];

    /// Wire label used by the backend schema.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Original => "Orijinal (OEM)",
            Self::QualityEquivalent => "Kaliteli Muadil",
            Self::Budget => "Fiyat/Performans",
        }
    }

    /// Parse a wire label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How hard the part is to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum InstallationDifficulty {
    #[serde(rename = "Kolay")]
    Easy,
    #[serde(rename = "Orta")]
    Medium,
    #[serde(rename = "Zor")]
    Hard,
    #[serde(rename = "Uzman")]
    Expert,
}

impl InstallationDifficulty {
    pub const ALL: [InstallationDifficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// Wire label used by the backend schema.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Kolay",
            Self::Medium => "Orta",
            Self::Hard => "Zor",
            Self::Expert => "Uzman",
        }
    }
}

/// Identifier of an offer within one result set.
///
/// Identifiers are allocated per result set and never reused by a later one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(transparent)]
pub struct OfferId(String);

impl OfferId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One result item returned by a part search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PartOffer {
    /// Allocated identifier, unique within the result set
    pub id: OfferId,
    pub part_name: String,
    /// Main compatible vehicle models
    pub vehicle_model: String,
    /// Compatible year range
    pub year: String,
    pub category: String,
    pub sub_category: String,
    pub description: String,
    pub oem_number: String,
    /// Cross-reference codes, possibly empty
    pub oem_cross_reference: Vec<String>,
    /// Display price range, e.g. "1.200 - 1.500 TL"
    pub estimated_price_range: String,
    /// Average price used for sorting
    pub price_numeric: f64,
    #[serde(rename = "type")]
    pub tier: Tier,
    /// Part manufacturer, e.g. "Bosch"
    pub brand: String,
    /// Compatible vehicles, possibly empty
    pub compatibility: Vec<String>,
    pub installation_difficulty: Option<InstallationDifficulty>,
    pub maintenance_tips: String,
    pub dimensions: String,
    pub weight: String,
    pub material: String,
}

impl PartOffer {
    /// Initial text of the cross-reference edit field.
    pub fn cross_reference_text(&self) -> String {
        self.oem_cross_reference.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_labels() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_label(tier.label()), Some(tier));
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier.label()));
        }
        assert_eq!(Tier::from_label("OEM"), None);
    }

    #[test]
    fn test_difficulty_wire_format() {
        let parsed: InstallationDifficulty = serde_json::from_str("\"Uzman\"").unwrap();
        assert_eq!(parsed, InstallationDifficulty::Expert);
        assert!(serde_json::from_str::<InstallationDifficulty>("\"Expert\"").is_err());
    }
}
