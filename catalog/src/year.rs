//! Model year domain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::CatalogError;

/// Oldest selectable model year.
pub const FIRST_MODEL_YEAR: u16 = 1980;

/// Newest selectable model year.
pub const LAST_MODEL_YEAR: u16 = 2025;

/// A validated four-digit model year in `1980..=2025`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelYear(u16);

impl ModelYear {
    /// Parse a year string such as `"2015"`.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let trimmed = raw.trim();
        if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CatalogError::InvalidYear(raw.to_string()));
        }
        let value: u16 = trimmed
            .parse()
            .map_err(|_| CatalogError::InvalidYear(raw.to_string()))?;
        if !(FIRST_MODEL_YEAR..=LAST_MODEL_YEAR).contains(&value) {
            return Err(CatalogError::InvalidYear(raw.to_string()));
        }
        Ok(Self(value))
    }

    /// Numeric value.
    pub fn value(&self) -> u16 {
        self.0
    }

    /// All selectable years, newest first.
    pub fn all_descending() -> Vec<Self> {
        (FIRST_MODEL_YEAR..=LAST_MODEL_YEAR).rev().map(Self).collect()
    }
}

impl fmt::Display for ModelYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModelYear {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ModelYear {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ModelYear> for String {
    fn from(year: ModelYear) -> Self {
        year.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds() {
        assert_eq!(ModelYear::parse("1980").unwrap().value(), 1980);
        assert_eq!(ModelYear::parse("2025").unwrap().value(), 2025);
        assert!(ModelYear::parse("1979").is_err());
        assert!(ModelYear::parse("2026").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "15", "20155", "20a5", "-2015", "+201"] {
            assert!(ModelYear::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_all_descending() {
        let years = ModelYear::all_descending();
        assert_eq!(years.len(), 46);
        assert_eq!(years.first().unwrap().to_string(), "2025");
        assert_eq!(years.last().unwrap().to_string(), "1980");
    }

    #[test]
    fn test_serde_as_string() {
        let year = ModelYear::parse("2015").unwrap();
        assert_eq!(serde_json::to_string(&year).unwrap(), "\"2015\"");
        let parsed: ModelYear = serde_json::from_str("\"1999\"").unwrap();
        assert_eq!(parsed.value(), 1999);
        assert!(serde_json::from_str::<ModelYear>("\"1899\"").is_err());
    }
}
