//! Free-text narrowing of the candidate lists shown at each funnel step.
//!
//! Matching is a case-insensitive substring test. Filtering never changes a
//! selection; it only decides what is displayed.

use serde::Serialize;

use crate::access::{is_blocked, AccessScope};
use crate::brands::BRANDS;
use crate::types::Brand;

/// A brand as displayed at the brand step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrandCandidate {
    pub brand: &'static Brand,
    /// Greyed out and not selectable for this scope
    pub blocked: bool,
}

fn normalized(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Brands whose name or any model contains `term`, flagged for `scope`.
pub fn filter_brands(term: &str, scope: &AccessScope) -> Vec<BrandCandidate> {
    let needle = normalized(term);
    BRANDS
        .iter()
        .filter(|brand| match &needle {
            None => true,
            Some(n) => contains(brand.name, n) || brand.models.iter().any(|m| contains(m, n)),
        })
        .map(|brand| BrandCandidate {
            brand,
            blocked: is_blocked(brand.name, scope),
        })
        .collect()
}

/// Models of `brand` containing `term`.
pub fn filter_models(brand: &Brand, term: &str) -> Vec<&'static str> {
    let needle = normalized(term);
    brand
        .models
        .iter()
        .copied()
        .filter(|model| needle.as_deref().map_or(true, |n| contains(model, n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brands::brand_by_name;

    #[test]
    fn test_empty_term_lists_everything() {
        let all = filter_brands("  ", &AccessScope::default());
        assert_eq!(all.len(), BRANDS.len());
        assert!(all.iter().all(|c| !c.blocked));
    }

    #[test]
    fn test_brand_matches_by_model_name() {
        let hits = filter_brands("vectra b", &AccessScope::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].brand.name, "Opel");
    }

    #[test]
    fn test_brand_matches_case_insensitive() {
        let hits = filter_brands("VOLKS", &AccessScope::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].brand.id, "vw");
    }

    #[test]
    fn test_blocked_brands_stay_visible() {
        let scope = AccessScope::standard(["BMW"]);
        let hits = filter_brands("", &scope);
        assert_eq!(hits.len(), BRANDS.len());
        let opel = hits.iter().find(|c| c.brand.name == "Opel").unwrap();
        assert!(opel.blocked);
        let bmw = hits.iter().find(|c| c.brand.name == "BMW").unwrap();
        assert!(!bmw.blocked);
    }

    #[test]
    fn test_filter_models() {
        let vw = brand_by_name("Volkswagen").unwrap();
        let golfs = filter_models(vw, "golf");
        assert_eq!(golfs.len(), 8);
        assert!(golfs.contains(&"Golf 7 (VII)"));
        assert_eq!(filter_models(vw, "").len(), vw.models.len());
    }
}
