//! Filter and sort views over a result set.
//!
//! All functions return borrowed views; the stored order is never touched.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::offer::{PartOffer, Tier};

/// Tier filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum TierFilter {
    #[default]
    All,
    Only(Tier),
}

impl TierFilter {
    pub fn matches(&self, offer: &PartOffer) -> bool {
        match self {
            Self::All => true,
            Self::Only(tier) => offer.tier == *tier,
        }
    }
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    /// Backend order
    #[default]
    Recommended,
    PriceAsc,
    PriceDesc,
}

/// Offers passing the filter, in stored order.
pub fn apply_filter(offers: &[PartOffer], filter: TierFilter) -> Vec<&PartOffer> {
    offers.iter().filter(|o| filter.matches(o)).collect()
}

/// Stable sort of a view; equal prices keep their relative order.
pub fn apply_sort<'a>(mut view: Vec<&'a PartOffer>, mode: SortMode) -> Vec<&'a PartOffer> {
    match mode {
        SortMode::Recommended => {}
        SortMode::PriceAsc => view.sort_by(|a, b| by_price(a, b)),
        SortMode::PriceDesc => view.sort_by(|a, b| by_price(b, a)),
    }
    view
}

fn by_price(a: &PartOffer, b: &PartOffer) -> Ordering {
    a.price_numeric.total_cmp(&b.price_numeric)
}

/// Filter then sort.
pub fn apply_view(offers: &[PartOffer], filter: TierFilter, mode: SortMode) -> Vec<&PartOffer> {
    apply_sort(apply_filter(offers, filter), mode)
}

/// First `Original` offer, else the first offer.
pub fn primary_offer(offers: &[PartOffer]) -> Option<&PartOffer> {
    offers
        .iter()
        .find(|o| o.tier == Tier::Original)
        .or_else(|| offers.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize_value, OfferIdAllocator};
    use serde_json::json;

    fn offers(items: &[(Tier, f64)]) -> Vec<PartOffer> {
        let payload: Vec<_> = items
            .iter()
            .enumerate()
            .map(|(i, (tier, price))| {
                json!({
                    "partName": format!("p{i}"),
                    "oemNumber": format!("n{i}"),
                    "type": tier.label(),
                    "brand": "b",
                    "priceNumeric": price
                })
            })
            .collect();
        normalize_value(json!(payload), &mut OfferIdAllocator::with_stamp(1, 0)).unwrap()
    }

    fn names(view: &[&PartOffer]) -> Vec<String> {
        view.iter().map(|o| o.part_name.clone()).collect()
    }

    #[test]
    fn test_filter_all_is_identity() {
        let stored = offers(&[(Tier::Budget, 3.0), (Tier::Original, 1.0), (Tier::Budget, 2.0)]);
        let view = apply_filter(&stored, TierFilter::All);
        assert_eq!(names(&view), vec!["p0", "p1", "p2"]);
    }

    #[test]
    fn test_filter_exact_tier() {
        let stored = offers(&[(Tier::Budget, 3.0), (Tier::Original, 1.0), (Tier::Budget, 2.0)]);
        let view = apply_filter(&stored, TierFilter::Only(Tier::Budget));
        assert_eq!(names(&view), vec!["p0", "p2"]);
        assert!(apply_filter(&stored, TierFilter::Only(Tier::QualityEquivalent)).is_empty());
    }

    #[test]
    fn test_sort_orders_and_stability() {
        let stored = offers(&[
            (Tier::Original, 500.0),
            (Tier::Budget, 100.0),
            (Tier::QualityEquivalent, 500.0),
            (Tier::Budget, 250.0),
        ]);

        let asc = apply_view(&stored, TierFilter::All, SortMode::PriceAsc);
        assert_eq!(names(&asc), vec!["p1", "p3", "p0", "p2"]);
        assert!(asc.windows(2).all(|w| w[0].price_numeric <= w[1].price_numeric));

        let desc = apply_view(&stored, TierFilter::All, SortMode::PriceDesc);
        assert_eq!(names(&desc), vec!["p0", "p2", "p3", "p1"]);
        assert!(desc.windows(2).all(|w| w[0].price_numeric >= w[1].price_numeric));

        let recommended = apply_view(&stored, TierFilter::All, SortMode::Recommended);
        assert_eq!(names(&recommended), vec!["p0", "p1", "p2", "p3"]);

        // stored order untouched
        assert_eq!(stored[0].part_name, "p0");
    }

    #[test]
    fn test_primary_offer() {
        let stored = offers(&[(Tier::Budget, 1.0), (Tier::Original, 2.0)]);
        assert_eq!(primary_offer(&stored).unwrap().part_name, "p1");

        let no_original = offers(&[(Tier::Budget, 1.0), (Tier::QualityEquivalent, 2.0)]);
        assert_eq!(primary_offer(&no_original).unwrap().part_name, "p0");

        assert!(primary_offer(&[]).is_none());
    }

    #[test]
    fn test_sort_mode_wire_names() {
        assert_eq!(serde_json::to_string(&SortMode::PriceAsc).unwrap(), "\"priceAsc\"");
        assert_eq!(serde_json::to_string(&SortMode::Recommended).unwrap(), "\"recommended\"");
    }
}
