//! Result normalizer.
//!
//! Validates the raw backend payload against the offer contract and turns it
//! into [`PartOffer`]s with freshly allocated identifiers. A payload that is
//! not an array of objects, or an item missing a required field, fails the
//! whole set.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::offer::{InstallationDifficulty, OfferId, PartOffer, Tier};

/// Error types for normalization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    /// Payload is not JSON at all
    #[error("Response is not valid JSON: {0}")]
    NotJson(String),

    /// Payload is JSON but not an array
    #[error("Response is not an array")]
    NotAnArray,

    /// An element of the array is not an object
    #[error("Item {index} is not an object")]
    ItemNotObject { index: usize },

    /// An object violates the declared schema
    #[error("Item {index} violates the offer schema: {reason}")]
    SchemaViolation { index: usize, reason: String },
}

/// Allocates offer identifiers for one result set.
///
/// Identifiers have the form `part-{generation}-{index}-{stamp}`; the
/// generation differs for every result set, so identifiers never repeat
/// across searches.
#[derive(Debug, Clone)]
pub struct OfferIdAllocator {
    generation: u64,
    stamp: i64,
    next: usize,
}

impl OfferIdAllocator {
    pub fn new(generation: u64) -> Self {
        Self::with_stamp(generation, chrono::Utc::now().timestamp_millis())
    }

    pub fn with_stamp(generation: u64, stamp: i64) -> Self {
        Self {
            generation,
            stamp,
            next: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn next_id(&mut self) -> OfferId {
        let id = OfferId::new(format!("part-{}-{}-{}", self.generation, self.next, self.stamp));
        self.next += 1;
        id
    }
}

/// One offer as the backend sends it. Unknown fields, `id` included, are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireOffer {
    part_name: String,
    oem_number: String,
    #[serde(rename = "type")]
    tier: Tier,
    brand: String,
    price_numeric: f64,

    #[serde(default, deserialize_with = "nullable_string")]
    vehicle_model: String,
    #[serde(default, deserialize_with = "nullable_string")]
    year: String,
    #[serde(default, deserialize_with = "nullable_string")]
    category: String,
    #[serde(default, deserialize_with = "nullable_string")]
    sub_category: String,
    #[serde(default, deserialize_with = "nullable_string")]
    description: String,
    #[serde(default, deserialize_with = "lenient_list")]
    oem_cross_reference: Vec<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    estimated_price_range: String,
    #[serde(default, deserialize_with = "lenient_list")]
    compatibility: Vec<String>,
    #[serde(default)]
    installation_difficulty: Option<InstallationDifficulty>,
    #[serde(default, deserialize_with = "nullable_string")]
    maintenance_tips: String,
    #[serde(default, deserialize_with = "nullable_string")]
    dimensions: String,
    #[serde(default, deserialize_with = "nullable_string")]
    weight: String,
    #[serde(default, deserialize_with = "nullable_string")]
    material: String,
}

impl WireOffer {
    fn into_offer(self, id: OfferId) -> PartOffer {
        PartOffer {
            id,
            part_name: self.part_name,
            vehicle_model: self.vehicle_model,
            year: self.year,
            category: self.category,
            sub_category: self.sub_category,
            description: self.description,
            oem_number: self.oem_number,
            oem_cross_reference: self.oem_cross_reference,
            estimated_price_range: self.estimated_price_range,
            price_numeric: self.price_numeric,
            tier: self.tier,
            brand: self.brand,
            compatibility: self.compatibility,
            installation_difficulty: self.installation_difficulty,
            maintenance_tips: self.maintenance_tips,
            dimensions: self.dimensions,
            weight: self.weight,
            material: self.material,
        }
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Anything that is not a list becomes an empty list; non-string entries are dropped.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Normalize a raw backend text payload.
pub fn normalize_offers(
    raw: &str,
    ids: &mut OfferIdAllocator,
) -> Result<Vec<PartOffer>, NormalizeError> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|e| NormalizeError::NotJson(e.to_string()))?;
    normalize_value(value, ids)
}

/// Normalize an already parsed payload.
pub fn normalize_value(
    value: Value,
    ids: &mut OfferIdAllocator,
) -> Result<Vec<PartOffer>, NormalizeError> {
    let Value::Array(items) = value else {
        return Err(NormalizeError::NotAnArray);
    };

    // Validate everything before allocating any id.
    let wire = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(NormalizeError::ItemNotObject { index });
            }
            serde_json::from_value::<WireOffer>(item).map_err(|e| {
                NormalizeError::SchemaViolation {
                    index,
                    reason: e.to_string(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let offers: Vec<PartOffer> = wire
        .into_iter()
        .map(|offer| offer.into_offer(ids.next_id()))
        .collect();

    debug!(
        generation = ids.generation(),
        count = offers.len(),
        "Normalized offers"
    );

    Ok(offers)
}
