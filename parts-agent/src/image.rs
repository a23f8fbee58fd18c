//! Image prompt for a single offer.

use crate::backend::ImageRequest;
use crate::offer::PartOffer;

/// Studio-photo prompt built only from the offer's brand, part name,
/// sub-category, vehicle model and material.
pub fn image_prompt(offer: &PartOffer) -> String {
    let mut prompt = format!(
        "Professional studio product photo of a {} automotive spare part: {}",
        offer.brand.trim(),
        offer.part_name.trim()
    );

    if !offer.sub_category.trim().is_empty() {
        prompt.push_str(&format!(" ({})", offer.sub_category.trim()));
    }
    if !offer.vehicle_model.trim().is_empty() {
        prompt.push_str(&format!(", for {}", offer.vehicle_model.trim()));
    }
    if !offer.material.trim().is_empty() {
        prompt.push_str(&format!(". Material: {}", offer.material.trim()));
    }

    prompt.push_str(". Isolated on a clean white background, soft lighting, high detail, no text or watermark.");
    prompt
}

/// Image task for an offer.
pub fn image_request(offer: &PartOffer) -> ImageRequest {
    ImageRequest {
        prompt: image_prompt(offer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::tests::sample_payload;
    use crate::normalize::{normalize_value, OfferIdAllocator};

    #[test]
    fn test_prompt_uses_offer_fields() {
        let offers = normalize_value(sample_payload(), &mut OfferIdAllocator::with_stamp(1, 0)).unwrap();
        let prompt = image_prompt(&offers[0]);

        for value in ["VW AG", "Ön Fren Balatası", "VW Golf 7", "Low-metallic"] {
            assert!(prompt.contains(value), "prompt misses {value}");
        }
        assert!(!prompt.contains("5Q0698151"));
    }

    #[test]
    fn test_prompt_is_deterministic_and_ignores_id() {
        let mut first = normalize_value(sample_payload(), &mut OfferIdAllocator::with_stamp(1, 0)).unwrap();
        let second = normalize_value(sample_payload(), &mut OfferIdAllocator::with_stamp(9, 9)).unwrap();
        first[1].description = "changed".to_string();

        assert_eq!(image_prompt(&first[1]), image_prompt(&second[1]));
        assert!(!image_prompt(&second[1]).contains("Material"));
    }
}
