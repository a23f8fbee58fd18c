//! Output schema declared to the backend for part searches.

use serde_json::{json, Value};

use crate::offer::{InstallationDifficulty, Tier};

/// Fields every offer object must carry.
pub const REQUIRED_FIELDS: [&str; 5] = ["partName", "oemNumber", "type", "brand", "priceNumeric"];

/// Number of offers a search asks for, one per tier.
pub const EXPECTED_OFFERS: usize = 3;

/// Schema for an array of offer objects.
pub fn offer_list_schema() -> Value {
    let tiers: Vec<&str> = Tier::ALL.iter().map(Tier::label).collect();
    let difficulties: Vec<&str> = InstallationDifficulty::ALL
        .iter()
        .map(InstallationDifficulty::label)
        .collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "partName": { "type": "STRING" },
                "vehicleModel": { "type": "STRING", "description": "Uyumlu olduğu başlıca araç modelleri" },
                "year": { "type": "STRING", "description": "Uyumlu yıl aralığı" },
                "category": { "type": "STRING" },
                "subCategory": { "type": "STRING" },
                "description": { "type": "STRING" },
                "oemNumber": { "type": "STRING" },
                "oemCrossReference": { "type": "ARRAY", "items": { "type": "STRING" } },
                "estimatedPriceRange": { "type": "STRING" },
                "priceNumeric": { "type": "NUMBER", "description": "Sıralama için ortalama fiyat (sayısal)" },
                "type": { "type": "STRING", "enum": tiers },
                "brand": { "type": "STRING", "description": "Parça markası (örn: VW AG, Bosch)" },
                "compatibility": { "type": "ARRAY", "items": { "type": "STRING" } },
                "installationDifficulty": { "type": "STRING", "enum": difficulties },
                "maintenanceTips": { "type": "STRING" },
                "dimensions": { "type": "STRING" },
                "weight": { "type": "STRING" },
                "material": { "type": "STRING" }
            },
            "required": REQUIRED_FIELDS
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_shape() {
        let schema = offer_list_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["required"].as_array().unwrap().len(), 5);
        assert_eq!(
            schema["items"]["properties"]["type"]["enum"],
            json!(["Orijinal (OEM)", "Kaliteli Muadil", "Fiyat/Performans"])
        );
        assert_eq!(
            schema["items"]["properties"]["installationDifficulty"]["enum"],
            json!(["Kolay", "Orta", "Zor", "Uzman"])
        );
    }
}
