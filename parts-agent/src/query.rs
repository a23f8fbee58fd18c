//! Query compiler.
//!
//! Turns a guided selection or a raw part number into the task prompt and
//! output schema sent to the generative backend. The two modes are mutually
//! exclusive: a part-number query carries no vehicle context.

use catalog::{Brand, ModelYear};
use serde::{Deserialize, Serialize};

use crate::offer::Tier;
use crate::schema::{offer_list_schema, EXPECTED_OFFERS};

/// Category shown to the backend when a guided query has none.
pub const DEFAULT_CATEGORY: &str = "Genel";

/// Error types for query compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Guided query with neither a sub-category nor free text
    #[error("Guided query needs a sub-category or a free-text part name")]
    EmptyGuidedQuery,

    /// Part-number query with a blank number
    #[error("Part number query is empty")]
    EmptyPartNumber,
}

/// Which request shape a search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Taxonomy-driven funnel
    #[default]
    Guided,
    /// Reverse lookup by OEM / part number
    ByPartNumber,
}

/// Vehicle identity supplied by the funnel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl VehicleContext {
    /// Context for a vehicle picked from the catalog.
    pub fn from_catalog(brand: &Brand, model: Option<&str>, year: Option<ModelYear>) -> Self {
        Self {
            brand: Some(brand.name.to_string()),
            model: model.map(str::to_string),
            year: year.map(|y| y.to_string()),
        }
    }

    /// Brand, model and year joined by spaces, skipping blanks.
    pub fn identity(&self) -> String {
        [&self.brand, &self.model, &self.year]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Inputs of a guided search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidedQuery {
    pub vehicle: VehicleContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

impl GuidedQuery {
    /// Create a query for a vehicle.
    pub fn for_vehicle(vehicle: VehicleContext) -> Self {
        Self {
            vehicle,
            ..Default::default()
        }
    }

    /// Set category and sub-category.
    pub fn with_part(mut self, category: impl Into<String>, sub_category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self.sub_category = Some(sub_category.into());
        self
    }

    /// Set the free-text part name.
    pub fn with_free_text(mut self, text: impl Into<String>) -> Self {
        self.free_text = Some(text.into());
        self
    }

    /// The part the backend should look for: sub-category first, then free text.
    pub fn part_name(&self) -> Option<&str> {
        non_blank(&self.sub_category).or_else(|| non_blank(&self.free_text))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A search request in one of the two modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SearchQuery {
    Guided(GuidedQuery),
    ByPartNumber { part_number: String },
}

impl SearchQuery {
    /// Create a part-number query.
    pub fn part_number(raw: impl Into<String>) -> Self {
        Self::ByPartNumber {
            part_number: raw.into(),
        }
    }

    pub fn mode(&self) -> SearchMode {
        match self {
            Self::Guided(_) => SearchMode::Guided,
            Self::ByPartNumber { .. } => SearchMode::ByPartNumber,
        }
    }

    /// Compile into a backend task.
    pub fn compile(&self) -> Result<CompiledQuery, QueryError> {
        match self {
            Self::Guided(query) => compile_guided(query),
            Self::ByPartNumber { part_number } => compile_part_number(part_number),
        }
    }
}

/// A validated backend task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub mode: SearchMode,
    /// Vehicle context, guided mode only
    pub vehicle: Option<VehicleContext>,
    /// Trimmed part number, part-number mode only
    pub part_number: Option<String>,
    /// One-line context summary embedded in the prompt
    pub context: String,
    /// Full task prompt
    pub prompt: String,
    /// Declared output schema
    pub schema: serde_json::Value,
}

fn compile_guided(query: &GuidedQuery) -> Result<CompiledQuery, QueryError> {
    let part = query.part_name().ok_or(QueryError::EmptyGuidedQuery)?;
    let category = non_blank(&query.category).unwrap_or(DEFAULT_CATEGORY);

    let vehicle = query.vehicle.identity();
    let vehicle = if vehicle.is_empty() {
        "Belirtilmedi".to_string()
    } else {
        vehicle
    };

    let context = format!("ARAÇ: {} | KATEGORİ: {} | PARÇA: {}", vehicle, category, part);

    let mut task = String::new();
    task.push_str(&format!(
        "Bu araç ve parça için Türkiye piyasasında bulunabilecek tam olarak {} farklı seçenek listele, her sınıftan bir tane:\n",
        EXPECTED_OFFERS
    ));
    push_tier_lines(&mut task, None);

    Ok(CompiledQuery {
        mode: SearchMode::Guided,
        vehicle: Some(query.vehicle.clone()),
        part_number: None,
        prompt: assemble_prompt(&context, &task, false),
        context,
        schema: offer_list_schema(),
    })
}

fn compile_part_number(raw: &str) -> Result<CompiledQuery, QueryError> {
    let number = raw.trim();
    if number.is_empty() {
        return Err(QueryError::EmptyPartNumber);
    }

    let context = format!("ARAMA TÜRÜ: Parça numarası sorgusu | GİRİLEN NO: \"{}\"", number);

    let mut task = String::new();
    task.push_str("Kullanıcı bir yedek parça numarası girdi.\n");
    task.push_str("1. Bu numaranın hangi parçaya ve hangi araçlara ait olduğunu tespit et.\n");
    task.push_str(&format!(
        "2. Bu parça için tam olarak {} seçenek sun, her sınıftan bir tane:\n",
        EXPECTED_OFFERS
    ));
    push_tier_lines(&mut task, Some(number));

    Ok(CompiledQuery {
        mode: SearchMode::ByPartNumber,
        vehicle: None,
        part_number: Some(number.to_string()),
        prompt: assemble_prompt(&context, &task, true),
        context,
        schema: offer_list_schema(),
    })
}

fn push_tier_lines(task: &mut String, part_number: Option<&str>) {
    for (i, tier) in Tier::ALL.iter().enumerate() {
        let detail = match (tier, part_number) {
            (Tier::Original, Some(number)) => {
                format!("oemNumber alanı tam olarak \"{}\" olan orijinal parça", number)
            }
            (Tier::Original, None) => "araç üreticisinin orijinal parçası".to_string(),
            (Tier::QualityEquivalent, _) => "tanınmış bir markanın kaliteli muadili (Bosch, Valeo vb.)".to_string(),
            (Tier::Budget, _) => "ekonomik yan sanayi karşılığı".to_string(),
        };
        task.push_str(&format!("   - Seçenek {}: \"{}\" - {}\n", i + 1, tier.label(), detail));
    }
}

fn assemble_prompt(context: &str, task: &str, reverse_lookup: bool) -> String {
    let mut prompt = String::new();

    prompt.push_str("GÖREV: Otomotiv yedek parça kataloğu uzmanı olarak hareket et.\n");
    prompt.push_str(&format!("BAĞLAM: {}\n\n", context));
    prompt.push_str(&format!("DETAY:\n{}\n", task));

    prompt.push_str("KURALLAR:\n");
    prompt.push_str("- Gerçek parça numaraları kullan.\n");
    prompt.push_str("- Fiyatlar gerçekçi TL aralıkları olsun; priceNumeric ortalama fiyatı versin.\n");
    prompt.push_str("- \"type\" alanını yalnızca belirtilen değerlerle doldur.\n");
    if reverse_lookup {
        prompt.push_str(
            "- \"partName\" ve \"vehicleModel\" alanlarını tespit ettiğin parçaya göre doldur.\n",
        );
    }

    prompt
}
