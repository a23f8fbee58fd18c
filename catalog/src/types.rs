//! Core types for the vehicle and part taxonomy.
//!
//! Every value in this module is backed by `'static` data: the taxonomy is
//! compiled into the binary and has no mutation path at runtime.

use serde::Serialize;

/// A vehicle manufacturer with its selectable models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Brand {
    /// Stable identifier
    pub id: &'static str,
    /// Display name, also used as the selection key
    pub name: &'static str,
    /// Model names in catalogue order
    pub models: &'static [&'static str],
}

impl Brand {
    /// Check whether this brand lists the given model.
    pub fn has_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| *m == model)
    }
}

/// A part category and its concrete sub-parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartCategory {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Free-text keyword hint shown under the category
    pub keywords: &'static str,
    /// Sub-category (specific part) names in catalogue order
    pub sub_categories: &'static [&'static str],
}

impl PartCategory {
    /// Check whether this category lists the given sub-category.
    pub fn has_sub_category(&self, name: &str) -> bool {
        self.sub_categories.iter().any(|s| *s == name)
    }
}

/// Error types for catalogue lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Brand is not in the catalogue
    #[error("Unknown brand: {0}")]
    UnknownBrand(String),

    /// Model is not listed for the brand
    #[error("Unknown model {model} for brand {brand}")]
    UnknownModel { brand: String, model: String },

    /// Category is not in the catalogue
    #[error("Unknown part category: {0}")]
    UnknownCategory(String),

    /// Sub-category is not listed for the category
    #[error("Unknown sub-category {sub_category} in {category}")]
    UnknownSubCategory {
        category: String,
        sub_category: String,
    },

    /// Year is malformed or outside the supported range
    #[error("Invalid model year: {0}")]
    InvalidYear(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_has_model() {
        let brand = Brand {
            id: "x",
            name: "X",
            models: &["One", "Two"],
        };
        assert!(brand.has_model("Two"));
        assert!(!brand.has_model("two"));
    }
}
