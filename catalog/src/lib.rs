//! Vehicle and part catalogue for OtoParca Pro
//!
//! Static reference data that drives the guided part lookup:
//!
//! - **Brands**: manufacturers with their ordered model lists
//! - **Part categories**: categories with keyword hints and sub-parts
//! - **Model years**: the validated `1980..=2025` range
//! - **Access filter**: brand allow-lists for standard identities
//!
//! All tables are `'static` and immutable; nothing in this crate performs I/O.
//!
//! # Example
//!
//! ```
//! use catalog::{brand_by_name, filter_brands, AccessScope};
//!
//! let scope = AccessScope::standard(["BMW"]);
//! let candidates = filter_brands("", &scope);
//! assert!(candidates.iter().any(|c| c.brand.name == "Audi" && c.blocked));
//! assert!(brand_by_name("BMW").is_some());
//! ```

pub mod access;
pub mod brands;
pub mod categories;
pub mod search;
pub mod types;
pub mod year;

// Re-export main types
pub use access::{is_blocked, AccessDecision, AccessScope, Role};
pub use brands::{brand_by_name, BRANDS};
pub use categories::{category_by_id, category_by_name, PART_CATEGORIES};
pub use search::{filter_brands, filter_models, BrandCandidate};
pub use types::*;
pub use year::{ModelYear, FIRST_MODEL_YEAR, LAST_MODEL_YEAR};
