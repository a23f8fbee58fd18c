//! Selection funnel.
//!
//! An explicit state machine over brand → model → year → category →
//! sub-category. Every transition sets one slot and clears all slots after
//! it, so a later slot is never set while an earlier one is empty.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use catalog::{
    brand_by_name, category_by_id, category_by_name, filter_brands, filter_models, AccessScope,
    Brand, BrandCandidate, CatalogError, ModelYear, PartCategory, PART_CATEGORIES,
};
use parts_agent::{GuidedQuery, VehicleContext};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Error types for funnel transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunnelError {
    /// An earlier step has not been selected yet
    #[error("{missing} must be selected first")]
    StepNotReady { missing: FunnelStep },

    /// Free-text query was blank
    #[error("Free-text part query is empty")]
    EmptyFreeText,

    /// Sub-category requested under a category other than the selected one
    #[error("Sub-category belongs to {requested}, but {selected} is selected")]
    CategoryMismatch {
        selected: String,
        requested: String,
    },

    /// Value is not in the catalogue
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Named funnel states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum FunnelState {
    #[default]
    PickBrand,
    PickModel,
    PickYear,
    PickCategory,
    PickSubCategory,
    ShowResults,
}

/// Steps reachable through the breadcrumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum FunnelStep {
    Brand,
    Model,
    Year,
    Category,
}

impl FunnelStep {
    /// State entered when navigating back to this step.
    pub fn state(&self) -> FunnelState {
        match self {
            Self::Brand => FunnelState::PickBrand,
            Self::Model => FunnelState::PickModel,
            Self::Year => FunnelState::PickYear,
            Self::Category => FunnelState::PickCategory,
        }
    }
}

impl fmt::Display for FunnelStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Brand => "brand",
            Self::Model => "model",
            Self::Year => "year",
            Self::Category => "category",
        };
        f.write_str(name)
    }
}

/// Current selection. Slots are only written through [`Funnel`] transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    brand: Option<&'static Brand>,
    model: Option<&'static str>,
    year: Option<ModelYear>,
    category: Option<&'static PartCategory>,
    sub_category: Option<&'static str>,
}

impl Selection {
    pub fn brand(&self) -> Option<&'static Brand> {
        self.brand
    }

    pub fn model(&self) -> Option<&'static str> {
        self.model
    }

    pub fn year(&self) -> Option<ModelYear> {
        self.year
    }

    pub fn category(&self) -> Option<&'static PartCategory> {
        self.category
    }

    pub fn sub_category(&self) -> Option<&'static str> {
        self.sub_category
    }

    /// Clear `step` and every slot after it.
    fn clear_from(&mut self, step: FunnelStep) {
        if step <= FunnelStep::Brand {
            self.brand = None;
        }
        if step <= FunnelStep::Model {
            self.model = None;
        }
        if step <= FunnelStep::Year {
            self.year = None;
        }
        self.category = None;
        self.sub_category = None;
    }

    fn vehicle(&self) -> VehicleContext {
        match self.brand {
            Some(brand) => VehicleContext::from_catalog(brand, self.model, self.year),
            None => VehicleContext::default(),
        }
    }
}

/// Outcome of picking a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandSelection {
    Selected,
    /// Brand is outside the allow-list; nothing changed
    Blocked,
}

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub step: FunnelStep,
    pub label: String,
}

/// The funnel state machine.
#[derive(Debug, Clone, Default)]
pub struct Funnel {
    state: FunnelState,
    selection: Selection,
    free_text: Option<String>,
}

impl Funnel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FunnelState {
        self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn free_text(&self) -> Option<&str> {
        self.free_text.as_deref()
    }

    /// Pick a brand. A blocked brand leaves the funnel untouched.
    pub fn select_brand(&mut self, name: &str, scope: &AccessScope) -> Result<BrandSelection, FunnelError> {
        let brand = brand_by_name(name).ok_or_else(|| CatalogError::UnknownBrand(name.to_string()))?;

        if catalog::is_blocked(brand.name, scope) {
            debug!(brand = %brand.name, "Brand blocked for identity");
            return Ok(BrandSelection::Blocked);
        }

        self.rewind(FunnelStep::Brand);
        self.selection.brand = Some(brand);
        self.state = FunnelState::PickModel;
        Ok(BrandSelection::Selected)
    }

    /// Pick a model of the selected brand.
    pub fn select_model(&mut self, name: &str) -> Result<(), FunnelError> {
        let brand = self.require_brand()?;
        let model = brand
            .models
            .iter()
            .copied()
            .find(|m| *m == name)
            .ok_or_else(|| CatalogError::UnknownModel {
                brand: brand.name.to_string(),
                model: name.to_string(),
            })?;

        self.rewind(FunnelStep::Model);
        self.selection.model = Some(model);
        self.state = FunnelState::PickYear;
        Ok(())
    }

    /// Pick a model year.
    pub fn select_year(&mut self, year: &str) -> Result<(), FunnelError> {
        self.require_model()?;
        let year = ModelYear::parse(year)?;

        self.rewind(FunnelStep::Year);
        self.selection.year = Some(year);
        self.state = FunnelState::PickCategory;
        Ok(())
    }

    /// Pick a part category by id or display name.
    pub fn select_category(&mut self, category: &str) -> Result<(), FunnelError> {
        self.require_year()?;
        let category = lookup_category(category)?;

        self.rewind(FunnelStep::Category);
        self.selection.category = Some(category);
        self.state = FunnelState::PickSubCategory;
        Ok(())
    }

    /// Terminal step: pick a sub-category and return the guided query for it.
    pub fn select_sub_category(&mut self, category: &str, sub_category: &str) -> Result<GuidedQuery, FunnelError> {
        let selected = self.require_category()?;
        let requested = lookup_category(category)?;
        if requested.id != selected.id {
            return Err(FunnelError::CategoryMismatch {
                selected: selected.name.to_string(),
                requested: requested.name.to_string(),
            });
        }
        let category = selected;
        let sub = category
            .sub_categories
            .iter()
            .copied()
            .find(|s| *s == sub_category)
            .ok_or_else(|| CatalogError::UnknownSubCategory {
                category: category.name.to_string(),
                sub_category: sub_category.to_string(),
            })?;

        self.free_text = None;
        self.selection.sub_category = Some(sub);
        self.state = FunnelState::ShowResults;

        Ok(GuidedQuery::for_vehicle(self.selection.vehicle()).with_part(category.name, sub))
    }

    /// Free-text part query once the year is known.
    ///
    /// Uses the selected category if there is one.
    pub fn search_free_text(&mut self, text: &str) -> Result<GuidedQuery, FunnelError> {
        self.require_year()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(FunnelError::EmptyFreeText);
        }

        self.selection.sub_category = None;
        self.free_text = Some(text.to_string());
        self.state = FunnelState::ShowResults;

        let mut query = GuidedQuery::for_vehicle(self.selection.vehicle()).with_free_text(text);
        query.category = self.selection.category.map(|c| c.name.to_string());
        Ok(query)
    }

    /// Breadcrumb jump: clear `step` and everything after it.
    pub fn navigate_to(&mut self, step: FunnelStep) -> Result<(), FunnelError> {
        let target = step.state();
        if self.state < target {
            let missing = match step {
                FunnelStep::Brand => FunnelStep::Brand,
                FunnelStep::Model => FunnelStep::Brand,
                FunnelStep::Year => FunnelStep::Model,
                FunnelStep::Category => FunnelStep::Year,
            };
            return Err(FunnelError::StepNotReady { missing });
        }

        self.rewind(step);
        self.state = target;
        Ok(())
    }

    /// Clear everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Steps currently set, in order.
    pub fn breadcrumb(&self) -> Vec<Crumb> {
        let s = &self.selection;
        [
            (FunnelStep::Brand, s.brand.map(|b| b.name.to_string())),
            (FunnelStep::Model, s.model.map(str::to_string)),
            (FunnelStep::Year, s.year.map(|y| y.to_string())),
            (FunnelStep::Category, s.category.map(|c| c.name.to_string())),
        ]
        .into_iter()
        .filter_map(|(step, label)| label.map(|label| Crumb { step, label }))
        .collect()
    }

    /// Brand candidates for the brand step.
    pub fn brand_candidates(&self, term: &str, scope: &AccessScope) -> Vec<BrandCandidate> {
        filter_brands(term, scope)
    }

    /// Model candidates for the selected brand.
    pub fn model_candidates(&self, term: &str) -> Vec<&'static str> {
        self.selection
            .brand
            .map(|brand| filter_models(brand, term))
            .unwrap_or_default()
    }

    /// Years offered at the year step, newest first.
    pub fn year_candidates(&self) -> Vec<ModelYear> {
        ModelYear::all_descending()
    }

    /// Categories offered at the category step.
    pub fn category_candidates(&self) -> &'static [PartCategory] {
        PART_CATEGORIES
    }

    fn rewind(&mut self, step: FunnelStep) {
        self.selection.clear_from(step);
        self.free_text = None;
    }

    fn require_brand(&self) -> Result<&'static Brand, FunnelError> {
        self.selection.brand.ok_or(FunnelError::StepNotReady {
            missing: FunnelStep::Brand,
        })
    }

    fn require_model(&self) -> Result<&'static str, FunnelError> {
        self.require_brand()?;
        self.selection.model.ok_or(FunnelError::StepNotReady {
            missing: FunnelStep::Model,
        })
    }

    fn require_year(&self) -> Result<ModelYear, FunnelError> {
        self.require_model()?;
        self.selection.year.ok_or(FunnelError::StepNotReady {
            missing: FunnelStep::Year,
        })
    }

    fn require_category(&self) -> Result<&'static PartCategory, FunnelError> {
        self.require_year()?;
        self.selection.category.ok_or(FunnelError::StepNotReady {
            missing: FunnelStep::Category,
        })
    }
}

fn lookup_category(key: &str) -> Result<&'static PartCategory, CatalogError> {
    category_by_id(key)
        .or_else(|| category_by_name(key))
        .ok_or_else(|| CatalogError::UnknownCategory(key.to_string()))
}
