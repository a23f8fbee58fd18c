//! Brand access filter.
//!
//! Standard identities may be restricted to an allow-list of brands. A blocked
//! brand stays visible in the catalogue but selecting it produces an
//! [`AccessDecision::Blocked`] instead of a selection.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Role of an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, manages other identities
    Admin,
    /// Regular user, optionally restricted to an allow-list
    #[default]
    #[serde(alias = "user")]
    Standard,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// The part of an identity that the access filter looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct AccessScope {
    /// Role of the identity
    pub role: Role,
    /// Brands a standard identity may open; empty means unrestricted
    #[serde(default)]
    pub allowed_brands: Vec<String>,
}

impl AccessScope {
    /// Unrestricted admin scope.
    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            allowed_brands: Vec::new(),
        }
    }

    /// Standard scope with an allow-list (empty = all brands).
    pub fn standard(allowed_brands: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            role: Role::Standard,
            allowed_brands: allowed_brands.into_iter().map(Into::into).collect(),
        }
    }

    /// Decide whether a brand may be selected.
    pub fn decide(&self, brand: &str) -> AccessDecision {
        if is_blocked(brand, self) {
            AccessDecision::Blocked
        } else {
            AccessDecision::Allowed
        }
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessDecision {
    Allowed,
    Blocked,
}

/// True iff the scope is a standard role with a non-empty allow-list that
/// does not contain `brand`.
pub fn is_blocked(brand: &str, scope: &AccessScope) -> bool {
    scope.role == Role::Standard
        && !scope.allowed_brands.is_empty()
        && !scope.allowed_brands.iter().any(|b| b == brand)
}
