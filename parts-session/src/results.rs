//! Result set of the most recent search.
//!
//! Data and error never coexist: a set is idle, loading, ready or failed.

use std::collections::HashMap;

use serde::Serialize;

use parts_agent::{apply_view, primary_offer, OfferId, PartOffer, SortMode, TierFilter};

/// State of the current search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResultSet {
    /// No search started
    #[default]
    Idle,
    /// Search `generation` in flight
    Loading { generation: u64 },
    /// Offers in backend order
    Ready { generation: u64, offers: Vec<PartOffer> },
    /// Search failed with a user-visible message
    Failed { generation: u64, message: String },
}

impl ResultSet {
    /// Offers, empty unless ready.
    pub fn offers(&self) -> &[PartOffer] {
        match self {
            Self::Ready { offers, .. } => offers,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Search generation this set belongs to.
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Loading { generation }
            | Self::Ready { generation, .. }
            | Self::Failed { generation, .. } => Some(*generation),
        }
    }

    pub fn offer(&self, id: &OfferId) -> Option<&PartOffer> {
        self.offers().iter().find(|o| &o.id == id)
    }

    /// Offer picked for eager image rendering.
    pub fn primary(&self) -> Option<&PartOffer> {
        primary_offer(self.offers())
    }

    /// Filtered and sorted view; the stored order is unchanged.
    pub fn view(&self, filter: TierFilter, sort: SortMode) -> Vec<&PartOffer> {
        apply_view(self.offers(), filter, sort)
    }
}

/// Client-local edits of the cross-reference field, keyed by offer.
#[derive(Debug, Clone, Default)]
pub struct CrossReferenceDrafts {
    drafts: HashMap<OfferId, String>,
}

impl CrossReferenceDrafts {
    /// Edited text, or the offer's cross-references joined by `", "`.
    pub fn text_for(&self, offer: &PartOffer) -> String {
        self.drafts
            .get(&offer.id)
            .cloned()
            .unwrap_or_else(|| offer.cross_reference_text())
    }

    pub fn edit(&mut self, id: OfferId, text: impl Into<String>) {
        self.drafts.insert(id, text.into());
    }

    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
