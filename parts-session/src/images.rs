//! Per-offer image cache.
//!
//! At most one render is in flight per offer id. Each entry is stamped with
//! the search generation that started it; a completion is only stored while
//! its own loading entry is still present.

use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

use parts_agent::{ImagePayload, OfferId};

/// Image state of one offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ImageState {
    /// Render in flight
    Loading { generation: u64 },
    Ready(ImagePayload),
    /// Render failed or produced nothing; may be retried
    Failed,
}

impl ImageState {
    /// `data:` URI, or the empty-string sentinel for a failed render.
    pub fn data_uri(&self) -> Option<String> {
        match self {
            Self::Loading { .. } => None,
            Self::Ready(payload) => Some(payload.to_data_uri()),
            Self::Failed => Some(String::new()),
        }
    }
}

/// Image cache shared between a session and its render tasks.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: DashMap<OfferId, ImageState>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a render as started.
    ///
    /// Returns false when a render is in flight or an image is already
    /// stored. A failed entry may be restarted.
    pub fn try_begin(&self, id: &OfferId, generation: u64) -> bool {
        use dashmap::mapref::entry::Entry;

        match self.entries.entry(id.clone()) {
            Entry::Occupied(mut entry) => match entry.get() {
                ImageState::Loading { .. } | ImageState::Ready(_) => false,
                ImageState::Failed => {
                    entry.insert(ImageState::Loading { generation });
                    true
                }
            },
            Entry::Vacant(entry) => {
                entry.insert(ImageState::Loading { generation });
                true
            }
        }
    }

    /// Store a finished render. Returns false if the entry was cleared meanwhile.
    pub fn complete(&self, id: &OfferId, generation: u64, payload: Option<ImagePayload>) -> bool {
        match self.entries.get_mut(id) {
            Some(mut entry) if *entry == (ImageState::Loading { generation }) => {
                *entry = match payload {
                    Some(payload) => ImageState::Ready(payload),
                    None => ImageState::Failed,
                };
                true
            }
            _ => {
                debug!(offer_id = %id, generation, "Discarding stale image");
                false
            }
        }
    }

    pub fn get(&self, id: &OfferId) -> Option<ImageState> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    pub fn is_loading(&self, id: &OfferId) -> bool {
        matches!(self.get(id), Some(ImageState::Loading { .. }))
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> ImagePayload {
        ImagePayload {
            mime_type: "image/png".to_string(),
            data: "AAAA".to_string(),
        }
    }

    #[test]
    fn test_single_flight() {
        let cache = ImageCache::new();
        let id = OfferId::new("part-1-0-0");

        assert!(cache.try_begin(&id, 1));
        assert!(!cache.try_begin(&id, 1));
        assert!(cache.is_loading(&id));

        assert!(cache.complete(&id, 1, Some(png())));
        assert!(!cache.try_begin(&id, 1));
        assert_eq!(cache.get(&id).unwrap().data_uri().unwrap(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_failure_allows_retry() {
        let cache = ImageCache::new();
        let id = OfferId::new("part-1-0-0");

        cache.try_begin(&id, 1);
        cache.complete(&id, 1, None);
        assert_eq!(cache.get(&id), Some(ImageState::Failed));
        assert_eq!(cache.get(&id).unwrap().data_uri().as_deref(), Some(""));

        assert!(cache.try_begin(&id, 1));
    }

    #[test]
    fn test_cleared_entry_discards_completion() {
        let cache = ImageCache::new();
        let id = OfferId::new("part-1-0-0");

        cache.try_begin(&id, 1);
        cache.clear();
        assert!(!cache.complete(&id, 1, Some(png())));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_wrong_generation_discarded() {
        let cache = ImageCache::new();
        let id = OfferId::new("part-1-0-0");

        cache.try_begin(&id, 2);
        assert!(!cache.complete(&id, 1, Some(png())));
        assert!(cache.is_loading(&id));
    }
}
