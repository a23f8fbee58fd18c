//! LookupSession - per-user lookup orchestration.
//!
//! Ties the funnel, the agent service, the result set and the image cache
//! together. Every search takes a new generation number; a completion whose
//! generation is no longer current is discarded. Backend failures never
//! escape: they become a failed result set or a failed image entry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use catalog::{AccessScope, BrandCandidate};
use parts_agent::{
    OfferId, PartOffer, PartsAgentService, QueryError, SearchMode, SearchQuery, SortMode, TierFilter,
};

use crate::config::AssistantConfig;
use crate::funnel::{BrandSelection, Crumb, Funnel, FunnelError, FunnelState, FunnelStep, Selection};
use crate::identity::Identity;
use crate::images::{ImageCache, ImageState};
use crate::results::{CrossReferenceDrafts, ResultSet};

/// Error types for session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Operation belongs to the other search mode
    #[error("Operation requires {expected:?} mode")]
    WrongMode { expected: SearchMode },

    #[error(transparent)]
    Funnel(#[from] FunnelError),

    /// Query was rejected before reaching the backend
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Shown when a blocked brand is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessNotice {
    pub brand: String,
    pub message: String,
    pub contact: Option<String>,
}

/// Result of picking a brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandOutcome {
    Selected,
    Blocked(AccessNotice),
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    /// Offers stored
    Ready { offers: usize },
    /// Failure stored as the result set's error
    Failed { message: String },
    /// A newer search started first; nothing stored
    Superseded,
}

/// Completed search with the eager primary image render, if one started.
#[derive(Debug)]
pub struct SearchOutcome {
    pub generation: u64,
    pub status: SearchStatus,
    pub primary_image: Option<JoinHandle<()>>,
}

#[derive(Debug, Default)]
struct ViewSettings {
    filter: TierFilter,
    sort: SortMode,
}

/// One user's lookup session.
pub struct LookupSession {
    agent: Arc<PartsAgentService>,
    config: Arc<AssistantConfig>,
    scope: AccessScope,
    mode: RwLock<SearchMode>,
    funnel: RwLock<Funnel>,
    part_number: RwLock<String>,
    results: RwLock<ResultSet>,
    drafts: RwLock<CrossReferenceDrafts>,
    view: RwLock<ViewSettings>,
    images: Arc<ImageCache>,
    generation: AtomicU64,
}

impl LookupSession {
    /// Create a session for an access scope.
    pub fn new(agent: Arc<PartsAgentService>, config: Arc<AssistantConfig>, scope: AccessScope) -> Self {
        Self {
            agent,
            config,
            scope,
            mode: RwLock::new(SearchMode::Guided),
            funnel: RwLock::new(Funnel::new()),
            part_number: RwLock::new(String::new()),
            results: RwLock::new(ResultSet::Idle),
            drafts: RwLock::new(CrossReferenceDrafts::default()),
            view: RwLock::new(ViewSettings::default()),
            images: Arc::new(ImageCache::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Create a session for a logged-in identity.
    pub fn for_identity(agent: Arc<PartsAgentService>, config: Arc<AssistantConfig>, identity: &Identity) -> Self {
        Self::new(agent, config, identity.scope())
    }

    pub fn scope(&self) -> &AccessScope {
        &self.scope
    }

    pub async fn mode(&self) -> SearchMode {
        *self.mode.read().await
    }

    /// Switch search mode. Switching clears the selection and results.
    pub async fn set_mode(&self, mode: SearchMode) {
        {
            let mut current = self.mode.write().await;
            if *current == mode {
                return;
            }
            *current = mode;
        }
        debug!(mode = ?mode, "Search mode switched");
        self.reset().await;
    }

    /// Clear the selection, the part-number text, results and images.
    pub async fn reset(&self) {
        self.funnel.write().await.reset();
        self.part_number.write().await.clear();
        self.clear_results().await;
    }

    // Funnel

    pub async fn funnel_state(&self) -> FunnelState {
        self.funnel.read().await.state()
    }

    pub async fn selection(&self) -> Selection {
        *self.funnel.read().await.selection()
    }

    pub async fn breadcrumb(&self) -> Vec<Crumb> {
        self.funnel.read().await.breadcrumb()
    }

    /// Brand candidates with their blocked flags.
    pub async fn brand_candidates(&self, term: &str) -> Vec<BrandCandidate> {
        self.funnel.read().await.brand_candidates(term, &self.scope)
    }

    pub async fn model_candidates(&self, term: &str) -> Vec<&'static str> {
        self.funnel.read().await.model_candidates(term)
    }

    /// Pick a brand. A blocked brand yields the access notice and changes nothing.
    pub async fn select_brand(&self, name: &str) -> Result<BrandOutcome, SessionError> {
        self.require_mode(SearchMode::Guided).await?;

        let outcome = self.funnel.write().await.select_brand(name, &self.scope)?;
        match outcome {
            BrandSelection::Selected => {
                self.clear_results().await;
                Ok(BrandOutcome::Selected)
            }
            BrandSelection::Blocked => Ok(BrandOutcome::Blocked(AccessNotice {
                brand: name.to_string(),
                message: self.config.access.notice.clone(),
                contact: self.config.access.contact.clone(),
            })),
        }
    }

    pub async fn select_model(&self, name: &str) -> Result<(), SessionError> {
        self.require_mode(SearchMode::Guided).await?;
        self.funnel.write().await.select_model(name)?;
        self.clear_results().await;
        Ok(())
    }

    pub async fn select_year(&self, year: &str) -> Result<(), SessionError> {
        self.require_mode(SearchMode::Guided).await?;
        self.funnel.write().await.select_year(year)?;
        self.clear_results().await;
        Ok(())
    }

    pub async fn select_category(&self, category: &str) -> Result<(), SessionError> {
        self.require_mode(SearchMode::Guided).await?;
        self.funnel.write().await.select_category(category)?;
        self.clear_results().await;
        Ok(())
    }

    /// Breadcrumb jump. Results of the abandoned search are dropped.
    pub async fn navigate_to(&self, step: FunnelStep) -> Result<(), SessionError> {
        self.require_mode(SearchMode::Guided).await?;
        self.funnel.write().await.navigate_to(step)?;
        self.clear_results().await;
        Ok(())
    }

    /// Terminal funnel step: pick a sub-category and run the guided search.
    pub async fn select_sub_category(
        &self,
        category: &str,
        sub_category: &str,
    ) -> Result<SearchOutcome, SessionError> {
        self.require_mode(SearchMode::Guided).await?;
        let query = self
            .funnel
            .write()
            .await
            .select_sub_category(category, sub_category)?;
        self.run_search(SearchQuery::Guided(query)).await
    }

    /// Guided free-text search once the year is selected.
    pub async fn search_free_text(&self, text: &str) -> Result<SearchOutcome, SessionError> {
        self.require_mode(SearchMode::Guided).await?;
        let query = self.funnel.write().await.search_free_text(text)?;
        self.run_search(SearchQuery::Guided(query)).await
    }

    /// Reverse lookup by part number.
    pub async fn search_part_number(&self, raw: &str) -> Result<SearchOutcome, SessionError> {
        self.require_mode(SearchMode::ByPartNumber).await?;
        *self.part_number.write().await = raw.to_string();
        self.run_search(SearchQuery::part_number(raw)).await
    }

    pub async fn part_number_query(&self) -> String {
        self.part_number.read().await.clone()
    }

    // Results

    pub async fn result_set(&self) -> ResultSet {
        self.results.read().await.clone()
    }

    pub async fn set_filter(&self, filter: TierFilter) {
        self.view.write().await.filter = filter;
    }

    pub async fn set_sort(&self, sort: SortMode) {
        self.view.write().await.sort = sort;
    }

    /// Offers under the current filter and sort.
    pub async fn visible_offers(&self) -> Vec<PartOffer> {
        let view = self.view.read().await;
        let results = self.results.read().await;
        results
            .view(view.filter, view.sort)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Cross-reference field text for an offer of the current set.
    pub async fn cross_reference_text(&self, id: &OfferId) -> Option<String> {
        let results = self.results.read().await;
        let offer = results.offer(id)?;
        Some(self.drafts.read().await.text_for(offer))
    }

    /// Edit the cross-reference field. The offer itself is not changed.
    pub async fn edit_cross_reference(&self, id: &OfferId, text: &str) -> bool {
        let results = self.results.read().await;
        if results.offer(id).is_none() {
            return false;
        }
        self.drafts.write().await.edit(id.clone(), text);
        true
    }

    // Images

    /// Start the image render for an offer of the current set.
    ///
    /// Returns `None` when the offer is unknown, already rendered or
    /// rendering. A failed render may be requested again.
    pub async fn request_image(&self, id: &OfferId) -> Option<JoinHandle<()>> {
        let results = self.results.read().await;
        let generation = results.generation()?;
        let offer = results.offer(id)?.clone();
        self.start_image(offer, generation)
    }

    pub fn image_state(&self, id: &OfferId) -> Option<ImageState> {
        self.images.get(id)
    }

    /// Image as a `data:` URI; an empty string marks a failed render.
    pub fn image_data_uri(&self, id: &OfferId) -> Option<String> {
        self.images.get(id).and_then(|state| state.data_uri())
    }

    pub fn cached_images(&self) -> usize {
        self.images.len()
    }

    fn start_image(&self, offer: PartOffer, generation: u64) -> Option<JoinHandle<()>> {
        if !self.images.try_begin(&offer.id, generation) {
            return None;
        }

        let agent = Arc::clone(&self.agent);
        let images = Arc::clone(&self.images);
        Some(tokio::spawn(async move {
            let payload = match agent.render_image(&offer).await {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(offer_id = %offer.id, error = %e, "Image render failed");
                    None
                }
            };
            images.complete(&offer.id, generation, payload);
        }))
    }

    // Internals

    async fn require_mode(&self, expected: SearchMode) -> Result<(), SessionError> {
        if *self.mode.read().await == expected {
            Ok(())
        } else {
            Err(SessionError::WrongMode { expected })
        }
    }

    /// Invalidate any in-flight search and drop the current set.
    async fn clear_results(&self) {
        {
            // Bumped under the results lock so a racing search cannot interleave.
            let mut results = self.results.write().await;
            self.generation.fetch_add(1, Ordering::SeqCst);
            *results = ResultSet::Idle;
        }
        self.drafts.write().await.clear();
        self.images.clear();
    }

    async fn run_search(&self, query: SearchQuery) -> Result<SearchOutcome, SessionError> {
        let compiled = query.compile()?;

        let generation = {
            let mut results = self.results.write().await;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *results = ResultSet::Loading { generation };
            generation
        };
        self.drafts.write().await.clear();
        self.images.clear();

        info!(generation, mode = ?compiled.mode, "Search started");
        let outcome = self.agent.run(&compiled).await;

        let mut results = self.results.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding stale search response");
            return Ok(SearchOutcome {
                generation,
                status: SearchStatus::Superseded,
                primary_image: None,
            });
        }

        match outcome {
            Ok(found) => {
                let count = found.offers.len();
                *results = ResultSet::Ready {
                    generation,
                    offers: found.offers,
                };
                let primary_image = results
                    .primary()
                    .cloned()
                    .and_then(|offer| self.start_image(offer, generation));

                Ok(SearchOutcome {
                    generation,
                    status: SearchStatus::Ready { offers: count },
                    primary_image,
                })
            }
            Err(e) => {
                warn!(generation, error = %e, "Search failed");
                let message = self.config.messages.search_failed.clone();
                *results = ResultSet::Failed {
                    generation,
                    message: message.clone(),
                };
                Ok(SearchOutcome {
                    generation,
                    status: SearchStatus::Failed { message },
                    primary_image: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use parts_agent::{GenerativeBackend, MockBackend, Tier};

    const GOLF_PADS: &str = r#"[
        {"partName": "Ön Fren Balatası", "vehicleModel": "VW Golf 7", "subCategory": "Ön Fren Balatası",
         "oemNumber": "5Q0698151", "oemCrossReference": ["5Q0698151B"], "type": "Orijinal (OEM)",
         "brand": "VW AG", "priceNumeric": 2600, "material": "Seramik"},
        {"partName": "Ön Fren Balatası", "oemNumber": "0986494660", "type": "Kaliteli Muadil",
         "brand": "Bosch", "priceNumeric": 1450},
        {"partName": "Ön Fren Balatası", "oemNumber": "FDB4050", "type": "Fiyat/Performans",
         "brand": "Ferodo", "priceNumeric": 900}
    ]"#;

    const PART_NUMBER_HIT: &str = r#"[
        {"partName": "Ön Fren Diski", "oemNumber": "1J0615301", "type": "Orijinal (OEM)", "brand": "VW AG", "priceNumeric": 1800},
        {"partName": "Ön Fren Diski", "oemNumber": "0986478546", "type": "Kaliteli Muadil", "brand": "Bosch", "priceNumeric": 1100},
        {"partName": "Ön Fren Diski", "oemNumber": "DF2804", "type": "Fiyat/Performans", "brand": "TRW", "priceNumeric": 750}
    ]"#;

    fn session_with(mock: Arc<MockBackend>, scope: AccessScope) -> LookupSession {
        let agent = PartsAgentService::new(vec![mock as Arc<dyn GenerativeBackend>]);
        LookupSession::new(Arc::new(agent), Arc::new(AssistantConfig::default()), scope)
    }

    fn golf_mock() -> Arc<MockBackend> {
        Arc::new(
            MockBackend::default()
                .with_response(GOLF_PADS)
                .with_image("image/png", "iVBORw0KGgo="),
        )
    }

    async fn pick_golf(session: &LookupSession) {
        session.select_brand("Volkswagen").await.unwrap();
        session.select_model("Golf 7 (VII)").await.unwrap();
        session.select_year("2015").await.unwrap();
        session.select_category("Fren Sistemi").await.unwrap();
    }

    #[tokio::test]
    async fn test_guided_search_end_to_end() {
        let mock = golf_mock();
        let session = session_with(Arc::clone(&mock), AccessScope::default());
        pick_golf(&session).await;

        let outcome = session
            .select_sub_category("Fren Sistemi", "Ön Fren Balatası")
            .await
            .unwrap();
        assert_eq!(outcome.status, SearchStatus::Ready { offers: 3 });

        let prompt = &mock.prompts()[0];
        for value in ["Volkswagen", "Golf 7 (VII)", "2015", "Fren Sistemi", "Ön Fren Balatası"] {
            assert!(prompt.contains(value), "prompt misses {value}");
        }

        let results = session.result_set().await;
        let tiers: Vec<Tier> = results.offers().iter().map(|o| o.tier).collect();
        for tier in Tier::ALL {
            assert_eq!(tiers.iter().filter(|t| **t == tier).count(), 1);
        }
        let primary = results.primary().unwrap().clone();
        assert_eq!(primary.tier, Tier::Original);
        assert_eq!(session.funnel_state().await, FunnelState::ShowResults);

        outcome.primary_image.unwrap().await.unwrap();
        assert_eq!(mock.image_call_count(), 1);
        assert_eq!(
            session.image_data_uri(&primary.id).as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );
        // only the primary offer is rendered eagerly
        assert_eq!(session.cached_images(), 1);
    }

    #[tokio::test]
    async fn test_part_number_search() {
        let mock = Arc::new(MockBackend::default().with_response(PART_NUMBER_HIT));
        let session = session_with(Arc::clone(&mock), AccessScope::default());

        assert_eq!(
            session.search_part_number("1J0615301").await.unwrap_err(),
            SessionError::WrongMode { expected: SearchMode::ByPartNumber }
        );

        session.set_mode(SearchMode::ByPartNumber).await;
        let outcome = session.search_part_number("1J0615301").await.unwrap();
        assert_eq!(outcome.status, SearchStatus::Ready { offers: 3 });

        let prompt = &mock.prompts()[0];
        assert!(prompt.contains("1J0615301"));
        assert!(!prompt.contains("ARAÇ:"));

        let results = session.result_set().await;
        assert_eq!(results.primary().unwrap().oem_number, "1J0615301");
        assert_eq!(session.part_number_query().await, "1J0615301");
    }

    #[tokio::test]
    async fn test_empty_part_number_not_sent() {
        let mock = Arc::new(MockBackend::default().with_response("[]"));
        let session = session_with(Arc::clone(&mock), AccessScope::default());
        session.set_mode(SearchMode::ByPartNumber).await;

        assert_eq!(
            session.search_part_number("   ").await.unwrap_err(),
            SessionError::Query(QueryError::EmptyPartNumber)
        );
        assert_eq!(mock.call_count(), 0);
        assert_eq!(session.result_set().await, ResultSet::Idle);
    }

    #[tokio::test]
    async fn test_malformed_response_fails_search() {
        let mock = Arc::new(MockBackend::default().with_response("```json\n[{\"partName\":"));
        let session = session_with(Arc::clone(&mock), AccessScope::default());
        pick_golf(&session).await;

        let outcome = session
            .select_sub_category("Fren Sistemi", "Ön Fren Balatası")
            .await
            .unwrap();

        assert!(matches!(outcome.status, SearchStatus::Failed { .. }));
        assert!(outcome.primary_image.is_none());

        let results = session.result_set().await;
        assert!(results.offers().is_empty());
        assert!(!results.is_loading());
        assert_eq!(results.error(), Some("could not retrieve part information"));
        assert_eq!(session.cached_images(), 0);
        assert_eq!(mock.image_call_count(), 0);
    }

    #[tokio::test]
    async fn test_backend_failure_fails_search() {
        let mock = golf_mock();
        mock.set_fail_generate(true);
        let session = session_with(mock, AccessScope::default());
        session.set_mode(SearchMode::ByPartNumber).await;

        let outcome = session.search_part_number("5Q0698151").await.unwrap();
        assert!(matches!(outcome.status, SearchStatus::Failed { .. }));
        assert!(session.result_set().await.error().is_some());
    }

    #[tokio::test]
    async fn test_double_image_request_single_call() {
        let mock = Arc::new(
            MockBackend::default()
                .with_response(GOLF_PADS)
                .with_image("image/png", "AAAA")
                .with_image_delay(Duration::from_millis(50)),
        );
        let session = session_with(Arc::clone(&mock), AccessScope::default());
        session.set_mode(SearchMode::ByPartNumber).await;
        let outcome = session.search_part_number("5Q0698151").await.unwrap();

        let budget = session.result_set().await.offers()[2].id.clone();
        let first = session.request_image(&budget).await;
        let second = session.request_image(&budget).await;
        assert!(first.is_some());
        assert!(second.is_none());
        assert!(matches!(session.image_state(&budget), Some(ImageState::Loading { .. })));

        first.unwrap().await.unwrap();
        outcome.primary_image.unwrap().await.unwrap();

        // one call for the primary offer, one for the budget offer
        assert_eq!(mock.image_call_count(), 2);
        assert!(session.request_image(&budget).await.is_none());
    }

    #[tokio::test]
    async fn test_failed_image_is_retryable() {
        let mock = golf_mock();
        mock.set_fail_images(true);
        let session = session_with(Arc::clone(&mock), AccessScope::default());
        session.set_mode(SearchMode::ByPartNumber).await;

        let outcome = session.search_part_number("5Q0698151").await.unwrap();
        outcome.primary_image.unwrap().await.unwrap();

        let primary = session.result_set().await.primary().unwrap().id.clone();
        assert_eq!(session.image_data_uri(&primary).as_deref(), Some(""));
        assert!(session.result_set().await.error().is_none());

        mock.set_fail_images(false);
        session.request_image(&primary).await.unwrap().await.unwrap();
        assert!(session.image_data_uri(&primary).unwrap().starts_with("data:image/png"));
    }

    #[tokio::test]
    async fn test_stale_response_discarded() {
        let mock = Arc::new(MockBackend::default());
        mock.push_response(GOLF_PADS, Some(Duration::from_millis(200)));
        mock.push_response(PART_NUMBER_HIT, None);

        let session = Arc::new(session_with(Arc::clone(&mock), AccessScope::default()));
        session.set_mode(SearchMode::ByPartNumber).await;

        let slow = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.search_part_number("5Q0698151").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let fast = session.search_part_number("1J0615301").await.unwrap();
        assert_eq!(fast.status, SearchStatus::Ready { offers: 3 });

        let slow = slow.await.unwrap().unwrap();
        assert_eq!(slow.status, SearchStatus::Superseded);
        assert!(slow.generation < fast.generation);

        let results = session.result_set().await;
        assert_eq!(results.generation(), Some(fast.generation));
        assert_eq!(results.primary().unwrap().oem_number, "1J0615301");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_searches_settle_on_newest() {
        let mock = golf_mock();
        let session = Arc::new(session_with(Arc::clone(&mock), AccessScope::default()));
        session.set_mode(SearchMode::ByPartNumber).await;

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let session = Arc::clone(&session);
                tokio::spawn(async move { session.search_part_number("5Q0698151").await })
            })
            .collect();

        let mut newest_ready = 0;
        for handle in handles {
            let outcome = handle.await.unwrap().unwrap();
            if let SearchStatus::Ready { .. } = outcome.status {
                newest_ready = newest_ready.max(outcome.generation);
            }
        }

        let results = session.result_set().await;
        assert!(!results.is_loading());
        assert_eq!(results.generation(), Some(newest_ready));
        assert_eq!(results.offers().len(), 3);
    }

    #[tokio::test]
    async fn test_new_search_clears_previous_state() {
        let mock = golf_mock();
        let session = session_with(Arc::clone(&mock), AccessScope::default());
        session.set_mode(SearchMode::ByPartNumber).await;

        let first = session.search_part_number("5Q0698151").await.unwrap();
        first.primary_image.unwrap().await.unwrap();
        let old = session.result_set().await.offers()[0].id.clone();
        assert!(session.edit_cross_reference(&old, "edited").await);

        let second = session.search_part_number("5Q0698151").await.unwrap();
        assert_eq!(session.cross_reference_text(&old).await, None);
        assert!(session.image_state(&old).is_none());

        let new = session.result_set().await.offers()[0].id.clone();
        assert_ne!(old, new);
        assert_eq!(session.cross_reference_text(&new).await.as_deref(), Some("5Q0698151B"));
        second.primary_image.unwrap().await.unwrap();
    }

    #[tokio::test]
    async fn test_blocked_brand_surfaces_notice() {
        let session = session_with(golf_mock(), AccessScope::standard(["BMW"]));

        let outcome = session.select_brand("Volkswagen").await.unwrap();
        match outcome {
            BrandOutcome::Blocked(notice) => {
                assert_eq!(notice.brand, "Volkswagen");
                assert!(!notice.message.is_empty());
            }
            BrandOutcome::Selected => panic!("blocked brand was selected"),
        }
        assert!(session.selection().await.brand().is_none());

        let vw = session
            .brand_candidates("golf")
            .await
            .into_iter()
            .find(|c| c.brand.name == "Volkswagen")
            .unwrap();
        assert!(vw.blocked);
        assert_eq!(session.select_brand("BMW").await.unwrap(), BrandOutcome::Selected);
    }

    #[tokio::test]
    async fn test_switching_mode_resets() {
        let mock = golf_mock();
        let session = session_with(Arc::clone(&mock), AccessScope::default());
        pick_golf(&session).await;
        let outcome = session
            .select_sub_category("Fren Sistemi", "Ön Fren Balatası")
            .await
            .unwrap();
        if let Some(handle) = outcome.primary_image {
            handle.await.unwrap();
        }

        session.set_mode(SearchMode::ByPartNumber).await;

        assert_eq!(session.selection().await, Selection::default());
        assert_eq!(session.result_set().await, ResultSet::Idle);
        assert_eq!(session.cached_images(), 0);
        assert!(matches!(
            session.select_brand("Audi").await,
            Err(SessionError::WrongMode { expected: SearchMode::Guided })
        ));
    }

    #[tokio::test]
    async fn test_view_does_not_reorder_store() {
        let session = session_with(golf_mock(), AccessScope::default());
        session.set_mode(SearchMode::ByPartNumber).await;
        session.search_part_number("5Q0698151").await.unwrap();

        session.set_sort(SortMode::PriceAsc).await;
        let prices: Vec<f64> = session.visible_offers().await.iter().map(|o| o.price_numeric).collect();
        assert_eq!(prices, vec![900.0, 1450.0, 2600.0]);

        session.set_filter(TierFilter::Only(Tier::QualityEquivalent)).await;
        assert_eq!(session.visible_offers().await.len(), 1);

        let stored: Vec<f64> = session.result_set().await.offers().iter().map(|o| o.price_numeric).collect();
        assert_eq!(stored, vec![2600.0, 1450.0, 900.0]);
    }

    #[tokio::test]
    async fn test_breadcrumb_back_clears_results() {
        let session = session_with(golf_mock(), AccessScope::default());
        pick_golf(&session).await;
        session
            .select_sub_category("Fren Sistemi", "Ön Fren Balatası")
            .await
            .unwrap();

        session.navigate_to(FunnelStep::Model).await.unwrap();

        assert_eq!(session.funnel_state().await, FunnelState::PickModel);
        assert_eq!(session.breadcrumb().await.len(), 1);
        assert_eq!(session.result_set().await, ResultSet::Idle);
    }

    #[tokio::test]
    async fn test_free_text_search() {
        let mock = golf_mock();
        let session = session_with(Arc::clone(&mock), AccessScope::default());
        session.select_brand("Volkswagen").await.unwrap();
        session.select_model("Golf 7 (VII)").await.unwrap();
        session.select_year("2015").await.unwrap();

        session.search_free_text("Turbo hortumu").await.unwrap();

        assert!(mock.prompts()[0].contains("KATEGORİ: Genel | PARÇA: Turbo hortumu"));
    }
}
