//! PartsAgentService - entry point for part searches and image renders.
//!
//! Compiles a query, picks the first available backend able to serve the
//! task, runs the task under a timeout and normalizes the answer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::backend::traits::{
    BackendError, BackendTask, FinishReason, GenerationRequest, GenerativeBackend, ImagePayload, Usage,
};
use crate::image::image_request;
use crate::normalize::{normalize_offers, NormalizeError, OfferIdAllocator};
use crate::offer::PartOffer;
use crate::query::{CompiledQuery, QueryError, SearchQuery};

/// Error types for the service.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Query could not be compiled
    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    /// No backend available
    #[error("No generative backend available")]
    NoBackendAvailable,

    /// Backend stopped at its token limit and the partial answer did not parse
    #[error("Response truncated at the token limit: {0}")]
    Truncated(NormalizeError),

    /// Backend error
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Response did not match the offer contract
    #[error("Malformed response: {0}")]
    Malformed(#[from] NormalizeError),

    /// Backend did not answer in time
    #[error("Backend timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Configuration for the PartsAgentService.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Timeout for a part search (ms)
    pub search_timeout_ms: u64,
    /// Timeout for an image render (ms)
    pub image_timeout_ms: u64,
    /// Sampling temperature for searches
    pub temperature: Option<f32>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            search_timeout_ms: 30_000,
            image_timeout_ms: 60_000,
            temperature: None,
        }
    }
}

/// Offers of one completed search.
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Result-set number the offer ids were allocated under
    pub result_set: u64,
    /// Offers in backend order
    pub offers: Vec<PartOffer>,
    pub usage: Usage,
}

/// Main entry point for part lookups.
pub struct PartsAgentService {
    config: AgentConfig,
    /// Backends in preference order
    backends: Vec<Arc<dyn GenerativeBackend>>,
    result_sets: AtomicU64,
}

impl PartsAgentService {
    /// Create a new service with the given backends.
    pub fn new(backends: Vec<Arc<dyn GenerativeBackend>>) -> Self {
        info!(backends = backends.len(), "Initializing PartsAgentService");
        Self {
            config: AgentConfig::default(),
            backends,
            result_sets: AtomicU64::new(0),
        }
    }

    /// Create with configuration.
    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Select the first available backend that supports `task`.
    pub async fn select_backend(&self, task: BackendTask) -> Result<Arc<dyn GenerativeBackend>, SearchError> {
        for backend in &self.backends {
            if !backend.capabilities().supports(task) {
                debug!(backend = %backend.id(), ?task, "Backend lacks capability");
                continue;
            }
            if backend.is_available().await {
                debug!(backend = %backend.id(), ?task, "Selected backend");
                return Ok(Arc::clone(backend));
            }
        }
        warn!(?task, "No generative backend available");
        Err(SearchError::NoBackendAvailable)
    }

    /// Compile and run a search.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults, SearchError> {
        let compiled = query.compile()?;
        self.run(&compiled).await
    }

    /// Run an already compiled search.
    pub async fn run(&self, compiled: &CompiledQuery) -> Result<SearchResults, SearchError> {
        let backend = self.select_backend(BackendTask::Search).await?;

        let mut request =
            GenerationRequest::new(compiled.prompt.clone()).with_json_schema(compiled.schema.clone());
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }

        debug!(
            mode = ?compiled.mode,
            context = %compiled.context,
            backend = %backend.id(),
            "Processing search"
        );

        let timeout_ms = self.config.search_timeout_ms;
        let response = tokio::time::timeout(Duration::from_millis(timeout_ms), backend.generate(request))
            .await
            .map_err(|_| SearchError::Timeout { timeout_ms })??;

        let result_set = self.result_sets.fetch_add(1, Ordering::SeqCst) + 1;
        let mut ids = OfferIdAllocator::new(result_set);
        if response.finish_reason != FinishReason::Stop {
            warn!(
                backend = %backend.id(),
                finish_reason = ?response.finish_reason,
                "Search answer did not finish normally"
            );
        }
        let offers = normalize_offers(&response.text, &mut ids).map_err(|e| match response.finish_reason {
            FinishReason::Length => SearchError::Truncated(e),
            _ => SearchError::Malformed(e),
        })?;

        info!(
            result_set,
            offers = offers.len(),
            tokens = response.usage.total(),
            "Search completed"
        );

        Ok(SearchResults {
            result_set,
            offers,
            usage: response.usage,
        })
    }

    /// Render the illustrative image for one offer.
    ///
    /// `Ok(None)` means the backend answered without an image.
    pub async fn render_image(&self, offer: &PartOffer) -> Result<Option<ImagePayload>, SearchError> {
        let backend = self.select_backend(BackendTask::Image).await?;
        let timeout_ms = self.config.image_timeout_ms;

        debug!(offer_id = %offer.id, backend = %backend.id(), "Rendering image");

        let image = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            backend.generate_image(image_request(offer)),
        )
        .await
        .map_err(|_| SearchError::Timeout { timeout_ms })??;

        Ok(image)
    }
}
