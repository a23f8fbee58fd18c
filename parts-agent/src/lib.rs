//! Parts Agent - generative part lookup pipeline
//!
//! Provides the request/response path between a lookup session and the
//! generative service:
//! - Trait-based generative backends (Gemini over HTTP, mock)
//! - Query compilation for guided and part-number searches
//! - Strict normalization of the structured answer into offers
//! - Tier filter and price sort views
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          PartsAgentService              │
//! │   (search / render_image entry point)   │
//! └────────────────┬────────────────────────┘
//!                  │
//!      ┌───────────┼───────────────┐
//!      ▼           ▼               ▼
//! ┌──────────┐ ┌──────────────┐ ┌────────────┐
//! │ Query    │ │ Generative   │ │ Normalizer │
//! │ compiler │ │ Backend      │ │ + ranking  │
//! └──────────┘ │ (Gemini/Mock)│ └────────────┘
//!              └──────────────┘
//! ```

pub mod backend;
pub mod image;
pub mod normalize;
pub mod offer;
pub mod query;
pub mod ranking;
pub mod schema;
pub mod service;

// Re-export main types for convenience
pub use backend::traits::{BackendCapabilities, BackendError, BackendTask, GenerativeBackend, ImagePayload};
pub use backend::{GeminiBackend, GeminiSettings, MockBackend};
pub use normalize::{normalize_offers, NormalizeError, OfferIdAllocator};
pub use offer::{InstallationDifficulty, OfferId, PartOffer, Tier};
pub use query::{CompiledQuery, GuidedQuery, QueryError, SearchMode, SearchQuery, VehicleContext};
pub use ranking::{apply_filter, apply_sort, apply_view, primary_offer, SortMode, TierFilter};
pub use service::{AgentConfig, PartsAgentService, SearchError, SearchResults};
