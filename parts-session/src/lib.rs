//! Parts Session - per-user lookup orchestration for OtoParca Pro
//!
//! Drives one user's lookup from brand selection to rendered offers:
//!
//! - **Selection funnel**: brand → model → year → category → sub-part
//! - **Search modes**: guided funnel or part-number reverse lookup
//! - **Result set**: last-write-wins search results with filter and sort views
//! - **Image enrichment**: lazy, single-flight image renders per offer
//! - **Identity gateway**: login, registration and admin approval
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   LookupSession                      │
//! │                                                      │
//! │  ┌────────┐   ┌──────────────┐   ┌───────────────┐   │
//! │  │ Funnel │──▶│ PartsAgent   │──▶│  ResultSet    │   │
//! │  └────────┘   │ Service      │   └───────┬───────┘   │
//! │      ▲        └──────────────┘           │           │
//! │      │                           ┌───────▼───────┐   │
//! │  AccessScope                     │  ImageCache   │   │
//! │      ▲                           └───────────────┘   │
//! └──────┼───────────────────────────────────────────────┘
//!        │
//!  IdentityGateway
//! ```

pub mod config;
pub mod funnel;
pub mod identity;
pub mod images;
pub mod memory;
pub mod results;
pub mod session;

// Re-export main types
pub use config::{AssistantConfig, ConfigError};
pub use funnel::{BrandSelection, Crumb, Funnel, FunnelError, FunnelState, FunnelStep, Selection};
pub use identity::{
    AuthError, DocumentStore, Identity, IdentityError, IdentityGateway, IdentityPatch, IdentityProvider,
    Profile, ProfileUpdate,
};
pub use images::{ImageCache, ImageState};
pub use memory::{InMemoryDocumentStore, InMemoryIdentityProvider};
pub use results::{CrossReferenceDrafts, ResultSet};
pub use session::{AccessNotice, BrandOutcome, LookupSession, SearchOutcome, SearchStatus, SessionError};
