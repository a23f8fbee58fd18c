//! Generative backend abstraction layer.
//!
//! Provides a trait-based interface over the external generative service:
//! - Gemini `generateContent` over HTTP
//! - Mock backend for testing

pub mod gemini;
pub mod mock;
pub mod traits;

pub use gemini::{GeminiBackend, GeminiSettings};
pub use mock::MockBackend;
pub use traits::{
    BackendCapabilities, BackendError, BackendTask, FinishReason, GenerationRequest, GenerationResponse, GenerativeBackend,
    ImagePayload, ImageRequest,
};
