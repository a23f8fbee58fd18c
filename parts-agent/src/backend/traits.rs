//! Core traits for generative backends.
//!
//! This module defines the `GenerativeBackend` trait - the abstraction over
//! the external service that produces part offers and illustrative images.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Error types for backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Backend is not available
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Rate limited by the backend
    #[error("Rate limited, retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    /// Content was blocked by the backend
    #[error("Content blocked: {reason}")]
    ContentBlocked { reason: String },

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Backend answered without any text
    #[error("Backend returned no content")]
    EmptyResponse,
}

/// Core trait for generative backends.
///
/// One backend serves both the structured part search and the image task.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Get the backend identifier (e.g., model name).
    fn id(&self) -> &str;

    /// Check if the backend is currently available.
    async fn is_available(&self) -> bool;

    /// Run a text generation task, optionally constrained by a JSON schema.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError>;

    /// Run an image generation task.
    ///
    /// `Ok(None)` means the backend answered but produced no image.
    async fn generate_image(&self, request: ImageRequest)
        -> Result<Option<ImagePayload>, BackendError>;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &BackendCapabilities;
}

/// Request for a text generation task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Task prompt
    pub prompt: String,
    /// Temperature (0.0-2.0)
    pub temperature: Option<f32>,
    /// Requested structured output
    pub response_format: Option<ResponseFormat>,
}

impl GenerationRequest {
    /// Create a request from a prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp.clamp(0.0, 2.0));
        self
    }

    /// Request JSON output conforming to `schema`.
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_format = Some(ResponseFormat {
            mime_type: "application/json".to_string(),
            schema: Some(schema),
        });
        self
    }
}

/// Structured output constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Response MIME type
    pub mime_type: String,
    /// Schema the response must satisfy
    pub schema: Option<serde_json::Value>,
}

/// Response from a text generation task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text
    pub text: String,
    /// Why generation stopped
    pub finish_reason: FinishReason,
    /// Token usage
    pub usage: Usage,
}

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop
    Stop,
    /// Hit max tokens limit
    Length,
    /// Safety or policy filter
    ContentFilter,
}

/// Token usage information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
}

impl Usage {
    /// Get total tokens.
    pub fn total(&self) -> u32 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

/// Request for an image generation task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Studio-photo prompt
    pub prompt: String,
}

/// An inline image returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ImagePayload {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

impl ImagePayload {
    /// Render as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Capabilities of a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendCapabilities {
    /// Whether schema-constrained JSON output is supported
    pub supports_json_schema: bool,
    /// Whether image generation is supported
    pub supports_images: bool,
}

impl BackendCapabilities {
    /// Text-only backend: structured output, no images.
    pub fn text_only() -> Self {
        Self {
            supports_json_schema: true,
            supports_images: false,
        }
    }

    /// Whether the backend can serve `task`.
    pub fn supports(&self, task: BackendTask) -> bool {
        match task {
            BackendTask::Search => self.supports_json_schema,
            BackendTask::Image => self.supports_images,
        }
    }
}

/// Kind of work a backend is selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendTask {
    /// Schema-constrained offer search
    Search,
    /// Illustrative image render
    Image,
}

impl Default for BackendCapabilities {
    fn default() -> Self {
        Self {
            supports_json_schema: true,
            supports_images: true,
        }
    }
}
