//! Gemini `generateContent` backend.
//!
//! Text and image tasks go to the same endpoint shape with different models:
//! `{base_url}/models/{model}:generateContent`.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::traits::*;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for [`GeminiBackend`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiSettings {
    pub base_url: String,
    /// Model used for structured part searches
    pub search_model: String,
    /// Model used for product images
    pub image_model: String,
    #[serde(default, skip_serializing)]
    pub api_key: String,
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Gemini backend over HTTP.
pub struct GeminiBackend {
    client: Client,
    settings: GeminiSettings,
    capabilities: BackendCapabilities,
}

impl GeminiBackend {
    /// Create a backend. Fails only if the HTTP client cannot be built.
    pub fn new(settings: GeminiSettings) -> Result<Self, BackendError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BackendError::Unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            settings,
            capabilities: BackendCapabilities::default(),
        })
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.settings.base_url, model)
    }

    async fn post(&self, model: &str, body: &GenerateContentRequest) -> Result<GenerateContentResponse, BackendError> {
        let response = self
            .client
            .post(self.generate_url(model))
            .header(API_KEY_HEADER, &self.settings.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_ms = response
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(|secs| secs * 1000);
                return Err(BackendError::RateLimited { retry_after_ms });
            }

            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::RequestFailed(format!("HTTP {}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BackendError::ParseError(e.to_string()))?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(BackendError::ContentBlocked { reason });
        }

        Ok(parsed)
    }
}

/// `generateContent` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn text(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                }],
            }],
            generation_config: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

/// `generateContent` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn first_parts(self) -> Vec<Part> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    fn id(&self) -> &str {
        &self.settings.search_model
    }

    async fn is_available(&self) -> bool {
        !self.settings.api_key.trim().is_empty()
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        let mut body = GenerateContentRequest::text(&request.prompt);
        if request.temperature.is_some() || request.response_format.is_some() {
            let (mime, schema) = match request.response_format {
                Some(format) => (Some(format.mime_type), format.schema),
                None => (None, None),
            };
            body.generation_config = Some(GenerationConfig {
                temperature: request.temperature,
                response_mime_type: mime,
                response_schema: schema,
            });
        }

        let response = self.post(&self.settings.search_model, &body).await?;

        let usage = response
            .usage_metadata
            .as_ref()
            .map(|u| Usage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        let finish_reason = match response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST") => {
                FinishReason::ContentFilter
            }
            _ => FinishReason::Stop,
        };

        let text: String = response
            .first_parts()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        Ok(GenerationResponse {
            text,
            finish_reason,
            usage,
        })
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<Option<ImagePayload>, BackendError> {
        let body = GenerateContentRequest::text(&request.prompt);
        let response = self.post(&self.settings.image_model, &body).await?;

        Ok(response
            .first_parts()
            .into_iter()
            .find_map(|p| p.inline_data)
            .map(|inline| ImagePayload {
                mime_type: inline.mime_type,
                data: inline.data,
            }))
    }

    fn capabilities(&self) -> &BackendCapabilities {
        &self.capabilities
    }
}
