//! Mock generative backend for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::traits::*;

/// A canned text answer, optionally delayed.
#[derive(Debug, Clone)]
struct Scripted {
    text: String,
    delay: Option<Duration>,
}

/// Mock backend for testing.
///
/// Text answers are served from a queue; once the queue holds a single
/// entry that entry keeps being returned.
pub struct MockBackend {
    model_id: String,
    available: AtomicBool,
    capabilities: BackendCapabilities,
    finish_reason: FinishReason,
    responses: Mutex<VecDeque<Scripted>>,
    image: Mutex<Option<ImagePayload>>,
    image_delay: Mutex<Option<Duration>>,
    fail_generate: AtomicBool,
    fail_images: AtomicBool,
    prompts: Mutex<Vec<String>>,
    call_count: AtomicU32,
    image_call_count: AtomicU32,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            available: AtomicBool::new(true),
            capabilities: BackendCapabilities::default(),
            finish_reason: FinishReason::Stop,
            responses: Mutex::new(VecDeque::new()),
            image: Mutex::new(None),
            image_delay: Mutex::new(None),
            fail_generate: AtomicBool::new(false),
            fail_images: AtomicBool::new(false),
            prompts: Mutex::new(Vec::new()),
            call_count: AtomicU32::new(0),
            image_call_count: AtomicU32::new(0),
        }
    }

    /// Set the response text.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push_response(text, None);
        self
    }

    /// Set the image returned by every image task.
    pub fn with_image(self, mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        *lock(&self.image) = Some(ImagePayload {
            mime_type: mime_type.into(),
            data: data.into(),
        });
        self
    }

    /// Delay every image task.
    pub fn with_image_delay(self, delay: Duration) -> Self {
        *lock(&self.image_delay) = Some(delay);
        self
    }

    /// Set availability.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    /// Set capabilities.
    pub fn with_capabilities(mut self, capabilities: BackendCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Report `reason` as the stop reason of every text answer.
    pub fn with_finish_reason(mut self, reason: FinishReason) -> Self {
        self.finish_reason = reason;
        self
    }

    /// Queue a text answer.
    pub fn push_response(&self, text: impl Into<String>, delay: Option<Duration>) {
        lock(&self.responses).push_back(Scripted {
            text: text.into(),
            delay,
        });
    }

    /// Make text tasks fail.
    pub fn set_fail_generate(&self, fail: bool) {
        self.fail_generate.store(fail, Ordering::SeqCst);
    }

    /// Make image tasks fail.
    pub fn set_fail_images(&self, fail: bool) {
        self.fail_images.store(fail, Ordering::SeqCst);
    }

    /// Number of text tasks received.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Number of image tasks received.
    pub fn image_call_count(&self) -> u32 {
        self.image_call_count.load(Ordering::SeqCst)
    }

    /// Prompts received so far, text and image tasks alike.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    fn next_response(&self) -> Option<Scripted> {
        let mut queue = lock(&self.responses);
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new("mock-model")
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    fn id(&self) -> &str {
        &self.model_id
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.prompts).push(request.prompt.clone());

        if !self.available.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("Mock backend disabled".to_string()));
        }

        let scripted = self.next_response();
        if let Some(delay) = scripted.as_ref().and_then(|s| s.delay) {
            tokio::time::sleep(delay).await;
        }

        if self.fail_generate.load(Ordering::SeqCst) {
            return Err(BackendError::RequestFailed("Mock failure".to_string()));
        }

        let text = scripted.map(|s| s.text).ok_or(BackendError::EmptyResponse)?;

        // Estimate token counts
        let prompt_tokens = request.prompt.len() as u32 / 4;
        let completion_tokens = text.len() as u32 / 4;

        Ok(GenerationResponse {
            text,
            finish_reason: self.finish_reason,
            usage: Usage {
                prompt_tokens,
                completion_tokens,
            },
        })
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<Option<ImagePayload>, BackendError> {
        self.image_call_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.prompts).push(request.prompt);

        let delay = *lock(&self.image_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_images.load(Ordering::SeqCst) {
            return Err(BackendError::RequestFailed("Mock image failure".to_string()));
        }

        Ok(lock(&self.image).clone())
    }

    fn capabilities(&self) -> &BackendCapabilities {
        &self.capabilities
    }
}
