//! Mock backend for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizgen_core::traits::{ModelInfo, QuizBackend, QuizRequest, QuizResponse};

/// A mock backend for exercising the pipeline without real API calls.
///
/// Returns configurable quiz text based on source-text matching.
pub struct MockProvider {
    /// Map of source-text substring → quiz text.
    responses: HashMap<String, String>,
    /// Default quiz if no key matches.
    default_response: String,
    call_count: AtomicU32,
    last_request: Mutex<Option<QuizRequest>>,
}

impl MockProvider {
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: String::new(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same quiz text.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            responses: HashMap::new(),
            default_response: response.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<QuizRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuizBackend for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &QuizRequest) -> anyhow::Result<QuizResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        let quiz = self
            .responses
            .iter()
            .find(|(key, _)| request.text.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_response.clone());

        Ok(QuizResponse {
            quiz,
            model: request.model.clone(),
            latency_ms: 1,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "mock-model".into(),
            name: "Mock Model".into(),
            provider: "mock".into(),
            max_context: 100_000,
        }]
    }
}
