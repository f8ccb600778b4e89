//! Generation pipeline.
//!
//! Sends a [`QuizRequest`] to a [`QuizBackend`], retries transient provider
//! failures, and parses the returned text into questions.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::error::{PipelineError, ProviderError};
use crate::parser::{ParseOutcome, ParserConfig, ParserStyle};
use crate::traits::{QuizBackend, QuizRequest};

/// Upper bound on the backoff between retries.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Retry and parsing settings for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Retries on transient provider errors.
    pub max_retries: u32,
    /// Delay before the first retry; doubles after each attempt.
    pub retry_delay: Duration,
    /// Segmentation convention used on the response.
    pub style: ParserStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            style: ParserStyle::Heading,
        }
    }
}

/// A parsed quiz together with what produced it.
#[derive(Debug, Clone)]
pub struct GeneratedQuiz {
    pub request: QuizRequest,
    /// Raw text as returned by the backend.
    pub raw: String,
    pub outcome: ParseOutcome,
    pub backend: String,
    pub model: String,
    /// Backend latency of the successful attempt.
    pub latency_ms: u64,
    /// Number of backend calls made, including the successful one.
    pub attempts: u32,
    pub generated_at: DateTime<Utc>,
}

pub struct QuizPipeline {
    backend: Arc<dyn QuizBackend>,
    config: PipelineConfig,
}

impl QuizPipeline {
    pub fn new(backend: Arc<dyn QuizBackend>, config: PipelineConfig) -> Self {
        Self { backend, config }
    }

    /// Generate and parse one quiz.
    pub async fn run(&self, request: &QuizRequest) -> Result<GeneratedQuiz> {
        if request.text.trim().is_empty() {
            return Err(PipelineError::EmptyText.into());
        }
        if request.num_questions == 0 {
            return Err(PipelineError::NoQuestionsRequested.into());
        }

        let parser = ParserConfig::new(request.schema, request.num_options)
            .with_style(self.config.style)
            .build()
            .map_err(PipelineError::from)?;

        let start = Instant::now();
        let mut last_error = None;
        let mut retry_delay = self.config.retry_delay;

        for retry in 0..=self.config.max_retries {
            if retry > 0 {
                tokio::time::sleep(retry_delay).await;
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }

            match self.backend.generate(request).await {
                Ok(response) => {
                    let outcome = parser.parse(&response.quiz);
                    tracing::info!(
                        backend = self.backend.name(),
                        model = %response.model,
                        accepted = outcome.accepted_count(),
                        rejected = outcome.rejected_count(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "quiz generated"
                    );

                    return Ok(GeneratedQuiz {
                        request: request.clone(),
                        raw: response.quiz,
                        outcome,
                        backend: self.backend.name().to_string(),
                        model: response.model,
                        latency_ms: response.latency_ms,
                        attempts: retry + 1,
                        generated_at: Utc::now(),
                    });
                }
                Err(e) => {
                    if let Some(provider_err) = e.downcast_ref::<ProviderError>() {
                        if provider_err.is_permanent() {
                            return Err(e);
                        }
                        // Use the provider's retry-after hint if available
                        if let Some(ms) = provider_err.retry_after_ms() {
                            retry_delay = Duration::from_millis(ms).min(MAX_RETRY_DELAY);
                        }
                    }
                    tracing::warn!(
                        backend = self.backend.name(),
                        attempt = retry + 1,
                        "quiz generation failed: {e:#}"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("unknown error")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::model::QuestionSchema;
    use crate::traits::{ModelInfo, QuizResponse};

    /// Backend that fails with queued errors, then succeeds.
    struct ScriptedBackend {
        failures: Mutex<Vec<ProviderError>>,
        quiz: String,
        calls: AtomicU32,
    }

    impl ScriptedBackend {
        fn new(failures: Vec<ProviderError>, quiz: &str) -> Self {
            Self {
                failures: Mutex::new(failures),
                quiz: quiz.to_string(),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl QuizBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, request: &QuizRequest) -> anyhow::Result<QuizResponse> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            let next = {
                let mut failures = self.failures.lock().unwrap();
                if failures.is_empty() {
                    None
                } else {
                    Some(failures.remove(0))
                }
            };
            match next {
                Some(err) => Err(err.into()),
                None => Ok(QuizResponse {
                    quiz: self.quiz.clone(),
                    model: request.model.clone(),
                    latency_ms: 1,
                }),
            }
        }

        fn available_models(&self) -> Vec<ModelInfo> {
            vec![]
        }
    }

    const QUIZ: &str = "Question 1
Is the Earth round?
Options:
A) True
B) False
Answer: True

Question 2
Is the Moon a star?
Options:
A) Yes
B) No
Answer: No";

    fn fast_config() -> PipelineConfig {
        PipelineConfig {
            max_retries: 2,
            retry_delay: Duration::from_millis(1),
            style: ParserStyle::Heading,
        }
    }

    fn tf_request() -> QuizRequest {
        let mut request = QuizRequest::new("Astronomy basics");
        request.schema = QuestionSchema::TrueFalse;
        request.model = "test-model".into();
        request
    }

    #[tokio::test]
    async fn parses_backend_output() {
        let backend = Arc::new(ScriptedBackend::new(vec![], QUIZ));
        let pipeline = QuizPipeline::new(backend, fast_config());

        let quiz = pipeline.run(&tf_request()).await.unwrap();
        assert_eq!(quiz.outcome.blocks_seen(), 2);
        assert_eq!(quiz.outcome.accepted_count(), 1);
        assert_eq!(quiz.outcome.questions[0].prompt, "Is the Earth round?");
        assert_eq!(quiz.model, "test-model");
        assert_eq!(quiz.attempts, 1);
    }

    #[tokio::test]
    async fn retries_transient_errors() {
        let backend = Arc::new(ScriptedBackend::new(
            vec![
                ProviderError::Timeout(120),
                ProviderError::RateLimited { retry_after_ms: 1 },
            ],
            QUIZ,
        ));
        let pipeline = QuizPipeline::new(backend.clone(), fast_config());

        let quiz = pipeline.run(&tf_request()).await.unwrap();
        assert_eq!(quiz.attempts, 3);
        assert_eq!(backend.calls.load(Ordering::Relaxed), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_hint_is_capped() {
        let backend = Arc::new(ScriptedBackend::new(
            vec![ProviderError::RateLimited {
                retry_after_ms: u64::MAX,
            }],
            QUIZ,
        ));
        let pipeline = QuizPipeline::new(backend, fast_config());

        let started = tokio::time::Instant::now();
        let quiz = pipeline.run(&tf_request()).await.unwrap();
        assert_eq!(quiz.attempts, 2);
        assert!(started.elapsed() <= MAX_RETRY_DELAY + Duration::from_secs(1));
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let backend = Arc::new(ScriptedBackend::new(
            vec![
                ProviderError::NetworkError("reset".into()),
                ProviderError::NetworkError("reset".into()),
                ProviderError::NetworkError("reset".into()),
            ],
            QUIZ,
        ));
        let pipeline = QuizPipeline::new(backend.clone(), fast_config());

        let err = pipeline.run(&tf_request()).await.unwrap_err();
        assert!(err.to_string().contains("network error"));
        assert_eq!(backend.calls.load(Ordering::Relaxed), 3);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let backend = Arc::new(ScriptedBackend::new(
            vec![ProviderError::AuthenticationFailed("expired token".into())],
            QUIZ,
        ));
        let pipeline = QuizPipeline::new(backend.clone(), fast_config());

        let err = pipeline.run(&tf_request()).await.unwrap_err();
        assert!(err.downcast_ref::<ProviderError>().is_some());
        assert_eq!(backend.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn empty_text_fails_before_calling_backend() {
        let backend = Arc::new(ScriptedBackend::new(vec![], QUIZ));
        let pipeline = QuizPipeline::new(backend.clone(), fast_config());

        let err = pipeline.run(&QuizRequest::new("   ")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::EmptyText)
        ));
        assert_eq!(backend.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn invalid_option_count_is_rejected() {
        let backend = Arc::new(ScriptedBackend::new(vec![], QUIZ));
        let pipeline = QuizPipeline::new(backend, fast_config());

        let mut request = QuizRequest::new("text");
        request.num_options = 1;
        let err = pipeline.run(&request).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Config(_))
        ));
    }
}
