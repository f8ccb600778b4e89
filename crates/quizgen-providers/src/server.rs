//! Quiz server backend: the REST `/generate-quiz` endpoint.

use std::time::Instant;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use quizgen_core::error::ProviderError;
use quizgen_core::model::{Difficulty, QuestionSchema};
use quizgen_core::traits::{strip_code_fences, ModelInfo, QuizBackend, QuizRequest, QuizResponse};

use crate::http::{check_status, send_error};

pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 180;
const SERVER_MODEL: &str = "server";

/// Client for a quiz server that does its own prompting.
pub struct ServerBackend {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ServerBackend {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url.trim_end_matches('/')
        };

        Ok(Self {
            base_url: base.to_string(),
            token: token.filter(|t| !t.is_empty()),
            client,
        })
    }
}

#[derive(Serialize)]
struct GenerateQuizBody<'a> {
    text: &'a str,
    num_questions: u32,
    difficulty: Difficulty,
    num_options: usize,
    question_type: QuestionSchema,
}

#[derive(Deserialize)]
struct GenerateQuizReply {
    #[serde(default)]
    quiz: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

#[async_trait]
impl QuizBackend for ServerBackend {
    fn name(&self) -> &str {
        "server"
    }

    #[instrument(skip(self, request), fields(question_type = %request.schema))]
    async fn generate(&self, request: &QuizRequest) -> anyhow::Result<QuizResponse> {
        let start = Instant::now();

        let body = GenerateQuizBody {
            text: &request.text,
            num_questions: request.num_questions,
            difficulty: request.difficulty,
            num_options: request.num_options,
            question_type: request.schema,
        };

        let mut req = self
            .client
            .post(format!("{}/generate-quiz", self.base_url))
            .header("content-type", "application/json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let response = req
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(e, DEFAULT_TIMEOUT_SECS))?;
        let response = check_status(response, |message| ProviderError::ApiError {
            status: 404,
            message,
        })
        .await?;

        let reply: GenerateQuizReply =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let quiz = match reply.quiz {
            Some(quiz) if !quiz.trim().is_empty() => quiz,
            _ => {
                let detail = reply
                    .detail
                    .unwrap_or_else(|| "No quiz generated from the text.".to_string());
                return Err(ProviderError::NoQuiz(detail).into());
            }
        };

        let model = if request.model.is_empty() {
            SERVER_MODEL.to_string()
        } else {
            request.model.clone()
        };

        Ok(QuizResponse {
            quiz: strip_code_fences(&quiz),
            model,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: SERVER_MODEL.into(),
            name: "Quiz server default".into(),
            provider: "server".into(),
            max_context: 0,
        }]
    }
}
