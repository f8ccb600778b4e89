//! Quiz-generation backend trait and request/response types.
//!
//! Implemented by the `quizgen-providers` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, QuestionSchema};
use crate::parser::DEFAULT_OPTION_COUNT;

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// A service that turns source text into raw quiz text.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Human-readable backend name (e.g. "openai").
    fn name(&self) -> &str;

    /// Generate quiz text for a request.
    async fn generate(&self, request: &QuizRequest) -> anyhow::Result<QuizResponse>;

    /// List models this backend is known to serve.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request to generate a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    /// Model identifier. Ignored by backends that pick their own model.
    #[serde(default)]
    pub model: String,
    /// Source text the quiz is about.
    pub text: String,
    #[serde(default = "default_num_questions")]
    pub num_questions: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_num_options")]
    pub num_options: usize,
    #[serde(default)]
    pub schema: QuestionSchema,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_num_questions() -> u32 {
    10
}
fn default_num_options() -> usize {
    DEFAULT_OPTION_COUNT
}
fn default_temperature() -> f64 {
    0.7
}
fn default_max_tokens() -> u32 {
    4096
}

impl QuizRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            model: String::new(),
            text: text.into(),
            num_questions: default_num_questions(),
            difficulty: Difficulty::default(),
            num_options: default_num_options(),
            schema: QuestionSchema::default(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Raw quiz text returned by a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    /// Unparsed quiz text.
    pub quiz: String,
    /// Model that actually produced the quiz.
    pub model: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub provider: String,
    /// Maximum context window size in tokens.
    pub max_context: u32,
}

// ---------------------------------------------------------------------------
// Prompting
// ---------------------------------------------------------------------------

/// System prompt for chat-style providers.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a quiz writer. Respond ONLY with the quiz in the exact format requested. Do not add introductions, explanations, or closing remarks.";

/// Render the user prompt for a request. The layout asked for here is the one
/// the heading parser reads back.
pub fn build_prompt(request: &QuizRequest) -> String {
    let mut prompt = format!(
        "Write {n} {difficulty} {kind} questions about the text below.\n\n\
         Format every question exactly like this:\n\n",
        n = request.num_questions,
        difficulty = request.difficulty,
        kind = request.schema.label(),
    );

    prompt.push_str("Question 1\n<question text>\n");
    if request.schema == QuestionSchema::TrueFalse {
        prompt.push_str("Options:\nA) True\nB) False\n");
    } else if request.schema.has_choices() {
        prompt.push_str("Options:\n");
        for i in 0..request.num_options {
            let label = char::from(b'A' + (i % 26) as u8);
            prompt.push_str(&format!("{label}) <option>\n"));
        }
    }
    prompt.push_str("Answer: <answer>\n\n");

    match request.schema {
        QuestionSchema::MultipleChoice => prompt.push_str(&format!(
            "Give exactly {} options per question and exactly one correct answer.\n",
            request.num_options
        )),
        QuestionSchema::MultipleChoiceMultiSelect => prompt.push_str(
            "More than one option may be correct; list every correct option letter in the answer, separated by commas.\n",
        ),
        QuestionSchema::FillInBlank => {
            prompt.push_str("Mark the blank in the question text with ____.\n")
        }
        _ => {}
    }

    prompt.push_str("\nText:\n");
    prompt.push_str(&request.text);
    prompt
}

// ---------------------------------------------------------------------------
// Response cleanup
// ---------------------------------------------------------------------------

/// Strip markdown code fences that models sometimes wrap the quiz in.
///
/// Handles:
/// - One or more fenced blocks (concatenated)
/// - An unclosed fence from a truncated response
/// - No fences at all (returned as-is)
pub fn strip_code_fences(response: &str) -> String {
    let mut blocks = Vec::new();
    let mut in_block = false;
    let mut current_block = String::new();

    for line in response.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            if in_block {
                blocks.push(std::mem::take(&mut current_block));
            }
            in_block = !in_block;
            continue;
        }

        if in_block {
            if !current_block.is_empty() {
                current_block.push('\n');
            }
            current_block.push_str(line);
        }
    }

    // Truncated response: keep what was inside the unclosed fence
    if in_block && !current_block.is_empty() {
        blocks.push(current_block);
    }

    if blocks.is_empty() {
        return response.to_string();
    }
    blocks.join("\n\n")
}
