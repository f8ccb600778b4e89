//! Presentation filtering shared by display and output paths.
//!
//! Whatever is shown on screen and whatever is written out go through
//! [`filter_for_presentation`], so the two never diverge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Question;

/// Which parts of each question to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationMode {
    #[default]
    #[serde(rename = "both")]
    PromptsAndAnswers,
    #[serde(rename = "questions")]
    PromptsOnly,
    #[serde(rename = "answers")]
    AnswersOnly,
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentationMode::PromptsAndAnswers => write!(f, "both"),
            PresentationMode::PromptsOnly => write!(f, "questions"),
            PresentationMode::AnswersOnly => write!(f, "answers"),
        }
    }
}

impl FromStr for PresentationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "both" | "all" => Ok(PresentationMode::PromptsAndAnswers),
            "questions" | "prompts" => Ok(PresentationMode::PromptsOnly),
            "answers" => Ok(PresentationMode::AnswersOnly),
            other => Err(format!("unknown content mode: {other}")),
        }
    }
}

/// A question with any part possibly stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl From<&Question> for QuizView {
    fn from(q: &Question) -> Self {
        Self {
            prompt: Some(q.prompt.clone()),
            choices: q.choices.clone(),
            answer: Some(q.correct_answer.clone()),
        }
    }
}

impl From<&QuizView> for QuizView {
    fn from(v: &QuizView) -> Self {
        v.clone()
    }
}

impl QuizView {
    fn apply(mut self, mode: PresentationMode) -> Self {
        match mode {
            PresentationMode::PromptsAndAnswers => {}
            PresentationMode::PromptsOnly => self.answer = None,
            PresentationMode::AnswersOnly => {
                self.prompt = None;
                self.choices = None;
            }
        }
        self
    }
}

/// Project records for display or output.
///
/// Accepts either parsed [`Question`]s or already-filtered [`QuizView`]s.
/// Stripped parts are gone for good: filtering again with a wider mode does
/// not bring them back.
pub fn filter_for_presentation<'a, T>(records: &'a [T], mode: PresentationMode) -> Vec<QuizView>
where
    QuizView: From<&'a T>,
{
    records
        .iter()
        .map(|r| QuizView::from(r).apply(mode))
        .collect()
}
