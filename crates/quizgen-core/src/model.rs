//! Core data model types for quizgen.
//!
//! These are the fundamental types the rest of the workspace uses to
//! represent parsed questions and the question-type schemas they satisfy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single parsed quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text. Never empty for a parsed record.
    pub prompt: String,
    /// Enumerated options, present only for choice-based schemas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    /// Raw text of the answer field.
    pub correct_answer: String,
}

impl Question {
    /// Create a free-response question (no choices).
    pub fn free_response(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            choices: None,
            correct_answer: answer.into(),
        }
    }

    /// Create a choice-based question.
    pub fn with_choices(
        prompt: impl Into<String>,
        choices: Vec<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            choices: Some(choices),
            correct_answer: answer.into(),
        }
    }
}

/// Question-type schema a parsed block must satisfy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionSchema {
    #[default]
    #[serde(rename = "mcq")]
    MultipleChoice,
    #[serde(rename = "mcq_multiple")]
    MultipleChoiceMultiSelect,
    #[serde(rename = "truefalse")]
    TrueFalse,
    #[serde(rename = "fillblanks")]
    FillInBlank,
    #[serde(rename = "short")]
    ShortAnswer,
    #[serde(rename = "faq")]
    Faq,
    #[serde(rename = "higherorder")]
    HigherOrder,
}

impl QuestionSchema {
    /// All schemas, in the order they are offered to users.
    pub const ALL: [QuestionSchema; 7] = [
        QuestionSchema::MultipleChoice,
        QuestionSchema::MultipleChoiceMultiSelect,
        QuestionSchema::TrueFalse,
        QuestionSchema::FillInBlank,
        QuestionSchema::Faq,
        QuestionSchema::ShortAnswer,
        QuestionSchema::HigherOrder,
    ];

    /// Whether records of this schema carry a `choices` list.
    pub fn has_choices(self) -> bool {
        matches!(
            self,
            QuestionSchema::MultipleChoice
                | QuestionSchema::MultipleChoiceMultiSelect
                | QuestionSchema::TrueFalse
        )
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            QuestionSchema::MultipleChoice => "MCQ",
            QuestionSchema::MultipleChoiceMultiSelect => "MCQ (Multiple Correct Answers)",
            QuestionSchema::TrueFalse => "True/False",
            QuestionSchema::FillInBlank => "Fill in the blanks",
            QuestionSchema::ShortAnswer => "Short Answer",
            QuestionSchema::Faq => "FAQ",
            QuestionSchema::HigherOrder => "Higher Order QA",
        }
    }
}

impl fmt::Display for QuestionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionSchema::MultipleChoice => "mcq",
            QuestionSchema::MultipleChoiceMultiSelect => "mcq_multiple",
            QuestionSchema::TrueFalse => "truefalse",
            QuestionSchema::FillInBlank => "fillblanks",
            QuestionSchema::ShortAnswer => "short",
            QuestionSchema::Faq => "faq",
            QuestionSchema::HigherOrder => "higherorder",
        };
        f.write_str(s)
    }
}

impl FromStr for QuestionSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "mcq" | "multiple_choice" | "multiplechoice" => Ok(QuestionSchema::MultipleChoice),
            "mcq_multiple" | "multi_select" | "multiselect" => {
                Ok(QuestionSchema::MultipleChoiceMultiSelect)
            }
            "truefalse" | "true_false" | "tf" => Ok(QuestionSchema::TrueFalse),
            "fillblanks" | "fill_in_blank" | "fillinblank" => Ok(QuestionSchema::FillInBlank),
            "short" | "short_answer" | "shortanswer" => Ok(QuestionSchema::ShortAnswer),
            "faq" => Ok(QuestionSchema::Faq),
            "higherorder" | "higher_order" => Ok(QuestionSchema::HigherOrder),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Requested difficulty for generated quizzes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}
