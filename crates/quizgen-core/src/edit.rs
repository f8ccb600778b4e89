//! Field-level edits on parsed questions.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::Question;

/// Which field of a question to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Prompt,
    Answer,
    /// A single choice, by zero-based position.
    Choice(usize),
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Prompt => write!(f, "question"),
            FieldPath::Answer => write!(f, "answer"),
            FieldPath::Choice(i) => write!(f, "option-{i}"),
        }
    }
}

impl FromStr for FieldPath {
    type Err = String;

    /// Accepts `question`/`prompt`, `answer`, and `option-N`/`choice-N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "question" | "prompt" => return Ok(FieldPath::Prompt),
            "answer" => return Ok(FieldPath::Answer),
            _ => {}
        }

        let index = lower
            .strip_prefix("option-")
            .or_else(|| lower.strip_prefix("choice-"))
            .ok_or_else(|| format!("unknown field: {s}"))?;
        index
            .parse::<usize>()
            .map(FieldPath::Choice)
            .map_err(|_| format!("invalid option index in field: {s}"))
    }
}

/// Errors from applying an edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("question index {index} out of range ({len} questions)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("option index {index} out of range ({len} options)")]
    ChoiceOutOfRange { index: usize, len: usize },

    #[error("question has no options to edit")]
    NoChoices,
}

impl Question {
    /// Replace one field in place.
    pub fn set_field(&mut self, field: FieldPath, value: impl Into<String>) -> Result<(), EditError> {
        match field {
            FieldPath::Prompt => self.prompt = value.into(),
            FieldPath::Answer => self.correct_answer = value.into(),
            FieldPath::Choice(i) => {
                let choices = self.choices.as_mut().ok_or(EditError::NoChoices)?;
                let len = choices.len();
                let slot = choices
                    .get_mut(i)
                    .ok_or(EditError::ChoiceOutOfRange { index: i, len })?;
                *slot = value.into();
            }
        }
        Ok(())
    }
}

/// Return a copy of `records` with one field of `records[index]` replaced.
///
/// On error the input is left untouched and nothing is returned.
pub fn edit_field(
    records: &[Question],
    index: usize,
    field: FieldPath,
    value: &str,
) -> Result<Vec<Question>, EditError> {
    if index >= records.len() {
        return Err(EditError::IndexOutOfRange {
            index,
            len: records.len(),
        });
    }

    let mut edited = records.to_vec();
    edited[index].set_field(field, value)?;
    Ok(edited)
}
