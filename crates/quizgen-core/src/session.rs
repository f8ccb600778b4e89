//! Editing session view-model.
//!
//! Keeps the transient "being edited" flag next to each question instead of
//! inside [`Question`] itself.

use crate::edit::{EditError, FieldPath};
use crate::model::Question;
use crate::present::{filter_for_presentation, PresentationMode, QuizView};

/// A question plus its UI edit state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableQuestion {
    pub question: Question,
    pub editing: bool,
}

impl From<Question> for EditableQuestion {
    fn from(question: Question) -> Self {
        Self {
            question,
            editing: false,
        }
    }
}

/// In-memory set of questions being reviewed and edited.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    items: Vec<EditableQuestion>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            items: questions.into_iter().map(EditableQuestion::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[EditableQuestion] {
        &self.items
    }

    /// Flip the edit flag of one question. Returns the new flag.
    pub fn toggle_edit(&mut self, index: usize) -> Result<bool, EditError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange { index, len })?;
        item.editing = !item.editing;
        Ok(item.editing)
    }

    pub fn is_editing(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|i| i.editing)
    }

    pub fn edit(&mut self, index: usize, field: FieldPath, value: &str) -> Result<(), EditError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange { index, len })?
            .question
            .set_field(field, value)
    }

    /// Leave edit mode on every question.
    pub fn save_edits(&mut self) {
        for item in &mut self.items {
            item.editing = false;
        }
        tracing::debug!(count = self.items.len(), "edits saved");
    }

    /// The questions without edit state.
    pub fn questions(&self) -> Vec<Question> {
        self.items.iter().map(|i| i.question.clone()).collect()
    }

    pub fn view(&self, mode: PresentationMode) -> Vec<QuizView> {
        filter_for_presentation(&self.questions(), mode)
    }
}
