//! quizgen-core: Quiz-text parser, edit operations, and generation pipeline.
//!
//! This crate defines the question data model, the parser that turns model
//! output into validated questions, and the pieces built around it.

pub mod edit;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod present;
pub mod session;
pub mod source;
pub mod traits;

pub use model::{Difficulty, Question, QuestionSchema};
pub use parser::{parse, ParseOutcome, ParserConfig, ParserStyle, QuizParser};
pub use present::{filter_for_presentation, PresentationMode, QuizView};
