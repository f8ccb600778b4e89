//! The `quizgen parse` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizgen_core::edit::{edit_field, FieldPath};
use quizgen_core::source::load_source_text;
use quizgen_core::{
    filter_for_presentation, ParserConfig, ParserStyle, PresentationMode, Question,
    QuestionSchema,
};

use crate::output::{print_views, report_rejections};

pub struct ParseArgs {
    pub input: PathBuf,
    pub schema: QuestionSchema,
    pub options: usize,
    pub style: ParserStyle,
    pub edits: Vec<String>,
    pub content: PresentationMode,
    pub json: bool,
}

pub fn execute(args: ParseArgs) -> Result<()> {
    let raw = load_source_text(&args.input)?;

    let parser = ParserConfig::new(args.schema, args.options)
        .with_style(args.style)
        .build()?;
    let outcome = parser.parse(&raw);
    tracing::debug!(
        parser = parser.name(),
        accepted = outcome.accepted_count(),
        rejected = outcome.rejected_count(),
        "parsed {}",
        args.input.display()
    );

    report_rejections(&outcome);
    if outcome.is_empty_input() {
        eprintln!("No question blocks found in {}", args.input.display());
    }

    let mut questions = outcome.into_questions();
    for edit in &args.edits {
        questions = apply_edit(&questions, edit)?;
    }

    let views = filter_for_presentation(&questions, args.content);
    print_views(&views, args.json)
}

/// Apply one `N:FIELD=VALUE` edit, where N is the 1-based row number.
fn apply_edit(questions: &[Question], edit: &str) -> Result<Vec<Question>> {
    let (target, value) = edit
        .split_once('=')
        .with_context(|| format!("invalid edit '{edit}', expected N:FIELD=VALUE"))?;
    let (number, field) = target
        .split_once(':')
        .with_context(|| format!("invalid edit '{edit}', expected N:FIELD=VALUE"))?;

    let number: usize = number
        .trim()
        .parse()
        .with_context(|| format!("invalid question number in edit '{edit}'"))?;
    anyhow::ensure!(number >= 1, "question numbers start at 1");
    let field: FieldPath = field.parse().map_err(anyhow::Error::msg)?;

    edit_field(questions, number - 1, field, value)
        .with_context(|| format!("cannot apply edit '{edit}'"))
}
