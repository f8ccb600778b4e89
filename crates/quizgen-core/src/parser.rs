//! Quiz-text parser.
//!
//! Turns loosely formatted model output into validated [`Question`] records.
//! Two segmentation conventions are supported behind the [`QuizParser`]
//! trait:
//!
//! - [`HeadingParser`] (default): blocks start at a `Question N` /
//!   `**Question N**` / `Question:` marker, fields are line-based, and every
//!   [`QuestionSchema`] is supported with a configurable option count.
//! - [`ParagraphParser`] (legacy): text is grouped under `Paragraph N:`
//!   headings, each paragraph holds `Question:` / `Options:` / `Answer:`
//!   sub-blocks with exactly four options labelled A-D.
//!
//! Parsing never fails. Blocks that do not satisfy the requested schema are
//! left out of the records and reported in [`ParseOutcome::rejected`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ConfigError;
use crate::model::{Question, QuestionSchema};

/// Default number of options for multiple-choice questions.
pub const DEFAULT_OPTION_COUNT: usize = 4;

/// Number of options the paragraph convention always uses.
const LEGACY_OPTION_COUNT: usize = 4;

/// Start of a question block: `Question 3`, `**Question 3:**`, `### Question 3`,
/// `Question:`, `Question.`, or a bare `Question` line, optionally behind a list
/// number (`1. Question:`). Anchored to line starts so the word "question"
/// inside a prompt never splits a block.
static QUESTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:#{1,6}[ \t]*)?(?:\*\*)?[ \t]*(?:\d+[.)][ \t]*(?:\*\*)?[ \t]*)?question(?:[ \t]*\d+[ \t]*[:.)]?|[ \t]*[:.]|[ \t]*$)[ \t]*(?:\*\*)?(?:[ \t]*[:.])?",
    )
    .expect("question marker regex")
});

/// `Paragraph 2:` / `**Paragraph 2:**` headings.
static PARAGRAPH_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:\*\*)?[ \t]*paragraph[ \t]*\d+[ \t]*:?[ \t]*(?:\*\*)?[ \t]*:?")
        .expect("paragraph marker regex")
});

/// A line opening a legacy `Question:` sub-block.
static LEGACY_QUESTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:\*\*)?[ \t]*question[ \t]*\d*[ \t]*:").expect("legacy question regex")
});

/// Leading enumeration label on an option: `A) `, `(b) `, `C. `.
static CHOICE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\(?[A-Za-z]\)\s*|[A-Za-z]\.(?:\s+|$))").expect("choice label regex")
});

/// Candidate `A)`..`D)` option label, for options written on one line.
static INLINE_LEGACY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)\(?([A-D])([).])").expect("inline label regex"));

/// Single answer letter after a legacy `Answer:` label.
static LEGACY_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s*]*\(?([A-Da-d])\b").expect("legacy answer regex"));

/// Which segmentation convention to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserStyle {
    #[default]
    Heading,
    Paragraph,
}

impl std::str::FromStr for ParserStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heading" => Ok(ParserStyle::Heading),
            "paragraph" | "legacy" => Ok(ParserStyle::Paragraph),
            other => Err(format!("unknown parser style: {other}")),
        }
    }
}

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub style: ParserStyle,
    #[serde(default)]
    pub schema: QuestionSchema,
    /// Required option count; only consulted for multiple choice.
    #[serde(default = "default_option_count")]
    pub option_count: usize,
}

fn default_option_count() -> usize {
    DEFAULT_OPTION_COUNT
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            style: ParserStyle::Heading,
            schema: QuestionSchema::MultipleChoice,
            option_count: DEFAULT_OPTION_COUNT,
        }
    }
}

impl ParserConfig {
    pub fn new(schema: QuestionSchema, option_count: usize) -> Self {
        Self {
            schema,
            option_count,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: ParserStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.option_count < 2 {
            return Err(ConfigError::TooFewOptions(self.option_count));
        }
        if self.style == ParserStyle::Paragraph && self.schema != QuestionSchema::MultipleChoice {
            return Err(ConfigError::UnsupportedSchema(self.schema));
        }
        Ok(())
    }

    /// Build the parser selected by `style`.
    pub fn build(&self) -> Result<Box<dyn QuizParser>, ConfigError> {
        self.validate()?;
        Ok(match self.style {
            ParserStyle::Heading => Box::new(HeadingParser::new(self.schema, self.option_count)),
            ParserStyle::Paragraph => Box::new(ParagraphParser),
        })
    }
}

/// Why a block was not turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockRejection {
    #[error("no question text")]
    EmptyPrompt,

    #[error("no answer")]
    MissingAnswer,

    #[error("expected {expected} options, found {found}")]
    ChoiceCount { expected: usize, found: usize },

    #[error("expected at least {minimum} options, found {found}")]
    TooFewChoices { minimum: usize, found: usize },

    #[error("options are not True/False")]
    NotTrueFalse,

    #[error("missing `{0}` section")]
    MissingSection(&'static str),

    #[error("answer is not a single letter A-D")]
    AnswerNotALetter,
}

/// A block that was seen but not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedBlock {
    /// Position of the block among all blocks seen, starting at 0.
    pub index: usize,
    /// Trimmed raw text of the block.
    pub raw: String,
    pub reason: BlockRejection,
}

/// Result of one parsing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Accepted records, in input order.
    pub questions: Vec<Question>,
    /// Blocks that failed extraction or validation, in input order.
    pub rejected: Vec<RejectedBlock>,
}

impl ParseOutcome {
    pub fn blocks_seen(&self) -> usize {
        self.questions.len() + self.rejected.len()
    }

    pub fn accepted_count(&self) -> usize {
        self.questions.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// `true` when no question blocks were recognised at all, as opposed to
    /// blocks being found and then rejected.
    pub fn is_empty_input(&self) -> bool {
        self.blocks_seen() == 0
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    fn push(&mut self, index: usize, raw: &str, result: Result<Question, BlockRejection>) {
        match result {
            Ok(question) => self.questions.push(question),
            Err(reason) => {
                tracing::debug!(block = index, %reason, "rejected question block");
                self.rejected.push(RejectedBlock {
                    index,
                    raw: raw.to_string(),
                    reason,
                });
            }
        }
    }
}

/// A parsing strategy.
pub trait QuizParser: Send + Sync {
    /// Short name of the convention (e.g. "heading").
    fn name(&self) -> &str;

    /// Parse raw model output. Never fails; see [`ParseOutcome`].
    fn parse(&self, raw: &str) -> ParseOutcome;
}

/// Parse `raw` with the heading convention and return the accepted records.
///
/// `option_count` only matters for [`QuestionSchema::MultipleChoice`]. Empty
/// input yields an empty vector.
pub fn parse(raw: &str, option_count: usize, schema: QuestionSchema) -> Vec<Question> {
    HeadingParser::new(schema, option_count)
        .parse(raw)
        .into_questions()
}

// ---------------------------------------------------------------------------
// Heading convention
// ---------------------------------------------------------------------------

/// Parser for `Question N` delimited output.
#[derive(Debug, Clone)]
pub struct HeadingParser {
    schema: QuestionSchema,
    option_count: usize,
}

impl HeadingParser {
    pub fn new(schema: QuestionSchema, option_count: usize) -> Self {
        Self {
            schema,
            option_count,
        }
    }
}

impl QuizParser for HeadingParser {
    fn name(&self) -> &str {
        "heading"
    }

    fn parse(&self, raw: &str) -> ParseOutcome {
        let text = raw.replace("\r\n", "\n");
        let mut outcome = ParseOutcome::default();

        for (index, block) in split_question_blocks(&text).into_iter().enumerate() {
            let fields = extract_fields(block);
            let result = validate(fields, self.schema, self.option_count);
            outcome.push(index, block, result);
        }

        outcome
    }
}

/// Split text into trimmed, non-empty blocks. Text before the first marker is
/// a preamble and is not returned.
fn split_question_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<(usize, usize)> = QUESTION_MARKER
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &(_, body_start))| {
            let body_end = starts.get(i + 1).map_or(text.len(), |&(next, _)| next);
            text[body_start..body_end].trim()
        })
        .filter(|block| !block.is_empty())
        .collect()
}

/// Fields pulled out of one block, before schema validation.
#[derive(Debug, Default)]
struct BlockFields {
    prompt: String,
    choices: Vec<String>,
    answer: String,
}

fn extract_fields(block: &str) -> BlockFields {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let is_options = |l: &str| strip_label(l, "options:").is_some();
    let is_answer = |l: &str| strip_label(l, "answer:").is_some();

    let prompt = lines
        .iter()
        .copied()
        .find(|l| !is_options(*l) && !is_answer(*l))
        .map(|l| l.trim_matches('*').trim().to_string())
        .unwrap_or_default();

    let answer = lines
        .iter()
        .copied()
        .find_map(|l| strip_label(l, "answer:"))
        .unwrap_or_default()
        .to_string();

    let choices = match lines.iter().copied().position(is_options) {
        Some(start) => lines[start + 1..]
            .iter()
            .copied()
            .take_while(|l| !is_answer(*l))
            .map(strip_choice_label)
            .collect(),
        None => Vec::new(),
    };

    BlockFields {
        prompt,
        choices,
        answer,
    }
}

/// If `line` starts with `label` (case-insensitive, optional `**` emphasis),
/// return the trimmed remainder.
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let line = line.trim_start_matches('*').trim_start();
    let head = line.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    Some(line[label.len()..].trim_start_matches('*').trim())
}

fn strip_choice_label(line: &str) -> String {
    CHOICE_LABEL.replace(line.trim(), "").trim().to_string()
}

fn validate(
    fields: BlockFields,
    schema: QuestionSchema,
    option_count: usize,
) -> Result<Question, BlockRejection> {
    let BlockFields {
        prompt,
        choices,
        answer,
    } = fields;

    if prompt.is_empty() {
        return Err(BlockRejection::EmptyPrompt);
    }

    match schema {
        QuestionSchema::TrueFalse => {
            if choices.len() != 2 {
                return Err(BlockRejection::ChoiceCount {
                    expected: 2,
                    found: choices.len(),
                });
            }
            if answer.is_empty() {
                return Err(BlockRejection::MissingAnswer);
            }
            let has = |v: &str| choices.iter().any(|c| c.eq_ignore_ascii_case(v));
            if !(has("true") && has("false")) {
                return Err(BlockRejection::NotTrueFalse);
            }
            Ok(Question::with_choices(prompt, choices, answer))
        }
        QuestionSchema::MultipleChoice => {
            if choices.len() != option_count {
                return Err(BlockRejection::ChoiceCount {
                    expected: option_count,
                    found: choices.len(),
                });
            }
            if answer.is_empty() {
                return Err(BlockRejection::MissingAnswer);
            }
            Ok(Question::with_choices(prompt, choices, answer))
        }
        // The answer is not checked against the choices.
        QuestionSchema::MultipleChoiceMultiSelect => {
            if choices.len() < 2 {
                return Err(BlockRejection::TooFewChoices {
                    minimum: 2,
                    found: choices.len(),
                });
            }
            if answer.is_empty() {
                return Err(BlockRejection::MissingAnswer);
            }
            Ok(Question::with_choices(prompt, choices, answer))
        }
        QuestionSchema::FillInBlank
        | QuestionSchema::ShortAnswer
        | QuestionSchema::Faq
        | QuestionSchema::HigherOrder => {
            if answer.is_empty() {
                return Err(BlockRejection::MissingAnswer);
            }
            Ok(Question::free_response(prompt, answer))
        }
    }
}

// ---------------------------------------------------------------------------
// Paragraph convention (legacy)
// ---------------------------------------------------------------------------

/// Legacy parser for `Paragraph N:` grouped, four-option multiple choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphParser;

impl QuizParser for ParagraphParser {
    fn name(&self) -> &str {
        "paragraph"
    }

    fn parse(&self, raw: &str) -> ParseOutcome {
        let text = raw.replace("\r\n", "\n");
        let mut outcome = ParseOutcome::default();
        let mut index = 0;

        for paragraph in PARAGRAPH_MARKER.split(&text) {
            for block in split_legacy_questions(paragraph) {
                outcome.push(index, block, parse_legacy_block(block));
                index += 1;
            }
        }

        outcome
    }
}

/// Split a paragraph into sub-blocks, each starting at a `Question:` line.
/// The reading passage before the first question is skipped.
fn split_legacy_questions(paragraph: &str) -> Vec<&str> {
    let starts: Vec<usize> = LEGACY_QUESTION_LINE
        .find_iter(paragraph)
        .map(|m| m.start())
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(paragraph.len());
            paragraph[start..end].trim()
        })
        .filter(|block| !block.is_empty())
        .collect()
}

fn parse_legacy_block(block: &str) -> Result<Question, BlockRejection> {
    // ASCII lowercasing keeps byte offsets aligned with `block`.
    let lower = block.to_ascii_lowercase();

    let prompt_start = lower
        .find("question")
        .and_then(|q| lower[q..].find(':').map(|c| q + c + 1))
        .ok_or(BlockRejection::MissingSection("Question:"))?;

    let options_at = lower[prompt_start..]
        .find("options:")
        .map(|i| prompt_start + i)
        .ok_or(BlockRejection::MissingSection("Options:"))?;
    let options_start = options_at + "options:".len();

    let answer_at = lower[options_start..]
        .find("answer:")
        .map(|i| options_start + i)
        .ok_or(BlockRejection::MissingSection("Answer:"))?;
    let answer_start = answer_at + "answer:".len();

    let prompt = clean_span(&block[prompt_start..options_at]);
    if prompt.is_empty() {
        return Err(BlockRejection::EmptyPrompt);
    }

    let choices = split_legacy_options(&block[options_start..answer_at]);
    if choices.len() != LEGACY_OPTION_COUNT {
        return Err(BlockRejection::ChoiceCount {
            expected: LEGACY_OPTION_COUNT,
            found: choices.len(),
        });
    }

    let answer_line = block[answer_start..].lines().next().unwrap_or_default();
    let letter = LEGACY_ANSWER
        .captures(answer_line)
        .and_then(|c| c.get(1))
        .ok_or(BlockRejection::AnswerNotALetter)?
        .as_str()
        .to_ascii_uppercase();

    Ok(Question::with_choices(prompt, choices, letter))
}

/// Split an options span into at most four entries, by line or by inline
/// `A)`..`D)` labels, with labels stripped.
fn split_legacy_options(span: &str) -> Vec<String> {
    let mut entries = Vec::new();

    for line in span.lines().map(clean_span).filter(|l| !l.is_empty()) {
        let cuts = inline_label_cuts(&line);
        if cuts.len() < 2 {
            let entry = strip_choice_label(&line);
            if !entry.is_empty() {
                entries.push(entry);
            }
            continue;
        }

        for (i, &start) in cuts.iter().enumerate() {
            let end = cuts.get(i + 1).copied().unwrap_or(line.len());
            let entry = strip_choice_label(&line[start..end]);
            if !entry.is_empty() {
                entries.push(entry);
            }
        }
    }

    entries.truncate(LEGACY_OPTION_COUNT);
    entries
}

/// Byte offsets of the labels in a line like `A) x B) y C) z`.
///
/// The first label must open the line; each later one must carry the next
/// letter and the same delimiter, so `B.` inside option text is not a cut.
fn inline_label_cuts(line: &str) -> Vec<usize> {
    let mut cuts = Vec::new();
    let mut expected: Option<(u8, &str)> = None;

    for caps in INLINE_LEGACY_LABEL.captures_iter(line) {
        let (Some(whole), Some(letter), Some(delim)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let start = whole.start() + (whole.as_str().len() - whole.as_str().trim_start().len());
        let letter = letter.as_str().as_bytes()[0];

        let accepted = match expected {
            None => start == 0,
            Some((next, d)) => letter == next && delim.as_str() == d,
        };
        if accepted {
            cuts.push(start);
            expected = Some((letter + 1, delim.as_str()));
        } else if expected.is_none() {
            break;
        }
    }

    cuts
}

fn clean_span(s: &str) -> String {
    s.trim().trim_matches('*').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = "Question 1
What is the capital of France?
Options:
A) Paris
B) Lyon
C) Nice
D) Marseille
Answer: Paris";

    fn mcq(raw: &str, n: usize) -> Vec<Question> {
        parse(raw, n, QuestionSchema::MultipleChoice)
    }

    #[test]
    fn end_to_end_capital_of_france() {
        let questions = mcq(PARIS, 4);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt, "What is the capital of France?");
        assert_eq!(
            questions[0].choices.as_deref(),
            Some(&["Paris", "Lyon", "Nice", "Marseille"].map(String::from)[..])
        );
        assert_eq!(questions[0].correct_answer, "Paris");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(mcq("", 4).is_empty());
        let outcome = HeadingParser::new(QuestionSchema::MultipleChoice, 4).parse("");
        assert!(outcome.is_empty_input());
    }

    #[test]
    fn text_without_markers_is_not_a_block() {
        let raw = "What is 2 + 2?\nOptions:\nA) 3\nB) 4\nAnswer: B";
        let outcome = HeadingParser::new(QuestionSchema::MultipleChoice, 2).parse(raw);
        assert_eq!(outcome.blocks_seen(), 0);
    }

    #[test]
    fn preserves_block_order() {
        let raw = "Here is your quiz:

**Question 1**
First?
Options:
A) a
B) b
Answer: a

**Question 2**
Second?
Options:
A) c
B) d
Answer: d

**Question 3**
Third?
Options:
A) e
B) f
Answer: e";
        let prompts: Vec<_> = mcq(raw, 2).into_iter().map(|q| q.prompt).collect();
        assert_eq!(prompts, vec!["First?", "Second?", "Third?"]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let raw = format!("{PARIS}\n\nQuestion 2\nBroken block without answer");
        let parser = HeadingParser::new(QuestionSchema::MultipleChoice, 4);
        assert_eq!(parser.parse(&raw), parser.parse(&raw));
    }

    #[test]
    fn option_count_gates_multiple_choice() {
        let raw = "Question 1\nPick one\nOptions:\nA) x\nB) y\nC) z\nAnswer: x";
        assert!(mcq(raw, 4).is_empty());
        assert_eq!(mcq(raw, 3).len(), 1);

        let outcome = HeadingParser::new(QuestionSchema::MultipleChoice, 4).parse(raw);
        assert_eq!(
            outcome.rejected[0].reason,
            BlockRejection::ChoiceCount {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn true_false_accepts_any_casing() {
        let raw = "Question 1
The sky is blue.
Options:
A) TRUE
B) false
Answer: true";
        let questions = parse(raw, 4, QuestionSchema::TrueFalse);
        assert_eq!(questions.len(), 1);
        assert_eq!(
            questions[0].choices,
            Some(vec!["TRUE".to_string(), "false".to_string()])
        );
    }

    #[test]
    fn true_false_rejects_yes_no() {
        let raw = "Question 1\nIs water wet?\nOptions:\nA) Yes\nB) No\nAnswer: Yes";
        let outcome = HeadingParser::new(QuestionSchema::TrueFalse, 4).parse(raw);
        assert!(outcome.questions.is_empty());
        assert_eq!(outcome.rejected[0].reason, BlockRejection::NotTrueFalse);
    }

    #[test]
    fn label_stripping() {
        assert_eq!(strip_choice_label("A) Paris"), "Paris");
        assert_eq!(strip_choice_label("b. Lyon"), "Lyon");
        assert_eq!(strip_choice_label("(C) Nice"), "Nice");
        assert_eq!(strip_choice_label("e.g. an example"), "e.g. an example");
        assert_eq!(strip_choice_label("Marseille"), "Marseille");
    }

    #[test]
    fn multi_select_is_lenient_about_answer() {
        let raw = "Question 1
Which are primes?
Options:
A) 2
B) 3
C) 4
Answer: A, B, Z";
        let questions = parse(raw, 4, QuestionSchema::MultipleChoiceMultiSelect);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "A, B, Z");

        let single = "Question 1\nOnly one?\nOptions:\nA) yes\nAnswer: A";
        let outcome = HeadingParser::new(QuestionSchema::MultipleChoiceMultiSelect, 4).parse(single);
        assert_eq!(
            outcome.rejected[0].reason,
            BlockRejection::TooFewChoices {
                minimum: 2,
                found: 1
            }
        );
    }

    #[test]
    fn free_response_schemas_drop_choices() {
        let raw = "Question: What gas do plants absorb?
Answer: Carbon dioxide

Question: Why is the sky blue?
Answer: Rayleigh scattering";
        for schema in [
            QuestionSchema::ShortAnswer,
            QuestionSchema::FillInBlank,
            QuestionSchema::Faq,
            QuestionSchema::HigherOrder,
        ] {
            let questions = parse(raw, 4, schema);
            assert_eq!(questions.len(), 2, "schema {schema}");
            assert!(questions.iter().all(|q| q.choices.is_none()));
            assert_eq!(questions[1].correct_answer, "Rayleigh scattering");
        }
    }

    #[test]
    fn free_response_requires_answer() {
        let raw = "Question 1\nExplain photosynthesis.\n\nQuestion 2\nDefine osmosis.\nAnswer: Diffusion of water";
        let outcome = HeadingParser::new(QuestionSchema::ShortAnswer, 4).parse(raw);
        assert_eq!(outcome.accepted_count(), 1);
        assert_eq!(outcome.rejected_count(), 1);
        assert_eq!(outcome.rejected[0].index, 0);
        assert_eq!(outcome.rejected[0].reason, BlockRejection::MissingAnswer);
    }

    #[test]
    fn emphasis_and_inline_markers() {
        let raw = "**Question 1:** What is 2 + 2?
**Options:**
A) 3
B) 4
**Answer:** B) 4";
        let questions = mcq(raw, 2);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt, "What is 2 + 2?");
        assert_eq!(questions[0].correct_answer, "B) 4");
    }

    #[test]
    fn word_question_inside_prompt_does_not_split() {
        let raw = "Question 1
Which question type has blanks?
Options:
A) Fill in the blank
B) Essay
Answer: A";
        assert_eq!(mcq(raw, 2)[0].prompt, "Which question type has blanks?");
    }

    #[test]
    fn list_numbered_markers() {
        let raw = "Here you go:

1. Question: What is 2 + 2?
Options:
A) 3
B) 4
Answer: 4

2. **Question 2:** What is 3 + 3?
Options:
A) 6
B) 7
Answer: 6";
        let outcome = HeadingParser::new(QuestionSchema::MultipleChoice, 2).parse(raw);
        assert_eq!(outcome.blocks_seen(), 2);
        assert_eq!(outcome.accepted_count(), 2);
        assert_eq!(outcome.questions[0].prompt, "What is 2 + 2?");
        assert_eq!(outcome.questions[1].prompt, "What is 3 + 3?");
    }

    #[test]
    fn block_without_prompt_line_is_rejected() {
        let raw = "Question 1
**Options:**
**Answer:** 4

Question 2
What is 1 + 1?
Options:
A) 2
B) 3
Answer: 2";
        let outcome = HeadingParser::new(QuestionSchema::MultipleChoice, 2).parse(raw);
        assert_eq!(outcome.accepted_count(), 1);
        assert_eq!(outcome.rejected[0].index, 0);
        assert_eq!(outcome.rejected[0].reason, BlockRejection::EmptyPrompt);
        assert_eq!(outcome.questions[0].prompt, "What is 1 + 1?");
    }

    #[test]
    fn crlf_line_endings() {
        let raw = PARIS.replace('\n', "\r\n");
        assert_eq!(mcq(&raw, 4).len(), 1);
    }

    #[test]
    fn config_validation() {
        assert_eq!(
            ParserConfig::new(QuestionSchema::MultipleChoice, 1).validate(),
            Err(ConfigError::TooFewOptions(1))
        );
        assert_eq!(
            ParserConfig::new(QuestionSchema::TrueFalse, 4)
                .with_style(ParserStyle::Paragraph)
                .validate(),
            Err(ConfigError::UnsupportedSchema(QuestionSchema::TrueFalse))
        );
        let parser = ParserConfig::default().build().unwrap();
        assert_eq!(parser.name(), "heading");
    }

    const LEGACY: &str = "**Paragraph 1:**
The Nile is the longest river in Africa.

Question: Which continent is the Nile in?
Options:
A) Asia
B) Africa
C) Europe
D) Oceania
Answer: B

Question: How long is the Nile?
Options: A) 6650 km B) 100 km C) 10 km D) 1 km
Answer: (a)

**Paragraph 2:**
Mount Everest is in the Himalayas.

Question: Where is Everest?
Options:
A) Andes
B) Alps
Answer: C";

    #[test]
    fn paragraph_convention() {
        let parser = ParserConfig::default()
            .with_style(ParserStyle::Paragraph)
            .build()
            .unwrap();
        let outcome = parser.parse(LEGACY);

        assert_eq!(outcome.blocks_seen(), 3);
        assert_eq!(outcome.accepted_count(), 2);

        let first = &outcome.questions[0];
        assert_eq!(first.prompt, "Which continent is the Nile in?");
        assert_eq!(
            first.choices,
            Some(vec![
                "Asia".to_string(),
                "Africa".to_string(),
                "Europe".to_string(),
                "Oceania".to_string()
            ])
        );
        assert_eq!(first.correct_answer, "B");

        let inline = &outcome.questions[1];
        assert_eq!(inline.choices.as_ref().map(Vec::len), Some(4));
        assert_eq!(inline.choices.as_ref().unwrap()[0], "6650 km");
        assert_eq!(inline.correct_answer, "A");

        assert_eq!(
            outcome.rejected[0].reason,
            BlockRejection::ChoiceCount {
                expected: 4,
                found: 2
            }
        );
    }

    #[test]
    fn paragraph_convention_requires_letter_answer() {
        let raw = "Question: Pick one
Options:
A) w
B) x
C) y
D) z
Answer: Paris";
        let outcome = ParagraphParser.parse(raw);
        assert_eq!(outcome.rejected[0].reason, BlockRejection::AnswerNotALetter);
    }

    #[test]
    fn paragraph_option_text_with_letter_and_period() {
        let raw = "Question: Which plan did the council pick?
Options:
A) Plan A
B) Plan B. It was cheaper
C) Plan C
D) None
Answer: B";
        let outcome = ParagraphParser.parse(raw);
        assert_eq!(outcome.rejected_count(), 0);
        assert_eq!(
            outcome.questions[0].choices,
            Some(vec![
                "Plan A".to_string(),
                "Plan B. It was cheaper".to_string(),
                "Plan C".to_string(),
                "None".to_string()
            ])
        );
    }

    #[test]
    fn inline_options_split_only_in_label_order() {
        assert_eq!(
            split_legacy_options("A) Vitamin B. C) Iron B) Zinc"),
            vec!["Vitamin B. C) Iron".to_string(), "Zinc".to_string()]
        );
        assert_eq!(inline_label_cuts("Plan B) later"), Vec::<usize>::new());
        assert_eq!(inline_label_cuts("A) x B) y C) z D) w"), vec![0, 5, 10, 15]);
    }

    #[test]
    fn paragraph_convention_missing_options() {
        let outcome = ParagraphParser.parse("Question: Lonely prompt\nAnswer: A");
        assert_eq!(
            outcome.rejected[0].reason,
            BlockRejection::MissingSection("Options:")
        );
    }
}
