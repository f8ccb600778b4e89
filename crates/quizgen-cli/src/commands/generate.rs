//! The `quizgen generate` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use quizgen_core::pipeline::QuizPipeline;
use quizgen_core::source::load_source_text;
use quizgen_core::traits::QuizRequest;
use quizgen_core::{
    filter_for_presentation, Difficulty, ParserStyle, PresentationMode, QuestionSchema,
};
use quizgen_providers::config::load_config_from;
use quizgen_providers::create_provider;

use crate::output::{print_views, report_rejections};

pub struct GenerateArgs {
    pub input: PathBuf,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub num_questions: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub schema: Option<QuestionSchema>,
    pub options: Option<usize>,
    pub style: ParserStyle,
    pub content: PresentationMode,
    pub json: bool,
    pub config: Option<PathBuf>,
}

pub async fn execute(args: GenerateArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let text = load_source_text(&args.input)?;

    let provider_name = args
        .provider
        .unwrap_or_else(|| config.default_provider.clone());
    let provider_config = config.providers.get(&provider_name).with_context(|| {
        format!("provider '{provider_name}' is not configured. Run `quizgen init` to create a config file.")
    })?;
    let backend = create_provider(provider_config)?;

    let mut request = QuizRequest::new(text);
    request.model = args.model.unwrap_or_else(|| config.default_model.clone());
    request.num_questions = args.num_questions.unwrap_or(config.default_num_questions);
    request.difficulty = args.difficulty.unwrap_or(config.default_difficulty);
    request.schema = args.schema.unwrap_or(config.default_schema);
    request.num_options = args.options.unwrap_or(config.default_num_options);
    request.temperature = config.default_temperature;

    eprintln!(
        "Generating {} {} {} questions with {provider_name}...",
        request.num_questions,
        request.difficulty,
        request.schema.label()
    );

    let mut pipeline_config = config.pipeline_config();
    pipeline_config.style = args.style;
    let pipeline = QuizPipeline::new(Arc::from(backend), pipeline_config);
    let quiz = pipeline.run(&request).await?;

    report_rejections(&quiz.outcome);
    anyhow::ensure!(
        !quiz.outcome.questions.is_empty(),
        "no questions could be parsed from the {} response",
        quiz.backend
    );

    eprintln!(
        "Got {} questions from {} ({}ms, {} attempt{})",
        quiz.outcome.accepted_count(),
        if quiz.model.is_empty() { &quiz.backend } else { &quiz.model },
        quiz.latency_ms,
        quiz.attempts,
        if quiz.attempts == 1 { "" } else { "s" }
    );

    let views = filter_for_presentation(&quiz.outcome.questions, args.content);
    print_views(&views, args.json)
}
