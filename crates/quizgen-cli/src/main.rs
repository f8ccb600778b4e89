//! quizgen CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use quizgen_core::{Difficulty, ParserStyle, PresentationMode, QuestionSchema};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "quizgen", version, about = "Turn text into quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse quiz text that was already generated
    Parse {
        /// Quiz text file (.txt, .md, .json, .pdf)
        #[arg(long)]
        input: PathBuf,

        /// Question type: mcq, mcq_multiple, truefalse, fillblanks, short, faq, higherorder
        #[arg(long, default_value = "mcq")]
        schema: QuestionSchema,

        /// Options per multiple-choice question
        #[arg(long, default_value = "4")]
        options: usize,

        /// Segmentation convention: heading, paragraph
        #[arg(long, default_value = "heading")]
        style: ParserStyle,

        /// Edit a parsed question before output, as N:FIELD=VALUE (repeatable)
        #[arg(long = "set", value_name = "N:FIELD=VALUE")]
        edits: Vec<String>,

        /// What to show: both, questions, answers
        #[arg(long, default_value = "both")]
        content: PresentationMode,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate a quiz from source text and parse it
    Generate {
        /// Source text file (.txt, .md, .json, .pdf)
        #[arg(long)]
        input: PathBuf,

        /// Provider name from config (default: config's default_provider)
        #[arg(long)]
        provider: Option<String>,

        /// Model to request (default: config's default_model)
        #[arg(long)]
        model: Option<String>,

        /// Number of questions
        #[arg(long)]
        num_questions: Option<u32>,

        /// Difficulty: easy, medium, hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Question type
        #[arg(long)]
        schema: Option<QuestionSchema>,

        /// Options per multiple-choice question
        #[arg(long)]
        options: Option<usize>,

        /// Segmentation convention: heading, paragraph
        #[arg(long, default_value = "heading")]
        style: ParserStyle,

        /// What to show: both, questions, answers
        #[arg(long, default_value = "both")]
        content: PresentationMode,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and a sample quiz file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizgen=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input,
            schema,
            options,
            style,
            edits,
            content,
            json,
        } => commands::parse::execute(commands::parse::ParseArgs {
            input,
            schema,
            options,
            style,
            edits,
            content,
            json,
        }),
        Commands::Generate {
            input,
            provider,
            model,
            num_questions,
            difficulty,
            schema,
            options,
            style,
            content,
            json,
            config,
        } => {
            commands::generate::execute(commands::generate::GenerateArgs {
                input,
                provider,
                model,
                num_questions,
                difficulty,
                schema,
                options,
                style,
                content,
                json,
                config,
            })
            .await
        }
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
