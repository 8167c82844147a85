//! CLI binary for pdf2quiz.
//!
//! A thin shim over the library crate: maps CLI flags to an
//! `ExtractionConfig`, wires local stores, and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf2quiz::clients::local::{JsonDirStore, LocalObjectStore};
use pdf2quiz::{ChatRequest, ExtractRequest, ExtractionConfig, QuizBackend};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract questions from a PDF under ./data into ./out
  pdf2quiz extract docs/sample.pdf --category math

  # Custom stores and a smaller batch
  pdf2quiz extract docs/sample.pdf --category finance \
      --data-root ./uploads --out-dir ./db --max-questions 5

  # One chat exchange
  pdf2quiz chat "How do I calculate interest?" --category finance

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY   API key for the extraction provider (extract)
  GEMINI_API_KEY   API key for the chat provider (chat)

SETUP:
  1. Set API key:  export OPENAI_API_KEY=sk-...
  2. Extract:      pdf2quiz extract docs/sample.pdf --category math
"#;

/// Extract multiple-choice questions from PDFs and chat with the assistant.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2quiz",
    version,
    about = "Extract multiple-choice questions from PDFs using LLM structured output",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PDF2QUIZ_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "PDF2QUIZ_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract questions from a PDF and persist them as JSON documents.
    Extract {
        /// Source path of the PDF, relative to the data root.
        source_path: String,

        /// Target category for the extracted questions.
        #[arg(long)]
        category: String,

        /// Directory the source path is resolved against.
        #[arg(long, env = "PDF2QUIZ_DATA_ROOT", default_value = "./data")]
        data_root: PathBuf,

        /// Directory the question documents are written to.
        #[arg(long, env = "PDF2QUIZ_OUT_DIR", default_value = "./out")]
        out_dir: PathBuf,

        /// Maximum questions to extract (1-10).
        #[arg(long, env = "PDF2QUIZ_MAX_QUESTIONS", default_value_t = 10,
              value_parser = clap::value_parser!(u8).range(1..=10))]
        max_questions: u8,

        /// Cost-efficient model tried first.
        #[arg(long, env = "PDF2QUIZ_MODEL")]
        model: Option<String>,

        /// Stronger model used when the first attempt yields nothing.
        #[arg(long, env = "PDF2QUIZ_FALLBACK_MODEL")]
        fallback_model: Option<String>,

        /// Per-call provider timeout in seconds.
        #[arg(long, env = "PDF2QUIZ_API_TIMEOUT", default_value_t = 120)]
        api_timeout: u64,

        /// Output the full response as pretty JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Send one message to the learning assistant.
    Chat {
        /// The message to send.
        message: String,

        /// Context label for the assistant persona.
        #[arg(long)]
        category: Option<String>,

        /// Conversational model to use.
        #[arg(long, env = "PDF2QUIZ_CHAT_MODEL")]
        model: Option<String>,

        /// Per-call provider timeout in seconds.
        #[arg(long, env = "PDF2QUIZ_API_TIMEOUT", default_value_t = 120)]
        api_timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Extract {
            source_path,
            category,
            data_root,
            out_dir,
            max_questions,
            model,
            fallback_model,
            api_timeout,
            json,
        } => {
            let mut builder = ExtractionConfig::builder()
                .max_questions(max_questions as usize)
                .api_timeout_secs(api_timeout);
            if let Some(m) = model {
                builder = builder.primary_model(m);
            }
            if let Some(m) = fallback_model {
                builder = builder.fallback_model(m);
            }
            let config = builder.build().context("Invalid configuration")?;

            let backend = QuizBackend::new(
                Arc::new(LocalObjectStore::new(&data_root)),
                Arc::new(JsonDirStore::new(&out_dir)),
                config,
            );

            let response = backend
                .extract_questions(&ExtractRequest {
                    source_path,
                    category,
                })
                .await
                .context("Extraction failed")?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&response)
                        .context("Failed to serialize response")?
                );
            } else {
                println!(
                    "Set {}: {} questions ({})",
                    response.question_set_id, response.question_count, response.category
                );
                for q in &response.questions_inline {
                    println!("  {}  {}", q.id, q.doc.stem);
                }
                println!("Documents written under {}", out_dir.display());
            }
        }

        Command::Chat {
            message,
            category,
            model,
            api_timeout,
        } => {
            let mut builder = ExtractionConfig::builder().api_timeout_secs(api_timeout);
            if let Some(m) = model {
                builder = builder.chat_model_name(m);
            }
            let config = builder.build().context("Invalid configuration")?;

            // The chat path never touches either store; local stubs keep the
            // backend construction uniform.
            let backend = QuizBackend::new(
                Arc::new(LocalObjectStore::new(".")),
                Arc::new(JsonDirStore::new(".")),
                config,
            );

            let response = backend
                .chat_with_assistant(&ChatRequest {
                    message,
                    category,
                    history: None,
                })
                .await
                .context("Chat failed")?;

            println!("{}", response.response);
        }
    }

    Ok(())
}
