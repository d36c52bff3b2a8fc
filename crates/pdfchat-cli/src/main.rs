use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use pdfchat_core::{InferenceTask, TextExtractor, config, run_task};
use pdfchat_inference::HttpGenerationBackend;
use pdfchat_pdf_mupdf::MupdfExtractor;

/// PDF Chat - summarize a PDF or ask it questions from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize the text content of a PDF
    Summarize {
        /// Path to the PDF file
        file_path: PathBuf,
    },

    /// Ask a question about the text content of a PDF
    Ask {
        /// Path to the PDF file
        file_path: PathBuf,

        /// The question to ask
        question: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Summarize { file_path } => run(file_path, InferenceTask::Summarize).await,
        Command::Ask {
            file_path,
            question,
        } => run(file_path, InferenceTask::Answer { question }).await,
    }
}

async fn run(file_path: PathBuf, task: InferenceTask) -> anyhow::Result<()> {
    let model_config = config::resolve_model_config(&config::load_config());
    let backend = HttpGenerationBackend::new(&model_config)?;

    let extractor = MupdfExtractor::new();
    let path = file_path.clone();
    let doc = tokio::task::spawn_blocking(move || extractor.extract(&path))
        .await?
        .with_context(|| format!("failed to extract text from {}", file_path.display()))?;

    anyhow::ensure!(
        !doc.text.is_empty(),
        "no extractable text in {} ({} pages; scanned or image-only?)",
        file_path.display(),
        doc.page_count
    );

    let output = run_task(&backend, &task, &doc.text).await?;
    println!("{output}");

    Ok(())
}
