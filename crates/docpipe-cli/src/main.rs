mod display;
mod export;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use docpipe_ai::{HttpOracle, OracleConfig, Summarizer};
use docpipe_pipeline::{Pipeline, RunOutcome};

const NO_TEXT_MESSAGE: &str =
    "No text extracted. Try another PDF (some PDFs are scanned images).";

const PREVIEW_CHARS: usize = 1000;

#[derive(Parser)]
#[command(name = "docpipe", about = "PDF pipeline: extract, summarize, tag, evaluate")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: extract text, summarize via the oracle, tag, evaluate,
    /// and export both artifacts
    Run {
        /// PDF file to process
        input: PathBuf,
        /// Output directory for artifacts
        #[arg(short, long, default_value = "outputs")]
        output: PathBuf,
        /// Oracle model id override
        #[arg(long, env = "DOCPIPE_MODEL")]
        model: Option<String>,
    },
    /// Extraction only: write the text artifact and show a preview
    Extract {
        /// PDF file to process
        input: PathBuf,
        /// Output directory for artifacts
        #[arg(short, long, default_value = "outputs")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    tracing::info!("docpipe v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            model,
        } => run(&input, &output, model).await,
        Commands::Extract { input, output } => extract_only(&input, &output),
    }
}

async fn run(input: &Path, output: &Path, model: Option<String>) -> anyhow::Result<()> {
    let bytes = read_input(input)?;

    let mut config = OracleConfig::from_env()?;
    if let Some(model) = model {
        config.model = model;
    }
    let pipeline = Pipeline::new(Summarizer::new(Box::new(HttpOracle::new(config))));

    match pipeline.run(&bytes).await? {
        RunOutcome::NoText => println!("{NO_TEXT_MESSAGE}"),
        RunOutcome::Complete { text, result } => {
            preview(&text);

            let name = file_name(input);
            let text_path = export::save_text(&text, &name, output)?;
            println!("Saved extracted text to {}", text_path.display());
            let json_path = export::save_json(&result, &name, output)?;
            println!("Saved AI summary to {}", json_path.display());

            display::render(&result);
        }
    }
    Ok(())
}

fn extract_only(input: &Path, output: &Path) -> anyhow::Result<()> {
    let bytes = read_input(input)?;

    let text = docpipe_extract::extract(&bytes)?;
    if text.is_empty() {
        println!("{NO_TEXT_MESSAGE}");
        return Ok(());
    }

    preview(&text);
    let path = export::save_text(&text, &file_name(input), output)?;
    println!("Saved extracted text to {}", path.display());
    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(input).with_context(|| format!("reading {}", input.display()))
}

fn file_name(input: &Path) -> String {
    input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// Show the head of the extracted text plus a word count, so the user can
/// confirm extraction looks right before trusting the summary.
fn preview(text: &str) {
    println!("\nText preview (first 1,000 characters):");
    println!("{}", truncate_chars(text, PREVIEW_CHARS));
    println!("\nWord count: {}", text.split_whitespace().count());
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
