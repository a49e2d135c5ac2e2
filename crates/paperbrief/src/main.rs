use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use paperbrief_common::{logger, AppConfig};
use paperbrief_llm::{AnyBackend, Backend};
use paperbrief_pdf::{extract_text, PdfExtractor};
use paperbrief_pipeline::{Article, BatchProcessor};
use std::path::{Path, PathBuf};

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
            return;
        }
    }

    // Fallback to default dotenv behavior
    dotenv::dotenv().ok();
}

#[derive(Parser)]
#[command(name = "paperbrief")]
#[command(about = "PaperBrief - LLM summaries for downloaded research papers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize every article in a JSON article list
    Summarize {
        /// JSON array of articles
        #[arg(long, short)]
        input: PathBuf,

        /// Where to write the updated articles (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Backend: openai, local, ollama or fuelix (defaults to LLM_BACKEND)
        #[arg(long, short)]
        backend: Option<String>,
    },

    /// Print the text that would be sent to a backend for one PDF
    Extract {
        /// PDF file
        pdf: PathBuf,
    },

    /// Show the resolved endpoint and model of every backend
    Backends,
}

fn read_articles(path: &Path) -> Result<Vec<Article>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read article list {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid article list {}", path.display()))
}

fn write_articles(articles: &[Article], output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(articles)?;
    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();
    let config = AppConfig::from_env()?;

    match cli.command {
        Commands::Summarize { input, output, backend } => {
            logger::setup_logging(&config.log_dir, &config.log_level)?;

            let backend = Backend::from_name(backend.as_deref().unwrap_or(&config.llm_backend));
            let articles = read_articles(&input)?;
            tracing::info!("Loaded {} articles from {}", articles.len(), input.display());

            let processor = BatchProcessor::from_config(backend, &config)?;
            let report = processor.process_with_report(articles).await;

            write_articles(&report.articles, output.as_deref())?;
            if let Some(path) = &output {
                tracing::info!("Wrote {} articles to {}", report.articles.len(), path.display());
            }
        }
        Commands::Extract { pdf } => {
            logger::setup_console_logging(&config.log_level)?;

            if !pdf.exists() {
                anyhow::bail!("PDF not found: {}", pdf.display());
            }
            println!("{}", extract_text(&PdfExtractor, &pdf));
        }
        Commands::Backends => {
            logger::setup_console_logging(&config.log_level)?;

            let default = Backend::from_name(&config.llm_backend);
            for backend in Backend::ALL {
                let client = AnyBackend::from_config(backend, &config)?;
                let marker = if backend == default { "*" } else { " " };
                println!(
                    "{} {:<7} {}  model={}",
                    marker,
                    backend.as_str(),
                    client.endpoint(),
                    client.model().unwrap_or("<server default>")
                );
            }
        }
    }

    Ok(())
}
