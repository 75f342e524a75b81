//! knowmap: command-line front end for note intelligence.
//!
//! Reads text from `--text`, `--file` or stdin and documents from JSON
//! files, runs one operation through the configured provider chain and
//! prints the result as JSON on stdout. Logs go to stderr (or `LOG_FILE`).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use knowmap_inference::{
    defaults, rank_candidates, Document, IntelligenceConfig, NoteIntelligence, ProviderChain,
    RankingRequest,
};

#[derive(Parser)]
#[command(name = "knowmap")]
#[command(author, version, about = "Summaries, keywords and related notes")]
#[command(propagate_version = true)]
struct Cli {
    /// Ignore configured providers and use only the local heuristics
    #[arg(long, global = true)]
    local: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize text
    Summarize {
        #[command(flatten)]
        input: TextInput,

        /// Maximum summary length in characters
        #[arg(short, long, default_value_t = defaults::SUMMARY_LENGTH)]
        max_length: usize,
    },

    /// Extract key terms from text
    Keywords {
        #[command(flatten)]
        input: TextInput,

        /// Maximum number of keywords
        #[arg(short = 'k', long, default_value_t = defaults::KEYWORD_COUNT)]
        max: usize,
    },

    /// Rank candidate notes by relevance to a source note
    Relate {
        /// JSON file holding the source document
        #[arg(short, long)]
        source: PathBuf,

        /// JSON file holding an array of candidate documents
        #[arg(short, long)]
        candidates: PathBuf,

        /// Maximum number of related notes
        #[arg(short, long, default_value_t = defaults::RELATIONSHIP_LIMIT)]
        limit: usize,
    },

    /// Score candidates with the local ranker and show the scores
    Rank {
        /// JSON file holding a ranking request: {source, candidates, limit}
        #[arg(short, long)]
        request: PathBuf,
    },

    /// Summary, keywords and suggested title for a note
    Process {
        #[command(flatten)]
        input: TextInput,

        /// Existing note title
        #[arg(long)]
        title: Option<String>,
    },

    /// Suggest a category and tags for a note
    Categorize {
        /// JSON file holding the note
        #[arg(short, long)]
        note: PathBuf,

        /// Categories already in use (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        existing: Vec<String>,
    },

    /// Suggest notes to connect that are not linked yet
    Connections {
        /// JSON file holding the note
        #[arg(short, long)]
        note: PathBuf,

        /// JSON file holding an array of candidate documents
        #[arg(short, long)]
        candidates: PathBuf,

        /// Ids the note is already related to (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        related: Vec<String>,
    },

    /// Short preview of note content
    Preview {
        #[command(flatten)]
        input: TextInput,
    },

    /// Show which providers are configured
    Providers,
}

/// Where to read input text from. Stdin is used when neither is given.
#[derive(Args)]
struct TextInput {
    /// Inline text
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// File to read text from
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl TextInput {
    async fn read(&self) -> anyhow::Result<String> {
        if let Some(ref text) = self.text {
            return Ok(text.clone());
        }
        if let Some(ref path) = self.file {
            return tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()));
        }
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read stdin")?;
        Ok(buf)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = init_logging();

    let cli = Cli::parse();

    let config = if cli.local {
        IntelligenceConfig::local_only()
    } else {
        IntelligenceConfig::from_env()
    };
    let intel = NoteIntelligence::new(ProviderChain::from_config(&config)?);

    match cli.command {
        Commands::Summarize { input, max_length } => {
            let summary = intel.summarize(&input.read().await?, max_length).await?;
            print_json(&serde_json::json!({ "summary": summary }))?;
        }
        Commands::Keywords { input, max } => {
            let keywords = intel.extract_keywords(&input.read().await?, max).await?;
            print_json(&serde_json::json!({ "keywords": keywords }))?;
        }
        Commands::Relate {
            source,
            candidates,
            limit,
        } => {
            let source: Document = read_json(&source).await?;
            let candidates: Vec<Document> = read_json(&candidates).await?;
            let related = intel.relate(&source, &candidates, limit).await;
            print_json(&serde_json::json!({ "related": related }))?;
        }
        Commands::Rank { request } => {
            let request: RankingRequest = read_json(&request).await?;
            let ranked: Vec<_> = rank_candidates(&request.source, &request.candidates)
                .into_iter()
                .take(request.limit)
                .collect();
            print_json(&serde_json::json!({ "ranked": ranked }))?;
        }
        Commands::Process { input, title } => {
            let note = intel.process_note(title.as_deref(), &input.read().await?).await?;
            print_json(&note)?;
        }
        Commands::Categorize { note, existing } => {
            let note: Document = read_json(&note).await?;
            let suggestion = intel.suggest_category(&note, &existing).await;
            print_json(&suggestion)?;
        }
        Commands::Connections {
            note,
            candidates,
            related,
        } => {
            let note: Document = read_json(&note).await?;
            let candidates: Vec<Document> = read_json(&candidates).await?;
            let suggestions = intel
                .suggest_connections(&note, &candidates, &related)
                .await;
            print_json(&serde_json::json!({ "suggestions": suggestions }))?;
        }
        Commands::Preview { input } => {
            let content = input.read().await?;
            if content.is_empty() {
                bail!("content is required");
            }
            print_json(&serde_json::json!({ "preview": intel.content_preview(&content) }))?;
        }
        Commands::Providers => {
            print_json(&serde_json::json!({
                "available": intel.is_ai_service_available(),
                "service": intel.available_service(),
                "chain": intel.chain().external_names(),
            }))?;
        }
    }

    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Install the tracing subscriber.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors
///   RUST_LOG    - standard env filter (default: "knowmap=info")
///
/// Console output goes to stderr so stdout carries only results.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "knowmap=info,knowmap_inference=info,knowmap_core=warn".into()
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = Path::new(path).parent().unwrap_or(Path::new("."));
        let file_name = Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("knowmap.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );

    guard
}
