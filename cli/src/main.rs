use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use docchat_ai::embeddings::gemini_embed::GeminiEmbedder;
use docchat_ai::gemini::GeminiClient;
use docchat_ai::ingest::{self, UploadDoc};
use docchat_ai::llm::gemini_llm::GeminiLlm;
use docchat_ai::query;
use docchat_ai::store::QdrantStore;
use docchat_core::error::AppError;
use docchat_core::session::ChatLog;

mod config;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "docchat", about = "Chat with your documents", version)]
struct Cli {
    /// Path to a config file (defaults to ./docchat.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest one or more documents into the collection
    Ingest {
        /// Files to ingest (.pdf, .docx or .txt)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Ask a single question and print the answer
    Ask {
        question: String,
    },
    /// Interactive chat; `/export` writes the transcript, `/quit` exits
    Chat,
    /// Chat against a fixed document ingested at startup
    Resume {
        /// Document to load before the chat starts
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Check that the vector store is reachable
    Health,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(details) = e.details.as_deref() {
                eprintln!("  {details}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let cfg = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Ingest { files } => cmd_ingest(&cfg, &files),
        Command::Ask { question } => cmd_ask(&cfg, &question),
        Command::Chat => cmd_chat(&cfg, None),
        Command::Resume { file } => {
            let path = file.unwrap_or_else(|| PathBuf::from(&cfg.default_document));
            cmd_chat(&cfg, Some(path))
        }
        Command::Health => cmd_health(&cfg),
    }
}

struct Providers {
    store: QdrantStore,
    embedder: GeminiEmbedder,
    llm: GeminiLlm,
}

fn connect(cfg: &AppConfig) -> Result<Providers, AppError> {
    log::debug!(
        "using Qdrant at {} and collection {}",
        cfg.qdrant_url,
        cfg.rag.collection
    );
    let store = QdrantStore::new(&cfg.qdrant_url, cfg.qdrant_api_key.as_deref())?;
    let client = GeminiClient::new(&cfg.gemini_base_url, cfg.require_gemini_key()?)?;
    Ok(Providers {
        store,
        embedder: GeminiEmbedder::new(client.clone()),
        llm: GeminiLlm::new(client),
    })
}

fn cmd_ingest(cfg: &AppConfig, files: &[PathBuf]) -> Result<(), AppError> {
    let providers = connect(cfg)?;
    ingest::ensure_ready(&providers.store, &cfg.rag)?;

    let mut docs = Vec::with_capacity(files.len());
    for path in files {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
            .to_string();
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::new("INGEST_READ_FAILED", "Failed to read input file")
                .with_details(format!("path={}; err={}", path.display(), e))
        })?;
        docs.push(UploadDoc { name, bytes });
    }

    log::info!("ingesting {} files", docs.len());
    let report = ingest::ingest_batch(&providers.store, &providers.embedder, &cfg.rag, &docs);
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(n) => println!("{}: {n} chunks", outcome.name),
            Err(e) => println!("Error processing {}: {e}", outcome.name),
        }
    }
    println!("{}", report.summary());
    Ok(())
}

fn cmd_ask(cfg: &AppConfig, question: &str) -> Result<(), AppError> {
    let providers = connect(cfg)?;
    ingest::ensure_ready(&providers.store, &cfg.rag)?;

    let mut log = ChatLog::new();
    let reply = query::answer(
        &providers.store,
        &providers.embedder,
        &providers.llm,
        &cfg.rag,
        &mut log,
        question,
    )?;
    println!("{reply}");
    Ok(())
}

fn cmd_chat(cfg: &AppConfig, default_doc: Option<PathBuf>) -> Result<(), AppError> {
    let providers = connect(cfg)?;
    ingest::ensure_ready(&providers.store, &cfg.rag)?;

    if let Some(path) = default_doc {
        match ingest::ingest_default_document(&providers.store, &providers.embedder, &cfg.rag, &path)
        {
            Ok(n) => println!("Loaded {} ({n} chunks).", path.display()),
            // The session stays usable against whatever was stored before.
            Err(e) => println!("Error loading default document: {e}"),
        }
    }

    println!("Ask a question, or type /export to save the transcript, /quit to leave.");
    let mut log = ChatLog::new();
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line).map_err(|e| {
            AppError::new("SESSION_INPUT_FAILED", "Failed to read from stdin")
                .with_details(e.to_string())
        })?;
        if read == 0 {
            break;
        }

        let input = line.trim();
        match input {
            "" => continue,
            "/quit" => break,
            "/export" => match log.export_to(Path::new(".")) {
                Ok(path) => println!("Saved transcript to {}", path.display()),
                Err(e) => println!("Error exporting chat: {e}"),
            },
            question => match query::answer(
                &providers.store,
                &providers.embedder,
                &providers.llm,
                &cfg.rag,
                &mut log,
                question,
            ) {
                Ok(reply) => println!("{reply}\n"),
                Err(e) => println!("Error: {e}\n"),
            },
        }
    }
    Ok(())
}

fn cmd_health(cfg: &AppConfig) -> Result<(), AppError> {
    let store = QdrantStore::new(&cfg.qdrant_url, cfg.qdrant_api_key.as_deref())?;
    store.health_check()?;
    println!("Qdrant at {} is ready.", store.base_url());
    Ok(())
}
