// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use ask_docs::utils::logging::{format_error, format_info, format_success};
use ask_docs::{
    AnswerSource, Config, DocumentLoader, TextChunker, build_service,
    build_service_from_documents, server,
};
use clap::{ArgAction, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ask_docs")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Keyword-first, semantic-fallback question answering over text files", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index, then serve POST /ask and GET /health
    Serve {
        #[arg(long, env = "ASK_DOCS_HOST")]
        host: Option<String>,

        #[arg(short, long, env = "ASK_DOCS_PORT")]
        port: Option<u16>,
    },

    /// Build the index and answer a single question
    Ask {
        /// Question text
        question: String,
    },

    /// Load documents and report what would be indexed
    Index {
        /// Also embed every chunk against the provider
        #[arg(long)]
        embed: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    ask_docs::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Ask Docs");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(config, host, port).await?;
        }
        Commands::Ask { question } => {
            cmd_ask(&config, &question, cli.color).await?;
        }
        Commands::Index { embed } => {
            cmd_index(&config, embed).await?;
        }
    }

    Ok(())
}

fn show_progress() -> bool {
    std::io::stderr().is_terminal()
}

async fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate().context("Invalid server settings")?;

    info!(
        "Building index from {} before accepting connections",
        config.corpus.directory.display()
    );

    let service = build_service(&config, show_progress())
        .await
        .context("Startup failed; refusing to serve without an index")?;

    server::serve(&config.server, service)
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn cmd_ask(config: &Config, question: &str, colored: bool) -> Result<()> {
    colored::control::set_override(colored);

    let service = build_service(config, show_progress())
        .await
        .context("Failed to build index")?;

    match service.answer(question).await {
        Ok(answer) => {
            let label = match answer.source {
                AnswerSource::Keyword => "Answer (keyword match)",
                AnswerSource::Semantic => "Answer (semantic search)",
            };
            println!("{}", format_success(label));
            println!("{}", answer.text);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", format_error(&err.to_string()));
            Err(err.into())
        }
    }
}

async fn cmd_index(config: &Config, embed: bool) -> Result<()> {
    let documents = DocumentLoader::new(config.corpus.clone())
        .load()
        .context("Failed to load documents")?;

    let chunker = TextChunker::new(config.provider.chunk_size);
    let chunk_total: usize = documents
        .iter()
        .map(|doc| chunker.chunk_document(doc).len())
        .sum();

    for doc in &documents {
        println!(
            "{}",
            format_info(&format!(
                "{} ({} bytes, sha256 {})",
                doc.relative_path,
                doc.file_size,
                &doc.content_hash[..12]
            ))
        );
    }

    println!(
        "{}",
        format_success(&format!(
            "{} documents, {} chunks",
            documents.len(),
            chunk_total
        ))
    );

    if embed {
        let service = build_service_from_documents(config, &documents, show_progress())
            .await
            .context("Failed to build index")?;
        let indexed = service.index().map(|i| i.chunk_count()).unwrap_or(0);
        println!("{}", format_success(&format!("Embedded {} chunks", indexed)));
    }

    Ok(())
}
