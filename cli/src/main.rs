//! Playground CLI - terminal chat against an OpenAI-compatible model catalog.
//!
//! # Architecture
//!
//! ```text
//! main() -> PlaygroundConfig::load() -> Settings -> Client
//!        -> chat:   CatalogCache::get() -> SessionState -> Repl::run()
//!        -> ping:   Client::chat() with a single user message
//!        -> models: CatalogCache::get() -> print
//! ```
//!
//! Logs go to `~/.playground/logs/playground.log` so they never interleave
//! with the conversation on stdout.

mod commands;
mod render;
mod repl;

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use playground_config::{API_KEY_ENV, PlaygroundConfig, Settings};
use playground_core::{CatalogCache, SessionState};
use playground_providers::{ApiConfig, ChatMessage, ChatRequest, Client, Content};

use crate::render::Style;

const PING_MODEL: &str = "llama-3.3-70b-versatile";
const PING_PROMPT: &str = "안녕하세요! 간단한 인사말을 해주세요.";

#[derive(Debug, Parser)]
#[command(name = "playground", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Interactive chat (default)
    Chat,
    /// Send one message and print the reply
    Ping {
        /// Provider model identifier
        #[arg(long, default_value = PING_MODEL)]
        model: String,
        #[arg(long, default_value = PING_PROMPT)]
        prompt: String,
    },
    /// Print the resolved model catalog
    Models,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than mixing logs into the chat.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.playground/logs/playground.log
    if let Some(dir) = playground_config::playground_dir() {
        candidates.push(dir.join("logs").join("playground.log"));
    }

    // Fallback: ./.playground/logs/playground.log
    candidates.push(
        PathBuf::from(".playground")
            .join("logs")
            .join("playground.log"),
    );

    candidates
}

fn load_settings() -> Settings {
    match PlaygroundConfig::load() {
        Ok(config) => config.resolve(),
        Err(err) => {
            eprintln!("Warning: {err}; using defaults");
            PlaygroundConfig::default().resolve()
        }
    }
}

fn build_client(settings: &Settings) -> Result<Client> {
    let Some(api_key) = settings.api_key.clone() else {
        let config_hint = PlaygroundConfig::path().map_or_else(
            || "~/.playground/config.toml".to_string(),
            |p| p.display().to_string(),
        );
        bail!("No API key configured. Set {API_KEY_ENV} or add `key` under [api] in {config_hint}.");
    };

    let mut api = ApiConfig::new(api_key).with_timeout(settings.timeout);
    if let Some(base_url) = &settings.base_url {
        api = api.with_base_url(base_url.as_str());
    }
    Client::new(api).context("failed to build HTTP client")
}

async fn run_chat(client: Client, settings: &Settings) -> Result<()> {
    let mut cache = CatalogCache::new(settings.catalog_ttl);
    let catalog = cache.get(&client).await;
    let session = SessionState::from_settings(&catalog, settings);
    let style = Style {
        ascii_only: settings.ascii_only,
    };

    repl::Repl::new(client, cache, catalog, session, style, settings.switch_pause)
        .run()
        .await
}

async fn run_ping(client: &Client, model: String, prompt: String) -> Result<()> {
    let request = ChatRequest {
        messages: vec![ChatMessage::user(Content::Text(prompt))],
        model,
        temperature: None,
        max_tokens: None,
    };
    let reply = client.chat(&request).await?;
    println!("Response from {}:", request.model);
    println!("{reply}");
    Ok(())
}

async fn run_models(client: &Client, settings: &Settings) -> Result<()> {
    let mut cache = CatalogCache::new(settings.catalog_ttl);
    let catalog = cache.get(client).await;
    let style = Style {
        ascii_only: settings.ascii_only,
    };
    let session = SessionState::from_settings(&catalog, settings);
    println!("{}", render::model_list(&catalog, &session, style));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let settings = load_settings();
    let client = build_client(&settings)?;

    match cli.command.unwrap_or(CliCommand::Chat) {
        CliCommand::Chat => run_chat(client, &settings).await,
        CliCommand::Ping { model, prompt } => run_ping(&client, model, prompt).await,
        CliCommand::Models => run_models(&client, &settings).await,
    }
}
