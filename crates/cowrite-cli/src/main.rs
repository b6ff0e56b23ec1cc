//! Cowrite terminal client
//!
//! # Usage
//!
//! ```bash
//! # Create an account, or log in to an existing one
//! cowrite register alice@example.com alice --password secret
//! cowrite login alice@example.com --password secret
//!
//! # With the token in the environment
//! export COWRITE_TOKEN=<token>
//! cowrite list
//! cowrite create "Design notes"
//! cowrite open <document-id>
//! ```

mod editor;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde::Deserialize;
use tracing::Level;

use cowrite_api::{ApiClient, DocumentCreateRequest, LoginRequest, RegisterRequest};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";
const DEFAULT_WS_URL: &str = "ws://127.0.0.1:8080";

/// Cowrite - collaborative document editing client
#[derive(Parser, Debug)]
#[command(name = "cowrite")]
#[command(author, version, about = "Cowrite - collaborative document editing client")]
struct Args {
    /// Backend REST base URL
    #[arg(long, env = "COWRITE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Synchronization endpoint base URL
    #[arg(long, env = "COWRITE_WS_URL", default_value = DEFAULT_WS_URL)]
    ws_url: String,

    /// Bearer token obtained from `cowrite login`
    #[arg(long, env = "COWRITE_TOKEN")]
    token: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "COWRITE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "COWRITE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account
    Register {
        email: String,
        username: String,
        #[arg(long, env = "COWRITE_PASSWORD")]
        password: String,
    },

    /// Log in and print the bearer token
    Login {
        email: String,
        #[arg(long, env = "COWRITE_PASSWORD")]
        password: String,
    },

    /// List documents you own or collaborate on
    List,

    /// Create a new document
    Create {
        title: String,
        /// Initial content
        #[arg(long)]
        content: Option<String>,
    },

    /// Open a document for collaborative editing
    Open { id: String },

    /// Delete a document
    Delete { id: String },
}

/// Optional TOML configuration; flags and environment take precedence.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
    ws_url: Option<String>,
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let file = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => ConfigFile::default(),
    };

    let api_url = pick(args.api_url, DEFAULT_API_URL, file.api_url);
    let ws_url = pick(args.ws_url, DEFAULT_WS_URL, file.ws_url);
    let token = args.token.or(file.token);

    let api = match &token {
        Some(token) => ApiClient::new(&api_url).with_token(token),
        None => ApiClient::new(&api_url),
    };

    match args.command {
        Command::Register {
            email,
            username,
            password,
        } => {
            let auth = api
                .register(&RegisterRequest {
                    email,
                    username,
                    password,
                })
                .await?;
            println!("{}", format!("Account created for {}", auth.username).green());
            print_token(&auth.token);
        }

        Command::Login { email, password } => {
            let auth = api.login(&LoginRequest { email, password }).await?;
            println!("{}", format!("Logged in as {}", auth.username).green());
            print_token(&auth.token);
        }

        Command::List => {
            let documents = api.list_documents().await?;
            if documents.is_empty() {
                println!(
                    "{}",
                    "No documents yet. Try `cowrite create <title>`.".dimmed()
                );
            }
            for doc in documents {
                println!(
                    "{}  {}  {}",
                    doc.id.yellow(),
                    doc.title.bold(),
                    format!(
                        "rev {} · {} · updated {}",
                        doc.current_revision, doc.owner_username, doc.updated_at
                    )
                    .dimmed()
                );
            }
        }

        Command::Create { title, content } => {
            let doc = api
                .create_document(&DocumentCreateRequest {
                    title,
                    initial_content: content,
                })
                .await?;
            println!("{} {}", "Created".green(), doc.id.yellow());
        }

        Command::Open { id } => {
            let token = token
                .context("An auth token is required to open a document; run `cowrite login` first")?;
            editor::run(&api, &ws_url, &token, &id).await?;
        }

        Command::Delete { id } => {
            api.delete_document(&id).await?;
            println!("{} {}", "Deleted".green(), id.yellow());
        }
    }

    Ok(())
}

/// A flag still at its built-in default yields to the config file value.
fn pick(arg: String, default: &str, file: Option<String>) -> String {
    if arg == default {
        file.unwrap_or(arg)
    } else {
        arg
    }
}

fn print_token(token: &str) {
    println!("{}", token);
    println!(
        "{}",
        "Export it for later commands: export COWRITE_TOKEN=<token>".dimmed()
    );
}
