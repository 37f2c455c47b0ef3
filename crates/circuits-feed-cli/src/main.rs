// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! circuits-feed — build ordered feed items from a research listing page.

mod config;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use circuits_feed::FeedBuilder;

use crate::config::{resolve_config, ConfigArgs};

#[derive(Parser)]
#[command(
    name = "circuits-feed",
    about = "Scrape a research listing page into ordered feed items (JSON on stdout)",
    version
)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Settings {
    /// Listing page URL [env: CIRCUITS_FEED_ORIGIN]
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Maximum number of items, 0 for no cap [env: CIRCUITS_FEED_MAX_ITEMS]
    #[arg(long, global = true)]
    max_items: Option<usize>,

    /// GET timeout in milliseconds [env: CIRCUITS_FEED_TIMEOUT_MS]
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// HEAD timeout in milliseconds [env: CIRCUITS_FEED_HEAD_TIMEOUT_MS]
    #[arg(long, global = true)]
    head_timeout_ms: Option<u64>,

    /// Pause after each detail page, in milliseconds [env: CIRCUITS_FEED_DELAY_MS]
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// User-Agent header [env: CIRCUITS_FEED_USER_AGENT]
    #[arg(long, global = true)]
    user_agent: Option<String>,
}

impl From<&Settings> for ConfigArgs {
    fn from(s: &Settings) -> Self {
        ConfigArgs {
            origin: s.origin.clone(),
            max_items: s.max_items,
            timeout_ms: s.timeout_ms,
            head_timeout_ms: s.head_timeout_ms,
            delay_ms: s.delay_ms,
            user_agent: s.user_agent.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and print the items, newest first
    Build {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the candidates found on the listing page without visiting them
    Candidates {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build { pretty } => {
            let builder = http_builder(&cli.settings)?;
            let run = builder.run().await.context("feed build failed")?;
            print_json(&run.items, pretty)
        }
        Commands::Candidates { pretty } => {
            let builder = http_builder(&cli.settings)?;
            let discovery = builder.discover().await.context("discovery failed")?;
            print_json(&discovery.candidates, pretty)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "circuits-feed", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn http_builder(settings: &Settings) -> Result<FeedBuilder<circuits_feed::HttpFetcher>> {
    let config = resolve_config(&ConfigArgs::from(settings))?;
    tracing::debug!("using origin {}", config.origin());
    FeedBuilder::with_http(config).context("could not create HTTP client")
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
