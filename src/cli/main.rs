// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Webshell Hunter - Standalone CLI
 * Crawls a target host and probes every page for known webshell filenames
 *
 * (c) 2026 Bountyy Oy
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use webshell_hunter::config::{ConfigValidator, HunterConfig};
use webshell_hunter::http_client::HttpClient;
use webshell_hunter::reporting::{render_json, render_text, StdoutReporter};
use webshell_hunter::{Hunter, LinkMode, MatchPolicy, SignatureSet, Target};

/// Webshell Hunter - finds known webshell filenames on a crawled site
#[derive(Parser)]
#[command(name = "webshell-hunter")]
#[command(version = "1.0.0")]
#[command(about = "Crawls a web host and probes every discovered path for known webshell filenames", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Target URL (crawl seed and scope host)
    #[arg(short = 'u', long)]
    target_url: Option<String>,

    /// Directory of .txt filename signature files
    #[arg(short = 's', long)]
    signature_path: Option<PathBuf>,

    /// Configuration file path (yaml, toml or json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum concurrent requests
    #[arg(long)]
    concurrency: Option<usize>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Stop after this many pages
    #[arg(long)]
    max_pages: Option<usize>,

    /// Which probe status codes count as a match
    #[arg(long)]
    match_policy: Option<MatchPolicyArg>,

    /// Which anchors to follow
    #[arg(long)]
    link_mode: Option<LinkModeArg>,

    /// Custom User-Agent string
    #[arg(long)]
    user_agent: Option<String>,

    /// Disable TLS certificate verification
    #[arg(long)]
    insecure: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet mode - only show matches
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sample configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "webshell-hunter.toml")]
        output: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MatchPolicyArg {
    /// Any 2xx status
    Success,
    /// Status <= 200
    Legacy,
}

impl From<MatchPolicyArg> for MatchPolicy {
    fn from(arg: MatchPolicyArg) -> Self {
        match arg {
            MatchPolicyArg::Success => MatchPolicy::Success,
            MatchPolicyArg::Legacy => MatchPolicy::Legacy,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LinkModeArg {
    All,
    Absolute,
}

impl From<LinkModeArg> for LinkMode {
    fn from(arg: LinkModeArg) -> Self {
        match arg {
            LinkModeArg::All => LinkMode::All,
            LinkModeArg::Absolute => LinkMode::Absolute,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    // RUST_LOG wins over the command-line verbosity flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .thread_name("webshell-hunter")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init { ref output }) => write_sample_config(output),
        None => {
            let config = build_config(&cli)?;
            run_hunt(config, cli.json).await
        }
    }
}

/// Config file (or defaults + env), then command-line flags on top
fn build_config(cli: &Cli) -> Result<HunterConfig> {
    let mut config = HunterConfig::load(cli.config.as_deref())?;

    if let Some(target_url) = &cli.target_url {
        config.target_url = target_url.clone();
    }
    if let Some(signature_path) = &cli.signature_path {
        config.signature_path = signature_path.clone();
    }
    if let Some(concurrency) = cli.concurrency {
        config.scanner.max_concurrency = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.scanner.request_timeout_secs = timeout;
    }
    if let Some(max_pages) = cli.max_pages {
        config.scanner.max_pages = Some(max_pages);
    }
    if let Some(policy) = cli.match_policy {
        config.scanner.match_policy = policy.into();
    }
    if let Some(mode) = cli.link_mode {
        config.scanner.link_mode = mode.into();
    }
    if let Some(user_agent) = &cli.user_agent {
        config.scanner.user_agent = Some(user_agent.clone());
    }
    if cli.insecure {
        config.scanner.accept_invalid_certs = true;
    }

    ConfigValidator::validate(&config)?;
    Ok(config)
}

async fn run_hunt(config: HunterConfig, json: bool) -> Result<()> {
    let target = Target::parse(&config.target_url)?;
    let signatures = SignatureSet::load(&config.signature_path)?;
    if signatures.is_empty() {
        warn!("No signatures loaded from {:?}; only crawling", config.signature_path);
    }

    let http_client = HttpClient::with_config(
        config.scanner.request_timeout_secs,
        config.scanner.user_agent.as_deref(),
        config.scanner.accept_invalid_certs,
    )?
    .with_max_body_size(config.scanner.max_body_size);

    let hunter = Hunter::new(
        target,
        signatures,
        http_client,
        Arc::new(StdoutReporter),
        config.scanner.hunt_options(),
    );

    // Resolves only on a delivered Ctrl-C
    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        report = hunter.run() => {
            if json {
                println!("{}", render_json(&report)?);
            } else {
                print!("{}", render_text(&report));
            }
        }
        _ = interrupted => {
            info!("Interrupted, stopping hunt");
        }
    }

    Ok(())
}

fn write_sample_config(output: &Path) -> Result<()> {
    let sample = toml::to_string_pretty(&HunterConfig::default())
        .context("Failed to serialize sample config")?;
    std::fs::write(output, sample)
        .with_context(|| format!("Failed to write config file: {:?}", output))?;
    println!("Sample configuration written to {}", output.display());
    Ok(())
}
