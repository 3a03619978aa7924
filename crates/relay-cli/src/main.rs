use clap::{Parser, Subcommand};
use colored::Colorize;
use relay_core::config::{LogLevel, LOG_LEVEL_VAR};
use relay_core::Config;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

mod commands;
mod prompts;
mod repl;
mod report;

#[derive(Parser)]
#[command(name = "relay")]
#[command(author, version, about = "relay agent toolkit CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: discovered relay.toml)
    #[arg(short, long, global = true, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a calculator and clock agent one question
    Quickstart,
    /// Run the scripted multi-tool examples
    Showcase,
    /// Azure OpenAI walkthrough followed by an interactive prompt
    Azure,
    /// Ask the Bedrock file-operations agent one question
    Files {
        /// Query to send instead of the default
        query: Option<String>,
    },
    /// Start an interactive chat session
    Chat {
        /// System prompt for the agent
        #[arg(short, long)]
        system: Option<String>,
    },
}

/// `-v` flags win over `RUST_LOG`, which wins over the config file.
fn init_tracing(verbose: u8, configured: LogLevel) {
    let level = match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };

    let filter = match level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(configured.as_str())),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            println!("{} {}", "Error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    let rejected_level = config.merge_env();
    init_tracing(cli.verbose, config.general.log_level);
    if let Some(raw) = rejected_level {
        warn!(value = %raw, "Ignoring unrecognised {}", LOG_LEVEL_VAR);
    }

    let outcome = match cli.command {
        Commands::Quickstart => commands::quickstart::run(&config).await,
        Commands::Showcase => commands::showcase::run(&config).await,
        Commands::Azure => commands::azure::run(&config).await,
        Commands::Files { query } => commands::files::run(&config, query.as_deref()).await,
        Commands::Chat { system } => commands::chat::run(&config, system.as_deref()).await,
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            println!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
