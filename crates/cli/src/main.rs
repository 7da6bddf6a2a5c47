//! Pool Config - resolves the mining pool dashboard configuration for a build

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Resolve the mining pool dashboard configuration for a deployment environment
#[derive(Parser, Debug)]
#[command(name = "pool-config", author, version)]
struct Cli {
    /// Target environment (development, test, production, or any other name)
    #[arg(long = "env", short = 'e', global = true, env = "POOL_ENV", default_value = "development")]
    environment: String,

    /// YAML overlay applied on top of the resolved configuration
    #[arg(long, short = 'c', global = true, env = "POOL_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved configuration
    Resolve {
        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Ember)]
        format: OutputFormat,
    },

    /// Validate the resolved configuration and print the report
    Validate,

    /// Write an example overlay file for the selected environment
    Init {
        /// Destination path
        path: std::path::PathBuf,
    },
}

/// Output format for `resolve`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Key names read by the dashboard (modulePrefix, APP.ApiUrl, ...)
    Ember,
    /// Configuration schema as JSON
    Json,
    /// Configuration schema as YAML
    Yaml,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    // Load .env file if it exists, before flags read POOL_ENV and POOL_CONFIG
    let dotenv_result = dotenv::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli.log_level, cli.log_format)?;

    match dotenv_result {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        Err(e) if !e.not_found() => warn!("Could not load .env file: {}", e),
        Err(_) => {}
    }

    info!("Resolving configuration for environment: {}", cli.environment);

    match cli.command {
        Commands::Resolve { format } => {
            commands::resolve(&cli.environment, cli.config.as_deref(), format)
        }
        Commands::Validate => commands::validate(&cli.environment, cli.config.as_deref()),
        Commands::Init { path } => commands::init(&cli.environment, &path),
    }
}

/// Initialize logging, writing to stderr so stdout carries only the output
fn init_logging(log_level: &str, log_format: LogFormat) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        LogFormat::Pretty => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
        LogFormat::Json => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
    }

    Ok(())
}
