//! CLI application for citing Danish court verdicts from domsdatabasen.dk.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{bib, config, evid, get, md};

/// domdb - Fetch Danish court verdicts and export them as citations
#[derive(Parser)]
#[command(name = "domdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the next page of cases from the API
    Get(get::GetArgs),

    /// Convert case files to a BibTeX file
    Bib(bib::BibArgs),

    /// Convert case files to Markdown
    Md(md::MdArgs),

    /// Convert case files to EVID directories
    J2e(evid::EvidArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stdout carries command results only
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Get(args) => get::run(args, config_path).await,
        Commands::Bib(args) => bib::run(args, config_path).await,
        Commands::Md(args) => md::run(args, config_path).await,
        Commands::J2e(args) => evid::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
