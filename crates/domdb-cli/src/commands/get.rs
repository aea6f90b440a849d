//! Get command - fetch the next page of cases.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use domdb_core::download::{ApiClient, Credentials, load_next_batch};

use super::{load_config, resolve_path};

/// Arguments for the get command.
#[derive(Args)]
pub struct GetArgs {
    /// Directory for downloaded case pages
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

pub async fn run(args: GetArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let directory = resolve_path(&args.directory.unwrap_or(config.paths.cases_directory));

    let credentials = Credentials::from_env()?;
    let client = ApiClient::new(&config.api, credentials)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Fetching cases...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = load_next_batch(&client, &directory, config.api.batch_size).await;
    pb.finish_and_clear();

    let count = result?;
    println!("{}", style(format!("Successfully fetched {} cases", count)).green());

    Ok(())
}
