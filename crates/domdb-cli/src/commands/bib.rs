//! Bib command - convert case files to BibTeX.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;

use domdb_core::convert_to_bib;

use super::{load_config, resolve_path};

/// Arguments for the bib command.
#[derive(Args)]
pub struct BibArgs {
    /// Maximum number of cases to convert (0 = all)
    #[arg(short, long, default_value = "0")]
    number: usize,

    /// Directory with case JSON files
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Output BibTeX file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: BibArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let directory = resolve_path(&args.directory.unwrap_or(config.paths.cases_directory));
    let output = resolve_path(&args.output.unwrap_or(config.paths.bib_output));

    let count = convert_to_bib(&directory, &output, args.number)?;
    println!(
        "{}",
        style(format!("Converted {} unique cases to {}", count, output.display())).green()
    );

    Ok(())
}
