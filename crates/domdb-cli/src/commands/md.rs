//! Md command - convert case files to Markdown.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;

use domdb_core::convert_to_md;

use super::{load_config, resolve_path};

/// Arguments for the md command.
#[derive(Args)]
pub struct MdArgs {
    /// Maximum number of cases to convert (0 = all)
    #[arg(short, long, default_value = "0")]
    number: usize,

    /// Directory with case JSON files
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Output Markdown file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write one cases_{year}.md file per verdict year next to the output
    #[arg(long)]
    split_by_year: bool,
}

pub async fn run(args: MdArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let directory = resolve_path(&args.directory.unwrap_or(config.paths.cases_directory));
    let output = resolve_path(&args.output.unwrap_or(config.paths.md_output));

    let count = convert_to_md(&directory, &output, args.number, args.split_by_year)?;
    println!(
        "{}",
        style(format!("Converted {} unique cases to {}", count, output.display())).green()
    );

    Ok(())
}
