//! J2e command - convert case files to EVID directories.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use domdb_core::{EvidLayout, convert_to_evid};

use super::{load_config, resolve_path};

/// Layout of generated EVID directories.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LayoutArg {
    /// label.typ with every page
    Typst,
    /// label.tex plus one text file per document
    Separate,
}

impl From<LayoutArg> for EvidLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Typst => EvidLayout::Typst,
            LayoutArg::Separate => EvidLayout::Separate,
        }
    }
}

/// Arguments for the j2e command.
#[derive(Args)]
pub struct EvidArgs {
    /// Maximum number of cases to convert (0 = all)
    #[arg(short, long, default_value = "0")]
    number: usize,

    /// Directory with case JSON files
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Root directory for EVID case directories
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Directory layout
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,
}

pub async fn run(args: EvidArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let directory = resolve_path(&args.directory.unwrap_or(config.paths.cases_directory));
    let output = resolve_path(&args.output.unwrap_or(config.paths.evid_output));
    let jobs = args.jobs.unwrap_or_else(|| config.conversion.worker_count());
    let layout = args.layout.map(EvidLayout::from).unwrap_or(config.conversion.evid_layout);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Building EVID directories with {} workers...", jobs));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = convert_to_evid(&directory, &output, args.number, layout, jobs).await;
    pb.finish_and_clear();

    let count = result?;
    println!(
        "{}",
        style(format!("Converted {} cases to EVID in {}", count, output.display())).green()
    );

    Ok(())
}
