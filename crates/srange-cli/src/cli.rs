use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "srange - worst-case stress range and stress intensity search for fatigue qualification.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the analysis described by a case file.
    Run(RunArgs),
    /// Load a case file and check the consistency of its states, torsors and coefficients.
    Check(CheckArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the case file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub case: PathBuf,

    /// Write the search report to this TOML file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Analysis Overrides ---
    /// Override the analysis type: 'intensity', 'range' or 'range-ratio'.
    #[arg(short, long, value_name = "TYPE")]
    pub analysis: Option<String>,

    /// Override the equivalent stress method:
    /// 'tresca', 'mises', 'reduced_mises' or 'reduced_mises_strict'.
    #[arg(short, long, value_name = "METHOD")]
    pub method: Option<String>,

    /// Override the pair explorer: 'square', 'triangular' or 'superior-triangular'.
    #[arg(short, long, value_name = "KIND")]
    pub explorer: Option<String>,

    /// Override the coefficient key used by 'range-ratio'.
    #[arg(long, value_name = "KEY")]
    pub coefficient: Option<String>,

    /// Override the explored states. Example: --states 0-3,7
    #[arg(long, value_name = "LIST")]
    pub states: Option<String>,

    /// Cancel the search once this many seconds have elapsed.
    #[arg(long, value_name = "SECONDS")]
    pub time_limit: Option<f64>,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Set a specific configuration value, overriding the case file.
    /// Can be used multiple times. Example: -S analysis.method=mises
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the case file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub case: PathBuf,
}
