use crate::utils::parser::{self, ObjectiveSpec};
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
    author = "The Optiscope Developers",
    version,
    about = "Optiscope CLI - Inspect tables of evaluated candidate solutions and extract their Pareto-optimal subset.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress bars except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the non-dominated rows of a table over two or three objective columns.
    Front(FrontArgs),
    /// Print the per-column minimum, maximum and mean of a table.
    Stats(StatsArgs),
}

/// Input table options shared by all subcommands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the input CSV file. The first row holds the column labels.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Field delimiter of the input file (a single ASCII character).
    #[arg(short, long, value_name = "CHAR", value_parser = parser::parse_delimiter)]
    pub delimiter: Option<u8>,
}

/// Arguments for the `front` subcommand.
#[derive(Args, Debug)]
pub struct FrontArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Path for the output CSV file. Defaults to standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a front configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Objective column to minimize, optionally with an explicit range.
    /// Give MIN > MAX to maximize. Repeat 2 or 3 times; replaces the objectives
    /// of the config file. Example: --objective cost --objective gain:100:0
    #[arg(long = "objective", value_name = "LABEL[:MIN:MAX]", value_parser = parser::parse_objective)]
    pub objectives: Vec<ObjectiveSpec>,

    /// Override the name of the resulting selection.
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,
}

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}
