use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cardio nearest-neighbor heart disease classifier.
#[derive(Parser)]
#[command(
    name = "cardio",
    version,
    about = "Nearest-neighbor heart disease classifier"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file (defaults apply if it is absent).
    #[arg(short, long, global = true, default_value = "cardio.toml")]
    pub config: PathBuf,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Classify a single patient.
    Predict(PredictArgs),
    /// Classify every row of a query CSV in parallel.
    Batch(BatchArgs),
    /// Summarise the reference dataset.
    Inspect(InspectArgs),
}

/// Overrides shared by every subcommand that loads the dataset.
#[derive(clap::Args, Debug, Default)]
pub struct DatasetArgs {
    /// Override the reference dataset path from config.
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Override the neighbor count from config.
    #[arg(short)]
    pub k: Option<usize>,
}

/// Arguments for the `predict` subcommand.
#[derive(clap::Args)]
#[command(group(clap::ArgGroup::new("query").required(true).args(["patient", "features"])))]
pub struct PredictArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// JSON file holding one patient record.
    #[arg(short, long)]
    pub patient: Option<PathBuf>,

    /// Feature values in dataset column order, comma-separated.
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub features: Option<Vec<String>>,

    /// Also print the neighbors and the vote.
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for the `batch` subcommand.
#[derive(clap::Args)]
pub struct BatchArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// CSV of query rows: a header line, then one feature vector per line.
    #[arg(short, long)]
    pub queries: PathBuf,

    /// Write predictions here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
}
