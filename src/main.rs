mod batch_cmd;
mod cli;
mod config;
mod convert;
mod inspect_cmd;
mod logging;
mod predict_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use cardio_io::IoError;
use cardio_knn::{FailureKind, KnnError};

use crate::cli::{Cli, Command};
use crate::config::CardioConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        match failure_kind(&e) {
            Some(kind) => eprintln!("Error ({kind:?}): {e:#}"),
            None => eprintln!("Error: {e:#}"),
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = CardioConfig::load(&cli.config)?;
    match cli.command {
        Command::Predict(args) => predict_cmd::run(args, &config),
        Command::Batch(args) => batch_cmd::run(args, &config),
        Command::Inspect(args) => inspect_cmd::run(args, &config),
    }
}

/// Finds the library failure class anywhere in the error chain.
fn failure_kind(e: &anyhow::Error) -> Option<FailureKind> {
    e.chain().find_map(|cause| {
        cause
            .downcast_ref::<IoError>()
            .map(IoError::kind)
            .or_else(|| cause.downcast_ref::<KnnError>().map(KnnError::kind))
    })
}
