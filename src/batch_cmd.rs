//! Batch command: classify many query rows in parallel.

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{info, info_span};

use cardio_io::read_queries_csv;
use cardio_knn::{KnnConfig, KnnScratch, Prediction, ReferenceStore, ScaledReference};

use crate::cli::BatchArgs;
use crate::config::CardioConfig;
use crate::convert::Settings;

/// Run the batch prediction.
pub fn run(args: BatchArgs, config: &CardioConfig) -> Result<()> {
    let _cmd = info_span!("batch").entered();
    let settings = Settings::resolve(config, &args.dataset)?;

    // 1. Read queries
    info!(path = %args.queries.display(), "reading query rows");
    let queries = read_queries_csv(&args.queries, settings.reader.n_features())
        .with_context(|| format!("failed to read queries: {}", args.queries.display()))?;
    if queries.is_empty() {
        bail!("query file contains no rows");
    }

    // 2. Publish the reference table
    let store = ReferenceStore::new(settings.load_reference()?);

    // 3. Predict against one shared snapshot
    let predictions = predict_all(store.snapshot(), &queries, &settings.knn)?;
    info!(n = predictions.len(), "batch predictions complete");

    // 4. Write results
    match &args.output {
        Some(path) => write_predictions(csv::Writer::from_path(path).with_context(|| {
            format!("failed to create output file: {}", path.display())
        })?, &predictions),
        None => write_predictions(csv::Writer::from_writer(io::stdout().lock()), &predictions),
    }
    .with_context(|| {
        let dest = args.output.as_deref().unwrap_or(Path::new("stdout"));
        format!("failed to write predictions to {}", dest.display())
    })
}

/// Predicts every query in parallel, preserving input order.
pub fn predict_all(
    reference: Arc<ScaledReference>,
    queries: &[Vec<i64>],
    knn: &KnnConfig,
) -> Result<Vec<Prediction>> {
    let n_rows = reference.n_rows();
    queries
        .par_iter()
        .enumerate()
        .map_init(
            || KnnScratch::new(n_rows),
            |scratch, (i, query)| {
                reference
                    .predict_with_scratch(query, knn, scratch)
                    .with_context(|| format!("prediction failed for query row {i}"))
            },
        )
        .collect()
}

fn write_predictions<W: io::Write>(mut writer: csv::Writer<W>, predictions: &[Prediction]) -> Result<()> {
    writer.write_record(["row", "label", "answer"])?;
    for (i, p) in predictions.iter().enumerate() {
        writer.write_record([i.to_string(), p.label().to_string(), p.answer().to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
