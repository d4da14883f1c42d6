//! Predict command: classify one patient against the reference dataset.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use cardio_io::{IoError, parse_cell, read_patient_json};
use cardio_knn::{KnnError, Prediction};

use crate::cli::PredictArgs;
use crate::config::CardioConfig;
use crate::convert::Settings;

/// Run the single-patient prediction.
pub fn run(args: PredictArgs, config: &CardioConfig) -> Result<()> {
    let _cmd = info_span!("predict").entered();
    let settings = Settings::resolve(config, &args.dataset)?;

    // 1. Build the query vector
    let query = match (&args.patient, &args.features) {
        (Some(path), _) => {
            let record = read_patient_json(path)
                .with_context(|| format!("failed to read patient record: {}", path.display()))?;
            record.to_features()?.to_vec()
        }
        (None, Some(raw)) => parse_features(raw)?,
        (None, None) => bail!("either --patient or --features is required"),
    };
    check_arity(&query, settings.reader.n_features())?;

    // 2. Load and scale the reference table
    let reference = settings.load_reference()?;

    // 3. Predict
    let prediction = reference
        .predict(&query, &settings.knn)
        .context("prediction failed")?;
    info!(label = prediction.label(), "prediction complete");

    println!("The result is: {}", prediction.answer());
    if args.explain {
        print!("{}", explain(&prediction, reference.labels()));
    }
    Ok(())
}

/// Rejects a query that does not have one value per dataset feature.
pub fn check_arity(query: &[i64], n_features: usize) -> Result<(), KnnError> {
    if query.len() != n_features {
        return Err(KnnError::QueryArity {
            query: query.len(),
            n_features,
        });
    }
    Ok(())
}

/// Parses command-line feature values with the dataset cell grammar.
pub fn parse_features(raw: &[String]) -> Result<Vec<i64>, IoError> {
    raw.iter()
        .enumerate()
        .map(|(i, s)| {
            parse_cell(s).ok_or_else(|| IoError::InvalidPayload {
                reason: format!("feature {i}: not a number: {s:?}"),
            })
        })
        .collect()
}

/// Renders the neighbors and vote of a prediction.
pub fn explain(prediction: &Prediction, labels: &[u8]) -> String {
    let mut out = String::new();
    for (&row, &dist) in prediction.neighbors().iter().zip(prediction.distances()) {
        out.push_str(&format!(
            "  neighbor row {row}: distance {dist:.4}, label {}\n",
            labels[row]
        ));
    }
    let votes = prediction.votes();
    out.push_str(&format!(
        "  votes: {} for label 1, {} for label 0 -> label {}\n",
        votes.positive,
        votes.negative,
        prediction.label()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_knn::{FailureKind, knn_predict};

    #[test]
    fn features_from_strings() {
        let raw: Vec<String> = ["63", " 1", "2.3", "-4"].iter().map(|s| s.to_string()).collect();
        assert_eq!(parse_features(&raw).unwrap(), vec![63, 1, 2, -4]);
    }

    #[test]
    fn bad_feature_named_in_error() {
        let raw = vec!["1".to_string(), "high".to_string()];
        let err = parse_features(&raw).unwrap_err();
        assert!(err.to_string().contains("feature 1"));
        assert_eq!(err.kind(), FailureKind::BadInput);
    }

    #[test]
    fn wrong_length_query_is_bad_input() {
        let err = check_arity(&[63, 1, 3], 13).unwrap_err();
        assert_eq!(
            err,
            KnnError::QueryArity {
                query: 3,
                n_features: 13
            }
        );
        assert_eq!(err.kind(), FailureKind::BadInput);
        assert!(check_arity(&[0; 13], 13).is_ok());
    }

    #[test]
    fn wrong_length_query_kind_survives_context() {
        let err = anyhow::Error::from(check_arity(&[1], 2).unwrap_err()).context("predict");
        assert_eq!(crate::failure_kind(&err), Some(FailureKind::BadInput));
    }

    #[test]
    fn explain_lists_neighbors() {
        let labels = [0, 1, 1];
        let p = knn_predict(&[0.9], &[0.0, 0.8, 1.0], 1, &labels, 2).unwrap();
        let text = explain(&p, &labels);
        assert!(text.contains("neighbor row 1"));
        assert!(text.contains("neighbor row 2"));
        assert!(text.contains("2 for label 1, 0 for label 0 -> label 1"));
    }
}
