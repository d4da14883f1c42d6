//! Conversion functions: TOML config structs -> crate API config types.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use cardio_io::{CellPolicy, LoadedTable, ReaderConfig, read_reference_csv};
use cardio_knn::{KnnConfig, QueryScaling, ScaledReference, ZeroRange};

use crate::cli::DatasetArgs;
use crate::config::{CardioConfig, DatasetToml, KnnToml};

/// Parses a malformed cell policy name.
pub fn parse_cell_policy(s: &str) -> Result<CellPolicy> {
    match s.to_lowercase().as_str() {
        "strict" => Ok(CellPolicy::Strict),
        "skip_row" => Ok(CellPolicy::SkipRow),
        "zero_fill" => Ok(CellPolicy::ZeroFill),
        other => bail!("unknown cell policy: {other:?}"),
    }
}

/// Parses a degenerate range policy name.
pub fn parse_zero_range(s: &str) -> Result<ZeroRange> {
    match s.to_lowercase().as_str() {
        "zero" => Ok(ZeroRange::Zero),
        "reject" => Ok(ZeroRange::Reject),
        other => bail!("unknown zero_range policy: {other:?}"),
    }
}

/// Parses a query scaling mode name.
pub fn parse_query_scaling(s: &str) -> Result<QueryScaling> {
    match s.to_lowercase().as_str() {
        "self_range" => Ok(QueryScaling::SelfRange),
        "reference_range" => Ok(QueryScaling::ReferenceRange),
        other => bail!("unknown query scaling: {other:?}"),
    }
}

/// Builds a [`ReaderConfig`] from the TOML dataset configuration.
pub fn build_reader_config(dataset: &DatasetToml) -> Result<ReaderConfig> {
    if dataset.n_features == 0 {
        bail!("[dataset].n_features must be >= 1");
    }
    Ok(ReaderConfig::default()
        .with_n_features(dataset.n_features)
        .with_cell_policy(parse_cell_policy(&dataset.cell_policy)?))
}

/// Builds a [`KnnConfig`] from the TOML knn configuration.
pub fn build_knn_config(knn: &KnnToml, k_override: Option<usize>) -> Result<KnnConfig> {
    let cfg = KnnConfig::new(k_override.unwrap_or(knn.k))
        .with_zero_range(parse_zero_range(&knn.zero_range)?)
        .with_query_scaling(parse_query_scaling(&knn.query_scaling)?);
    cfg.validate().context("invalid [knn] configuration")?;
    Ok(cfg)
}

/// Everything a subcommand needs to load and query the reference table.
#[derive(Debug)]
pub struct Settings {
    pub dataset: PathBuf,
    pub reader: ReaderConfig,
    pub knn: KnnConfig,
}

impl Settings {
    /// Combines the config file with command-line overrides.
    pub fn resolve(config: &CardioConfig, args: &DatasetArgs) -> Result<Self> {
        Ok(Self {
            dataset: args
                .dataset
                .clone()
                .unwrap_or_else(|| config.dataset.path.clone()),
            reader: build_reader_config(&config.dataset)?,
            knn: build_knn_config(&config.knn, args.k)?,
        })
    }

    /// Reads the reference dataset.
    pub fn load_table(&self) -> Result<LoadedTable> {
        info!(path = %self.dataset.display(), "reading reference dataset");
        read_reference_csv(&self.dataset, &self.reader).with_context(|| {
            format!("failed to load reference dataset: {}", self.dataset.display())
        })
    }

    /// Reads and scales the reference dataset.
    pub fn load_reference(&self) -> Result<ScaledReference> {
        let loaded = self.load_table()?;
        ScaledReference::fit(&loaded.table, &self.knn).context("failed to scale reference table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_names() {
        assert_eq!(parse_cell_policy("strict").unwrap(), CellPolicy::Strict);
        assert_eq!(parse_cell_policy("Skip_Row").unwrap(), CellPolicy::SkipRow);
        assert_eq!(parse_cell_policy("zero_fill").unwrap(), CellPolicy::ZeroFill);
        assert!(parse_cell_policy("lenient").is_err());

        assert_eq!(parse_zero_range("reject").unwrap(), ZeroRange::Reject);
        assert!(parse_zero_range("nan").is_err());

        assert_eq!(
            parse_query_scaling("reference_range").unwrap(),
            QueryScaling::ReferenceRange
        );
        assert!(parse_query_scaling("global").is_err());
    }

    #[test]
    fn k_override_wins() {
        let cfg = build_knn_config(&KnnToml::default(), Some(7)).unwrap();
        assert_eq!(cfg.k(), 7);
        let cfg = build_knn_config(&KnnToml::default(), None).unwrap();
        assert_eq!(cfg.k(), 3);
    }

    #[test]
    fn zero_k_rejected() {
        let knn = KnnToml {
            k: 0,
            ..KnnToml::default()
        };
        assert!(build_knn_config(&knn, None).is_err());
    }

    #[test]
    fn zero_features_rejected() {
        let dataset = DatasetToml {
            n_features: 0,
            ..DatasetToml::default()
        };
        assert!(build_reader_config(&dataset).is_err());
    }

    #[test]
    fn dataset_override() {
        let args = DatasetArgs {
            dataset: Some(PathBuf::from("other.csv")),
            k: None,
        };
        let settings = Settings::resolve(&CardioConfig::default(), &args).unwrap();
        assert_eq!(settings.dataset, PathBuf::from("other.csv"));
        assert_eq!(settings.knn.k(), 3);
    }
}
