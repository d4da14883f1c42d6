use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// Top-level cardio configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardioConfig {
    /// Reference dataset settings.
    #[serde(default)]
    pub dataset: DatasetToml,

    /// Prediction settings.
    #[serde(default)]
    pub knn: KnnToml,
}

impl CardioConfig {
    /// Reads the TOML file at `path`, or returns defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetToml {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
    #[serde(default = "default_n_features")]
    pub n_features: usize,
    #[serde(default = "default_cell_policy")]
    pub cell_policy: String,
}

impl Default for DatasetToml {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            n_features: default_n_features(),
            cell_policy: default_cell_policy(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("heart.csv")
}
fn default_n_features() -> usize {
    cardio_io::N_FEATURES
}
fn default_cell_policy() -> String {
    "strict".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnnToml {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_zero_range")]
    pub zero_range: String,
    #[serde(default = "default_query_scaling")]
    pub query_scaling: String,
}

impl Default for KnnToml {
    fn default() -> Self {
        Self {
            k: default_k(),
            zero_range: default_zero_range(),
            query_scaling: default_query_scaling(),
        }
    }
}

fn default_k() -> usize {
    cardio_knn::DEFAULT_K
}
fn default_zero_range() -> String {
    "zero".to_string()
}
fn default_query_scaling() -> String {
    "self_range".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: CardioConfig = toml::from_str("").unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("heart.csv"));
        assert_eq!(config.dataset.n_features, 13);
        assert_eq!(config.dataset.cell_policy, "strict");
        assert_eq!(config.knn.k, 3);
        assert_eq!(config.knn.zero_range, "zero");
        assert_eq!(config.knn.query_scaling, "self_range");
    }

    #[test]
    fn partial_sections() {
        let config: CardioConfig = toml::from_str(
            r#"
            [dataset]
            path = "data/heart.csv"
            cell_policy = "skip_row"

            [knn]
            k = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("data/heart.csv"));
        assert_eq!(config.dataset.n_features, 13);
        assert_eq!(config.dataset.cell_policy, "skip_row");
        assert_eq!(config.knn.k, 5);
        assert_eq!(config.knn.query_scaling, "self_range");
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<CardioConfig, _> = toml::from_str("[knn]\nneighbours = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CardioConfig::load(&dir.path().join("cardio.toml")).unwrap();
        assert_eq!(config.knn.k, 3);
    }

    #[test]
    fn bad_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardio.toml");
        std::fs::write(&path, "[knn\n").unwrap();
        let err = CardioConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse TOML config"));
    }
}
