//! Configuration for nearest-neighbor prediction.

use crate::error::KnnError;

/// Neighbor count used by the serving path.
pub const DEFAULT_K: usize = 3;

/// What to do when a column (or the query vector) has `max == min`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroRange {
    /// Every value of the degenerate range scales to `0.0`.
    #[default]
    Zero,
    /// Fail with [`KnnError::DegenerateRange`].
    Reject,
}

/// How the query vector is min-max scaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryScaling {
    /// Min and max are taken across the query's own values.
    ///
    /// This differs from the per-column scaling of the reference table and is
    /// kept for compatibility with existing predictions.
    #[default]
    SelfRange,
    /// Each query value is scaled with its reference column's min and max.
    /// Results are not clamped to `[0, 1]`.
    ReferenceRange,
}

/// Configuration for a prediction.
///
/// # Example
///
/// ```
/// use cardio_knn::{KnnConfig, QueryScaling, ZeroRange};
///
/// let config = KnnConfig::new(5)
///     .with_zero_range(ZeroRange::Reject)
///     .with_query_scaling(QueryScaling::ReferenceRange);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KnnConfig {
    /// Number of nearest neighbors that vote.
    k: usize,
    /// Degenerate range policy, shared by both scaling paths.
    zero_range: ZeroRange,
    /// Query scaling mode.
    query_scaling: QueryScaling,
}

impl KnnConfig {
    /// Creates a new configuration with the given k.
    ///
    /// Defaults: `zero_range = Zero`, `query_scaling = SelfRange`.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            zero_range: ZeroRange::Zero,
            query_scaling: QueryScaling::SelfRange,
        }
    }

    /// Sets the degenerate range policy.
    pub fn with_zero_range(mut self, zero_range: ZeroRange) -> Self {
        self.zero_range = zero_range;
        self
    }

    /// Sets the query scaling mode.
    pub fn with_query_scaling(mut self, query_scaling: QueryScaling) -> Self {
        self.query_scaling = query_scaling;
        self
    }

    /// Returns the number of nearest neighbors.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the degenerate range policy.
    pub fn zero_range(&self) -> ZeroRange {
        self.zero_range
    }

    /// Returns the query scaling mode.
    pub fn query_scaling(&self) -> QueryScaling {
        self.query_scaling
    }

    /// Validates this configuration.
    ///
    /// Only `k >= 1` is checked here; the upper bound depends on the
    /// reference table and is checked at prediction time.
    pub fn validate(&self) -> Result<(), KnnError> {
        if self.k < 1 {
            return Err(KnnError::InvalidK { k: self.k });
        }
        Ok(())
    }
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self::new(DEFAULT_K)
    }
}
