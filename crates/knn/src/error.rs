//! Error types for the cardio-knn crate.

/// Coarse classification of a failure, as seen by the caller of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The query itself is unusable (wrong arity, non-finite, rejected range).
    BadInput,
    /// The reference dataset could not be read or is unusable.
    DataUnavailable,
    /// An internal precondition of the predictor was broken (k, shapes).
    Precondition,
}

/// Error type for all fallible operations in the cardio-knn crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnnError {
    /// Returned when k is zero.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// Returned when k is larger than the number of reference rows.
    #[error("k = {k} exceeds the {n_rows} available reference rows")]
    KExceedsReference {
        /// Requested neighbor count.
        k: usize,
        /// Number of reference rows.
        n_rows: usize,
    },

    /// Returned when the reference table has no rows.
    #[error("reference table is empty")]
    EmptyReference,

    /// Returned when n_features is zero.
    #[error("n_features must be >= 1")]
    ZeroFeatures,

    /// Returned when the flat feature matrix is not a whole number of rows.
    #[error("reference length {len} is not divisible by n_features {n_features}")]
    ReferenceShapeMismatch {
        /// Length of the flat feature slice.
        len: usize,
        /// Expected number of features per row.
        n_features: usize,
    },

    /// Returned when the label sequence is not index-aligned with the rows.
    #[error("{labels} labels for {n_rows} reference rows")]
    LabelCountMismatch {
        /// Number of labels supplied.
        labels: usize,
        /// Number of reference rows.
        n_rows: usize,
    },

    /// Returned when a label is neither 0 nor 1.
    #[error("label at row {row} is {label}, expected 0 or 1")]
    InvalidLabel {
        /// Row index of the offending label.
        row: usize,
        /// The label value.
        label: u8,
    },

    /// Returned when a raw query submitted by a caller does not have one
    /// value per feature.
    #[error("query has {query} values, expected {n_features}")]
    QueryArity {
        /// Number of values supplied.
        query: usize,
        /// Number of features in the reference table.
        n_features: usize,
    },

    /// Returned when the scaled query handed to the predictor does not have
    /// one value per feature.
    #[error("query length {query} does not match n_features {n_features}")]
    QueryDimensionMismatch {
        /// Length of the query vector.
        query: usize,
        /// Expected number of features.
        n_features: usize,
    },

    /// Returned when an empty vector is passed to the scaler.
    #[error("cannot scale an empty vector")]
    EmptyVector,

    /// Returned when a scaled query contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Returned under [`ZeroRange::Reject`](crate::ZeroRange::Reject) when
    /// min == max.
    #[error("zero value range in {context}")]
    DegenerateRange {
        /// Where the range collapsed.
        context: RangeContext,
    },
}

/// Location of a degenerate (zero-width) value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeContext {
    /// A reference table column.
    Column(usize),
    /// The query vector.
    Query,
}

impl std::fmt::Display for RangeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeContext::Column(c) => write!(f, "reference column {c}"),
            RangeContext::Query => f.write_str("query vector"),
        }
    }
}

impl KnnError {
    /// Classifies this error for the caller.
    pub fn kind(&self) -> FailureKind {
        match self {
            KnnError::QueryArity { .. }
            | KnnError::NonFiniteInput { .. }
            | KnnError::EmptyVector
            | KnnError::DegenerateRange {
                context: RangeContext::Query,
            } => FailureKind::BadInput,
            KnnError::EmptyReference
            | KnnError::InvalidLabel { .. }
            | KnnError::DegenerateRange {
                context: RangeContext::Column(_),
            } => FailureKind::DataUnavailable,
            KnnError::InvalidK { .. }
            | KnnError::KExceedsReference { .. }
            | KnnError::ZeroFeatures
            | KnnError::ReferenceShapeMismatch { .. }
            | KnnError::LabelCountMismatch { .. }
            | KnnError::QueryDimensionMismatch { .. } => FailureKind::Precondition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_k() {
        let e = KnnError::InvalidK { k: 0 };
        assert_eq!(e.to_string(), "k must be >= 1, got 0");
    }

    #[test]
    fn error_k_exceeds_reference() {
        let e = KnnError::KExceedsReference { k: 5, n_rows: 4 };
        assert_eq!(
            e.to_string(),
            "k = 5 exceeds the 4 available reference rows"
        );
    }

    #[test]
    fn error_reference_shape_mismatch() {
        let e = KnnError::ReferenceShapeMismatch {
            len: 10,
            n_features: 3,
        };
        assert_eq!(
            e.to_string(),
            "reference length 10 is not divisible by n_features 3"
        );
    }

    #[test]
    fn error_query_dimension_mismatch() {
        let e = KnnError::QueryDimensionMismatch {
            query: 12,
            n_features: 13,
        };
        assert_eq!(e.to_string(), "query length 12 does not match n_features 13");
    }

    #[test]
    fn error_query_arity() {
        let e = KnnError::QueryArity {
            query: 14,
            n_features: 13,
        };
        assert_eq!(e.to_string(), "query has 14 values, expected 13");
    }

    #[test]
    fn error_degenerate_range() {
        let e = KnnError::DegenerateRange {
            context: RangeContext::Column(4),
        };
        assert_eq!(e.to_string(), "zero value range in reference column 4");
        let e = KnnError::DegenerateRange {
            context: RangeContext::Query,
        };
        assert_eq!(e.to_string(), "zero value range in query vector");
    }

    #[test]
    fn error_invalid_label() {
        let e = KnnError::InvalidLabel { row: 2, label: 7 };
        assert_eq!(e.to_string(), "label at row 2 is 7, expected 0 or 1");
    }

    #[test]
    fn kinds() {
        assert_eq!(
            KnnError::NonFiniteInput { input: "query" }.kind(),
            FailureKind::BadInput
        );
        assert_eq!(
            KnnError::DegenerateRange {
                context: RangeContext::Query
            }
            .kind(),
            FailureKind::BadInput
        );
        assert_eq!(
            KnnError::DegenerateRange {
                context: RangeContext::Column(0)
            }
            .kind(),
            FailureKind::DataUnavailable
        );
        assert_eq!(KnnError::EmptyReference.kind(), FailureKind::DataUnavailable);
        assert_eq!(
            KnnError::KExceedsReference { k: 3, n_rows: 2 }.kind(),
            FailureKind::Precondition
        );
        assert_eq!(
            KnnError::QueryDimensionMismatch {
                query: 1,
                n_features: 2
            }
            .kind(),
            FailureKind::Precondition
        );
        assert_eq!(
            KnnError::QueryArity {
                query: 1,
                n_features: 2
            }
            .kind(),
            FailureKind::BadInput
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<KnnError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<KnnError>();
    }
}
