//! Integration tests for KnnError variants and their classification.

use cardio_knn::{
    FailureKind, KnnConfig, KnnError, QueryScaling, RangeContext, ReferenceTable,
    ScaledReference, ZeroRange, knn_predict,
};

fn reference() -> ScaledReference {
    let table = ReferenceTable::new(vec![0, 1, 2, 3, 4, 5], vec![0, 1, 1], 2).unwrap();
    ScaledReference::fit(&table, &KnnConfig::default()).unwrap()
}

#[test]
fn error_k_larger_than_table_is_not_clamped() {
    let result = reference().predict(&[1, 2], &KnnConfig::new(4));
    let err = result.unwrap_err();
    assert_eq!(err, KnnError::KExceedsReference { k: 4, n_rows: 3 });
    assert_eq!(err.kind(), FailureKind::Precondition);
}

#[test]
fn error_invalid_k() {
    let err = reference().predict(&[1, 2], &KnnConfig::new(0)).unwrap_err();
    assert_eq!(err, KnnError::InvalidK { k: 0 });
    assert_eq!(err.kind(), FailureKind::Precondition);
}

#[test]
fn error_query_wrong_length() {
    let err = reference()
        .predict(&[1, 2, 3], &KnnConfig::new(1))
        .unwrap_err();
    assert!(matches!(
        err,
        KnnError::QueryArity {
            query: 3,
            n_features: 2
        }
    ));
    assert_eq!(err.kind(), FailureKind::BadInput);
}

#[test]
fn error_query_wrong_length_with_reference_range() {
    let config = KnnConfig::new(1).with_query_scaling(QueryScaling::ReferenceRange);
    let err = reference().predict(&[1], &config).unwrap_err();
    assert_eq!(
        err,
        KnnError::QueryArity {
            query: 1,
            n_features: 2
        }
    );
    assert_eq!(err.kind(), FailureKind::BadInput);
}

#[test]
fn error_scaled_query_wrong_length_is_precondition() {
    let err = knn_predict(&[0.0], &[0.0, 0.0], 2, &[0], 1).unwrap_err();
    assert_eq!(
        err,
        KnnError::QueryDimensionMismatch {
            query: 1,
            n_features: 2
        }
    );
    assert_eq!(err.kind(), FailureKind::Precondition);
}

#[test]
fn error_reference_shape() {
    let result = knn_predict(&[0.0, 0.0], &[0.0, 0.0, 0.0], 2, &[0], 1);
    assert!(matches!(
        result,
        Err(KnnError::ReferenceShapeMismatch {
            len: 3,
            n_features: 2
        })
    ));
}

#[test]
fn error_infinite_query() {
    let err = knn_predict(&[f32::INFINITY], &[0.0], 1, &[0], 1).unwrap_err();
    assert_eq!(err, KnnError::NonFiniteInput { input: "query" });
    assert_eq!(err.kind(), FailureKind::BadInput);
}

#[test]
fn error_rejected_constant_column() {
    let table = ReferenceTable::new(vec![3, 3, 3], vec![0, 1, 0], 1).unwrap();
    let config = KnnConfig::new(1).with_zero_range(ZeroRange::Reject);
    let err = ScaledReference::fit(&table, &config).unwrap_err();
    assert_eq!(
        err,
        KnnError::DegenerateRange {
            context: RangeContext::Column(0)
        }
    );
    assert_eq!(err.kind(), FailureKind::DataUnavailable);
}

#[test]
fn error_rejected_constant_query() {
    let config = KnnConfig::new(1).with_zero_range(ZeroRange::Reject);
    let err = reference().predict(&[9, 9], &config).unwrap_err();
    assert_eq!(err.kind(), FailureKind::BadInput);
}

#[test]
fn error_empty_table() {
    let err = ReferenceTable::new(vec![], vec![], 13).unwrap_err();
    assert_eq!(err, KnnError::EmptyReference);
    assert_eq!(err.kind(), FailureKind::DataUnavailable);
}

#[test]
fn error_zero_features() {
    let err = ReferenceTable::new(vec![1], vec![0], 0).unwrap_err();
    assert_eq!(err, KnnError::ZeroFeatures);
}
