//! K-nearest neighbor binary classification against a fixed reference table.
//!
//! A query vector is min-max scaled, compared by Euclidean distance with every
//! scaled reference row, and assigned the majority label of its `k` nearest
//! rows.
//!
//! | Stage | Operation | Notes |
//! |-------|-----------|-------|
//! | Scale reference | per-column `(v - min) / (max - min)` | [`ScaledReference::fit`] |
//! | Scale query | across its own values, or against reference columns | [`QueryScaling`] |
//! | Distance | Euclidean, `f32` | [`euclidean`] |
//! | Select | k smallest, ties to the lower row index | non-mutating |
//! | Vote | label 1 if strictly more neighbors are 1, else 0 | even-k ties give 0 |
//!
//! Zero-width ranges are governed by [`ZeroRange`]: by default every value in
//! such a column (or query) scales to `0.0`.
//!
//! # Quick start
//!
//! ```
//! use cardio_knn::{KnnConfig, QueryScaling, ReferenceTable, ScaledReference};
//!
//! let table = ReferenceTable::new(vec![0, 0, 10, 10, 20, 20, 30, 30], vec![0, 0, 1, 1], 2).unwrap();
//! let config = KnnConfig::new(1).with_query_scaling(QueryScaling::ReferenceRange);
//! let reference = ScaledReference::fit(&table, &config).unwrap();
//!
//! let prediction = reference.predict(&[22, 22], &config).unwrap();
//! assert_eq!(prediction.label(), 1);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ScaledReference::predict()
//!   ├─ scale_vector() / scale_against()   (scale.rs)
//!   └─ knn_predict()                      (knn.rs)
//!        ├─ validate inputs
//!        ├─ euclidean_distances()         (distance.rs)
//!        ├─ select_k_nearest()            (select.rs)
//!        └─ Votes::majority()             (result.rs)
//! ```
//!
//! For concurrent callers, publish the scaled table through a
//! [`ReferenceStore`] and predict against [`ReferenceStore::snapshot`].

pub mod config;
pub mod error;
pub mod knn;
pub mod reference;
pub mod result;
pub mod scale;
pub mod store;

pub(crate) mod distance;
pub(crate) mod select;

pub use config::{DEFAULT_K, KnnConfig, QueryScaling, ZeroRange};
pub use distance::euclidean;
pub use error::{FailureKind, KnnError, RangeContext};
pub use knn::{KnnScratch, knn_predict, knn_predict_with_scratch};
pub use reference::{ReferenceTable, ScaledReference};
pub use result::{Prediction, Votes, answer_for};
pub use scale::{ColumnRange, ScaledColumns, scale_against, scale_columns, scale_vector};
pub use store::ReferenceStore;
