//! Patient records: the named form of a query vector.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IoError;
use crate::reader::N_FEATURES;

/// Feature names in storage order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "age",
    "sex",
    "chest_pain_type",
    "resting_blood_pressure",
    "cholesterol",
    "fasting_blood_sugar",
    "resting_ecg",
    "max_heart_rate",
    "exercise_induced_angina",
    "st_depression",
    "st_slope",
    "major_vessels",
    "thalassemia",
];

/// One patient's clinical attributes, as submitted for classification.
///
/// Field names follow the JSON payload accepted by the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientRecord {
    /// Age in years.
    pub age: i64,
    /// Sex (1 = male, 0 = female).
    pub gender: i64,
    /// Chest pain type, 0-3.
    pub chest_pain: i64,
    /// Resting blood pressure in mm Hg.
    pub resting_blood_pressure: i64,
    /// Serum cholesterol in mg/dl.
    pub cholestoral_in_mg: i64,
    /// Fasting blood sugar above 120 mg/dl (1) or not (0).
    pub fasting_blood_sugar: i64,
    /// Resting electrocardiographic result, 0-2.
    pub resting_electrocardiographic_results: i64,
    /// Maximum heart rate achieved.
    pub maximum_heart_rate_achieved: i64,
    /// Exercise-induced angina (1) or not (0).
    pub exercise_induced_angina: i64,
    /// ST depression; the only fractional attribute.
    pub previous_peak: f64,
    /// Slope of the peak exercise ST segment, 0-2.
    pub slope_of_the_peak_exercise: i64,
    /// Number of major vessels colored by fluoroscopy, 0-3.
    pub number_of_major_vessels: i64,
    /// Thalassemia code.
    pub thalassemia: i64,
}

impl PatientRecord {
    /// Returns the query vector in storage order.
    ///
    /// `previous_peak` is truncated toward zero, like fractional cells in the
    /// reference dataset.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidPayload`] if `previous_peak` is not finite.
    pub fn to_features(&self) -> Result<[i64; N_FEATURES], IoError> {
        if !self.previous_peak.is_finite() {
            return Err(IoError::InvalidPayload {
                reason: format!("previous_peak must be finite, got {}", self.previous_peak),
            });
        }
        Ok([
            self.age,
            self.gender,
            self.chest_pain,
            self.resting_blood_pressure,
            self.cholestoral_in_mg,
            self.fasting_blood_sugar,
            self.resting_electrocardiographic_results,
            self.maximum_heart_rate_achieved,
            self.exercise_induced_angina,
            self.previous_peak.trunc() as i64,
            self.slope_of_the_peak_exercise,
            self.number_of_major_vessels,
            self.thalassemia,
        ])
    }
}

/// Decodes a patient record from JSON text.
///
/// # Errors
///
/// Returns [`IoError::InvalidPayload`] on malformed JSON, missing or unknown
/// fields, or wrongly typed values.
pub fn parse_patient_json(text: &str) -> Result<PatientRecord, IoError> {
    serde_json::from_str(text).map_err(|e| IoError::InvalidPayload {
        reason: e.to_string(),
    })
}

/// Reads and decodes a patient record from a JSON file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] / [`IoError::Read`] if the file cannot
/// be read, and [`IoError::InvalidPayload`] if it cannot be decoded.
pub fn read_patient_json(path: &Path) -> Result<PatientRecord, IoError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IoError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => IoError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;
    parse_patient_json(&text)
}
