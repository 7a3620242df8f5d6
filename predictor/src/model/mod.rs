pub mod artifact;
pub mod ensemble;
pub mod linear;
pub mod record;

use std::collections::BTreeSet;

use common::{Error, Result};

pub use artifact::{load_artifact, parse_artifact};
pub use record::{FeatureValue, ReservationRecord};

/// Opaque pre-trained binary classifier.
///
/// `predict` yields one label per record: 0 (not cancelled) or 1 (cancelled).
/// Probability estimation is an optional capability, probed through
/// [`Classifier::probability_estimator`].
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    fn predict(&self, record: &ReservationRecord) -> Result<Vec<i64>>;

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        None
    }
}

pub trait ProbabilityEstimator: Send + Sync {
    /// Per-class probabilities, one row per record, indexed by label.
    fn predict_proba(&self, record: &ReservationRecord) -> Result<Vec<Vec<f64>>>;
}

/// Fails unless the record's column set equals `expected` exactly.
pub fn check_schema(expected: &[String], record: &ReservationRecord) -> Result<()> {
    let expected: BTreeSet<&str> = expected.iter().map(String::as_str).collect();
    let actual: BTreeSet<&str> = record.names().collect();

    if expected == actual {
        return Ok(());
    }

    let missing: Vec<&str> = expected.difference(&actual).copied().collect();
    let unexpected: Vec<&str> = actual.difference(&expected).copied().collect();
    Err(Error::SchemaMismatch(format!(
        "columns are missing: {:?}; columns not seen during fit: {:?}",
        missing, unexpected
    )))
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

pub(crate) fn numeric_feature(record: &ReservationRecord, name: &str) -> Result<f64> {
    record
        .get(name)
        .ok_or_else(|| Error::SchemaMismatch(format!("column '{}' is missing", name)))?
        .as_f64()
        .ok_or_else(|| Error::InvalidFeature(format!("column '{}' is not numeric", name)))
}
