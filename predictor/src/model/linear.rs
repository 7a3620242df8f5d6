use std::collections::BTreeMap;

use serde::Deserialize;

use common::{Error, Result};

use super::{
    check_schema, numeric_feature, sigmoid, Classifier, ProbabilityEstimator, ReservationRecord,
};

fn default_name() -> String {
    "logistic-regression".to_string()
}

fn default_threshold() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

/// Robust-scaler parameters: `(x - center) / scale`.
#[derive(Debug, Clone, Deserialize)]
pub struct Scaler {
    #[serde(default)]
    pub center: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRegressionModel {
    #[serde(default = "default_name")]
    pub name: String,
    pub input_features: Vec<String>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub numeric_weights: BTreeMap<String, f64>,
    /// One-hot weights; categories absent from the map contribute nothing.
    #[serde(default)]
    pub categorical_weights: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub scaling: BTreeMap<String, Scaler>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_true")]
    pub expose_probabilities: bool,
}

impl LogisticRegressionModel {
    pub fn validate(&self) -> Result<()> {
        let referenced = self
            .numeric_weights
            .keys()
            .chain(self.categorical_weights.keys())
            .chain(self.scaling.keys());
        for feature in referenced {
            if !self.input_features.contains(feature) {
                return Err(Error::InvalidArtifact(format!(
                    "weight references undeclared feature '{}'",
                    feature
                )));
            }
        }

        if let Some((feature, _)) = self
            .scaling
            .iter()
            .find(|(_, s)| s.scale == 0.0 || !s.scale.is_finite())
        {
            return Err(Error::InvalidArtifact(format!(
                "scaler for '{}' has a degenerate scale",
                feature
            )));
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidArtifact(format!(
                "threshold {} is outside [0, 1]",
                self.threshold
            )));
        }

        Ok(())
    }

    fn positive_probability(&self, record: &ReservationRecord) -> Result<f64> {
        check_schema(&self.input_features, record)?;

        let mut z = self.intercept;
        for (feature, weight) in &self.numeric_weights {
            let mut x = numeric_feature(record, feature)?;
            if let Some(scaler) = self.scaling.get(feature) {
                x = (x - scaler.center) / scaler.scale;
            }
            z += weight * x;
        }

        for (feature, weights) in &self.categorical_weights {
            let value = record
                .get(feature)
                .and_then(|v| v.as_category())
                .ok_or_else(|| {
                    Error::InvalidFeature(format!("column '{}' has no categorical value", feature))
                })?;
            z += weights.get(value.as_ref()).copied().unwrap_or(0.0);
        }

        Ok(sigmoid(z))
    }
}

impl Classifier for LogisticRegressionModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, record: &ReservationRecord) -> Result<Vec<i64>> {
        let p = self.positive_probability(record)?;
        Ok(vec![i64::from(p >= self.threshold)])
    }

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        if self.expose_probabilities {
            Some(self)
        } else {
            None
        }
    }
}

impl ProbabilityEstimator for LogisticRegressionModel {
    fn predict_proba(&self, record: &ReservationRecord) -> Result<Vec<Vec<f64>>> {
        let p = self.positive_probability(record)?;
        Ok(vec![vec![1.0 - p, p]])
    }
}
