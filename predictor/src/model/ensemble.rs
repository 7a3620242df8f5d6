use serde::Deserialize;

use common::{Error, Result};

use super::{
    check_schema, numeric_feature, sigmoid, Classifier, ProbabilityEstimator, ReservationRecord,
};

fn default_name() -> String {
    "gradient-boosting".to_string()
}

fn default_learning_rate() -> f64 {
    1.0
}

fn default_threshold() -> f64 {
    0.5
}

/// Platt scaling applied to the raw ensemble margin.
#[derive(Debug, Clone, Deserialize)]
pub struct SigmoidCalibration {
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        value: f64,
    },
    /// `value <= threshold` goes left.
    Numeric {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Membership in `categories` goes left.
    Categorical {
        feature: String,
        categories: Vec<String>,
        left: usize,
        right: usize,
    },
}

/// Flat node array; node 0 is the root and children always sit after their parent.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn validate(&self, index: usize, input_features: &[String]) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::InvalidArtifact(format!("tree {} has no nodes", index)));
        }

        for (position, node) in self.nodes.iter().enumerate() {
            let (feature, left, right) = match node {
                Node::Leaf { .. } => continue,
                Node::Numeric {
                    feature,
                    left,
                    right,
                    ..
                }
                | Node::Categorical {
                    feature,
                    left,
                    right,
                    ..
                } => (feature, *left, *right),
            };

            if !input_features.iter().any(|f| f == feature) {
                return Err(Error::InvalidArtifact(format!(
                    "tree {} splits on undeclared feature '{}'",
                    index, feature
                )));
            }

            for child in [left, right] {
                if child <= position || child >= self.nodes.len() {
                    return Err(Error::InvalidArtifact(format!(
                        "tree {} node {} has invalid child index {}",
                        index, position, child
                    )));
                }
            }
        }

        Ok(())
    }

    fn evaluate(&self, record: &ReservationRecord) -> Result<f64> {
        let mut position = 0;
        loop {
            match &self.nodes[position] {
                Node::Leaf { value } => return Ok(*value),
                Node::Numeric {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = numeric_feature(record, feature)?;
                    position = if value <= *threshold { *left } else { *right };
                }
                Node::Categorical {
                    feature,
                    categories,
                    left,
                    right,
                } => {
                    let value = record
                        .get(feature)
                        .and_then(|v| v.as_category())
                        .ok_or_else(|| {
                            Error::InvalidFeature(format!(
                                "column '{}' has no categorical value",
                                feature
                            ))
                        })?;
                    position = if categories.iter().any(|c| c == value.as_ref()) {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Additive tree ensemble with an optional calibrated output.
#[derive(Debug, Clone, Deserialize)]
pub struct GradientBoostingModel {
    #[serde(default = "default_name")]
    pub name: String,
    pub input_features: Vec<String>,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub calibration: Option<SigmoidCalibration>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl GradientBoostingModel {
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(Error::InvalidArtifact("ensemble has no trees".to_string()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidArtifact(format!(
                "threshold {} is outside [0, 1]",
                self.threshold
            )));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, &self.input_features)?;
        }
        Ok(())
    }

    fn margin(&self, record: &ReservationRecord) -> Result<f64> {
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.evaluate(record)?;
        }
        Ok(self.base_score + self.learning_rate * sum)
    }

    /// Probability of the positive (cancelled) class.
    fn positive_probability(&self, record: &ReservationRecord) -> Result<f64> {
        check_schema(&self.input_features, record)?;
        let margin = self.margin(record)?;
        let p = match &self.calibration {
            Some(c) => sigmoid(c.slope * margin + c.intercept),
            None => sigmoid(margin),
        };
        Ok(p)
    }
}

impl Classifier for GradientBoostingModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, record: &ReservationRecord) -> Result<Vec<i64>> {
        let p = self.positive_probability(record)?;
        Ok(vec![i64::from(p >= self.threshold)])
    }

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        Some(self)
    }
}

impl ProbabilityEstimator for GradientBoostingModel {
    fn predict_proba(&self, record: &ReservationRecord) -> Result<Vec<Vec<f64>>> {
        let p = self.positive_probability(record)?;
        Ok(vec![vec![1.0 - p, p]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{DepositType, ReservationForm};

    fn all_features() -> Vec<String> {
        ReservationRecord::from_form(&ReservationForm::default())
            .names()
            .map(str::to_string)
            .collect()
    }

    fn model(trees: Vec<Tree>) -> GradientBoostingModel {
        GradientBoostingModel {
            name: default_name(),
            input_features: all_features(),
            base_score: 0.0,
            learning_rate: 1.0,
            trees,
            calibration: None,
            threshold: 0.5,
        }
    }

    fn deposit_tree() -> Tree {
        Tree {
            nodes: vec![
                Node::Categorical {
                    feature: "deposit_type".to_string(),
                    categories: vec!["Non Refund".to_string()],
                    left: 1,
                    right: 2,
                },
                Node::Leaf { value: 2.0 },
                Node::Numeric {
                    feature: "lead_time".to_string(),
                    threshold: 100.0,
                    left: 3,
                    right: 4,
                },
                Node::Leaf { value: -1.5 },
                Node::Leaf { value: 0.5 },
            ],
        }
    }

    #[test]
    fn test_tree_routes_by_category_and_threshold() {
        let model = model(vec![deposit_tree()]);
        model.validate().unwrap();

        let non_refund = ReservationRecord::from_form(&ReservationForm {
            deposit_type: DepositType::NonRefund,
            ..Default::default()
        });
        let short_lead = ReservationRecord::from_form(&ReservationForm {
            lead_time: 100,
            ..Default::default()
        });
        let long_lead = ReservationRecord::from_form(&ReservationForm {
            lead_time: 101,
            ..Default::default()
        });

        assert_eq!(model.predict(&non_refund).unwrap(), vec![1]);
        assert_eq!(model.predict(&short_lead).unwrap(), vec![0]);
        assert_eq!(model.predict(&long_lead).unwrap(), vec![1]);
    }

    #[test]
    fn test_probabilities_sum_to_one_and_follow_calibration() {
        let mut model = model(vec![deposit_tree()]);
        model.calibration = Some(SigmoidCalibration {
            slope: 0.0,
            intercept: 0.0,
        });
        let record = ReservationRecord::from_form(&ReservationForm::default());

        let proba = model.predict_proba(&record).unwrap();
        assert_eq!(proba.len(), 1);
        assert!((proba[0][0] - 0.5).abs() < 1e-12);
        assert!((proba[0][0] + proba[0][1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let model = model(vec![Tree {
            nodes: vec![
                Node::Numeric {
                    feature: "adr".to_string(),
                    threshold: 10.0,
                    left: 0,
                    right: 1,
                },
                Node::Leaf { value: 0.0 },
            ],
        }]);
        assert!(matches!(model.validate(), Err(Error::InvalidArtifact(_))));
    }

    #[test]
    fn test_validate_rejects_undeclared_feature() {
        let mut model = model(vec![deposit_tree()]);
        model.input_features.retain(|f| f != "deposit_type");
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("deposit_type"));
    }

    #[test]
    fn test_numeric_split_on_text_column_fails() {
        let model = model(vec![Tree {
            nodes: vec![
                Node::Numeric {
                    feature: "country".to_string(),
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { value: 0.0 },
                Node::Leaf { value: 1.0 },
            ],
        }]);
        let record = ReservationRecord::from_form(&ReservationForm::default());
        assert!(matches!(
            model.predict(&record),
            Err(Error::InvalidFeature(_))
        ));
    }
}
