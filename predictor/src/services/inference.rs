use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use common::{Error, Result};

use crate::form::ReservationForm;
use crate::model::{load_artifact, Classifier, ReservationRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ModelStatus {
    Ready { name: String },
    Degraded { reason: String },
}

/// Lifecycle of one prediction trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    BuildingRecord,
    Classifying,
    VerdictRendered,
    ErrorRendered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Confirmed,
    LikelyCancelled,
}

impl Verdict {
    pub fn from_label(label: i64) -> Result<Self> {
        match label {
            0 => Ok(Verdict::Confirmed),
            1 => Ok(Verdict::LikelyCancelled),
            other => Err(Error::UnexpectedLabel(other)),
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Verdict::Confirmed => "✅ Booking Confirmed!",
            Verdict::LikelyCancelled => "❌ High Chance of Cancellation!",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Verdict::Confirmed => "green",
            Verdict::LikelyCancelled => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictView {
    pub verdict: Verdict,
    pub label: i64,
    pub text: &'static str,
    pub color: &'static str,
    /// Probability mass of the predicted class, e.g. `70.0%`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    ModelUnavailable,
    Classification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionFailure {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip)]
    pub kind: FailureKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Verdict(VerdictView),
    Error(PredictionFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    /// Assembled record, only present in debug mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ReservationRecord>,
    pub outcome: PredictionOutcome,
}

impl PredictionReport {
    /// Report for a trigger that failed before or outside the classifier.
    pub fn failure(message: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            record: None,
            outcome: PredictionOutcome::Error(PredictionFailure {
                message: message.into(),
                details: None,
                kind,
            }),
        }
    }
}

/// Bridges form state to the loaded classifier.
///
/// Holds the classifier read-only for the life of the process; every
/// prediction is independent and nothing is cached between triggers.
pub struct InferenceAdapter {
    classifier: Option<Arc<dyn Classifier>>,
    status: ModelStatus,
}

impl InferenceAdapter {
    /// Loads the artifact, falling back to degraded mode instead of failing.
    pub fn load(path: impl AsRef<Path>) -> Self {
        match load_artifact(path) {
            Ok(classifier) => Self::with_classifier(classifier),
            Err(e) => {
                error!(error = %e, "Model unavailable, prediction is disabled");
                Self::degraded(e.to_string())
            }
        }
    }

    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        let status = ModelStatus::Ready {
            name: classifier.name().to_string(),
        };
        Self {
            classifier: Some(classifier),
            status,
        }
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            classifier: None,
            status: ModelStatus::Degraded {
                reason: reason.into(),
            },
        }
    }

    pub fn status(&self) -> &ModelStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.is_some()
    }

    /// Runs one prediction trigger end to end. Never fails: errors become
    /// an [`PredictionOutcome::Error`] so the caller can render them.
    pub fn predict(&self, form: &ReservationForm, debug: bool) -> PredictionReport {
        debug!(phase = ?Phase::BuildingRecord, "Prediction triggered");
        let record = ReservationRecord::from_form(form);

        debug!(phase = ?Phase::Classifying, columns = record.len());
        let outcome = match self.classify(&record) {
            Ok(view) => {
                debug!(phase = ?Phase::VerdictRendered, label = view.label);
                PredictionOutcome::Verdict(view)
            }
            Err(e) => {
                debug!(phase = ?Phase::ErrorRendered, error = %e);
                let kind = match e {
                    Error::ModelUnavailable(_) => FailureKind::ModelUnavailable,
                    _ => FailureKind::Classification,
                };
                PredictionOutcome::Error(PredictionFailure {
                    message: format!("Error during prediction: {}", e),
                    details: debug.then(|| format!("{:?}", e)),
                    kind,
                })
            }
        };

        PredictionReport {
            record: debug.then_some(record),
            outcome,
        }
    }

    fn classify(&self, record: &ReservationRecord) -> Result<VerdictView> {
        let classifier = match (&self.classifier, &self.status) {
            (Some(classifier), _) => classifier,
            (None, ModelStatus::Degraded { reason }) => {
                return Err(Error::ModelUnavailable(reason.clone()));
            }
            (None, ModelStatus::Ready { name }) => {
                return Err(Error::ModelUnavailable(name.clone()));
            }
        };

        let labels = classifier.predict(record)?;
        let label = *labels.first().ok_or(Error::EmptyPrediction)?;
        let verdict = Verdict::from_label(label)?;

        let probability = confidence_for(classifier.as_ref(), record, label);
        info!(model = classifier.name(), label, ?probability, "Classified reservation");

        Ok(VerdictView {
            verdict,
            label,
            text: verdict.text(),
            color: verdict.color(),
            confidence: probability.map(format_confidence),
            probability,
        })
    }
}

/// Best-effort probability of the predicted class.
///
/// A classifier without the capability yields `None` silently; a failing
/// estimator also yields `None` but is logged.
fn confidence_for(
    classifier: &dyn Classifier,
    record: &ReservationRecord,
    label: i64,
) -> Option<f64> {
    let estimator = classifier.probability_estimator()?;

    let rows = match estimator.predict_proba(record) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "Probability estimation failed, omitting confidence");
            return None;
        }
    };

    let probability = rows
        .first()
        .and_then(|row| usize::try_from(label).ok().and_then(|i| row.get(i)))
        .copied()
        .filter(|p| p.is_finite());

    if probability.is_none() {
        warn!(label, ?rows, "Probability row has no usable entry for label");
    }
    probability
}

pub fn format_confidence(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
