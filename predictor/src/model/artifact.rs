use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use common::{Error, Result};

use super::Classifier;
use super::ensemble::GradientBoostingModel;
use super::linear::LogisticRegressionModel;

/// Serialized classifier, discriminated by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    GradientBoosting(GradientBoostingModel),
    LogisticRegression(LogisticRegressionModel),
}

impl Artifact {
    pub fn validate(&self) -> Result<()> {
        match self {
            Artifact::GradientBoosting(model) => model.validate(),
            Artifact::LogisticRegression(model) => model.validate(),
        }
    }

    pub fn into_classifier(self) -> Arc<dyn Classifier> {
        match self {
            Artifact::GradientBoosting(model) => Arc::new(model),
            Artifact::LogisticRegression(model) => Arc::new(model),
        }
    }
}

pub fn parse_artifact(json: &str) -> Result<Arc<dyn Classifier>> {
    let artifact: Artifact = serde_json::from_str(json)?;
    artifact.validate()?;
    Ok(artifact.into_classifier())
}

/// Reads and validates the artifact at `path`. Any failure is reported as
/// [`Error::ArtifactLoad`] so callers can tell it apart from inference errors.
pub fn load_artifact(path: impl AsRef<Path>) -> Result<Arc<dyn Classifier>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|e| Error::artifact_load(&path_str, e))?;
    let classifier = parse_artifact(&raw).map_err(|e| Error::artifact_load(&path_str, e))?;

    info!(path = %path_str, model = classifier.name(), "Loaded classifier artifact");
    Ok(classifier)
}
