//! Inference Engine
//!
//! Loads the classifier artifact into an immutable [`Classifier`] and labels
//! feature vectors with it. Load once, then share `&Classifier`.

use std::path::{Path, PathBuf};

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::logic::features::layout::{feature_index, LayoutMismatchError};
use crate::logic::features::FeatureVector;

use super::artifact::{ModelArtifact, ModelError};
use super::scaler::StandardScaler;
use super::svm::OneClassSvm;

// ============================================================================
// LABEL
// ============================================================================

/// One-class label: `+1` inlier, `-1` outlier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Label {
    Inlier,
    Outlier,
}

impl Label {
    pub fn from_decision(value: f64) -> Self {
        // NaN lands on Outlier
        if value > 0.0 {
            Label::Inlier
        } else {
            Label::Outlier
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Label::Inlier => 1,
            Label::Outlier => -1,
        }
    }

    /// Report wording
    pub fn verdict(self) -> &'static str {
        match self {
            Label::Inlier => "good",
            Label::Outlier => "harmful",
        }
    }
}

impl From<Label> for i8 {
    fn from(label: Label) -> Self {
        label.as_i8()
    }
}

impl TryFrom<i8> for Label {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Label::Inlier),
            -1 => Ok(Label::Outlier),
            other => Err(format!("not a one-class label: {}", other)),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}", self.as_i8())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: PathBuf,
    pub model_type: String,
    pub format_version: u32,
    pub features: Vec<String>,
    pub n_support: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Seam for anomaly models that score one row
pub trait AnomalyModel {
    /// Signed distance to the decision boundary; positive is inlier
    fn decision_function(&self, vector: &FeatureVector) -> Result<f64, InferenceError>;

    fn predict(&self, vector: &FeatureVector) -> Result<Label, InferenceError> {
        self.decision_function(vector).map(Label::from_decision)
    }
}

/// Loaded, read-only classifier
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Layout index of each training column, in training order
    columns: Vec<usize>,
    scaler: Option<StandardScaler>,
    svm: OneClassSvm,
    metadata: ModelMetadata,
}

impl Classifier {
    pub fn from_artifact(artifact: ModelArtifact, path: &Path) -> Result<Self, ModelError> {
        artifact.check_format()?;

        let columns = artifact
            .features
            .iter()
            .map(|name| feature_index(name).ok_or_else(|| ModelError::UnknownFeature(name.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        if columns.is_empty() {
            return Err(ModelError::Shape("artifact declares no features".to_string()));
        }

        let scaler = artifact
            .scaler
            .as_ref()
            .map(|params| StandardScaler::from_params(params, columns.len()))
            .transpose()?;

        let svm = OneClassSvm::new(
            artifact.kernel,
            &artifact.support_vectors,
            &artifact.dual_coef,
            artifact.intercept,
            columns.len(),
        )?;

        let metadata = ModelMetadata {
            model_path: path.to_path_buf(),
            model_type: artifact.model_type,
            format_version: artifact.format_version,
            features: artifact.features,
            n_support: svm.n_support(),
            loaded_at: chrono::Utc::now(),
        };

        Ok(Self { columns, scaler, svm, metadata })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Vector → training-order row, scaled
    fn prepare(&self, vector: &FeatureVector) -> Result<Array1<f64>, InferenceError> {
        vector.validate()?;

        let row = Array1::from_vec(vector.select(&self.columns));
        Ok(match &self.scaler {
            Some(scaler) => scaler.transform(row.view()),
            None => row,
        })
    }
}

impl AnomalyModel for Classifier {
    fn decision_function(&self, vector: &FeatureVector) -> Result<f64, InferenceError> {
        let row = self.prepare(vector)?;
        Ok(self.svm.decision_function(row.view()))
    }
}

// ============================================================================
// LOAD / PREDICT
// ============================================================================

/// Load classifier artifact from file
pub fn load_model(path: impl AsRef<Path>) -> Result<Classifier, ModelError> {
    let path = path.as_ref();
    log::info!("Loading classifier from: {}", path.display());

    let artifact = ModelArtifact::read(path)?;
    let classifier = Classifier::from_artifact(artifact, path)?;

    log::info!(
        "Classifier loaded ({} v{}, {} support vectors, features {:?})",
        classifier.metadata.model_type,
        classifier.metadata.format_version,
        classifier.metadata.n_support,
        classifier.metadata.features
    );
    Ok(classifier)
}

/// Label one feature vector
pub fn predict(model: &impl AnomalyModel, vector: &FeatureVector) -> Result<Label, InferenceError> {
    let label = model.predict(vector)?;
    log::debug!("Prediction {} for {}", label, vector.to_log_entry());
    Ok(label)
}
