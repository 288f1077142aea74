//! Classifier artifact - on-disk format
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "model_type": "one_class_svm",
//!   "features": ["create", "modify", "delete"],
//!   "scaler": { "mean": [..], "scale": [..] },
//!   "kernel": { "type": "rbf", "gamma": 0.01 },
//!   "support_vectors": [[..], ..],
//!   "dual_coef": [..],
//!   "intercept": -1.0
//! }
//! ```
//!
//! `scaler` is optional. `intercept` follows scikit-learn (`-rho`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logic::features::FEATURE_LAYOUT;

/// Newest artifact format this build reads
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

pub const MODEL_TYPE_ONE_CLASS_SVM: &str = "one_class_svm";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("cannot read classifier artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot deserialize classifier artifact {path}: {source}")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize classifier artifact {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported classifier artifact: {0}")]
    UnsupportedFormat(String),

    #[error("classifier artifact uses unknown feature `{0}`")]
    UnknownFeature(String),

    #[error("malformed classifier artifact: {0}")]
    Shape(String),
}

fn default_features() -> Vec<String> {
    FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect()
}

fn default_model_type() -> String {
    MODEL_TYPE_ONE_CLASS_SVM.to_string()
}

/// Serialized classifier as trained offline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,

    #[serde(default = "default_model_type")]
    pub model_type: String,

    /// Training column order; defaults to the current layout
    #[serde(default = "default_features")]
    pub features: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<ScalerParams>,

    pub kernel: KernelSpec,
    pub support_vectors: Vec<Vec<f64>>,
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
}

/// Per-column standardisation learned at training time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// scikit-learn kernel parameterisation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KernelSpec {
    Linear,
    Rbf {
        gamma: f64,
    },
    Poly {
        gamma: f64,
        #[serde(default)]
        coef0: f64,
        #[serde(default = "default_degree")]
        degree: u32,
    },
    Sigmoid {
        gamma: f64,
        #[serde(default)]
        coef0: f64,
    },
}

fn default_degree() -> u32 {
    3
}

impl ModelArtifact {
    pub fn from_slice(bytes: &[u8], path: &Path) -> Result<Self, ModelError> {
        serde_json::from_slice(bytes).map_err(|source| ModelError::Deserialize {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse an artifact; no structural checks yet
    pub fn read(path: &Path) -> Result<Self, ModelError> {
        let bytes = fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes, path)
    }

    pub fn write(&self, path: &Path) -> Result<(), ModelError> {
        let io_err = |source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_vec_pretty(self).map_err(|source| ModelError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }

    pub fn check_format(&self) -> Result<(), ModelError> {
        if self.format_version == 0 || self.format_version > ARTIFACT_FORMAT_VERSION {
            return Err(ModelError::UnsupportedFormat(format!(
                "format_version {} (supported: 1..={})",
                self.format_version, ARTIFACT_FORMAT_VERSION
            )));
        }
        if self.model_type != MODEL_TYPE_ONE_CLASS_SVM {
            return Err(ModelError::UnsupportedFormat(format!(
                "model_type `{}`",
                self.model_type
            )));
        }
        Ok(())
    }
}
