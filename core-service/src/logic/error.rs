//! Error handling

use std::path::PathBuf;

use crate::logic::features::FeatureError;
use crate::logic::model::{InferenceError, ModelError};

pub type GabbarResult<T> = Result<T, GabbarError>;

#[derive(Debug, thiserror::Error)]
pub enum GabbarError {
    /// Changeset lacks a count (including "no data" from the fetcher)
    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("cannot read version file {path}: {source}")]
    Version {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
