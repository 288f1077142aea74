//! Model Module - Classifier artifact and inference
//!
//! The artifact is trained offline; this side only loads and applies it.

pub mod artifact;
pub mod scaler;
pub mod svm;
pub mod inference;

#[cfg(test)]
mod tests;

// Re-export common types
pub use artifact::{KernelSpec, ModelArtifact, ModelError, ScalerParams};
pub use inference::{load_model, predict, AnomalyModel, Classifier, InferenceError, Label, ModelMetadata};
