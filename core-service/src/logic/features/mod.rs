//! Features Module - Feature Extraction
//!
//! Turns a changeset into the ordered numeric input of the classifier.

pub mod layout;
pub mod vector;
pub mod extract;
pub mod actions;


// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::{ChangesetFeatures, FeatureExtractor, FeatureVector};
pub use extract::{changeset_to_data, FeatureError};
pub use actions::{count_actions, FeatureCollection};
