//! Logic Module - Changeset classification
//!
//! - `fetch/` - Changeset download
//! - `features/` - Feature extraction and layout
//! - `model/` - Classifier artifact and inference
//! - `pipeline` - Wiring and report

pub mod config;
pub mod error;
pub mod fetch;
pub mod features;
pub mod model;
pub mod pipeline;
