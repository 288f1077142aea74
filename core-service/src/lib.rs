//! gabbar - classify map changesets as good or harmful
//!
//! ```text
//! changeset id ──▶ fetch ──▶ features ──▶ model ──▶ report
//!                (HTTP GET)  (c, m, d)   (±1)
//! ```

pub mod constants;
pub mod logic;

pub use logic::config::Config;
pub use logic::error::{GabbarError, GabbarResult};
pub use logic::fetch::{download_changeset, Changeset, ChangesetClient, FetchOutcome};
pub use logic::features::{changeset_to_data, ChangesetFeatures, FeatureError, FeatureVector};
pub use logic::model::{load_model, predict, Classifier, Label, ModelError};
pub use logic::pipeline::{classify, Gabbar, PredictionReport};
