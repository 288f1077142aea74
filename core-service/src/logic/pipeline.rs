//! Classification pipeline
//!
//! download → extract → predict → report. The classifier is loaded once when
//! [`Gabbar`] is built and only borrowed afterwards.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::logic::config::Config;
use crate::logic::error::{GabbarError, GabbarResult};
use crate::logic::features::changeset_to_data;
use crate::logic::fetch::ChangesetClient;
use crate::logic::model::{load_model, predict, Classifier, Label};

/// Timestamp layout of the report (microsecond precision, local time)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Label one changeset
///
/// A changeset the host does not return is classified as an empty record,
/// so it fails extraction with a missing-field error.
pub fn classify(
    client: &ChangesetClient,
    model: &Classifier,
    changeset_id: impl Display,
) -> GabbarResult<Label> {
    let changeset = client.download(&changeset_id).unwrap_or_else(|| {
        log::warn!("No data for changeset {}", changeset_id);
        Default::default()
    });

    let features = changeset_to_data(&changeset)?;
    log::info!("Changeset {} features: {:?}", changeset_id, features);

    Ok(predict(model, &features.to_vector())?)
}

/// Trimmed contents of the version file
pub fn read_version(path: &Path) -> GabbarResult<String> {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|source| GabbarError::Version {
            path: path.to_path_buf(),
            source,
        })
}

/// JSON object printed by the CLI; fields serialize in sorted key order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub prediction: String,
    pub timestamp: String,
    pub version: String,
}

impl PredictionReport {
    pub fn new(label: Label, version: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            prediction: label.verdict().to_string(),
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            version: version.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Fetcher + loaded classifier, built once per process
pub struct Gabbar {
    config: Config,
    client: ChangesetClient,
    model: Classifier,
}

impl Gabbar {
    pub fn new(config: Config) -> GabbarResult<Self> {
        let model = load_model(&config.model_path)?;
        let client = ChangesetClient::from_config(&config);
        Ok(Self { config, client, model })
    }

    pub fn classify(&self, changeset_id: impl Display) -> GabbarResult<Label> {
        classify(&self.client, &self.model, changeset_id)
    }

    /// Classify and attach version + timestamp
    ///
    /// The version file is read on every call.
    pub fn report(&self, changeset_id: impl Display) -> GabbarResult<PredictionReport> {
        let label = self.classify(changeset_id)?;
        let version = read_version(&self.config.version_path)?;
        Ok(PredictionReport::new(label, version, Local::now()))
    }
}
