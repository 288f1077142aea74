//! Edit counts from a full (augmented diff) changeset
//!
//! A full changeset lists every touched element as a feature with an
//! `action` property; a modified or deleted element shows up once per
//! version (old and new), so elements are counted once per action by id.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::extract::FeatureError;
use super::vector::{ChangesetFeatures, FeatureExtractor};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default)]
    pub version: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Modify,
    Delete,
    #[serde(other)]
    Other,
}

/// Count distinct elements per action
pub fn count_actions(collection: &FeatureCollection) -> ChangesetFeatures {
    let mut seen: HashSet<(Action, String)> = HashSet::new();
    let mut counts = ChangesetFeatures::default();

    for feature in &collection.features {
        let Some(action) = feature.properties.action else {
            continue;
        };
        if !seen.insert((action, feature.properties.id.to_string())) {
            continue;
        }
        match action {
            Action::Create => counts.create += 1.0,
            Action::Modify => counts.modify += 1.0,
            Action::Delete => counts.delete += 1.0,
            Action::Other => {}
        }
    }

    log::debug!(
        "Counted actions over {} features: {:?}",
        collection.features.len(),
        counts
    );
    counts
}

impl FeatureExtractor for FeatureCollection {
    fn extract(&self) -> Result<ChangesetFeatures, FeatureError> {
        Ok(count_actions(self))
    }
}
