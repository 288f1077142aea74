//! Feature Vector - Core data structure for classifier input
//!
//! Extraction produces [`ChangesetFeatures`] (named fields). It is turned into
//! a versioned [`FeatureVector`] whose positional order comes from
//! `FEATURE_LAYOUT`; the classifier boundary then picks columns by name.

use serde::{Deserialize, Serialize};

use super::extract::FeatureError;
use super::layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT,
    FEATURE_LAYOUT, FEATURE_VERSION,
};

// ============================================================================
// NAMED FEATURES
// ============================================================================

/// Edit counts of one changeset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangesetFeatures {
    pub create: f64,
    pub modify: f64,
    pub delete: f64,
}

impl ChangesetFeatures {
    pub fn new(create: f64, modify: f64, delete: f64) -> Self {
        Self { create, modify, delete }
    }

    /// Get feature by layout name
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "create" => Some(self.create),
            "modify" => Some(self.modify),
            "delete" => Some(self.delete),
            _ => None,
        }
    }

    /// Positional vector in `FEATURE_LAYOUT` order
    pub fn to_vector(&self) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, name) in values.iter_mut().zip(FEATURE_LAYOUT) {
            // every layout name has a field above
            *slot = self.get(name).unwrap_or_default();
        }
        FeatureVector::from_values(values)
    }
}

impl From<ChangesetFeatures> for FeatureVector {
    fn from(features: ChangesetFeatures) -> Self {
        features.to_vector()
    }
}

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned feature vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Pick values by layout index, in the order given
    ///
    /// Indices come from a loaded model, which resolved them against the layout.
    pub fn select(&self, columns: &[usize]) -> Vec<f64> {
        columns.iter().filter_map(|&i| self.get(i)).collect()
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// JSON form for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), serde_json::Value::from(*value)))
                .collect::<serde_json::Map<_, _>>(),
        })
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// Anything edit counts can be derived from
pub trait FeatureExtractor {
    fn extract(&self) -> Result<ChangesetFeatures, FeatureError>;
}
