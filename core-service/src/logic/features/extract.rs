//! Changeset → edit counts

use crate::logic::fetch::Changeset;

use super::vector::{ChangesetFeatures, FeatureExtractor};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    #[error("changeset has no `{0}` field")]
    MissingField(&'static str),

    #[error("changeset field `{field}` is not a non-negative number: {value}")]
    InvalidField {
        field: &'static str,
        value: serde_json::Value,
    },
}

fn count_field(changeset: &Changeset, field: &'static str) -> Result<f64, FeatureError> {
    let value = changeset
        .field(field)
        .ok_or(FeatureError::MissingField(field))?;

    match value.as_f64() {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(FeatureError::InvalidField {
            field,
            value: value.clone(),
        }),
    }
}

impl FeatureExtractor for Changeset {
    fn extract(&self) -> Result<ChangesetFeatures, FeatureError> {
        Ok(ChangesetFeatures {
            create: count_field(self, "create")?,
            modify: count_field(self, "modify")?,
            delete: count_field(self, "delete")?,
        })
    }
}

/// Edit counts of a downloaded changeset
///
/// Errors on the first of `create`, `modify`, `delete` that is absent.
pub fn changeset_to_data(changeset: &Changeset) -> Result<ChangesetFeatures, FeatureError> {
    changeset.extract()
}
