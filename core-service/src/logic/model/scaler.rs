//! Standard scaler: `(x - mean) / scale`, per column

use ndarray::{Array1, ArrayView1};

use super::artifact::{ModelError, ScalerParams};

#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn from_params(params: &ScalerParams, columns: usize) -> Result<Self, ModelError> {
        if params.mean.len() != columns || params.scale.len() != columns {
            return Err(ModelError::Shape(format!(
                "scaler has {} means and {} scales for {} features",
                params.mean.len(),
                params.scale.len(),
                columns
            )));
        }

        // zero-variance columns pass through unscaled
        let scale = params
            .scale
            .iter()
            .map(|&s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(Self {
            mean: Array1::from_vec(params.mean.clone()),
            scale: Array1::from_vec(scale),
        })
    }

    pub fn transform(&self, row: ArrayView1<f64>) -> Array1<f64> {
        (&row - &self.mean) / &self.scale
    }
}
