//! One-class SVM decision function
//!
//! `f(x) = Σ αᵢ·K(svᵢ, x) + intercept`; positive means inlier.

use ndarray::{Array1, Array2, ArrayView1};

use super::artifact::{KernelSpec, ModelError};

impl KernelSpec {
    pub fn eval(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        match *self {
            KernelSpec::Linear => a.dot(&b),
            KernelSpec::Rbf { gamma } => {
                let dist2: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum();
                (-gamma * dist2).exp()
            }
            KernelSpec::Poly { gamma, coef0, degree } => {
                // OneClassSvm::new rejects degrees above i32::MAX
                (gamma * a.dot(&b) + coef0).powi(degree as i32)
            }
            KernelSpec::Sigmoid { gamma, coef0 } => (gamma * a.dot(&b) + coef0).tanh(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OneClassSvm {
    kernel: KernelSpec,
    support_vectors: Array2<f64>,
    dual_coef: Array1<f64>,
    intercept: f64,
}

impl OneClassSvm {
    pub fn new(
        kernel: KernelSpec,
        support_vectors: &[Vec<f64>],
        dual_coef: &[f64],
        intercept: f64,
        columns: usize,
    ) -> Result<Self, ModelError> {
        if let KernelSpec::Poly { degree, .. } = kernel {
            if i32::try_from(degree).is_err() {
                return Err(ModelError::Shape(format!("poly degree {} out of range", degree)));
            }
        }
        if support_vectors.is_empty() {
            return Err(ModelError::Shape("no support vectors".to_string()));
        }
        if dual_coef.len() != support_vectors.len() {
            return Err(ModelError::Shape(format!(
                "{} dual coefficients for {} support vectors",
                dual_coef.len(),
                support_vectors.len()
            )));
        }
        if let Some(row) = support_vectors.iter().position(|sv| sv.len() != columns) {
            return Err(ModelError::Shape(format!(
                "support vector {} has {} values, expected {}",
                row,
                support_vectors[row].len(),
                columns
            )));
        }

        let flat: Vec<f64> = support_vectors.iter().flatten().copied().collect();
        let support_vectors = Array2::from_shape_vec((dual_coef.len(), columns), flat)
            .map_err(|e| ModelError::Shape(e.to_string()))?;

        Ok(Self {
            kernel,
            support_vectors,
            dual_coef: Array1::from_vec(dual_coef.to_vec()),
            intercept,
        })
    }

    pub fn n_support(&self) -> usize {
        self.support_vectors.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.support_vectors.ncols()
    }

    pub fn decision_function(&self, x: ArrayView1<f64>) -> f64 {
        self.support_vectors
            .rows()
            .into_iter()
            .zip(self.dual_coef.iter())
            .map(|(sv, alpha)| alpha * self.kernel.eval(sv, x))
            .sum::<f64>()
            + self.intercept
    }
}
