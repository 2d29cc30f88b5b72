//! L2-regularized logistic regression

use crate::error::{BaselineError, Result};
use super::Classifier;
use ndarray::{Array1, Array2, Axis, s};
use serde::{Deserialize, Serialize};

/// Solve the symmetric positive-definite system Ax = b by Cholesky
/// decomposition. Retries once with a small ridge if the matrix is
/// near-singular; returns None if it is still not positive definite.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    match cholesky_solve_inner(a, b) {
        Some(x) => Some(x),
        None => {
            let n = a.nrows();
            let ridge = 1e-8 * a.diag().iter().map(|v| v.abs()).sum::<f64>() / n as f64;
            let mut a_reg = a.clone();
            for k in 0..n {
                a_reg[[k, k]] += ridge;
            }
            cholesky_solve_inner(&a_reg, b)
        }
    }
}

fn cholesky_solve_inner(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    if n != a.ncols() || n != b.len() {
        return None;
    }

    // A = L * L^T
    let mut l = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }
            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // Forward substitution: L * y = b
    let mut y = Array1::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * y[j];
        }
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L^T * x = y
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    Some(x)
}

/// Binary logistic regression with an L2 penalty on the coefficients
/// (the intercept is unpenalized), fit by iteratively reweighted least
/// squares with a Cholesky solve per Newton step.
///
/// Fitting fails with a non-convergence error if the gradient norm does not
/// drop below `tol` within `max_iter` iterations; the failure is surfaced to
/// the caller rather than silently producing a half-fitted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Fitted coefficients
    pub coefficients: Option<Array1<f64>>,
    /// Fitted intercept
    pub intercept: Option<f64>,
    /// L2 regularization strength
    pub alpha: f64,
    /// Iteration cap for the solver
    pub max_iter: usize,
    /// Gradient-norm convergence tolerance
    pub tol: f64,
    /// Iterations used by the last successful fit
    pub n_iter: Option<usize>,
    pub is_fitted: bool,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: None,
            alpha: 1.0,
            max_iter: 100,
            tol: 1e-6,
            n_iter: None,
            is_fitted: false,
        }
    }

    /// Set the regularization strength
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the iteration cap
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    fn sigmoid(z: &Array1<f64>) -> Array1<f64> {
        z.mapv(|v| 1.0 / (1.0 + (-v).exp()))
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(BaselineError::ShapeError {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(BaselineError::DataError("cannot fit on zero rows".to_string()));
        }

        // Design matrix with an intercept column at index 0
        let mut z = Array2::ones((n_samples, n_features + 1));
        z.slice_mut(s![.., 1..]).assign(x);

        let mut w: Array1<f64> = Array1::zeros(n_features + 1);
        let mut grad_norm = f64::INFINITY;

        for iter in 0..self.max_iter {
            let eta = z.dot(&w);
            let mu = Self::sigmoid(&eta);

            // Gradient of the penalized negative log-likelihood
            let mut grad = z.t().dot(&(&mu - y));
            for j in 1..=n_features {
                grad[j] += self.alpha * w[j];
            }

            grad_norm = grad.dot(&grad).sqrt();
            if grad_norm < self.tol {
                self.n_iter = Some(iter);
                self.intercept = Some(w[0]);
                self.coefficients = Some(w.slice(s![1..]).to_owned());
                self.is_fitted = true;
                tracing::debug!(iterations = iter, grad_norm, "logistic solver converged");
                return Ok(());
            }

            // IRLS weights, floored to keep the Hessian well conditioned
            let wdiag = mu.mapv(|m| (m * (1.0 - m)).max(1e-10));

            // H = Z^T diag(wdiag) Z + alpha * I (intercept unpenalized)
            let zw = &z * &wdiag.insert_axis(Axis(1));
            let mut h = z.t().dot(&zw);
            for j in 1..=n_features {
                h[[j, j]] += self.alpha;
            }

            let delta = cholesky_solve(&h, &grad).ok_or_else(|| {
                BaselineError::ComputationError(
                    "Hessian is not positive definite; cannot take Newton step".to_string(),
                )
            })?;
            w = &w - &delta;
        }

        Err(BaselineError::NonConvergence {
            max_iter: self.max_iter,
            grad_norm,
        })
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if !self.is_fitted {
            return Err(BaselineError::ModelNotFitted);
        }

        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or(BaselineError::ModelNotFitted)?;
        if x.ncols() != coefficients.len() {
            return Err(BaselineError::ShapeError {
                expected: format!("{} feature columns", coefficients.len()),
                actual: format!("{} feature columns", x.ncols()),
            });
        }

        let linear = x.dot(coefficients) + self.intercept.unwrap_or(0.0);
        Ok(Self::sigmoid(&linear))
    }
}
