// src/model.rs
//! Intercept-free binary logistic regression.
//!
//! Serving combines the columns as a pure weighted sum, so no bias term is
//! fit here. Plain maximum likelihood, full-batch gradient descent, no
//! regularization or class weighting; the optimizer constants below are the
//! documented defaults and are deliberately not configurable.

use anyhow::Result;
use log::{debug, info, warn};

use crate::error::TrainError;
use crate::features::{FEATURE_NAMES, NUM_FEATURES};

pub const LEARNING_RATE: f64 = 0.5;
pub const MAX_EPOCHS: usize = 10_000;
/// Converged once every gradient component is below this.
pub const TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone)]
pub struct LogisticModel {
    /// Coefficients ordered as [`FEATURE_NAMES`].
    pub weights: [f64; NUM_FEATURES],
}

impl LogisticModel {
    /// Confirmation probability for one normalized feature vector.
    pub fn predict(&self, x: &[f64; NUM_FEATURES]) -> f64 {
        let z: f64 = self.weights.iter().zip(x.iter()).map(|(w, v)| w * v).sum();
        sigmoid(z)
    }

    /// (name, coefficient) pairs in canonical order.
    pub fn named_weights(&self) -> Vec<(&'static str, f64)> {
        FEATURE_NAMES.iter().copied().zip(self.weights).collect()
    }
}

#[inline]
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Fit on normalized features `x` and binary outcomes `y`.
///
/// Refuses degenerate inputs: fewer than two rows, or an outcome column with
/// no variation, abort with a data-insufficiency error before any iteration.
pub fn fit(x: &[[f64; NUM_FEATURES]], y: &[f64], log_every: usize) -> Result<LogisticModel> {
    let n = x.len();
    if n < 2 {
        return Err(TrainError::Insufficient(format!(
            "{n} training row(s); at least 2 required"
        ))
        .into());
    }
    debug_assert_eq!(n, y.len());
    let positives = y.iter().filter(|&&v| v > 0.5).count();
    if positives == 0 || positives == n {
        return Err(TrainError::Insufficient(format!(
            "outcome column is constant ({positives}/{n} confirmed); nothing to fit"
        ))
        .into());
    }

    let mut w = [0.0f64; NUM_FEATURES];
    let mut converged = false;
    let mut last_max_grad = f64::INFINITY;
    for epoch in 0..MAX_EPOCHS {
        let mut grad = [0.0f64; NUM_FEATURES];
        let mut nll = 0.0f64;
        for (xi, &yi) in x.iter().zip(y.iter()) {
            let z: f64 = w.iter().zip(xi.iter()).map(|(wj, vj)| wj * vj).sum();
            let p = sigmoid(z);
            // clamp away from 0/1 so the loss stays finite
            let pc = p.clamp(1e-12, 1.0 - 1e-12);
            nll -= yi * pc.ln() + (1.0 - yi) * (1.0 - pc).ln();
            let err = p - yi;
            for (gj, &vj) in grad.iter_mut().zip(xi.iter()) {
                *gj += err * vj;
            }
        }
        let inv_n = 1.0 / n as f64;
        let mut max_grad = 0.0f64;
        for gj in grad.iter_mut() {
            *gj *= inv_n;
            max_grad = max_grad.max(gj.abs());
        }

        if log_every > 0 && epoch % log_every == 0 {
            debug!("[fit] epoch {} loss={:.6}", epoch, nll * inv_n);
        }

        last_max_grad = max_grad;
        if max_grad < TOLERANCE {
            info!("[fit] converged at epoch {} (max |grad|={:.3e})", epoch, max_grad);
            converged = true;
            break;
        }
        for (wj, gj) in w.iter_mut().zip(grad.iter()) {
            *wj -= LEARNING_RATE * gj;
        }
    }
    if !converged {
        warn!(
            "[fit] stopped at max epochs ({MAX_EPOCHS}) before converging (max |grad|={:.3e})",
            last_max_grad
        );
    }

    Ok(LogisticModel { weights: w })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(v: f64) -> [f64; NUM_FEATURES] {
        let mut r = [0.5f64; NUM_FEATURES];
        r[0] = v;
        r
    }

    #[test]
    fn refuses_single_row() {
        let err = fit(&[row(1.0)], &[1.0], 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrainError>(),
            Some(TrainError::Insufficient(_))
        ));
    }

    #[test]
    fn refuses_constant_outcome() {
        let x = vec![row(0.1), row(0.9), row(0.5)];
        let err = fit(&x, &[1.0, 1.0, 1.0], 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrainError>(),
            Some(TrainError::Insufficient(_))
        ));
    }

    #[test]
    fn max_epochs_exit_still_yields_finite_weights() {
        // perfectly separable data never meets the gradient tolerance, so
        // this takes the epoch-exhaustion exit rather than the converged one
        let x = vec![row(1.0), row(0.0)];
        let y = vec![1.0, 0.0];
        let m = fit(&x, &y, 0).unwrap();
        for (i, wj) in m.weights.iter().enumerate() {
            assert!(wj.is_finite(), "weight {i} not finite: {wj}");
        }
        assert!(m.weights[0] > 0.0);
    }

    #[test]
    fn separable_feature_gets_positive_weight() {
        // first column high for positives, low for negatives
        let x = vec![row(0.9), row(0.8), row(0.2), row(0.1)];
        let y = vec![1.0, 1.0, 0.0, 0.0];
        let m = fit(&x, &y, 0).unwrap();
        assert!(m.weights[0] > 0.0, "expected positive weight, got {:?}", m.weights);
        assert!(m.predict(&row(0.9)) > m.predict(&row(0.1)));
    }
}
