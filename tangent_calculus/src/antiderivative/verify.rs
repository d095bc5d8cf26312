// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::function::RealFn;

/// Probes and thresholds for [`verify`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct VerifyConfig {
    /// Points where the derivative of the candidate is compared with the reference.
    pub probes: Vec<f64>,
    /// Forward-difference step `h`.
    pub step: f64,
    /// Mean absolute error strictly below which the candidate is accepted.
    pub threshold: f64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            probes: vec![-2.0, -1.0, 0.0, 1.0, 2.0, 3.0],
            step: 1e-4,
            threshold: 1e-2,
        }
    }
}

/// Outcome of a finite-difference check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerificationReport {
    /// Whether the mean absolute error is below the threshold.
    pub verified: bool,
    /// Mean of `|(F(x + h) − F(x)) / h − f(x)|` over the used probes, or NaN
    /// when no probe was usable.
    pub mean_absolute_error: f64,
    /// Probes where the reference was defined.
    pub probes_used: usize,
    /// Probes skipped because the reference was NaN or infinite there.
    pub probes_skipped: usize,
}

/// Checks that `candidate` is an antiderivative of `reference`.
///
/// At each probe where `reference` is finite, the derivative of `candidate` is
/// estimated by a forward difference and compared with `reference`. This check
/// knows nothing about how the candidate was produced.
pub fn verify<C, R>(candidate: &C, reference: &R, config: &VerifyConfig) -> VerificationReport
where
    C: RealFn + ?Sized,
    R: RealFn + ?Sized,
{
    let h = config.step;
    let mut total = 0.0;
    let mut used = 0;
    let mut skipped = 0;
    for &x in &config.probes {
        let expected = reference.evaluate(x);
        if !expected.is_finite() {
            skipped += 1;
            continue;
        }
        let estimate = (candidate.evaluate(x + h) - candidate.evaluate(x)) / h;
        total += (estimate - expected).abs();
        used += 1;
    }
    let mean_absolute_error = if used == 0 {
        f64::NAN
    } else {
        total / used as f64
    };
    VerificationReport {
        verified: mean_absolute_error < config.threshold,
        mean_absolute_error,
        probes_used: used,
        probes_skipped: skipped,
    }
}
