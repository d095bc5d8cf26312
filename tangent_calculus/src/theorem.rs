// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mean Value Theorem point search.
//!
//! The theorem guarantees that some `c` exists, not that it is unique, so the
//! solver commits to a documented tie-break: the first grid sample (scanning
//! from low to high `x`) that achieves the smallest residual wins.
//!
//! ## Forms
//!
//! - [`TheoremForm::Integral`]: find `c` with `f(c) = (1 / (b − a)) ∫ₐᵇ f`.
//! - [`TheoremForm::Derivative`]: find `c` with
//!   `f'(c) = (f(b) − f(a)) / (b − a)`, the slope of the secant.
//!
//! ## Search
//!
//! 1) Scan `samples` evenly spaced points across `[a, b]`, stopping at the first
//!    one whose residual is within `tolerance`.
//! 2) If none is, and the residual changes sign across a grid cell next to the
//!    best sample, bisect that cell for at most `refine_steps` steps.
//! 3) Report the best point found. The search never fails; when tolerance is
//!    never met the result carries `converged == false`.

use log::debug;
use tangent_view::Interval;

use crate::error::CalculusError;
use crate::function::RealFn;
use crate::integrate::Integrator;

/// Which statement of the Mean Value Theorem to solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TheoremForm {
    /// `f(c)` equals the average value of `f` over the interval.
    #[default]
    Integral,
    /// `f'(c)` equals the slope of the secant through the endpoints.
    Derivative,
}

/// Tuning parameters of the [`TheoremSolver`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TheoremConfig {
    /// Number of grid samples, at least 2.
    pub samples: usize,
    /// Residual below which a sample counts as converged.
    pub tolerance: f64,
    /// Bisection steps allowed after the grid scan.
    pub refine_steps: usize,
    /// Step of the central difference used in derivative form.
    pub derivative_step: f64,
}

impl Default for TheoremConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            tolerance: 1e-3,
            refine_steps: 60,
            derivative_step: 1e-5,
        }
    }
}

/// Outcome of a Mean Value Theorem search. Read-only once produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TheoremResult {
    form: TheoremForm,
    integral: f64,
    average_value: f64,
    point_c: f64,
    value_at_c: f64,
    converged: bool,
    iterations: usize,
}

impl TheoremResult {
    /// Form that was solved.
    #[must_use]
    pub fn form(&self) -> TheoremForm {
        self.form
    }

    /// Trapezoidal integral of `f` over the interval.
    #[must_use]
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Target value: the average value (integral form) or the secant slope
    /// (derivative form).
    #[must_use]
    pub fn average_value(&self) -> f64 {
        self.average_value
    }

    /// Best point found.
    #[must_use]
    pub fn point_c(&self) -> f64 {
        self.point_c
    }

    /// `f(c)` in integral form, `f'(c)` in derivative form.
    #[must_use]
    pub fn value_at_c(&self) -> f64 {
        self.value_at_c
    }

    /// `|value_at_c − average_value|`.
    #[must_use]
    pub fn residual(&self) -> f64 {
        (self.value_at_c - self.average_value).abs()
    }

    /// Whether the residual is within tolerance.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Grid samples plus bisection steps evaluated.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the target value itself is undefined (an undefined sample
    /// propagated through the integral or an endpoint).
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        !self.average_value.is_finite()
    }
}

/// Deterministic grid search for the Mean Value Theorem point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TheoremSolver {
    integrator: Integrator,
    config: TheoremConfig,
}

impl TheoremSolver {
    /// Creates a solver, validating that the grid has at least two samples.
    pub fn new(integrator: Integrator, config: TheoremConfig) -> Result<Self, CalculusError> {
        CalculusError::check_count(config.samples, 2)?;
        Ok(Self { integrator, config })
    }

    /// Tuning parameters.
    #[must_use]
    pub fn config(&self) -> &TheoremConfig {
        &self.config
    }

    /// Integrator used for the integral.
    #[must_use]
    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    /// Searches `interval` for the theorem point of `f`.
    pub fn solve<F: RealFn + ?Sized>(
        &self,
        f: &F,
        interval: Interval,
        form: TheoremForm,
    ) -> TheoremResult {
        let integral = self.integrator.integrate(f, interval);
        let (a, b) = (interval.lower(), interval.upper());
        let average_value = match form {
            TheoremForm::Integral => integral / interval.width(),
            TheoremForm::Derivative => (f.evaluate(b) - f.evaluate(a)) / interval.width(),
        };
        let value = |x: f64| match form {
            TheoremForm::Integral => f.evaluate(x),
            TheoremForm::Derivative => {
                let h = self.config.derivative_step;
                (f.evaluate(x + h) - f.evaluate(x - h)) / (2.0 * h)
            }
        };
        let tolerance = self.config.tolerance;

        let n = self.config.samples.max(2);
        let step = interval.width() / (n - 1) as f64;
        let grid_x = |i: usize| if i == n - 1 { b } else { a + i as f64 * step };

        // Signed residuals of every scanned sample, for the refinement pass.
        let mut residuals = Vec::with_capacity(n);
        let mut best: Option<Sample> = None;
        let mut iterations = 0;
        for i in 0..n {
            let x = grid_x(i);
            let v = value(x);
            let r = v - average_value;
            residuals.push(r);
            iterations += 1;
            if r.is_finite() && best.is_none_or(|s| r.abs() < s.residual()) {
                best = Some(Sample {
                    index: i,
                    x,
                    value: v,
                    signed: r,
                });
            }
            if r.abs() < tolerance {
                break;
            }
        }

        let Some(mut best) = best else {
            debug!("theorem search found no finite sample on [{a}, {b}]");
            return TheoremResult {
                form,
                integral,
                average_value,
                point_c: a,
                value_at_c: value(a),
                converged: false,
                iterations,
            };
        };

        if best.residual() >= tolerance {
            // Prefer the cell on the left, matching the low-to-high tie-break.
            let bracket = [best.index.checked_sub(1), Some(best.index)]
                .into_iter()
                .flatten()
                .filter(|&lo| lo + 1 < residuals.len())
                .find(|&lo| residuals[lo] * residuals[lo + 1] < 0.0);
            if let Some(lo) = bracket {
                let (mut x0, mut r0) = (grid_x(lo), residuals[lo]);
                let mut x1 = grid_x(lo + 1);
                for _ in 0..self.config.refine_steps {
                    let mid = 0.5 * (x0 + x1);
                    let v = value(mid);
                    let r = v - average_value;
                    iterations += 1;
                    if !r.is_finite() {
                        break;
                    }
                    if r.abs() < best.residual() {
                        best = Sample {
                            index: best.index,
                            x: mid,
                            value: v,
                            signed: r,
                        };
                    }
                    if r.abs() < tolerance {
                        break;
                    }
                    if r0 * r < 0.0 {
                        x1 = mid;
                    } else {
                        x0 = mid;
                        r0 = r;
                    }
                }
            }
        }

        let converged = best.residual() < tolerance;
        if !converged {
            debug!(
                "theorem search did not converge on [{a}, {b}]: residual {} after {iterations} iterations",
                best.residual()
            );
        }
        TheoremResult {
            form,
            integral,
            average_value,
            point_c: best.x,
            value_at_c: best.value,
            converged,
            iterations,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Sample {
    index: usize,
    x: f64,
    value: f64,
    signed: f64,
}

impl Sample {
    fn residual(&self) -> f64 {
        self.signed.abs()
    }
}
