// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Definite integrals by the composite trapezoidal rule.

use tangent_view::{Interval, SplitInterval};

use crate::error::CalculusError;
use crate::function::RealFn;

/// Composite trapezoidal integrator with a fixed partition count.
///
/// The result is `h · Σ wᵢ f(xᵢ)` with `h = (b − a) / n`, endpoint weights
/// `0.5` and interior weights `1.0`. The computation is deterministic, and a
/// NaN or infinite sample anywhere propagates into the result.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Integrator {
    partitions: usize,
}

impl Default for Integrator {
    fn default() -> Self {
        Self {
            partitions: Self::DEFAULT_PARTITIONS,
        }
    }
}

impl Integrator {
    /// Partition count used by [`Integrator::default`].
    pub const DEFAULT_PARTITIONS: usize = 1000;

    /// Creates an integrator with `partitions` trapezoids, which must be at least 1.
    pub fn new(partitions: usize) -> Result<Self, CalculusError> {
        CalculusError::check_count(partitions, 1)?;
        Ok(Self { partitions })
    }

    /// Number of trapezoids.
    #[must_use]
    pub fn partitions(&self) -> usize {
        self.partitions
    }

    /// Integrates `f` over a validated interval.
    pub fn integrate<F: RealFn + ?Sized>(&self, f: &F, interval: Interval) -> f64 {
        self.integrate_between(f, interval.lower(), interval.upper())
    }

    /// Integrates `f` from `a` to `b` without validating their order.
    ///
    /// The result is signed: swapping `a` and `b` negates it, and `a == b`
    /// yields zero. Used for running integrals such as `∫₀ˣ f`.
    pub fn integrate_between<F: RealFn + ?Sized>(&self, f: &F, a: f64, b: f64) -> f64 {
        // A zero-partition integrator can only come from a deserialized config.
        let n = self.partitions.max(1);
        let h = (b - a) / n as f64;
        let mut sum = 0.5 * (f.evaluate(a) + f.evaluate(b));
        for i in 1..n {
            sum += f.evaluate(a + i as f64 * h);
        }
        h * sum
    }

    /// Integrates `f` over `interval`, reporting the first undefined sample.
    ///
    /// Unlike [`Integrator::integrate`], which lets NaN flow into the result,
    /// this names where the function stopped being finite.
    pub fn integrate_checked<F: RealFn + ?Sized>(
        &self,
        f: &F,
        interval: Interval,
    ) -> Result<f64, CalculusError> {
        let n = self.partitions.max(1);
        let (a, b) = (interval.lower(), interval.upper());
        let h = (b - a) / n as f64;
        let mut sum = 0.0;
        for i in 0..=n {
            let x = if i == n { b } else { a + i as f64 * h };
            let y = f.evaluate(x);
            if !y.is_finite() {
                return Err(CalculusError::UndefinedSample { x });
            }
            sum += if i == 0 || i == n { 0.5 * y } else { y };
        }
        Ok(h * sum)
    }

    /// Computes the three integrals of the additivity property over `split`.
    pub fn additivity<F: RealFn + ?Sized>(&self, f: &F, split: SplitInterval) -> Additivity {
        Additivity {
            whole: self.integrate(f, split.outer()),
            left: self.integrate(f, split.left()),
            right: self.integrate(f, split.right()),
        }
    }

    /// Validates `a < b < c` and then computes [`Integrator::additivity`].
    ///
    /// Unordered bounds are rejected before any sample is taken.
    pub fn additivity_between<F: RealFn + ?Sized>(
        &self,
        f: &F,
        a: f64,
        b: f64,
        c: f64,
    ) -> Result<Additivity, CalculusError> {
        let split = SplitInterval::new(a, b, c)?;
        Ok(self.additivity(f, split))
    }
}

/// Integrals over `[a, c]`, `[a, b]`, and `[b, c]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Additivity {
    /// `∫ₐᶜ f`
    pub whole: f64,
    /// `∫ₐᵇ f`
    pub left: f64,
    /// `∫ᵦᶜ f`
    pub right: f64,
}

impl Additivity {
    /// `|∫ₐᶜ f − (∫ₐᵇ f + ∫ᵦᶜ f)|`
    #[must_use]
    pub fn discrepancy(&self) -> f64 {
        (self.whole - (self.left + self.right)).abs()
    }
}
