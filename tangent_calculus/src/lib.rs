// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tangent Calculus: the numeric core behind the calculus visualizer.
//!
//! This crate computes the quantities a lesson displays for a function picked
//! from a closed catalog:
//! - [`function`]: the catalog itself ([`FunctionId`]) and linear combinations.
//! - [`integrate`]: definite integrals by the composite trapezoidal rule, plus
//!   the additivity check over a split interval.
//! - [`theorem`]: the Mean Value Theorem point search, in integral and
//!   derivative form.
//! - [`riemann`]: Riemann rectangles under left, right, or midpoint sampling.
//! - [`antiderivative`]: closed-set antiderivative rules with a numeric
//!   fallback, and an independent finite-difference verifier.
//!
//! Every operation is bounded and synchronous. Undefined samples (for example
//! `1/x` at `0`) propagate as NaN or infinity instead of being skipped, and
//! "soft" failures such as non-convergence or a failed verification are
//! reported as flags on the result rather than as errors.
//!
//! ## Minimal example
//!
//! ```rust
//! use tangent_calculus::{FunctionId, Integrator, TheoremForm, TheoremSolver};
//! use tangent_view::Interval;
//!
//! let interval = Interval::new(0.0, 2.0).unwrap();
//! let integral = Integrator::default().integrate(&FunctionId::Square, interval);
//! assert!((integral - 8.0 / 3.0).abs() < 1e-3);
//!
//! let result = TheoremSolver::default().solve(&FunctionId::Cube, interval, TheoremForm::Derivative);
//! assert!(result.converged());
//! assert!((result.point_c() - (4.0_f64 / 3.0).sqrt()).abs() < 1e-3);
//! ```

pub mod antiderivative;
mod error;
pub mod function;
pub mod integrate;
pub mod riemann;
pub mod theorem;

pub use antiderivative::{
    Antiderivative, AntiderivativeResult, Rule, RuleEngine, VerificationReport, VerifyConfig,
    verify,
};
pub use error::CalculusError;
pub use function::{FunctionId, LinearCombination, RealFn, UnknownFunction};
pub use integrate::{Additivity, Integrator};
pub use riemann::{RiemannRectangle, RiemannSum, SamplingPolicy};
pub use theorem::{TheoremConfig, TheoremForm, TheoremResult, TheoremSolver};
