// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tangent_view::IntervalError;
use thiserror::Error;

/// Errors reported by calculus operations before or instead of computing.
///
/// Non-convergence and failed verification are not errors; they are flags on
/// [`TheoremResult`](crate::TheoremResult) and
/// [`VerificationReport`](crate::VerificationReport).
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum CalculusError {
    /// Bounds failed their required ordering; nothing was computed.
    #[error(transparent)]
    InvalidInterval(#[from] IntervalError),
    /// The function was NaN or infinite at a sampled point.
    #[error("function is undefined at sampled point x = {x}")]
    UndefinedSample {
        /// First sampled point where evaluation was not finite.
        x: f64,
    },
    /// A partition or sample count was too small to be meaningful.
    #[error("count must be at least {min}, got {count}")]
    InvalidCount {
        /// Requested count.
        count: usize,
        /// Smallest accepted count.
        min: usize,
    },
}

impl CalculusError {
    pub(crate) fn check_count(count: usize, min: usize) -> Result<(), Self> {
        if count < min {
            Err(Self::InvalidCount { count, min })
        } else {
            Ok(())
        }
    }
}
