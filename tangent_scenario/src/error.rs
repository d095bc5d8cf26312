// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tangent_calculus::CalculusError;
use tangent_view::IntervalError;
use thiserror::Error;

/// Errors that prevent a scenario from being created.
///
/// Once a scenario exists, bad input is reported as an [`Issue`] instead.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The configuration document could not be parsed or written.
    #[error("invalid scenario configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration describes an invalid starting state.
    #[error(transparent)]
    Calculus(#[from] CalculusError),
}

impl From<IntervalError> for ScenarioError {
    fn from(err: IntervalError) -> Self {
        Self::Calculus(err.into())
    }
}

/// A problem reported alongside a scenario's results. None are fatal.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Issue {
    /// Rejected input or an undefined sample; the previous valid state is kept.
    #[error(transparent)]
    Calculus(#[from] CalculusError),
    /// No mean value point met the tolerance; the best sample is shown.
    #[error("no point met the tolerance; best residual is {residual:.3e}")]
    NonConvergence {
        /// Residual of the best sample.
        residual: f64,
    },
    /// The antiderivative failed its finite-difference check.
    #[error("antiderivative failed verification with mean error {mean_absolute_error:.3e}")]
    VerificationFailure {
        /// Measured mean absolute error.
        mean_absolute_error: f64,
    },
    /// A coefficient was NaN or infinite; the previous coefficients are kept.
    #[error("coefficient must be finite, got {value}")]
    InvalidCoefficient {
        /// Rejected value.
        value: f64,
    },
}

impl From<IntervalError> for Issue {
    fn from(err: IntervalError) -> Self {
        Self::Calculus(err.into())
    }
}

impl Issue {
    /// Returns `true` for issues caused by rejected input.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Calculus(CalculusError::InvalidInterval(_) | CalculusError::InvalidCount { .. })
                | Self::InvalidCoefficient { .. }
        )
    }
}
