// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed function catalog.
//!
//! Lessons never evaluate user-authored expressions: every plotted function is
//! a [`FunctionId`] variant, or a [`LinearCombination`] of two of them.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// A real function of one real variable.
///
/// Implemented for the catalog, for linear combinations, and for any
/// `Fn(f64) -> f64` closure so numeric routines can be exercised directly.
pub trait RealFn {
    /// Evaluates the function at `x`. May return NaN or an infinity where the
    /// function is undefined.
    fn evaluate(&self, x: f64) -> f64;
}

impl<F: Fn(f64) -> f64> RealFn for F {
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Identifier of a function in the closed catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FunctionId {
    /// `f(x) = 1`
    Constant,
    /// `f(x) = x`
    Linear,
    /// `f(x) = x²`
    #[default]
    Square,
    /// `f(x) = x³`
    Cube,
    /// `f(x) = √x`, undefined for `x < 0`.
    SquareRoot,
    /// `f(x) = 1/x`, undefined at `x = 0`.
    Reciprocal,
    /// `f(x) = eˣ`
    Exponential,
    /// `f(x) = sin(x)`
    Sine,
    /// `f(x) = cos(x)`
    Cosine,
    /// `f(x) = e^(−x²)`, which has no elementary antiderivative.
    Gaussian,
}

impl FunctionId {
    /// Every catalog entry, in menu order.
    pub const ALL: [Self; 10] = [
        Self::Constant,
        Self::Linear,
        Self::Square,
        Self::Cube,
        Self::SquareRoot,
        Self::Reciprocal,
        Self::Exponential,
        Self::Sine,
        Self::Cosine,
        Self::Gaussian,
    ];

    /// Stable machine-readable key, matching the serde representation.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Linear => "linear",
            Self::Square => "square",
            Self::Cube => "cube",
            Self::SquareRoot => "square_root",
            Self::Reciprocal => "reciprocal",
            Self::Exponential => "exponential",
            Self::Sine => "sine",
            Self::Cosine => "cosine",
            Self::Gaussian => "gaussian",
        }
    }

    /// Right-hand side of the definition, e.g. `x²`.
    #[must_use]
    pub fn expression(self) -> &'static str {
        match self {
            Self::Constant => "1",
            Self::Linear => "x",
            Self::Square => "x²",
            Self::Cube => "x³",
            Self::SquareRoot => "√x",
            Self::Reciprocal => "1/x",
            Self::Exponential => "eˣ",
            Self::Sine => "sin(x)",
            Self::Cosine => "cos(x)",
            Self::Gaussian => "e^(−x²)",
        }
    }

    /// Display label for selection menus, e.g. `f(x) = x²`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Constant => "f(x) = 1",
            Self::Linear => "f(x) = x",
            Self::Square => "f(x) = x²",
            Self::Cube => "f(x) = x³",
            Self::SquareRoot => "f(x) = √x",
            Self::Reciprocal => "f(x) = 1/x",
            Self::Exponential => "f(x) = eˣ",
            Self::Sine => "f(x) = sin(x)",
            Self::Cosine => "f(x) = cos(x)",
            Self::Gaussian => "f(x) = e^(−x²)",
        }
    }

    /// Exponent `n` when the function is exactly `xⁿ`.
    #[must_use]
    pub fn power_exponent(self) -> Option<f64> {
        match self {
            Self::Constant => Some(0.0),
            Self::Linear => Some(1.0),
            Self::Square => Some(2.0),
            Self::Cube => Some(3.0),
            Self::SquareRoot => Some(0.5),
            Self::Reciprocal => Some(-1.0),
            _ => None,
        }
    }

    /// Catalog of `(id, label)` pairs for external selection widgets.
    pub fn catalog() -> impl Iterator<Item = (Self, &'static str)> {
        Self::ALL.into_iter().map(|id| (id, id.label()))
    }
}

impl RealFn for FunctionId {
    fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Constant => 1.0,
            Self::Linear => x,
            Self::Square => x * x,
            Self::Cube => x * x * x,
            Self::SquareRoot => x.sqrt(),
            Self::Reciprocal => 1.0 / x,
            Self::Exponential => x.exp(),
            Self::Sine => x.sin(),
            Self::Cosine => x.cos(),
            Self::Gaussian => (-x * x).exp(),
        }
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown catalog key.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown function key `{0}`")]
pub struct UnknownFunction(pub String);

impl FromStr for FunctionId {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| UnknownFunction(s.to_owned()))
    }
}

/// `alpha · f(x) + beta · g(x)` over two catalog functions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearCombination {
    /// First function.
    pub f: FunctionId,
    /// Coefficient of `f`.
    pub alpha: f64,
    /// Second function.
    pub g: FunctionId,
    /// Coefficient of `g`.
    pub beta: f64,
}

impl LinearCombination {
    /// Creates `alpha · f + beta · g`.
    #[must_use]
    pub fn new(f: FunctionId, alpha: f64, g: FunctionId, beta: f64) -> Self {
        Self { f, alpha, g, beta }
    }

    /// Human-readable expression, e.g. `2·x² + -1·sin(x)`.
    #[must_use]
    pub fn expression(&self) -> String {
        format!(
            "{}·{} + {}·{}",
            self.alpha,
            self.f.expression(),
            self.beta,
            self.g.expression()
        )
    }
}

impl RealFn for LinearCombination {
    fn evaluate(&self, x: f64) -> f64 {
        self.alpha * self.f.evaluate(x) + self.beta * self.g.evaluate(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_roundtrip_through_from_str() {
        for id in FunctionId::ALL {
            assert_eq!(id.key().parse::<FunctionId>(), Ok(id));
        }
        assert_eq!(
            "tangent".parse::<FunctionId>(),
            Err(UnknownFunction("tangent".to_owned()))
        );
    }

    #[test]
    fn undefined_points_are_not_finite() {
        assert!(FunctionId::Reciprocal.evaluate(0.0).is_infinite());
        assert!(FunctionId::SquareRoot.evaluate(-1.0).is_nan());
        assert_eq!(FunctionId::SquareRoot.evaluate(4.0), 2.0);
    }

    #[test]
    fn catalog_lists_every_entry_with_a_label() {
        let entries: Vec<_> = FunctionId::catalog().collect();
        assert_eq!(entries.len(), FunctionId::ALL.len());
        assert_eq!(entries[2], (FunctionId::Square, "f(x) = x²"));
    }

    #[test]
    fn combination_is_linear() {
        let c = LinearCombination::new(FunctionId::Square, 2.0, FunctionId::Linear, -3.0);
        assert_eq!(c.evaluate(2.0), 2.0 * 4.0 - 3.0 * 2.0);
        assert_eq!(c.expression(), "2·x² + -3·x");
    }

    #[test]
    fn closures_are_real_functions() {
        let f = |x: f64| 2.0 * x;
        assert_eq!(RealFn::evaluate(&f, 3.0), 6.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_catalog_keys() {
        for id in FunctionId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.key()));
        }
    }
}
