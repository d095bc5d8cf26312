// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::function::{FunctionId, RealFn};
use crate::integrate::Integrator;

/// A closed-form antiderivative rule.
///
/// Rules are tried in [`Rule::ORDER`]; each pairs a match predicate
/// ([`Rule::matches`]) with an applier ([`Rule::apply`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `∫ xⁿ dx = xⁿ⁺¹ / (n + 1)` for `n ≠ −1`.
    Power,
    /// `∫ eˣ dx = eˣ`
    Exponential,
    /// `∫ sin(x) dx = −cos(x)`
    Sine,
    /// `∫ cos(x) dx = sin(x)`
    Cosine,
    /// `∫ 1/x dx = ln|x|`
    Reciprocal,
}

impl Rule {
    /// Order in which rules are tried.
    pub const ORDER: [Self; 5] = [
        Self::Power,
        Self::Exponential,
        Self::Sine,
        Self::Cosine,
        Self::Reciprocal,
    ];

    /// Short rule name for display.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Power => "power rule",
            Self::Exponential => "exponential rule",
            Self::Sine => "sine rule",
            Self::Cosine => "cosine rule",
            Self::Reciprocal => "logarithm rule",
        }
    }

    /// Whether this rule applies to `f`.
    #[must_use]
    pub fn matches(self, f: FunctionId) -> bool {
        match self {
            Self::Power => f.power_exponent().is_some_and(|n| n != -1.0),
            Self::Exponential => f == FunctionId::Exponential,
            Self::Sine => f == FunctionId::Sine,
            Self::Cosine => f == FunctionId::Cosine,
            Self::Reciprocal => f == FunctionId::Reciprocal,
        }
    }

    /// Applies the rule to `f`, or returns `None` when it does not match.
    #[must_use]
    pub fn apply(self, f: FunctionId) -> Option<Antiderivative> {
        if !self.matches(f) {
            return None;
        }
        Some(match self {
            Self::Power => Antiderivative::Power {
                exponent: f.power_exponent()? + 1.0,
            },
            Self::Exponential => Antiderivative::Exponential,
            Self::Sine => Antiderivative::NegativeCosine,
            Self::Cosine => Antiderivative::Sine,
            Self::Reciprocal => Antiderivative::LogAbs,
        })
    }
}

/// An antiderivative evaluator: a closed-form template or a running integral.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Antiderivative {
    /// `xᵖ / p`
    Power {
        /// Exponent `p` of the antiderivative (`n + 1`).
        exponent: f64,
    },
    /// `eˣ`
    Exponential,
    /// `−cos(x)`
    NegativeCosine,
    /// `sin(x)`
    Sine,
    /// `ln|x|`
    LogAbs,
    /// `∫₀ˣ f(t) dt`, evaluated numerically.
    Numeric {
        /// Integrand.
        function: FunctionId,
        /// Integrator used for each evaluation.
        integrator: Integrator,
    },
}

impl Antiderivative {
    /// Closed-form expression, e.g. `x³/3`.
    #[must_use]
    pub fn expression(&self) -> String {
        match self {
            Self::Power { exponent } => power_expression(*exponent),
            Self::Exponential => "eˣ".to_owned(),
            Self::NegativeCosine => "−cos(x)".to_owned(),
            Self::Sine => "sin(x)".to_owned(),
            Self::LogAbs => "ln|x|".to_owned(),
            Self::Numeric { function, .. } => {
                format!("∫₀ˣ {} dt", function.expression().replace('x', "t"))
            }
        }
    }

    /// Whether this evaluator is a closed form rather than a numeric integral.
    #[must_use]
    pub fn is_closed_form(&self) -> bool {
        !matches!(self, Self::Numeric { .. })
    }
}

impl RealFn for Antiderivative {
    fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Power { exponent } => {
                let p = *exponent;
                match as_integer(p).and_then(|n| i32::try_from(n).ok()) {
                    Some(n) => x.powi(n) / p,
                    None => x.powf(p) / p,
                }
            }
            Self::Exponential => x.exp(),
            Self::NegativeCosine => -x.cos(),
            Self::Sine => x.sin(),
            Self::LogAbs => x.abs().ln(),
            Self::Numeric {
                function,
                integrator,
            } => integrator.integrate_between(function, 0.0, x),
        }
    }
}

fn power_expression(p: f64) -> String {
    if p == 1.0 {
        return "x".to_owned();
    }
    if let Some(n) = as_integer(p) {
        return format!("x{}/{n}", superscript(n));
    }
    if let Some(k) = as_integer(2.0 * p) {
        return format!("2x^({k}/2)/{k}");
    }
    format!("x^({p})/{p}")
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// `p` as an integer, if it is integral and exactly representable.
fn as_integer(p: f64) -> Option<i64> {
    if p.fract() != 0.0 || p.abs() > MAX_EXACT_INTEGER {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "integral and within ±2⁵³, so the cast is exact"
    )]
    Some(p as i64)
}

fn superscript(n: i64) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            '-' => '⁻',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_rule_skips_reciprocal() {
        assert!(Rule::Power.matches(FunctionId::Square));
        assert!(Rule::Power.matches(FunctionId::Constant));
        assert!(!Rule::Power.matches(FunctionId::Reciprocal));
        assert!(Rule::Reciprocal.matches(FunctionId::Reciprocal));
        assert_eq!(Rule::Sine.apply(FunctionId::Cosine), None);
    }

    #[test]
    fn power_expressions() {
        assert_eq!(power_expression(1.0), "x");
        assert_eq!(power_expression(2.0), "x²/2");
        assert_eq!(power_expression(3.0), "x³/3");
        assert_eq!(power_expression(4.0), "x⁴/4");
        assert_eq!(power_expression(1.5), "2x^(3/2)/3");
        assert_eq!(power_expression(12.0), "x¹²/12");
    }

    #[test]
    fn exponent_conversion_is_exact_or_refused() {
        assert_eq!(as_integer(3.0), Some(3));
        assert_eq!(as_integer(-4.0), Some(-4));
        assert_eq!(as_integer(1.5), None);
        assert_eq!(as_integer(1e300), None);
        assert_eq!(as_integer(f64::NAN), None);
        assert_eq!(as_integer(f64::INFINITY), None);
    }

    #[test]
    fn huge_integral_exponents_fall_back_to_powf() {
        // 1e10 is integral but does not fit an `i32` exponent.
        let a = Antiderivative::Power { exponent: 1e10 };
        assert!((a.evaluate(1.0) - 1e-10).abs() < 1e-20);
        let cube = Antiderivative::Power { exponent: 4.0 };
        assert!((cube.evaluate(2.0) - 4.0).abs() < 1e-12);
        assert_eq!(power_expression(1e300), format!("x^({})/{}", 1e300, 1e300));
    }

    #[test]
    fn numeric_expression_renames_variable() {
        let a = Antiderivative::Numeric {
            function: FunctionId::Gaussian,
            integrator: Integrator::default(),
        };
        assert_eq!(a.expression(), "∫₀ˣ e^(−t²) dt");
        assert!(!a.is_closed_form());
        assert_eq!(a.evaluate(0.0), 0.0);
    }

    #[test]
    fn evaluators_match_closed_forms() {
        let cube = Antiderivative::Power { exponent: 3.0 };
        assert!((cube.evaluate(-2.0) - (-8.0 / 3.0)).abs() < 1e-12);
        assert!((Antiderivative::LogAbs.evaluate(-1.0)).abs() < 1e-12);
        assert!(Antiderivative::Power { exponent: 1.5 }.evaluate(-1.0).is_nan());
    }
}
