// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Antiderivatives from a closed rule list, checked by an independent oracle.
//!
//! ## Usage
//!
//! 1) [`RuleEngine::calculate`] tries each [`Rule`] in [`Rule::ORDER`] and
//!    applies the first that matches. Functions with no matching rule get a
//!    numeric antiderivative `∫₀ˣ f(t) dt`, so every catalog entry has a
//!    usable evaluator.
//! 2) The candidate is then passed through [`verify`], which compares its
//!    forward-difference derivative against the original function on a fixed
//!    probe set. Verification never looks at which rule was used, so a wrong
//!    match still shows up as `verified == false`.
//!
//! ```
//! use tangent_calculus::{FunctionId, RuleEngine};
//!
//! let result = RuleEngine::default().calculate(FunctionId::Square);
//! assert_eq!(result.closed_form(), "x³/3");
//! assert!(result.verification().verified);
//! ```

mod rules;
mod verify;

use log::debug;

pub use rules::{Antiderivative, Rule};
pub use verify::{VerificationReport, VerifyConfig, verify};

use crate::function::{FunctionId, RealFn};
use crate::integrate::Integrator;

/// Matches catalog functions against the rule list.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RuleEngine {
    integrator: Integrator,
    verify: VerifyConfig,
}

impl RuleEngine {
    /// Creates an engine whose numeric fallback uses `integrator`.
    #[must_use]
    pub fn new(integrator: Integrator, verify: VerifyConfig) -> Self {
        Self { integrator, verify }
    }

    /// Verification probes and thresholds.
    #[must_use]
    pub fn verify_config(&self) -> &VerifyConfig {
        &self.verify
    }

    /// First rule in [`Rule::ORDER`] that matches `f`, if any.
    #[must_use]
    pub fn matching_rule(&self, f: FunctionId) -> Option<Rule> {
        Rule::ORDER.into_iter().find(|rule| rule.matches(f))
    }

    /// Derives and verifies an antiderivative of `f`.
    #[must_use]
    pub fn calculate(&self, f: FunctionId) -> AntiderivativeResult {
        let (rule, antiderivative) = match self
            .matching_rule(f)
            .and_then(|rule| Some((rule, rule.apply(f)?)))
        {
            Some((rule, a)) => (Some(rule), a),
            None => (
                None,
                Antiderivative::Numeric {
                    function: f,
                    integrator: self.integrator,
                },
            ),
        };
        let verification = verify(&antiderivative, &f, &self.verify);
        if !verification.verified {
            debug!(
                "antiderivative of {} failed verification: mean error {}",
                f.key(),
                verification.mean_absolute_error
            );
        }
        AntiderivativeResult {
            function: f,
            rule,
            closed_form: antiderivative.expression(),
            antiderivative,
            verification,
        }
    }
}

/// An antiderivative together with its verification outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct AntiderivativeResult {
    function: FunctionId,
    rule: Option<Rule>,
    closed_form: String,
    antiderivative: Antiderivative,
    verification: VerificationReport,
}

impl AntiderivativeResult {
    /// The integrand.
    #[must_use]
    pub fn function(&self) -> FunctionId {
        self.function
    }

    /// Rule that produced the closed form, or `None` for the numeric fallback.
    #[must_use]
    pub fn rule(&self) -> Option<Rule> {
        self.rule
    }

    /// Rule name for display, `"numeric"` for the fallback.
    #[must_use]
    pub fn rule_name(&self) -> &'static str {
        self.rule.map_or("numeric", Rule::name)
    }

    /// Antiderivative expression, e.g. `x³/3`.
    #[must_use]
    pub fn closed_form(&self) -> &str {
        &self.closed_form
    }

    /// Evaluator for the antiderivative.
    #[must_use]
    pub fn antiderivative(&self) -> &Antiderivative {
        &self.antiderivative
    }

    /// Finite-difference verification outcome.
    #[must_use]
    pub fn verification(&self) -> &VerificationReport {
        &self.verification
    }

    /// Evaluates the antiderivative at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.antiderivative.evaluate(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_rule_for_square() {
        let r = RuleEngine::default().calculate(FunctionId::Square);
        assert_eq!(r.rule(), Some(Rule::Power));
        assert_eq!(r.closed_form(), "x³/3");
        assert!(r.verification().verified);
        assert!(r.verification().mean_absolute_error < 1e-2);
        assert!((r.evaluate(3.0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn every_catalog_entry_verifies() {
        let engine = RuleEngine::default();
        for f in FunctionId::ALL {
            let r = engine.calculate(f);
            assert!(
                r.verification().verified,
                "{f:?} via {}: {:?}",
                r.rule_name(),
                r.verification()
            );
        }
    }

    #[test]
    fn expected_rules_and_forms() {
        let engine = RuleEngine::default();
        let cases = [
            (FunctionId::Constant, Some(Rule::Power), "x"),
            (FunctionId::Linear, Some(Rule::Power), "x²/2"),
            (FunctionId::Cube, Some(Rule::Power), "x⁴/4"),
            (FunctionId::SquareRoot, Some(Rule::Power), "2x^(3/2)/3"),
            (FunctionId::Exponential, Some(Rule::Exponential), "eˣ"),
            (FunctionId::Sine, Some(Rule::Sine), "−cos(x)"),
            (FunctionId::Cosine, Some(Rule::Cosine), "sin(x)"),
            (FunctionId::Reciprocal, Some(Rule::Reciprocal), "ln|x|"),
            (FunctionId::Gaussian, None, "∫₀ˣ e^(−t²) dt"),
        ];
        for (f, rule, form) in cases {
            let r = engine.calculate(f);
            assert_eq!(r.rule(), rule, "{f:?}");
            assert_eq!(r.closed_form(), form, "{f:?}");
        }
    }

    #[test]
    fn numeric_fallback_is_usable() {
        let r = RuleEngine::default().calculate(FunctionId::Gaussian);
        assert_eq!(r.rule_name(), "numeric");
        // ∫₀¹ e^(−t²) dt ≈ 0.746824.
        assert!((r.evaluate(1.0) - 0.746_824).abs() < 1e-4);
        assert!(r.evaluate(-1.0) < 0.0);
    }

    #[test]
    fn mismatched_template_is_caught_by_verification() {
        // Pretend the sine rule had been applied to cosine.
        let wrong = Rule::Sine.apply(FunctionId::Sine).unwrap();
        let report = verify(&wrong, &FunctionId::Cosine, &VerifyConfig::default());
        assert!(!report.verified);
    }
}
