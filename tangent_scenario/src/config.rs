// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};
use tangent_calculus::{FunctionId, Integrator, SamplingPolicy, TheoremConfig, VerifyConfig};

use crate::error::ScenarioError;

/// Lesson shown by a [`Scenario`](crate::Scenario).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Shaded area under `f` between two draggable bounds.
    #[default]
    DefiniteIntegral,
    /// Average value and the point `c` with `f(c) = average`.
    MeanValueIntegral,
    /// Secant slope and the point `c` with `f'(c) = slope`.
    MeanValueDerivative,
    /// Rectangles approximating the integral.
    RiemannSum,
    /// Closed-form antiderivative with its verification.
    Antiderivative,
    /// `∫ₐᶜ f = ∫ₐᵇ f + ∫ᵦᶜ f` with a draggable split point.
    Additivity,
    /// `∫ (αf + βg) = α∫f + β∫g`.
    LinearCombination,
}

impl ScenarioKind {
    /// Every kind, in menu order.
    pub const ALL: [Self; 7] = [
        Self::DefiniteIntegral,
        Self::MeanValueIntegral,
        Self::MeanValueDerivative,
        Self::RiemannSum,
        Self::Antiderivative,
        Self::Additivity,
        Self::LinearCombination,
    ];

    /// Whether the lesson uses a second function `g`.
    #[must_use]
    pub fn uses_secondary(self) -> bool {
        matches!(self, Self::LinearCombination)
    }
}

/// Initial state and tuning for a scenario.
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes:
///
/// ```
/// use tangent_calculus::FunctionId;
/// use tangent_scenario::ScenarioConfig;
///
/// let config = ScenarioConfig::from_json_str(
///     r#"{ "function": "sine", "lower": 0.0, "upper": 3.0 }"#,
/// )
/// .unwrap();
/// assert_eq!(config.function, FunctionId::Sine);
/// assert_eq!(config.partition_count, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Primary function `f`.
    pub function: FunctionId,
    /// Second function `g` for linear combinations.
    pub secondary_function: FunctionId,
    /// Initial lower bound.
    pub lower: f64,
    /// Initial upper bound.
    pub upper: f64,
    /// Split point for additivity; the midpoint when absent.
    pub split: Option<f64>,
    /// Number of Riemann rectangles.
    pub partition_count: usize,
    /// Riemann sampling policy.
    pub sampling: SamplingPolicy,
    /// Coefficient `α` of `f`.
    pub alpha: f64,
    /// Coefficient `β` of `g`.
    pub beta: f64,
    /// Trapezoidal integrator.
    pub integrator: Integrator,
    /// Mean value point search.
    pub theorem: TheoremConfig,
    /// Antiderivative verification.
    pub verify: VerifyConfig,
    /// Handle hit radius in pixels.
    pub handle_radius: f64,
    /// Points per sampled curve polyline.
    pub curve_samples: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            function: FunctionId::default(),
            secondary_function: FunctionId::Linear,
            lower: -2.0,
            upper: 2.0,
            split: None,
            partition_count: 8,
            sampling: SamplingPolicy::default(),
            alpha: 1.0,
            beta: 1.0,
            integrator: Integrator::default(),
            theorem: TheoremConfig::default(),
            verify: VerifyConfig::default(),
            handle_radius: 8.0,
            curve_samples: 400,
        }
    }
}

impl ScenarioConfig {
    /// Smallest accepted [`ScenarioConfig::curve_samples`].
    pub const MIN_CURVE_SAMPLES: usize = 2;

    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
