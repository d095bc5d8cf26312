// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Riemann rectangles approximating the area under a curve.

use tangent_view::Interval;

use crate::error::CalculusError;
use crate::function::RealFn;

/// Where inside each subinterval the rectangle height is sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SamplingPolicy {
    /// Left endpoint.
    #[default]
    Left,
    /// Right endpoint.
    Right,
    /// Midpoint.
    Midpoint,
}

impl SamplingPolicy {
    /// Every policy, in menu order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Midpoint];

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "Left endpoint",
            Self::Right => "Right endpoint",
            Self::Midpoint => "Midpoint",
        }
    }

    fn sample_x(self, x: f64, width: f64) -> f64 {
        match self {
            Self::Left => x,
            Self::Right => x + width,
            Self::Midpoint => x + 0.5 * width,
        }
    }
}

/// One rectangle in math space.
///
/// `height` is the signed function value at the sample point; deciding how to
/// draw negative heights is up to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiemannRectangle {
    /// Left edge.
    pub x: f64,
    /// Width along x.
    pub width: f64,
    /// Signed height.
    pub height: f64,
}

impl RiemannRectangle {
    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Signed area `width · height`.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.width * self.height
    }
}

/// Partitions `interval` into `n` rectangles sampled by `policy`.
///
/// Edges are `a + i · (b − a) / n`, except the last, which is exactly `b`, so
/// the rectangles tile the interval with no gap or overlap.
pub fn partition<F: RealFn + ?Sized>(
    f: &F,
    interval: Interval,
    n: usize,
    policy: SamplingPolicy,
) -> Result<Vec<RiemannRectangle>, CalculusError> {
    CalculusError::check_count(n, 1)?;
    let a = interval.lower();
    let step = interval.width() / n as f64;
    let edge = |i: usize| {
        if i == n {
            interval.upper()
        } else {
            a + i as f64 * step
        }
    };
    Ok((0..n)
        .map(|i| {
            let x = edge(i);
            let width = edge(i + 1) - x;
            RiemannRectangle {
                x,
                width,
                height: f.evaluate(policy.sample_x(x, width)),
            }
        })
        .collect())
}

/// A Riemann sum: its rectangles and their total signed area.
#[derive(Clone, Debug, PartialEq)]
pub struct RiemannSum {
    /// Sampling policy used.
    pub policy: SamplingPolicy,
    /// Rectangles from low to high `x`.
    pub rectangles: Vec<RiemannRectangle>,
}

impl RiemannSum {
    /// Builds the sum of `n` rectangles over `interval`.
    pub fn new<F: RealFn + ?Sized>(
        f: &F,
        interval: Interval,
        n: usize,
        policy: SamplingPolicy,
    ) -> Result<Self, CalculusError> {
        Ok(Self {
            policy,
            rectangles: partition(f, interval, n, policy)?,
        })
    }

    /// Total signed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.rectangles.iter().map(RiemannRectangle::signed_area).sum()
    }

    /// `|area − integral|`, the approximation error against a reference integral.
    #[must_use]
    pub fn error_against(&self, integral: f64) -> f64 {
        (self.area() - integral).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionId;

    fn interval(a: f64, b: f64) -> Interval {
        Interval::new(a, b).unwrap()
    }

    #[test]
    fn rectangles_tile_the_interval() {
        let i = interval(-1.3, 2.9);
        for policy in SamplingPolicy::ALL {
            for n in [1, 3, 7, 100] {
                let rects = partition(&FunctionId::Sine, i, n, policy).unwrap();
                assert_eq!(rects.len(), n);
                assert_eq!(rects[0].x, i.lower());
                assert!((rects[n - 1].right() - i.upper()).abs() < 1e-12);
                for pair in rects.windows(2) {
                    assert!(
                        (pair[0].right() - pair[1].x).abs() < 1e-12,
                        "gap or overlap under {policy:?}"
                    );
                }
                let total: f64 = rects.iter().map(|r| r.width).sum();
                assert!((total - i.width()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn policies_sample_expected_points() {
        let i = interval(0.0, 2.0);
        let left = partition(&FunctionId::Linear, i, 2, SamplingPolicy::Left).unwrap();
        let right = partition(&FunctionId::Linear, i, 2, SamplingPolicy::Right).unwrap();
        let mid = partition(&FunctionId::Linear, i, 2, SamplingPolicy::Midpoint).unwrap();
        assert_eq!([left[0].height, left[1].height], [0.0, 1.0]);
        assert_eq!([right[0].height, right[1].height], [1.0, 2.0]);
        assert_eq!([mid[0].height, mid[1].height], [0.5, 1.5]);
    }

    #[test]
    fn heights_keep_their_sign() {
        let rects = partition(&FunctionId::Linear, interval(-2.0, 2.0), 4, SamplingPolicy::Left)
            .unwrap();
        assert!(rects[0].height < 0.0);
        assert!(rects[3].height > 0.0);
    }

    #[test]
    fn midpoint_sum_approaches_integral() {
        let sum =
            RiemannSum::new(&FunctionId::Square, interval(0.0, 2.0), 50, SamplingPolicy::Midpoint)
                .unwrap();
        assert!(sum.error_against(8.0 / 3.0) < 1e-3);
        let coarse =
            RiemannSum::new(&FunctionId::Square, interval(0.0, 2.0), 4, SamplingPolicy::Left)
                .unwrap();
        assert!(coarse.area() < 8.0 / 3.0);
    }

    #[test]
    fn zero_rectangles_rejected() {
        assert!(matches!(
            partition(&FunctionId::Square, interval(0.0, 1.0), 0, SamplingPolicy::Left),
            Err(CalculusError::InvalidCount { count: 0, min: 1 })
        ));
    }
}
