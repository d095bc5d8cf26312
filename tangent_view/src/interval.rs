// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Error returned when bounds fail their required ordering.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum IntervalError {
    /// `lower` was not strictly less than `upper`.
    #[error("interval bounds are not ordered: {lower} must be less than {upper}")]
    Unordered {
        /// Requested lower bound.
        lower: f64,
        /// Requested upper bound.
        upper: f64,
    },
    /// A split point was not strictly inside its outer bounds.
    #[error("split bounds are not ordered: expected {a} < {b} < {c}")]
    UnorderedSplit {
        /// Requested first bound.
        a: f64,
        /// Requested split point.
        b: f64,
        /// Requested last bound.
        c: f64,
    },
    /// A bound was NaN or infinite.
    #[error("interval bound {0} is not finite")]
    NonFinite(f64),
    /// Both bounds were finite but their distance overflows `f64`.
    #[error("interval width overflows: {upper} - {lower} is not finite")]
    WidthOverflow {
        /// Requested lower bound.
        lower: f64,
        /// Requested upper bound.
        upper: f64,
    },
}

/// Closed math-space interval `[lower, upper]` with `lower < upper`.
///
/// Construction never reorders its inputs: `Interval::new(2.0, 1.0)` is an
/// error, not `[1, 2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Interval {
    /// Creates an interval, validating that both bounds are finite and ordered.
    ///
    /// The width must be finite too, so `[-1e308, 1e308]` is rejected.
    pub fn new(lower: f64, upper: f64) -> Result<Self, IntervalError> {
        check_finite(lower)?;
        check_finite(upper)?;
        if lower >= upper {
            return Err(IntervalError::Unordered { lower, upper });
        }
        check_width(lower, upper)?;
        Ok(Self { lower, upper })
    }

    /// Lower bound.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Length `upper - lower`, always positive.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the interval.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) * 0.5
    }

    /// Returns `true` if `x` lies in `[lower, upper]`.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// Returns a copy with the lower bound replaced, if the result stays ordered.
    pub fn with_lower(&self, lower: f64) -> Result<Self, IntervalError> {
        Self::new(lower, self.upper)
    }

    /// Returns a copy with the upper bound replaced, if the result stays ordered.
    pub fn with_upper(&self, upper: f64) -> Result<Self, IntervalError> {
        Self::new(self.lower, upper)
    }

    /// Returns the point at parameter `t` in `[0, 1]`, extrapolating outside it.
    #[must_use]
    pub fn lerp(&self, t: f64) -> f64 {
        self.lower + t * self.width()
    }
}

/// Three ordered bounds `a < b < c`, as used by integral additivity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitInterval {
    a: f64,
    b: f64,
    c: f64,
}

impl SplitInterval {
    /// Creates a split interval, validating `a < b < c`.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, IntervalError> {
        check_finite(a)?;
        check_finite(b)?;
        check_finite(c)?;
        if !(a < b && b < c) {
            return Err(IntervalError::UnorderedSplit { a, b, c });
        }
        check_width(a, c)?;
        Ok(Self { a, b, c })
    }

    /// Splits `outer` at `b`.
    pub fn split(outer: Interval, b: f64) -> Result<Self, IntervalError> {
        Self::new(outer.lower, b, outer.upper)
    }

    /// The whole interval `[a, c]`.
    #[must_use]
    pub fn outer(&self) -> Interval {
        Interval {
            lower: self.a,
            upper: self.c,
        }
    }

    /// The left piece `[a, b]`.
    #[must_use]
    pub fn left(&self) -> Interval {
        Interval {
            lower: self.a,
            upper: self.b,
        }
    }

    /// The right piece `[b, c]`.
    #[must_use]
    pub fn right(&self) -> Interval {
        Interval {
            lower: self.b,
            upper: self.c,
        }
    }

    /// The split point `b`.
    #[must_use]
    pub fn split_point(&self) -> f64 {
        self.b
    }
}

/// Vertical math-space range shown on the plot.
///
/// Unlike [`Interval`], a value range is fitted rather than user supplied, so
/// it is always valid: fitting never produces an empty range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// Fraction of the fitted span added above and below the samples.
    pub const PADDING: f64 = 0.1;

    /// Largest sample magnitude [`ValueRange::fit`] honours.
    ///
    /// Samples beyond it are clamped so the padded range stays finite.
    pub const MAX_MAGNITUDE: f64 = f64::MAX / 4.0;

    /// Creates a range from explicit bounds, validating `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self, IntervalError> {
        let interval = Interval::new(min, max)?;
        Ok(Self {
            min: interval.lower,
            max: interval.upper,
        })
    }

    /// Fits a range around the given sample values.
    ///
    /// Non-finite samples are ignored and finite ones are clamped to
    /// [`ValueRange::MAX_MAGNITUDE`]. The result always contains `0.0` so the
    /// x-axis stays visible, is padded by [`ValueRange::PADDING`] on both
    /// sides, and falls back to `[-1, 1]` around a degenerate span. Both
    /// bounds and the height are always finite.
    #[must_use]
    pub fn fit<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut min = 0.0_f64;
        let mut max = 0.0_f64;
        for v in values {
            if v.is_finite() {
                let v = v.clamp(-Self::MAX_MAGNITUDE, Self::MAX_MAGNITUDE);
                min = min.min(v);
                max = max.max(v);
            }
        }
        let span = max - min;
        if span <= f64::EPSILON {
            return Self {
                min: min - 1.0,
                max: max + 1.0,
            };
        }
        let pad = span * Self::PADDING;
        Self {
            min: min - pad,
            max: max + pad,
        }
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Length `max - min`, always positive.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max - self.min
    }
}

fn check_width(lower: f64, upper: f64) -> Result<(), IntervalError> {
    if (upper - lower).is_finite() {
        Ok(())
    } else {
        Err(IntervalError::WidthOverflow { lower, upper })
    }
}

fn check_finite(v: f64) -> Result<(), IntervalError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(IntervalError::NonFinite(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_rejects_unordered_bounds() {
        assert_eq!(
            Interval::new(2.0, 1.0),
            Err(IntervalError::Unordered {
                lower: 2.0,
                upper: 1.0
            })
        );
        assert!(Interval::new(1.0, 1.0).is_err());
        assert!(Interval::new(f64::NAN, 1.0).is_err());
        assert!(Interval::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn interval_accessors() {
        let i = Interval::new(-2.0, 4.0).unwrap();
        assert_eq!(i.width(), 6.0);
        assert_eq!(i.midpoint(), 1.0);
        assert!(i.contains(-2.0) && i.contains(4.0));
        assert!(!i.contains(4.5));
        assert_eq!(i.lerp(0.5), 1.0);
        assert!(i.with_lower(5.0).is_err());
        assert_eq!(i.with_upper(3.0).unwrap().upper(), 3.0);
    }

    #[test]
    fn split_requires_strict_ordering() {
        assert!(SplitInterval::new(0.0, 1.0, 2.0).is_ok());
        assert!(SplitInterval::new(0.0, 0.0, 2.0).is_err());
        assert!(SplitInterval::new(0.0, 2.0, 2.0).is_err());
        assert!(SplitInterval::new(0.0, 3.0, 2.0).is_err());

        let split = SplitInterval::new(-1.0, 0.5, 2.0).unwrap();
        assert_eq!(split.left().upper(), 0.5);
        assert_eq!(split.right().lower(), 0.5);
        assert_eq!(split.outer().width(), 3.0);
    }

    #[test]
    fn fit_includes_axis_and_pads() {
        let r = ValueRange::fit([1.0, 3.0]);
        assert!(r.min() < 0.0);
        assert!(r.max() > 3.0);

        let flat = ValueRange::fit([0.0, 0.0]);
        assert_eq!(flat.min(), -1.0);
        assert_eq!(flat.max(), 1.0);

        let with_nan = ValueRange::fit([f64::NAN, 2.0, f64::INFINITY]);
        assert!(with_nan.max() < 3.0);
    }

    #[test]
    fn overflowing_width_is_rejected() {
        assert_eq!(
            Interval::new(-1e308, 1e308),
            Err(IntervalError::WidthOverflow {
                lower: -1e308,
                upper: 1e308
            })
        );
        assert!(ValueRange::new(-f64::MAX, f64::MAX).is_err());
        assert!(SplitInterval::new(-1e308, 0.0, 1e308).is_err());

        let wide = Interval::new(-1e307, 1e307).unwrap();
        assert!(wide.width().is_finite());
    }

    #[test]
    fn fit_stays_finite_for_huge_samples() {
        for samples in [
            [1e308, -1e308],
            [f64::MAX, 0.0],
            [-f64::MAX, f64::MAX],
        ] {
            let r = ValueRange::fit(samples);
            assert!(r.min().is_finite(), "{samples:?}");
            assert!(r.max().is_finite(), "{samples:?}");
            assert!(r.height().is_finite() && r.height() > 0.0, "{samples:?}");
            assert!(ValueRange::new(r.min(), r.max()).is_ok(), "{samples:?}");
        }
    }
}
