// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve values under the pointer.
//!
//! [`HoverResolver`] keeps only the latest [`HoverSample`]. An in-bounds move
//! replaces it; a move outside the plot or a pointer-leave clears it.
//!
//! ```
//! use kurbo::Point;
//! use tangent_event_state::hover::{HoverResolver, Series};
//! use tangent_view::{CoordinateTransform, Interval, SurfaceGeometry, ValueRange};
//!
//! let transform = CoordinateTransform::new(
//!     Interval::new(0.0, 2.0).unwrap(),
//!     ValueRange::new(0.0, 4.0).unwrap(),
//!     SurfaceGeometry::new(400.0, 300.0),
//! );
//! let square = ("f(x)", |x: f64| x * x);
//! let series: [&dyn Series; 1] = [&square];
//!
//! let mut hover = HoverResolver::new();
//! let mid = transform.math_to_screen(1.0, 1.0);
//! let sample = hover.update(mid, &transform, &series).unwrap();
//! assert!((sample.values[0].value - 1.0).abs() < 1e-9);
//!
//! assert!(hover.update(Point::new(-5.0, -5.0), &transform, &series).is_none());
//! assert!(hover.current().is_none());
//! ```

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;
use tangent_view::CoordinateTransform;

/// A named curve the hover resolver can evaluate.
pub trait Series {
    /// Label shown in the tooltip.
    fn name(&self) -> &str;

    /// Value of the curve at math `x`.
    fn value_at(&self, x: f64) -> f64;
}

impl<F: Fn(f64) -> f64> Series for (&str, F) {
    fn name(&self) -> &str {
        self.0
    }

    fn value_at(&self, x: f64) -> f64 {
        (self.1)(x)
    }
}

/// One series evaluated at the hovered x.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesValue {
    /// Series label.
    pub name: String,
    /// Value at the hovered x; may be NaN where the series is undefined.
    pub value: f64,
}

/// Values of every active series at the pointer's math-space x.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverSample {
    /// Pointer position in pixels.
    pub pointer: Point,
    /// Math-space x under the pointer.
    pub math_x: f64,
    /// One entry per active series, in the order given.
    pub values: SmallVec<[SeriesValue; 4]>,
}

/// Holds the latest hover sample.
#[derive(Clone, Debug, Default)]
pub struct HoverResolver {
    current: Option<HoverSample>,
}

impl HoverResolver {
    /// Creates a resolver with no sample.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the pointer at `pos` against `series`.
    ///
    /// Inside the plot rectangle the previous sample is replaced and returned;
    /// outside it the sample is cleared and `None` is returned.
    pub fn update(
        &mut self,
        pos: Point,
        transform: &CoordinateTransform,
        series: &[&dyn Series],
    ) -> Option<&HoverSample> {
        if !transform.contains_screen_point(pos) {
            self.current = None;
            return None;
        }
        let math_x = transform.screen_to_x(pos.x);
        let values = series
            .iter()
            .map(|s| SeriesValue {
                name: s.name().to_string(),
                value: s.value_at(math_x),
            })
            .collect();
        self.current = Some(HoverSample {
            pointer: pos,
            math_x,
            values,
        });
        self.current.as_ref()
    }

    /// Clears the sample, as on pointer-leave.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Latest sample, if the pointer is over the plot.
    #[must_use]
    pub fn current(&self) -> Option<&HoverSample> {
        self.current.as_ref()
    }
}

/// Tooltip content and placement derived from a [`HoverSample`].
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Top-left corner of the tooltip box in pixels.
    pub anchor: Point,
    /// Text lines: the hovered x first, then one line per series.
    pub lines: Vec<String>,
}

impl Tooltip {
    /// Offset from the pointer to the tooltip corner.
    pub const OFFSET: Vec2 = Vec2::new(12.0, 12.0);
    /// Approximate line height in pixels.
    pub const LINE_HEIGHT: f64 = 16.0;
    /// Approximate glyph advance in pixels.
    pub const CHAR_WIDTH: f64 = 7.0;

    /// Builds a tooltip for `sample`, kept inside `bounds` where it fits.
    #[must_use]
    pub fn new(sample: &HoverSample, bounds: Rect) -> Self {
        let mut lines = Vec::with_capacity(sample.values.len() + 1);
        lines.push(format!("x = {:.3}", sample.math_x));
        for v in &sample.values {
            if v.value.is_finite() {
                lines.push(format!("{} = {:.3}", v.name, v.value));
            } else {
                lines.push(format!("{} is undefined", v.name));
            }
        }
        let size = Self::estimated_size(&lines);
        let mut anchor = sample.pointer + Self::OFFSET;
        // Flip to the other side of the pointer when the box would overflow.
        if anchor.x + size.x > bounds.x1 {
            anchor.x = sample.pointer.x - Self::OFFSET.x - size.x;
        }
        if anchor.y + size.y > bounds.y1 {
            anchor.y = sample.pointer.y - Self::OFFSET.y - size.y;
        }
        anchor.x = anchor.x.max(bounds.x0);
        anchor.y = anchor.y.max(bounds.y0);
        Self { anchor, lines }
    }

    /// Approximate box size for the current lines.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Self::estimated_size(&self.lines)
    }

    fn estimated_size(lines: &[String]) -> Vec2 {
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Vec2::new(
            longest as f64 * Self::CHAR_WIDTH,
            lines.len() as f64 * Self::LINE_HEIGHT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangent_view::{Interval, Margins, SurfaceGeometry, ValueRange};

    fn transform() -> CoordinateTransform {
        CoordinateTransform::new(
            Interval::new(0.0, 10.0).unwrap(),
            ValueRange::new(0.0, 10.0).unwrap(),
            SurfaceGeometry::new(120.0, 120.0).with_margins(Margins::uniform(10.0)),
        )
    }

    #[test]
    fn samples_every_series_in_order() {
        let f = ("f", |x: f64| x * x);
        let g = ("g", |x: f64| -x);
        let series: [&dyn Series; 2] = [&f, &g];
        let mut hover = HoverResolver::new();
        let s = hover.update(Point::new(40.0, 60.0), &transform(), &series).unwrap();
        assert!((s.math_x - 3.0).abs() < 1e-9);
        assert_eq!(s.values.len(), 2);
        assert_eq!(s.values[0].name, "f");
        assert!((s.values[0].value - 9.0).abs() < 1e-9);
        assert!((s.values[1].value + 3.0).abs() < 1e-9);
    }

    #[test]
    fn later_move_overwrites_sample() {
        let f = ("f", |x: f64| x);
        let series: [&dyn Series; 1] = [&f];
        let mut hover = HoverResolver::new();
        let t = transform();
        hover.update(Point::new(20.0, 60.0), &t, &series);
        hover.update(Point::new(90.0, 60.0), &t, &series);
        assert!((hover.current().unwrap().math_x - 8.0).abs() < 1e-9);
    }

    #[test]
    fn leaving_the_plot_clears() {
        let f = ("f", |x: f64| x);
        let series: [&dyn Series; 1] = [&f];
        let mut hover = HoverResolver::new();
        let t = transform();
        hover.update(Point::new(50.0, 50.0), &t, &series);
        assert!(hover.current().is_some());
        assert!(hover.update(Point::new(5.0, 50.0), &t, &series).is_none());
        assert!(hover.current().is_none());

        hover.update(Point::new(50.0, 50.0), &t, &series);
        hover.clear();
        assert!(hover.current().is_none());
    }

    #[test]
    fn tooltip_lines_and_placement() {
        let sample = HoverSample {
            pointer: Point::new(20.0, 20.0),
            math_x: 1.0,
            values: [
                SeriesValue {
                    name: "f(x)".to_string(),
                    value: 0.5,
                },
                SeriesValue {
                    name: "g(x)".to_string(),
                    value: f64::NAN,
                },
            ]
            .into_iter()
            .collect(),
        };
        let tip = Tooltip::new(&sample, Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(tip.lines, ["x = 1.000", "f(x) = 0.500", "g(x) is undefined"]);
        assert_eq!(tip.anchor, Point::new(32.0, 32.0));
    }

    #[test]
    fn tooltip_flips_near_edges() {
        let sample = HoverSample {
            pointer: Point::new(390.0, 290.0),
            math_x: 2.0,
            values: SmallVec::new(),
        };
        let bounds = Rect::new(0.0, 0.0, 400.0, 300.0);
        let tip = Tooltip::new(&sample, bounds);
        let size = tip.size();
        assert!(tip.anchor.x + size.x <= bounds.x1);
        assert!(tip.anchor.y + size.y <= bounds.y1);
        assert!(tip.anchor.x < sample.pointer.x);
    }
}
