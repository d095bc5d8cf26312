// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect};

use crate::geometry::SurfaceGeometry;
use crate::interval::{Interval, ValueRange};

/// Bidirectional mapping between math space and pixel space.
///
/// `CoordinateTransform` maps the math rectangle `interval × value_range` onto
/// the plot rectangle of a [`SurfaceGeometry`]. The horizontal scale is
/// `plot_width / interval_width` and the vertical scale is
/// `plot_height / value_height`; the math y-axis is flipped so larger values
/// land higher on the surface.
///
/// Inputs outside the math rectangle (or the plot rectangle, for the inverse
/// direction) are extrapolated linearly. Nothing is clamped, so callers can
/// detect off-surface content by comparing against [`Self::plot_rect`].
#[derive(Clone, Debug)]
pub struct CoordinateTransform {
    interval: Interval,
    values: ValueRange,
    geometry: SurfaceGeometry,
    plot: Rect,
    scale_x: f64,
    scale_y: f64,
    world_to_view: Affine,
}

impl CoordinateTransform {
    /// Creates a transform for the given ranges and surface.
    #[must_use]
    pub fn new(interval: Interval, values: ValueRange, geometry: SurfaceGeometry) -> Self {
        let mut t = Self {
            interval,
            values,
            geometry,
            plot: Rect::ZERO,
            scale_x: 1.0,
            scale_y: 1.0,
            world_to_view: Affine::IDENTITY,
        };
        t.rebuild_transforms();
        t
    }

    /// Returns the math-space interval along x.
    #[must_use]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Sets the math-space interval along x and rebuilds the scale factors.
    pub fn set_interval(&mut self, interval: Interval) {
        if self.interval == interval {
            return;
        }
        self.interval = interval;
        self.rebuild_transforms();
    }

    /// Returns the math-space value range along y.
    #[must_use]
    pub fn value_range(&self) -> ValueRange {
        self.values
    }

    /// Sets the math-space value range along y and rebuilds the scale factors.
    pub fn set_value_range(&mut self, values: ValueRange) {
        if self.values == values {
            return;
        }
        self.values = values;
        self.rebuild_transforms();
    }

    /// Returns the surface geometry.
    #[must_use]
    pub fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    /// Sets the surface geometry and rebuilds the scale factors.
    pub fn set_geometry(&mut self, geometry: SurfaceGeometry) {
        if self.geometry == geometry {
            return;
        }
        self.geometry = geometry;
        self.rebuild_transforms();
    }

    /// Plot rectangle in pixel space.
    #[must_use]
    pub fn plot_rect(&self) -> Rect {
        self.plot
    }

    /// Pixels per math unit along x.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// Pixels per math unit along y.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// Converts a math-space point into pixel coordinates.
    #[must_use]
    pub fn math_to_screen(&self, x: f64, y: f64) -> Point {
        Point::new(self.x_to_screen(x), self.y_to_screen(y))
    }

    /// Converts a pixel-space point into math coordinates `(x, y)`.
    #[must_use]
    pub fn screen_to_math(&self, pt: Point) -> (f64, f64) {
        (self.screen_to_x(pt.x), self.screen_to_y(pt.y))
    }

    /// Converts a math-space x coordinate into a pixel x coordinate.
    #[must_use]
    pub fn x_to_screen(&self, x: f64) -> f64 {
        self.plot.x0 + (x - self.interval.lower()) * self.scale_x
    }

    /// Converts a math-space y coordinate into a pixel y coordinate.
    #[must_use]
    pub fn y_to_screen(&self, y: f64) -> f64 {
        self.plot.y1 - (y - self.values.min()) * self.scale_y
    }

    /// Converts a pixel x coordinate into math space.
    #[must_use]
    pub fn screen_to_x(&self, px: f64) -> f64 {
        self.interval.lower() + (px - self.plot.x0) / self.scale_x
    }

    /// Converts a pixel y coordinate into math space.
    #[must_use]
    pub fn screen_to_y(&self, py: f64) -> f64 {
        self.values.min() + (self.plot.y1 - py) / self.scale_y
    }

    /// Converts a math-space horizontal length into pixels.
    ///
    /// This is used for rectangle widths and does not depend on where the
    /// length starts.
    #[must_use]
    pub fn scale_width(&self, dx: f64) -> f64 {
        dx * self.scale_x
    }

    /// Converts a math-space vertical length into pixels (unsigned direction).
    #[must_use]
    pub fn scale_height(&self, dy: f64) -> f64 {
        dy * self.scale_y
    }

    /// Returns `true` if the pixel point lies inside the plot rectangle.
    #[must_use]
    pub fn contains_screen_point(&self, pt: Point) -> bool {
        self.geometry.plot_contains(pt)
    }

    /// Affine mapping math space into pixel space.
    ///
    /// Equivalent to [`Self::math_to_screen`]; useful when handing geometry to
    /// a backend that applies transforms itself.
    #[must_use]
    pub fn world_to_view(&self) -> Affine {
        self.world_to_view
    }

    /// Suggests a "nice" tick spacing in math units along x.
    ///
    /// The returned value is chosen from a 1-2-5 ladder so that ticks land
    /// roughly `target_px` pixels apart.
    #[must_use]
    pub fn suggest_grid_spacing_x(&self, target_px: f64) -> f64 {
        nice_step(target_px / self.scale_x)
    }

    /// Suggests a "nice" tick spacing in math units along y.
    #[must_use]
    pub fn suggest_grid_spacing_y(&self, target_px: f64) -> f64 {
        nice_step(target_px / self.scale_y)
    }

    /// Snapshot of the current transform state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> CoordinateTransformDebugInfo {
        CoordinateTransformDebugInfo {
            interval: self.interval,
            value_range: self.values,
            plot_rect: self.plot,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
        }
    }

    fn rebuild_transforms(&mut self) {
        self.plot = self.geometry.plot_rect();
        self.scale_x = self.plot.width() / self.interval.width();
        self.scale_y = self.plot.height() / self.values.height();
        let tx = self.plot.x0 - self.interval.lower() * self.scale_x;
        let ty = self.plot.y1 + self.values.min() * self.scale_y;
        self.world_to_view = Affine::new([self.scale_x, 0.0, 0.0, -self.scale_y, tx, ty]);
    }
}

/// Smallest 1-2-5 step at least `desired`, or `desired` itself when no such
/// step is representable.
fn nice_step(desired: f64) -> f64 {
    let desired = desired.abs().max(f64::MIN_POSITIVE);
    if !desired.is_finite() {
        return f64::MAX;
    }
    let mut unit = 1.0_f64;
    while unit * 10.0 <= desired {
        unit *= 10.0;
    }
    while unit > desired {
        unit /= 10.0;
    }
    for m in [1.0_f64, 2.0, 5.0, 10.0] {
        let step = m * unit;
        if step >= desired && step.is_finite() {
            return step;
        }
    }
    desired
}

/// Debug snapshot of a [`CoordinateTransform`] state.
#[derive(Clone, Debug)]
pub struct CoordinateTransformDebugInfo {
    /// Math-space interval along x.
    pub interval: Interval,
    /// Math-space value range along y.
    pub value_range: ValueRange,
    /// Plot rectangle in pixels.
    pub plot_rect: Rect,
    /// Pixels per math unit along x.
    pub scale_x: f64,
    /// Pixels per math unit along y.
    pub scale_y: f64,
}
