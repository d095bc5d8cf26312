// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

/// Pixel margins between the surface edge and the plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Left margin in pixels (room for y-axis labels).
    pub left: f64,
    /// Top margin in pixels.
    pub top: f64,
    /// Right margin in pixels.
    pub right: f64,
    /// Bottom margin in pixels (room for x-axis labels).
    pub bottom: f64,
}

impl Margins {
    /// Same margin on every side.
    #[must_use]
    pub const fn uniform(m: f64) -> Self {
        Self {
            left: m,
            top: m,
            right: m,
            bottom: m,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 48.0,
            top: 24.0,
            right: 24.0,
            bottom: 40.0,
        }
    }
}

/// Size of a drawing surface plus the margins around its plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
    /// Margins around the plot rectangle.
    pub margins: Margins,
}

impl SurfaceGeometry {
    /// Smallest plot extent, in pixels, along either axis.
    ///
    /// Surfaces smaller than their margins still get a plot rectangle this
    /// large so scale factors stay finite.
    pub const MIN_PLOT_EXTENT: f64 = 1.0;

    /// Creates a geometry with default margins.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margins: Margins::default(),
        }
    }

    /// Creates a geometry from a surface size with default margins.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::new(size.width, size.height)
    }

    /// Replaces the margins.
    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Full surface rectangle.
    #[must_use]
    pub fn surface_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Drawable plot rectangle, inset from the surface by the margins.
    #[must_use]
    pub fn plot_rect(&self) -> Rect {
        let x0 = self.margins.left;
        let y0 = self.margins.top;
        let x1 = (self.width - self.margins.right).max(x0 + Self::MIN_PLOT_EXTENT);
        let y1 = (self.height - self.margins.bottom).max(y0 + Self::MIN_PLOT_EXTENT);
        Rect::new(x0, y0, x1, y1)
    }

    /// Returns `true` if `pt` lies inside the plot rectangle (edges included).
    #[must_use]
    pub fn plot_contains(&self, pt: Point) -> bool {
        let r = self.plot_rect();
        r.x0 <= pt.x && pt.x <= r.x1 && r.y0 <= pt.y && pt.y <= r.y1
    }
}
