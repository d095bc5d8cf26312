// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turns a scenario's derived state into a layered op stream.
//!
//! [`RenderPipeline::render`] clears the surface and then draws every
//! [`Layer`] in [`Layer::ORDER`], each bracketed by a push and a pop. It keeps
//! nothing between calls: the whole frame is rebuilt from the [`Frame`] it is
//! given.

use kurbo::{BezPath, Circle, Line, Point, Rect, Stroke};
use peniko::Color;
use tangent_calculus::{RealFn, RiemannRectangle};
use tangent_event_state::{HandleSet, HoverSample};
use tangent_imaging::{DrawOp, Layer, StateOp, Surface};
use tangent_view::{CoordinateTransform, Interval};

/// Which curve of a lesson a function is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurveRole {
    /// The selected function `f`.
    Primary,
    /// The second function `g`.
    Secondary,
    /// `αf + βg`.
    Combination,
    /// The antiderivative `F`.
    Antiderivative,
}

impl CurveRole {
    /// Label used in hover tooltips.
    #[must_use]
    pub fn series_name(self) -> &'static str {
        match self {
            Self::Primary => "f(x)",
            Self::Secondary => "g(x)",
            Self::Combination => "αf(x) + βg(x)",
            Self::Antiderivative => "F(x)",
        }
    }
}

/// A function to draw as a sampled polyline.
#[derive(Clone, Copy)]
pub struct Curve<'a> {
    /// Function to sample.
    pub function: &'a dyn RealFn,
    /// Role, which selects the paint.
    pub role: CurveRole,
}

impl core::fmt::Debug for Curve<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Curve").field("role", &self.role).finish_non_exhaustive()
    }
}

/// Paint of a shaded area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadeRole {
    /// Whole integral.
    Area,
    /// Left part of a split integral.
    Left,
    /// Right part of a split integral.
    Right,
}

/// Area between a curve and the x-axis over `[from, to]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shade {
    /// Index into [`Frame::curves`].
    pub curve: usize,
    /// Left end in math units.
    pub from: f64,
    /// Right end in math units.
    pub to: f64,
    /// Paint.
    pub role: ShadeRole,
}

/// Annotation drawn on the reference-line layer, in math coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reference {
    /// Horizontal line at the average value, across the interval.
    AverageLine {
        /// Average value.
        value: f64,
    },
    /// Line through both endpoints of the curve.
    Secant {
        /// `(a, f(a))`
        from: (f64, f64),
        /// `(b, f(b))`
        to: (f64, f64),
    },
    /// Line through `(x, y)` with the given slope, across the interval.
    Tangent {
        /// Point of tangency x.
        x: f64,
        /// Point of tangency y.
        y: f64,
        /// Slope.
        slope: f64,
    },
    /// Marker at the mean value point, with a drop line to the axis.
    PointC {
        /// `c`
        x: f64,
        /// Curve value at `c`.
        y: f64,
    },
    /// Vertical line at the additivity split point.
    Split {
        /// Split point.
        x: f64,
    },
}

/// Everything one frame is drawn from.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Math/pixel mapping for this frame.
    pub transform: &'a CoordinateTransform,
    /// The lesson interval `[a, b]`, which may be narrower than the view.
    pub interval: Interval,
    /// Curves, bottom to top.
    pub curves: &'a [Curve<'a>],
    /// Shaded areas.
    pub shades: &'a [Shade],
    /// Riemann rectangles.
    pub rectangles: &'a [RiemannRectangle],
    /// Reference annotations.
    pub references: &'a [Reference],
    /// Draggable handles.
    pub handles: &'a HandleSet,
    /// Hover sample, if the pointer is over the plot.
    pub hover: Option<&'a HoverSample>,
}

/// Colors used by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Surface background.
    pub background: Color,
    /// Plot rectangle fill.
    pub plot: Color,
    /// Grid lines.
    pub grid: Color,
    /// Axes.
    pub axis: Color,
    /// Curves, indexed like [`CurveRole`].
    pub curves: [Color; 4],
    /// Rectangles with positive height.
    pub positive: Color,
    /// Rectangles with negative height.
    pub negative: Color,
    /// Rectangle outlines.
    pub outline: Color,
    /// Shaded areas, indexed like [`ShadeRole`].
    pub shades: [Color; 3],
    /// Reference lines and markers.
    pub reference: Color,
    /// Idle handles.
    pub handle: Color,
    /// The dragged handle.
    pub handle_active: Color,
    /// Hover indicator.
    pub hover: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            plot: Color::from_rgb8(0xfa, 0xfa, 0xfc),
            grid: Color::from_rgb8(0xe3, 0xe5, 0xea),
            axis: Color::from_rgb8(0x44, 0x47, 0x50),
            curves: [
                Color::from_rgb8(0x25, 0x63, 0xeb),
                Color::from_rgb8(0x16, 0xa3, 0x4a),
                Color::from_rgb8(0x93, 0x33, 0xea),
                Color::from_rgb8(0xea, 0x58, 0x0c),
            ],
            positive: Color::from_rgba8(0x25, 0x63, 0xeb, 0x55),
            negative: Color::from_rgba8(0xdc, 0x26, 0x26, 0x55),
            outline: Color::from_rgba8(0x1e, 0x29, 0x3b, 0x99),
            shades: [
                Color::from_rgba8(0x25, 0x63, 0xeb, 0x40),
                Color::from_rgba8(0x16, 0xa3, 0x4a, 0x40),
                Color::from_rgba8(0xea, 0x58, 0x0c, 0x40),
            ],
            reference: Color::from_rgb8(0xdc, 0x26, 0x26),
            handle: Color::from_rgb8(0x1e, 0x29, 0x3b),
            handle_active: Color::from_rgb8(0xf5, 0x9e, 0x0b),
            hover: Color::from_rgba8(0x64, 0x74, 0x8b, 0xcc),
        }
    }
}

impl Palette {
    fn curve(&self, role: CurveRole) -> Color {
        let i = match role {
            CurveRole::Primary => 0,
            CurveRole::Secondary => 1,
            CurveRole::Combination => 2,
            CurveRole::Antiderivative => 3,
        };
        self.curves[i]
    }

    fn shade(&self, role: ShadeRole) -> Color {
        let i = match role {
            ShadeRole::Area => 0,
            ShadeRole::Left => 1,
            ShadeRole::Right => 2,
        };
        self.shades[i]
    }
}

/// Stateless full-redraw renderer.
#[derive(Clone, Debug)]
pub struct RenderPipeline {
    palette: Palette,
    curve_samples: usize,
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CURVE_SAMPLES)
    }
}

impl RenderPipeline {
    /// Points per curve used by [`RenderPipeline::default`].
    pub const DEFAULT_CURVE_SAMPLES: usize = 400;
    /// Target pixel distance between grid lines.
    pub const GRID_TARGET_PX: f64 = 80.0;
    /// Drawn handle radius in pixels.
    pub const HANDLE_RADIUS: f64 = 6.0;
    /// Radius of the point `c` and hover markers in pixels.
    pub const MARKER_RADIUS: f64 = 4.0;
    /// Curve stroke width in pixels.
    pub const CURVE_WIDTH: f64 = 2.0;

    /// Creates a pipeline sampling each curve at `curve_samples` points (at least 2).
    #[must_use]
    pub fn new(curve_samples: usize) -> Self {
        Self {
            palette: Palette::default(),
            curve_samples: curve_samples.max(2),
        }
    }

    /// Replaces the palette.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Current palette.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Clears `surface` and draws every layer of `frame`.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, frame: &Frame<'_>) {
        surface.draw(DrawOp::Clear(self.palette.background));
        for layer in Layer::ORDER {
            surface.push_layer(layer);
            match layer {
                Layer::Background => self.background(surface, frame),
                Layer::Curves => self.curves(surface, frame),
                Layer::Riemann => self.riemann(surface, frame),
                Layer::ReferenceLines => self.references(surface, frame),
                Layer::Handles => self.handles(surface, frame),
                Layer::Hover => self.hover(surface, frame),
            }
            surface.pop_layer();
        }
    }

    /// Samples `f` across the transform's x-range into a polyline.
    ///
    /// Non-finite samples and jumps taller than a few plot heights (poles)
    /// start a new subpath instead of drawing through the gap.
    #[must_use]
    pub fn curve_path(&self, f: &dyn RealFn, transform: &CoordinateTransform) -> BezPath {
        self.curve_path_between(f, transform, transform.interval())
    }

    fn curve_path_between(
        &self,
        f: &dyn RealFn,
        transform: &CoordinateTransform,
        range: Interval,
    ) -> BezPath {
        let jump_limit = 4.0 * transform.plot_rect().height();
        let last = (self.curve_samples - 1) as f64;
        let mut path = BezPath::new();
        let mut pen: Option<Point> = None;
        for i in 0..self.curve_samples {
            let x = range.lerp(i as f64 / last);
            let y = f.evaluate(x);
            if !y.is_finite() {
                pen = None;
                continue;
            }
            let p = transform.math_to_screen(x, y);
            match pen {
                Some(prev) if (p.y - prev.y).abs() <= jump_limit => path.line_to(p),
                _ => path.move_to(p),
            }
            pen = Some(p);
        }
        path
    }

    fn background<S: Surface + ?Sized>(&self, surface: &mut S, frame: &Frame<'_>) {
        let t = frame.transform;
        let plot = t.plot_rect();
        surface.set_color(self.palette.plot);
        surface.draw(DrawOp::FillRect(plot));

        surface.set_color(self.palette.grid);
        surface.set_stroke_width(1.0);
        let view = t.interval();
        for x in ticks(view.lower(), view.upper(), t.suggest_grid_spacing_x(Self::GRID_TARGET_PX)) {
            let px = t.x_to_screen(x);
            surface.draw(DrawOp::StrokeLine(Line::new((px, plot.y0), (px, plot.y1))));
        }
        let values = t.value_range();
        for y in ticks(values.min(), values.max(), t.suggest_grid_spacing_y(Self::GRID_TARGET_PX)) {
            let py = t.y_to_screen(y);
            surface.draw(DrawOp::StrokeLine(Line::new((plot.x0, py), (plot.x1, py))));
        }

        surface.set_color(self.palette.axis);
        surface.set_stroke_width(1.5);
        let y0 = t.y_to_screen(0.0);
        surface.draw(DrawOp::StrokeLine(Line::new((plot.x0, y0), (plot.x1, y0))));
        if view.contains(0.0) {
            let x0 = t.x_to_screen(0.0);
            surface.draw(DrawOp::StrokeLine(Line::new((x0, plot.y0), (x0, plot.y1))));
        }
    }

    fn curves<S: Surface + ?Sized>(&self, surface: &mut S, frame: &Frame<'_>) {
        surface.set_stroke_width(Self::CURVE_WIDTH);
        for curve in frame.curves {
            surface.set_color(self.palette.curve(curve.role));
            surface.draw(DrawOp::StrokePath(self.curve_path(curve.function, frame.transform)));
        }
    }

    fn riemann<S: Surface + ?Sized>(&self, surface: &mut S, frame: &Frame<'_>) {
        let t = frame.transform;
        let y0 = t.y_to_screen(0.0);
        for shade in frame.shades {
            let Some(curve) = frame.curves.get(shade.curve) else {
                continue;
            };
            let Ok(range) = Interval::new(shade.from, shade.to) else {
                continue;
            };
            let mut path = BezPath::new();
            path.move_to((t.x_to_screen(range.lower()), y0));
            for el in self.curve_path_between(curve.function, t, range).elements() {
                if let Some(p) = el.end_point() {
                    path.line_to(p);
                }
            }
            path.line_to((t.x_to_screen(range.upper()), y0));
            path.close_path();
            surface.set_color(self.palette.shade(shade.role));
            surface.draw(DrawOp::FillPath(path));
        }

        if frame.rectangles.is_empty() {
            return;
        }
        surface.set_stroke_width(1.0);
        for r in frame.rectangles.iter().filter(|r| r.height.is_finite()) {
            let rect = Rect::from_points(
                t.math_to_screen(r.x, 0.0),
                t.math_to_screen(r.right(), r.height),
            );
            let fill = if r.height >= 0.0 {
                self.palette.positive
            } else {
                self.palette.negative
            };
            surface.set_color(fill);
            surface.draw(DrawOp::FillRect(rect));
            surface.set_color(self.palette.outline);
            surface.draw(DrawOp::StrokeRect(rect));
        }
    }

    fn references<S: Surface + ?Sized>(&self, surface: &mut S, frame: &Frame<'_>) {
        let t = frame.transform;
        let (a, b) = (frame.interval.lower(), frame.interval.upper());
        let dashed = Stroke::new(1.5).with_dashes(0.0, [6.0, 4.0]);
        surface.set_color(self.palette.reference);
        for reference in frame.references {
            match *reference {
                Reference::AverageLine { value } => {
                    surface.state(StateOp::SetStroke(dashed.clone()));
                    surface.draw(DrawOp::StrokeLine(Line::new(
                        t.math_to_screen(a, value),
                        t.math_to_screen(b, value),
                    )));
                }
                Reference::Secant { from, to } => {
                    surface.set_stroke_width(1.5);
                    surface.draw(DrawOp::StrokeLine(Line::new(
                        t.math_to_screen(from.0, from.1),
                        t.math_to_screen(to.0, to.1),
                    )));
                }
                Reference::Tangent { x, y, slope } => {
                    surface.state(StateOp::SetStroke(dashed.clone()));
                    surface.draw(DrawOp::StrokeLine(Line::new(
                        t.math_to_screen(a, y + slope * (a - x)),
                        t.math_to_screen(b, y + slope * (b - x)),
                    )));
                }
                Reference::PointC { x, y } => {
                    surface.state(StateOp::SetStroke(dashed.clone()));
                    let top = t.math_to_screen(x, y);
                    surface.draw(DrawOp::StrokeLine(Line::new(t.math_to_screen(x, 0.0), top)));
                    surface.draw(DrawOp::FillCircle(Circle::new(top, Self::MARKER_RADIUS)));
                }
                Reference::Split { x } => {
                    surface.set_stroke_width(1.5);
                    let plot = t.plot_rect();
                    let px = t.x_to_screen(x);
                    surface.draw(DrawOp::StrokeLine(Line::new((px, plot.y0), (px, plot.y1))));
                }
            }
        }
    }

    fn handles<S: Surface + ?Sized>(&self, surface: &mut S, frame: &Frame<'_>) {
        surface.set_stroke_width(1.5);
        for handle in frame.handles.iter() {
            let circle = Circle::new(handle.position, Self::HANDLE_RADIUS);
            let fill = if handle.dragging {
                self.palette.handle_active
            } else {
                self.palette.handle
            };
            surface.set_color(fill);
            surface.draw(DrawOp::FillCircle(circle));
            surface.set_color(self.palette.background);
            surface.draw(DrawOp::StrokeCircle(circle));
        }
    }

    fn hover<S: Surface + ?Sized>(&self, surface: &mut S, frame: &Frame<'_>) {
        let Some(sample) = frame.hover else {
            return;
        };
        let t = frame.transform;
        let plot = t.plot_rect();
        let px = t.x_to_screen(sample.math_x);
        surface.set_color(self.palette.hover);
        surface.set_stroke_width(1.0);
        surface.draw(DrawOp::StrokeLine(Line::new((px, plot.y0), (px, plot.y1))));
        for v in sample.values.iter().filter(|v| v.value.is_finite()) {
            let center = t.math_to_screen(sample.math_x, v.value);
            surface.draw(DrawOp::FillCircle(Circle::new(center, Self::MARKER_RADIUS)));
        }
    }
}

/// Multiples of `step` within `[lo, hi]`.
fn ticks(lo: f64, hi: f64, step: f64) -> impl Iterator<Item = f64> {
    const MAX_TICKS: usize = 256;
    let first = (lo / step).ceil();
    (0..MAX_TICKS)
        .map(move |i| (first + i as f64) * step)
        .take_while(move |&v| v <= hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Size};
    use tangent_calculus::FunctionId;
    use tangent_event_state::HandleKind;
    use tangent_imaging::{ImagingOp, RecordingSurface};
    use tangent_view::{Margins, SurfaceGeometry, ValueRange};

    fn transform() -> CoordinateTransform {
        CoordinateTransform::new(
            Interval::new(-2.0, 2.0).unwrap(),
            ValueRange::new(-1.0, 4.0).unwrap(),
            SurfaceGeometry::new(400.0, 300.0).with_margins(Margins::uniform(20.0)),
        )
    }

    fn frame<'a>(
        t: &'a CoordinateTransform,
        curves: &'a [Curve<'a>],
        rects: &'a [RiemannRectangle],
        handles: &'a HandleSet,
    ) -> Frame<'a> {
        Frame {
            transform: t,
            interval: Interval::new(-1.0, 1.0).unwrap(),
            curves,
            shades: &[],
            rectangles: rects,
            references: &[],
            handles,
            hover: None,
        }
    }

    #[test]
    fn layers_are_drawn_in_fixed_order() {
        let t = transform();
        let handles = HandleSet::new();
        let mut surface = RecordingSurface::new(Size::new(400.0, 300.0));
        RenderPipeline::default().render(&mut surface, &frame(&t, &[], &[], &handles));

        assert!(matches!(surface.ops().next(), Some(ImagingOp::Draw(DrawOp::Clear(_)))));
        assert_eq!(surface.layer_sequence(), Layer::ORDER);
        assert_eq!(surface.layer_depth(), 0);
        assert_eq!(surface.unbalanced_pops(), 0);
    }

    #[test]
    fn rectangles_use_sign_specific_paint() {
        let t = transform();
        let handles = HandleSet::new();
        let rects = [
            RiemannRectangle {
                x: -1.0,
                width: 1.0,
                height: -0.5,
            },
            RiemannRectangle {
                x: 0.0,
                width: 1.0,
                height: 2.0,
            },
        ];
        let mut surface = RecordingSurface::new(Size::new(400.0, 300.0));
        let pipeline = RenderPipeline::default();
        pipeline.render(&mut surface, &frame(&t, &[], &rects, &handles));

        let fills: Vec<_> = surface
            .draws_with_brush()
            .filter_map(|(op, brush)| match op {
                DrawOp::FillRect(r) if r.width() < 200.0 => Some((*r, brush.cloned())),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 2);
        let palette = pipeline.palette();
        assert_eq!(fills[0].1, Some(peniko::Brush::Solid(palette.negative)));
        assert_eq!(fills[1].1, Some(peniko::Brush::Solid(palette.positive)));
        // Negative rectangles hang below the axis.
        assert!((fills[0].0.y0 - t.y_to_screen(0.0)).abs() < 1e-9);
        assert!((fills[1].0.y1 - t.y_to_screen(0.0)).abs() < 1e-9);
        assert!((fills[0].0.width() - t.scale_width(1.0)).abs() < 1e-9);
    }

    #[test]
    fn curve_breaks_at_undefined_points() {
        let t = transform();
        let pipeline = RenderPipeline::new(101);
        let path = pipeline.curve_path(&FunctionId::SquareRoot, &t);
        // √x is undefined left of 0, so the polyline starts at x = 0.
        let Some(PathEl::MoveTo(start)) = path.elements().first().copied() else {
            panic!("expected a subpath");
        };
        assert!((start.x - t.x_to_screen(0.0)).abs() < 1e-9);
        let moves = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 1);
    }

    #[test]
    fn curve_breaks_at_poles() {
        let t = transform();
        let path = RenderPipeline::new(100).curve_path(&FunctionId::Reciprocal, &t);
        let y0 = t.y_to_screen(0.0);
        let mut prev: Option<Point> = None;
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => prev = Some(p),
                PathEl::LineTo(p) => {
                    let from = prev.unwrap();
                    assert!(
                        (from.y - y0).signum() == (p.y - y0).signum(),
                        "segment crosses the pole"
                    );
                    prev = Some(p);
                }
                _ => panic!("polylines only contain moves and lines"),
            }
        }
    }

    #[test]
    fn handles_and_hover_are_drawn_in_their_layers() {
        let t = transform();
        let mut handles = HandleSet::new();
        handles.register(HandleKind::LowerBound, t.math_to_screen(-1.0, 0.0), 8.0);
        handles.register(HandleKind::UpperBound, t.math_to_screen(1.0, 0.0), 8.0);
        let sample = HoverSample {
            pointer: t.math_to_screen(0.5, 0.0),
            math_x: 0.5,
            values: [tangent_event_state::SeriesValue {
                name: "f(x)".into(),
                value: 0.25,
            }]
            .into_iter()
            .collect(),
        };
        let square = FunctionId::Square;
        let curves = [Curve {
            function: &square,
            role: CurveRole::Primary,
        }];
        let mut f = frame(&t, &curves, &[], &handles);
        f.hover = Some(&sample);
        let mut surface = RecordingSurface::new(Size::new(400.0, 300.0));
        RenderPipeline::default().render(&mut surface, &f);

        let handle_fills = surface
            .draws_in(Layer::Handles)
            .filter(|op| matches!(op, DrawOp::FillCircle(_)))
            .count();
        assert_eq!(handle_fills, 2);
        assert_eq!(surface.draws_in(Layer::Curves).count(), 1);
        assert_eq!(surface.draws_in(Layer::Hover).count(), 2);
    }

    #[test]
    fn references_follow_their_geometry() {
        let t = transform();
        let handles = HandleSet::new();
        let refs = [
            Reference::AverageLine { value: 1.0 },
            Reference::PointC { x: 0.5, y: 1.0 },
            Reference::Split { x: 0.0 },
        ];
        let mut f = frame(&t, &[], &[], &handles);
        f.references = &refs;
        let mut surface = RecordingSurface::new(Size::new(400.0, 300.0));
        RenderPipeline::default().render(&mut surface, &f);

        let draws: Vec<_> = surface.draws_in(Layer::ReferenceLines).cloned().collect();
        assert_eq!(draws.len(), 4);
        let DrawOp::StrokeLine(avg) = &draws[0] else {
            panic!("expected the average line first");
        };
        assert!((avg.p0.y - t.y_to_screen(1.0)).abs() < 1e-9);
        assert!((avg.p0.x - t.x_to_screen(-1.0)).abs() < 1e-9);
        assert!((avg.p1.x - t.x_to_screen(1.0)).abs() < 1e-9);
        assert!(matches!(draws[2], DrawOp::FillCircle(_)));
    }

    #[test]
    fn ticks_cover_range() {
        let v: Vec<f64> = ticks(-1.2, 2.0, 0.5).collect();
        assert_eq!(v, [-1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0]);
    }
}
