// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tangent Imaging: a small layered drawing IR and the surface trait that consumes it.
//!
//! Plots are drawn as a flat stream of [`ImagingOp`]s: [`StateOp`]s that set
//! the current brush, stroke, or layer, and [`DrawOp`]s that produce pixels
//! with that state. Geometry is expressed in pixel space with `kurbo` types;
//! paints are `peniko` brushes.
//!
//! # Layers
//!
//! Every frame is organized into named [`Layer`]s, each bracketed by
//! [`StateOp::PushLayer`] and [`StateOp::PopLayer`]. Layers do not clip or
//! composite; they exist so a backend (or a test) can tell which part of a
//! frame an op belongs to. [`Layer::ORDER`] is the z-order a renderer is
//! expected to follow.
//!
//! # Surfaces
//!
//! A [`Surface`] is anything that accepts the op stream and knows its pixel
//! size. [`RecordingSurface`] records the stream together with a snapshot of
//! the state each op was applied under, which is what tests assert on.
//!
//! ```
//! use kurbo::{Line, Rect, Size};
//! use peniko::Color;
//! use tangent_imaging::{DrawOp, Layer, RecordingSurface, Surface};
//!
//! let mut surface = RecordingSurface::new(Size::new(200.0, 100.0));
//! surface.draw(DrawOp::Clear(Color::WHITE));
//! surface.push_layer(Layer::Curves);
//! surface.set_color(Color::BLACK);
//! surface.draw(DrawOp::StrokeLine(Line::new((0.0, 0.0), (200.0, 100.0))));
//! surface.pop_layer();
//!
//! assert_eq!(surface.layer_sequence(), [Layer::Curves]);
//! assert_eq!(surface.draws_in(Layer::Curves).count(), 1);
//! ```

#![no_std]

extern crate alloc;

mod recording;

use kurbo::{BezPath, Circle, Line, Rect, Size};
use peniko::{Brush, Color};

pub use recording::{Event, RecordingSurface, StateSnapshot};

/// Stroke parameters; a re-export of [`kurbo::Stroke`].
pub type StrokeStyle = kurbo::Stroke;

/// Named layers of a plot frame, in z-order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Plot background, grid, and axes.
    Background,
    /// Function curves.
    Curves,
    /// Riemann rectangles and shaded areas.
    Riemann,
    /// Average-value line, secant, tangent, and markers.
    ReferenceLines,
    /// Draggable handles.
    Handles,
    /// Hover indicator.
    Hover,
}

impl Layer {
    /// Layers from bottom to top.
    pub const ORDER: [Self; 6] = [
        Self::Background,
        Self::Curves,
        Self::Riemann,
        Self::ReferenceLines,
        Self::Handles,
        Self::Hover,
    ];
}

/// Operations that change the current drawing state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Enter a layer. Layers must be well nested.
    PushLayer(Layer),
    /// Leave the most recently entered layer.
    PopLayer,
    /// Set the brush used by subsequent fills and strokes.
    SetBrush(Brush),
    /// Set the stroke used by subsequent strokes.
    SetStroke(StrokeStyle),
}

/// Operations that produce pixels with the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill the whole surface with a color, discarding previous content.
    Clear(Color),
    /// Fill an axis-aligned rectangle with the current brush.
    FillRect(Rect),
    /// Stroke an axis-aligned rectangle.
    StrokeRect(Rect),
    /// Stroke a line segment.
    StrokeLine(Line),
    /// Stroke a path.
    StrokePath(BezPath),
    /// Fill a closed path.
    FillPath(BezPath),
    /// Fill a circle.
    FillCircle(Circle),
    /// Stroke a circle outline.
    StrokeCircle(Circle),
}

/// A single op in the stream.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// State change.
    State(StateOp),
    /// Draw.
    Draw(DrawOp),
}

/// A pixel surface that consumes the imaging op stream.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);

    /// Equivalent to `self.state(StateOp::PushLayer(layer))`.
    #[inline]
    fn push_layer(&mut self, layer: Layer) {
        self.state(StateOp::PushLayer(layer));
    }

    /// Equivalent to `self.state(StateOp::PopLayer)`.
    #[inline]
    fn pop_layer(&mut self) {
        self.state(StateOp::PopLayer);
    }

    /// Sets a solid color brush.
    #[inline]
    fn set_color(&mut self, color: Color) {
        self.state(StateOp::SetBrush(Brush::Solid(color)));
    }

    /// Sets a stroke of the given width with default joins and caps.
    #[inline]
    fn set_stroke_width(&mut self, width: f64) {
        self.state(StateOp::SetStroke(StrokeStyle::new(width)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_order_is_ascending() {
        assert!(Layer::ORDER.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Layer::ORDER.first(), Some(&Layer::Background));
        assert_eq!(Layer::ORDER.last(), Some(&Layer::Hover));
    }

    #[test]
    fn provided_methods_emit_state_ops() {
        let mut s = RecordingSurface::new(Size::new(10.0, 10.0));
        s.push_layer(Layer::Handles);
        s.set_color(Color::WHITE);
        s.set_stroke_width(2.0);
        s.pop_layer();
        assert_eq!(
            s.ops().cloned().collect::<alloc::vec::Vec<_>>(),
            [
                ImagingOp::State(StateOp::PushLayer(Layer::Handles)),
                ImagingOp::State(StateOp::SetBrush(Brush::Solid(Color::WHITE))),
                ImagingOp::State(StateOp::SetStroke(StrokeStyle::new(2.0))),
                ImagingOp::State(StateOp::PopLayer),
            ]
        );
    }
}
