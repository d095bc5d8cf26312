// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording surface for tests and debugging.
//!
//! [`RecordingSurface`] does not rasterize. It keeps one [`Event`] per op,
//! pairing the op with the drawing state it was applied under. Long-running
//! hosts can cap the log with [`RecordingSurface::with_frame_limit`].

use alloc::vec::Vec;

use kurbo::Size;
use peniko::Brush;

use crate::{DrawOp, ImagingOp, Layer, StateOp, StrokeStyle, Surface};

/// Drawing state at the time an op was applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateSnapshot {
    /// Number of entered layers.
    pub layer_depth: u32,
    /// Innermost entered layer.
    pub layer: Option<Layer>,
    /// Current brush, if set.
    pub brush: Option<Brush>,
    /// Current stroke, if set.
    pub stroke: Option<StrokeStyle>,
}

/// Op recorded by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Applied op.
    pub op: ImagingOp,
    /// State after a state op, or the state a draw op was drawn with.
    pub state: StateSnapshot,
}

impl Event {
    /// The draw op, if this event is one.
    #[must_use]
    pub fn draw(&self) -> Option<&DrawOp> {
        match &self.op {
            ImagingOp::Draw(op) => Some(op),
            ImagingOp::State(_) => None,
        }
    }
}

/// A [`Surface`] that records everything it is asked to do.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Size,
    events: Vec<Event>,
    /// Index in `events` of each retained [`DrawOp::Clear`].
    frame_starts: Vec<usize>,
    frame_limit: Option<usize>,
    frames: usize,
    state: StateSnapshot,
    layer_stack: Vec<Layer>,
    unbalanced_pops: usize,
}

impl RecordingSurface {
    /// Creates an empty recording surface of the given pixel size.
    ///
    /// The log is unbounded; see [`Self::with_frame_limit`].
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            events: Vec::new(),
            frame_starts: Vec::new(),
            frame_limit: None,
            frames: 0,
            state: StateSnapshot::default(),
            layer_stack: Vec::new(),
            unbalanced_pops: 0,
        }
    }

    /// Keeps only the most recent `frames` frames, at least one.
    ///
    /// Older events are dropped when a [`DrawOp::Clear`] starts a new frame.
    #[must_use]
    pub fn with_frame_limit(mut self, frames: usize) -> Self {
        self.frame_limit = Some(frames.max(1));
        self
    }

    /// Changes the reported size.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Every retained event, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Every retained op, oldest first.
    pub fn ops(&self) -> impl Iterator<Item = &ImagingOp> + '_ {
        self.events.iter().map(|e| &e.op)
    }

    /// Events since the most recent [`DrawOp::Clear`], including the clear
    /// itself.
    #[must_use]
    pub fn last_frame(&self) -> &[Event] {
        let start = self.frame_starts.last().copied().unwrap_or(0);
        &self.events[start..]
    }

    /// Number of [`DrawOp::Clear`] ops seen since creation or the last
    /// [`Self::clear_events`], including frames dropped by the frame limit.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Layers entered during the last frame, in the order they were pushed.
    #[must_use]
    pub fn layer_sequence(&self) -> Vec<Layer> {
        self.last_frame()
            .iter()
            .filter_map(|e| match e.op {
                ImagingOp::State(StateOp::PushLayer(layer)) => Some(layer),
                _ => None,
            })
            .collect()
    }

    /// Draw ops of the last frame issued while `layer` was the innermost layer.
    pub fn draws_in(&self, layer: Layer) -> impl Iterator<Item = &DrawOp> + '_ {
        self.last_frame()
            .iter()
            .filter(move |e| e.state.layer == Some(layer))
            .filter_map(Event::draw)
    }

    /// Draw ops of the last frame paired with the brush they were drawn with.
    pub fn draws_with_brush(&self) -> impl Iterator<Item = (&DrawOp, Option<&Brush>)> + '_ {
        self.last_frame()
            .iter()
            .filter_map(|e| e.draw().map(|op| (op, e.state.brush.as_ref())))
    }

    /// Current layer nesting depth; zero when every push has been popped.
    #[must_use]
    pub fn layer_depth(&self) -> u32 {
        self.state.layer_depth
    }

    /// Number of [`StateOp::PopLayer`] ops issued with no layer to pop.
    #[must_use]
    pub fn unbalanced_pops(&self) -> usize {
        self.unbalanced_pops
    }

    /// Clears recorded events and the frame count, keeping the size and
    /// current state.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.frame_starts.clear();
        self.frames = 0;
    }

    fn sync_layers(&mut self) {
        self.state.layer_depth = u32::try_from(self.layer_stack.len()).unwrap_or(u32::MAX);
        self.state.layer = self.layer_stack.last().copied();
    }

    /// Opens a new frame, first dropping frames beyond the limit.
    fn start_frame(&mut self) {
        self.frames += 1;
        if let Some(limit) = self.frame_limit {
            let excess = (self.frame_starts.len() + 1).saturating_sub(limit);
            if excess > 0 {
                let cut = self
                    .frame_starts
                    .get(excess)
                    .copied()
                    .unwrap_or(self.events.len());
                self.events.drain(..cut);
                self.frame_starts.drain(..excess);
                for start in &mut self.frame_starts {
                    *start -= cut;
                }
            }
        }
        self.frame_starts.push(self.events.len());
    }

    fn record(&mut self, op: ImagingOp) {
        self.events.push(Event {
            op,
            state: self.state.clone(),
        });
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::PushLayer(layer) => {
                self.layer_stack.push(*layer);
                self.sync_layers();
            }
            StateOp::PopLayer => {
                if self.layer_stack.pop().is_none() {
                    self.unbalanced_pops += 1;
                }
                self.sync_layers();
            }
            StateOp::SetBrush(brush) => self.state.brush = Some(brush.clone()),
            StateOp::SetStroke(stroke) => self.state.stroke = Some(stroke.clone()),
        }
        self.record(ImagingOp::State(op));
    }

    fn draw(&mut self, op: DrawOp) {
        if matches!(op, DrawOp::Clear(_)) {
            self.start_frame();
        }
        self.record(ImagingOp::Draw(op));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Circle, Rect};
    use peniko::Color;

    #[test]
    fn snapshot_tracks_layers_and_brush() {
        let mut s = RecordingSurface::new(Size::new(100.0, 100.0));
        s.push_layer(Layer::Riemann);
        s.set_color(Color::BLACK);
        s.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 10.0, 10.0)));

        let Some(Event {
            op: ImagingOp::Draw(_),
            state,
        }) = s.events().last()
        else {
            panic!("expected a draw event");
        };
        assert_eq!(state.layer, Some(Layer::Riemann));
        assert_eq!(state.layer_depth, 1);
        assert_eq!(state.brush, Some(Brush::Solid(Color::BLACK)));

        s.pop_layer();
        assert_eq!(s.layer_depth(), 0);
    }

    #[test]
    fn last_frame_starts_at_clear() {
        let mut s = RecordingSurface::new(Size::new(100.0, 100.0));
        s.draw(DrawOp::Clear(Color::WHITE));
        s.push_layer(Layer::Background);
        s.pop_layer();
        s.draw(DrawOp::Clear(Color::WHITE));
        s.push_layer(Layer::Handles);
        s.draw(DrawOp::FillCircle(Circle::new((5.0, 5.0), 2.0)));
        s.pop_layer();

        assert_eq!(s.frame_count(), 2);
        assert_eq!(s.last_frame().len(), 4);
        assert_eq!(s.layer_sequence(), [Layer::Handles]);
        assert_eq!(s.draws_in(Layer::Handles).count(), 1);
        assert_eq!(s.draws_in(Layer::Background).count(), 0);
    }

    #[test]
    fn unbalanced_pop_is_counted() {
        let mut s = RecordingSurface::new(Size::new(1.0, 1.0));
        s.pop_layer();
        assert_eq!(s.unbalanced_pops(), 1);
        assert_eq!(s.layer_depth(), 0);
    }

    #[test]
    fn clear_events_keeps_state() {
        let mut s = RecordingSurface::new(Size::new(1.0, 1.0));
        s.push_layer(Layer::Curves);
        s.draw(DrawOp::Clear(Color::WHITE));
        s.clear_events();
        assert_eq!(s.ops().count(), 0);
        assert!(s.last_frame().is_empty());
        assert_eq!(s.frame_count(), 0);
        assert_eq!(s.layer_depth(), 1);
        s.resize(Size::new(5.0, 5.0));
        assert_eq!(s.size(), Size::new(5.0, 5.0));
    }

    #[test]
    fn brushes_are_paired_with_draws() {
        let mut s = RecordingSurface::new(Size::new(1.0, 1.0));
        s.draw(DrawOp::Clear(Color::WHITE));
        s.set_color(Color::BLACK);
        s.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let pairs: Vec<_> = s.draws_with_brush().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].1, None);
        assert_eq!(pairs[1].1, Some(&Brush::Solid(Color::BLACK)));
    }

    fn draw_frame(s: &mut RecordingSurface, layer: Layer) {
        s.draw(DrawOp::Clear(Color::WHITE));
        s.push_layer(layer);
        s.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 1.0, 1.0)));
        s.pop_layer();
    }

    #[test]
    fn frame_limit_bounds_the_log() {
        let mut s = RecordingSurface::new(Size::new(1.0, 1.0)).with_frame_limit(2);
        // A state op ahead of the first clear is dropped with the first frame.
        s.set_color(Color::BLACK);
        for _ in 0..100 {
            draw_frame(&mut s, Layer::Curves);
        }
        draw_frame(&mut s, Layer::Handles);

        assert_eq!(s.frame_count(), 101);
        assert_eq!(s.events().len(), 8);
        assert!(matches!(s.events()[0].op, ImagingOp::Draw(DrawOp::Clear(_))));
        assert_eq!(s.last_frame().len(), 4);
        assert_eq!(s.layer_sequence(), [Layer::Handles]);
        assert_eq!(s.draws_in(Layer::Handles).count(), 1);
        assert_eq!(s.draws_in(Layer::Curves).count(), 0);
    }

    #[test]
    fn single_frame_limit_keeps_only_the_last_frame() {
        let mut s = RecordingSurface::new(Size::new(1.0, 1.0)).with_frame_limit(0);
        draw_frame(&mut s, Layer::Background);
        draw_frame(&mut s, Layer::Riemann);
        assert_eq!(s.events().len(), 4);
        assert_eq!(s.events(), s.last_frame());
        assert_eq!(s.frame_count(), 2);
    }

    #[test]
    fn unlimited_log_keeps_every_op_once() {
        let mut s = RecordingSurface::new(Size::new(1.0, 1.0));
        for _ in 0..3 {
            draw_frame(&mut s, Layer::Curves);
        }
        assert_eq!(s.events().len(), 12);
        assert_eq!(s.ops().count(), s.events().len());
        assert_eq!(s.frame_count(), 3);
    }
}
