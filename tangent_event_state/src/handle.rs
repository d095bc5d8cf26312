// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggable handles stored in an arena with stable identifiers.
//!
//! Handles are registered once when a scenario is set up and addressed by
//! [`HandleId`] afterwards, so hit testing and drag updates act on indices
//! rather than on references into the set.
//!
//! ## Hit testing
//!
//! [`HandleSet::hit_test`] returns the first handle, in registration order,
//! whose distance to the pointer is at most its hit radius. Overlapping
//! handles therefore resolve to whichever was registered first.
//!
//! ```
//! use kurbo::Point;
//! use tangent_event_state::handle::{HandleKind, HandleSet};
//!
//! let mut handles = HandleSet::new();
//! let lower = handles.register(HandleKind::LowerBound, Point::new(100.0, 200.0), 8.0);
//! let upper = handles.register(HandleKind::UpperBound, Point::new(104.0, 200.0), 8.0);
//!
//! // Both handles are within reach; the first registered wins.
//! assert_eq!(handles.hit_test(Point::new(102.0, 200.0)), Some(lower));
//! assert_eq!(handles.hit_test(Point::new(111.0, 200.0)), Some(upper));
//! assert_eq!(handles.hit_test(Point::new(150.0, 200.0)), None);
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// What a handle controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Lower bound `a` of the interval.
    LowerBound,
    /// Upper bound `b` of the interval.
    UpperBound,
    /// Any other control, such as a split point or a coefficient.
    Control,
}

/// Stable handle identifier: its kind and its index among handles of that kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandleId {
    /// Handle kind.
    pub kind: HandleKind,
    /// Registration index among handles of the same kind.
    pub index: u16,
}

/// Which pixel axes a drag may move a handle along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragAxis {
    /// Moves with the pointer in both directions.
    Free,
    /// Slides along x only; its y stays put.
    #[default]
    Horizontal,
    /// Slides along y only; its x stays put.
    Vertical,
}

impl DragAxis {
    /// Applies a pixel delta to `pos`, dropping the constrained component.
    #[must_use]
    pub fn apply(self, pos: Point, dx: f64, dy: f64) -> Point {
        match self {
            Self::Free => Point::new(pos.x + dx, pos.y + dy),
            Self::Horizontal => Point::new(pos.x + dx, pos.y),
            Self::Vertical => Point::new(pos.x, pos.y + dy),
        }
    }
}

/// A draggable marker drawn on the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractiveHandle {
    /// Stable identifier.
    pub id: HandleId,
    /// Center in pixel space.
    pub position: Point,
    /// Activation radius in pixels.
    pub hit_radius: f64,
    /// Whether this handle is currently being dragged.
    pub dragging: bool,
    /// Axes a drag may move the handle along.
    pub axis: DragAxis,
}

impl InteractiveHandle {
    /// Returns `true` if `pt` is within the hit radius (boundary included).
    #[must_use]
    pub fn hit(&self, pt: Point) -> bool {
        self.position.distance(pt) <= self.hit_radius
    }
}

const INLINE_HANDLES: usize = 4;

/// Arena of handles in registration order.
#[derive(Clone, Debug, Default)]
pub struct HandleSet {
    handles: SmallVec<[InteractiveHandle; INLINE_HANDLES]>,
}

impl HandleSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a horizontally constrained handle and returns its id.
    pub fn register(&mut self, kind: HandleKind, position: Point, hit_radius: f64) -> HandleId {
        self.register_with_axis(kind, position, hit_radius, DragAxis::Horizontal)
    }

    /// Registers a handle with an explicit drag axis and returns its id.
    pub fn register_with_axis(
        &mut self,
        kind: HandleKind,
        position: Point,
        hit_radius: f64,
        axis: DragAxis,
    ) -> HandleId {
        let index = self.handles.iter().filter(|h| h.id.kind == kind).count();
        let id = HandleId {
            kind,
            index: u16::try_from(index).unwrap_or(u16::MAX),
        };
        self.handles.push(InteractiveHandle {
            id,
            position,
            hit_radius,
            dragging: false,
            axis,
        });
        id
    }

    /// Looks up a handle.
    #[must_use]
    pub fn get(&self, id: HandleId) -> Option<&InteractiveHandle> {
        self.handles.iter().find(|h| h.id == id)
    }

    /// Looks up a handle mutably.
    pub fn get_mut(&mut self, id: HandleId) -> Option<&mut InteractiveHandle> {
        self.handles.iter_mut().find(|h| h.id == id)
    }

    /// Moves a handle; returns `false` if `id` is unknown.
    pub fn set_position(&mut self, id: HandleId, position: Point) -> bool {
        match self.get_mut(id) {
            Some(h) => {
                h.position = position;
                true
            }
            None => false,
        }
    }

    /// First handle in registration order whose hit radius contains `pt`.
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> Option<HandleId> {
        self.handles.iter().find(|h| h.hit(pt)).map(|h| h.id)
    }

    /// Handles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &InteractiveHandle> {
        self.handles.iter()
    }

    /// Handles in registration order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut InteractiveHandle> {
        self.handles.iter_mut()
    }

    /// Number of handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` if no handle is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Removes every handle.
    pub fn clear(&mut self) {
        self.handles.clear();
    }
}
