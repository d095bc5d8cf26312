// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state machine for plot handles.
//!
//! ## Usage
//!
//! 1) Register handles in a [`HandleSet`] and wrap it in an
//!    [`InteractionController`].
//! 2) Forward pointer-down to [`InteractionController::pointer_down`]. A hit
//!    starts a drag; a miss, or a second press while already dragging, does
//!    nothing.
//! 3) Forward every pointer-move to [`InteractionController::pointer_move`].
//!    While dragging, each call places the handle at its press position plus
//!    the total pointer offset since the press, and returns exactly one
//!    [`BoundChanged`] carrying the handle's new math-space value. Handles
//!    repositioned by the host mid-drag therefore do not skew later moves.
//! 4) Forward pointer-up and pointer-leave; both end the drag.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use tangent_event_state::drag::InteractionController;
//! use tangent_event_state::handle::{HandleKind, HandleSet};
//! use tangent_view::{CoordinateTransform, Interval, Margins, SurfaceGeometry, ValueRange};
//!
//! let transform = CoordinateTransform::new(
//!     Interval::new(0.0, 10.0).unwrap(),
//!     ValueRange::new(-1.0, 1.0).unwrap(),
//!     SurfaceGeometry::new(120.0, 100.0).with_margins(Margins::uniform(10.0)),
//! );
//!
//! let mut handles = HandleSet::new();
//! let lower = handles.register(HandleKind::LowerBound, transform.math_to_screen(0.0, 0.0), 6.0);
//! let mut controller = InteractionController::new(handles);
//!
//! assert_eq!(controller.pointer_down(Point::new(10.0, 50.0)), Some(lower));
//! let change = controller.pointer_move(Point::new(30.0, 50.0), &transform).unwrap();
//! assert_eq!(change.kind, HandleKind::LowerBound);
//! assert!((change.value - 2.0).abs() < 1e-9);
//!
//! controller.pointer_up();
//! assert!(controller.pointer_move(Point::new(40.0, 50.0), &transform).is_none());
//! ```

use kurbo::{Point, Vec2};
use tangent_view::CoordinateTransform;

use crate::handle::{DragAxis, HandleId, HandleKind, HandleSet};

/// Tracks the pointer across one drag.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Pointer position when the drag started.
    pub start_pos: Option<Point>,
    /// Last recorded pointer position during the drag.
    pub last_pos: Option<Point>,
}

impl DragState {
    /// Start tracking a new drag from `pos`.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Records `pos` and returns the movement since the previous position.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Offset from the drag start to `current_pos`.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// End the drag and reset.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

/// Notification that a dragged handle now sits at a new math-space value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundChanged {
    /// Handle that moved.
    pub handle: HandleId,
    /// Its kind, repeated for convenient matching.
    pub kind: HandleKind,
    /// New value along the handle's drag axis: math `y` for vertical handles,
    /// math `x` otherwise.
    pub value: f64,
}

/// Idle/dragging state machine over a [`HandleSet`].
///
/// At most one handle is dragged at a time.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    handles: HandleSet,
    drag: DragState,
    active: Option<HandleId>,
    origin: Option<Point>,
}

impl InteractionController {
    /// Creates an idle controller over `handles`.
    #[must_use]
    pub fn new(handles: HandleSet) -> Self {
        Self {
            handles,
            drag: DragState::default(),
            active: None,
            origin: None,
        }
    }

    /// The handle arena.
    #[must_use]
    pub fn handles(&self) -> &HandleSet {
        &self.handles
    }

    /// The handle arena, mutably, for repositioning handles after a model update.
    pub fn handles_mut(&mut self) -> &mut HandleSet {
        &mut self.handles
    }

    /// Handle currently being dragged.
    #[must_use]
    pub fn active(&self) -> Option<HandleId> {
        self.active
    }

    /// Returns `true` while a handle is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Pointer-down: starts dragging the hit handle.
    ///
    /// Returns the handle that started dragging, or `None` on a miss or when a
    /// drag is already in progress.
    pub fn pointer_down(&mut self, pos: Point) -> Option<HandleId> {
        if self.active.is_some() {
            return None;
        }
        let id = self.handles.hit_test(pos)?;
        let handle = self.handles.get_mut(id)?;
        handle.dragging = true;
        self.origin = Some(handle.position);
        self.drag.start(pos);
        self.active = Some(id);
        Some(id)
    }

    /// Pointer-move: places the dragged handle at its press position offset
    /// by the pointer's total movement since the press.
    ///
    /// Emits exactly one [`BoundChanged`] per call while dragging, none while
    /// idle.
    pub fn pointer_move(
        &mut self,
        pos: Point,
        transform: &CoordinateTransform,
    ) -> Option<BoundChanged> {
        let id = self.active?;
        let origin = self.origin?;
        let offset = self.drag.total_offset(pos).unwrap_or(Vec2::ZERO);
        self.drag.update(pos);
        let handle = self.handles.get_mut(id)?;
        handle.position = handle.axis.apply(origin, offset.x, offset.y);
        let (x, y) = transform.screen_to_math(handle.position);
        let value = match handle.axis {
            DragAxis::Vertical => y,
            DragAxis::Free | DragAxis::Horizontal => x,
        };
        Some(BoundChanged {
            handle: id,
            kind: id.kind,
            value,
        })
    }

    /// Pointer-up: ends the drag. Returns the handle that was released.
    pub fn pointer_up(&mut self) -> Option<HandleId> {
        let id = self.active.take()?;
        if let Some(h) = self.handles.get_mut(id) {
            h.dragging = false;
        }
        self.origin = None;
        self.drag.end();
        Some(id)
    }

    /// Pointer-leave: behaves like [`Self::pointer_up`].
    pub fn pointer_leave(&mut self) -> Option<HandleId> {
        self.pointer_up()
    }

    /// Drops the drag state and returns the handle arena.
    pub fn into_handles(mut self) -> HandleSet {
        self.pointer_up();
        self.handles
    }
}
