// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tangent Event State: pointer interaction for function plots.
//!
//! This crate provides small state machines that turn raw pointer positions
//! into plot-level events:
//!
//! - [`handle`]: an arena of draggable handles with stable ids and
//!   first-registered-wins hit testing.
//! - [`drag`]: the idle/dragging state machine that moves handles and reports
//!   their new math-space values.
//! - [`hover`]: curve values under the pointer and the tooltip built from them.
//!
//! The managers do not own a surface or a function model. They accept pixel
//! positions plus a [`CoordinateTransform`](tangent_view::CoordinateTransform)
//! and return events the caller applies to its own state.
//!
//! ## Dragging an interval bound
//!
//! ```rust
//! use kurbo::Point;
//! use tangent_event_state::drag::InteractionController;
//! use tangent_event_state::handle::{HandleKind, HandleSet};
//! use tangent_view::{CoordinateTransform, Interval, SurfaceGeometry, ValueRange};
//!
//! let transform = CoordinateTransform::new(
//!     Interval::new(-2.0, 2.0).unwrap(),
//!     ValueRange::fit([0.0, 4.0]),
//!     SurfaceGeometry::new(640.0, 480.0),
//! );
//!
//! let mut handles = HandleSet::new();
//! let upper_px = transform.math_to_screen(2.0, 0.0);
//! handles.register(HandleKind::UpperBound, upper_px, 8.0);
//!
//! let mut controller = InteractionController::new(handles);
//! controller.pointer_down(upper_px).unwrap();
//! let change = controller
//!     .pointer_move(upper_px - kurbo::Vec2::new(transform.scale_width(0.5), 0.0), &transform)
//!     .unwrap();
//! assert_eq!(change.kind, HandleKind::UpperBound);
//! assert!((change.value - 1.5).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod drag;
pub mod handle;
pub mod hover;

pub use drag::{BoundChanged, DragState, InteractionController};
pub use handle::{DragAxis, HandleId, HandleKind, HandleSet, InteractiveHandle};
pub use hover::{HoverResolver, HoverSample, Series, SeriesValue, Tooltip};
