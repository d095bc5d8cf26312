// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tangent View: math-space ranges and the math/pixel coordinate transform.
//!
//! This crate provides small, headless models for plotting a single-variable
//! function onto a pixel surface. It focuses on:
//! - Validated math-space ranges ([`Interval`], [`SplitInterval`], [`ValueRange`]).
//! - Drawing surface geometry with margins ([`SurfaceGeometry`]).
//! - A bidirectional transform between math space and pixel space
//!   ([`CoordinateTransform`]).
//!
//! It does **not** evaluate functions or draw anything. Callers are expected
//! to:
//! - Validate user-supplied bounds through [`Interval::new`], which reports
//!   unordered or non-finite bounds instead of silently reordering them.
//! - Fit a [`ValueRange`] from sampled function values.
//! - Rebuild or update a [`CoordinateTransform`] whenever the interval, the
//!   value range, or the surface geometry changes.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use tangent_view::{CoordinateTransform, Interval, SurfaceGeometry, ValueRange};
//!
//! let interval = Interval::new(0.0, 2.0).unwrap();
//! let values = ValueRange::fit([0.0, 4.0]);
//! let geometry = SurfaceGeometry::new(800.0, 600.0);
//! let transform = CoordinateTransform::new(interval, values, geometry);
//!
//! let px = transform.math_to_screen(1.0, 1.0);
//! let (x, y) = transform.screen_to_math(px);
//! assert!((x - 1.0).abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
//!
//! // Pixels outside the plot are extrapolated, not clamped.
//! let (x, _) = transform.screen_to_math(Point::new(-100.0, 0.0));
//! assert!(x < 0.0);
//! ```
//!
//! ## Design notes
//!
//! - The math y-axis points up, the pixel y-axis points down.
//! - Horizontal and vertical scales are independent; a plot is fitted to
//!   its interval and value range rather than zoomed uniformly.
//! - The transform is a value type. Every setter rebuilds the scale factors,
//!   so a stale scale can never be observed.
//!
//! This crate is `no_std`.

#![no_std]

mod geometry;
mod interval;
mod transform;

pub use geometry::{Margins, SurfaceGeometry};
pub use interval::{Interval, IntervalError, SplitInterval, ValueRange};
pub use transform::{CoordinateTransform, CoordinateTransformDebugInfo};
