// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tangent Scenario: interactive calculus lessons bound to a drawing surface.
//!
//! A [`Scenario`] ties the other Tangent crates together:
//! - the model (functions from the catalog, an interval, a split point,
//!   partition count and coefficients) and the numeric results computed from
//!   it with `tangent_calculus`;
//! - draggable handles and hover tooltips from `tangent_event_state`;
//! - the math/pixel mapping from `tangent_view`;
//! - the [`RenderPipeline`], which redraws the whole frame onto any
//!   `tangent_imaging` [`Surface`](tangent_imaging::Surface) in fixed layer
//!   order.
//!
//! Results are published as a [`ScenarioReport`], both through
//! [`Scenario::report`] and to an optional [`ResultSink`].
//!
//! ## Lifecycle
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use tangent_calculus::FunctionId;
//! use tangent_imaging::{Layer, RecordingSurface};
//! use tangent_scenario::{Scenario, ScenarioConfig, ScenarioKind};
//!
//! let config = ScenarioConfig {
//!     function: FunctionId::Cube,
//!     lower: 0.0,
//!     upper: 2.0,
//!     ..ScenarioConfig::default()
//! };
//! let surface = RecordingSurface::new(Size::new(800.0, 600.0));
//! let mut scenario = Scenario::init(ScenarioKind::MeanValueDerivative, surface, config).unwrap();
//!
//! // f'(c) = (f(2) − f(0)) / 2 = 4, so c = 2/√3.
//! let c = scenario.report().point_c.unwrap();
//! assert!((c - 2.0 / 3.0_f64.sqrt()).abs() < 1e-3);
//!
//! // Drag the upper bound handle a little to the left.
//! let upper = scenario.handles().iter().nth(1).unwrap().position;
//! scenario.pointer_down(upper);
//! scenario.pointer_move(Point::new(upper.x - 40.0, upper.y));
//! scenario.pointer_up();
//! assert!(scenario.interval().upper() < 2.0);
//!
//! scenario.render();
//! let surface = scenario.teardown();
//! assert_eq!(surface.layer_sequence(), Layer::ORDER);
//! ```
//!
//! ## Configuration
//!
//! [`ScenarioConfig`] is deserialized with `serde` from JSON; every field
//! has a default. Invalid starting states fail [`Scenario::init`] with a
//! [`ScenarioError`]. Once a scenario is running, invalid input never fails
//! hard: it is recorded as an [`Issue`] in the report and the previous valid
//! state is kept.
//!
//! ## Logging
//!
//! Scenarios log through the `log` facade: `debug!` for accepted updates
//! and lifecycle, `warn!` for rejected input, `trace!` for pointer events
//! and redraws.

mod config;
mod error;
mod render;
mod scenario;

pub use config::{ScenarioConfig, ScenarioKind};
pub use error::{Issue, ScenarioError};
pub use render::{Curve, CurveRole, Frame, Palette, Reference, RenderPipeline, Shade, ShadeRole};
pub use scenario::{Linearity, ResultSink, Scenario, ScenarioReport, catalog};
