// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

use kurbo::Point;
use log::{debug, trace, warn};
use tangent_calculus::{
    Additivity, Antiderivative, AntiderivativeResult, CalculusError, FunctionId, Integrator,
    LinearCombination, RealFn, RiemannSum, RuleEngine, SamplingPolicy, TheoremForm, TheoremResult,
    TheoremSolver, VerificationReport,
};
use tangent_event_state::{
    BoundChanged, HandleId, HandleKind, HandleSet, HoverResolver, HoverSample,
    InteractionController, Series, Tooltip,
};
use tangent_imaging::Surface;
use tangent_view::{CoordinateTransform, Interval, SplitInterval, SurfaceGeometry, ValueRange};

use crate::config::{ScenarioConfig, ScenarioKind};
use crate::error::{Issue, ScenarioError};
use crate::render::{Curve, CurveRole, Frame, Reference, RenderPipeline, Shade, ShadeRole};

/// Receives results for display outside the drawing surface.
pub trait ResultSink {
    /// Called with the full report after every recomputation or rejected input.
    fn publish(&mut self, report: &ScenarioReport);

    /// Called when the hover tooltip changes; `None` hides it.
    fn tooltip(&mut self, tooltip: Option<&Tooltip>) {
        let _ = tooltip;
    }
}

/// `∫(αf + βg)` compared with `α∫f + β∫g`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Linearity {
    /// Integral of the combination.
    pub combined: f64,
    /// `α∫f + β∫g`
    pub from_parts: f64,
}

impl Linearity {
    /// `|combined − from_parts|`
    #[must_use]
    pub fn discrepancy(&self) -> f64 {
        (self.combined - self.from_parts).abs()
    }
}

/// Structured results of the current state, for textual display.
///
/// Fields that do not apply to the scenario kind are `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenarioReport {
    /// Lesson kind.
    pub kind: ScenarioKind,
    /// Display expression of the integrand.
    pub expression: String,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Definite integral over `[lower, upper]`.
    pub integral: Option<f64>,
    /// Average value, or the secant slope in derivative form.
    pub average_value: Option<f64>,
    /// Mean value point `c`.
    pub point_c: Option<f64>,
    /// `f(c)`, or `f'(c)` in derivative form.
    pub value_at_c: Option<f64>,
    /// Whether `c` met the tolerance.
    pub converged: Option<bool>,
    /// Full mean value search result.
    pub theorem: Option<TheoremResult>,
    /// Antiderivative and rule.
    pub antiderivative: Option<AntiderivativeResult>,
    /// Finite-difference verification of the antiderivative.
    pub verification: Option<VerificationReport>,
    /// Riemann rectangles and their area.
    pub riemann_sum: Option<RiemannSum>,
    /// `|riemann area − integral|`
    pub riemann_error: Option<f64>,
    /// Split integrals.
    pub additivity: Option<Additivity>,
    /// Linearity check for combinations.
    pub linearity: Option<Linearity>,
    /// Problems found while computing or rejected inputs since the last accepted update.
    pub issues: Vec<Issue>,
}

/// Lists the selectable functions with their display labels.
#[must_use]
pub fn catalog() -> Vec<(FunctionId, &'static str)> {
    FunctionId::catalog().collect()
}

/// A function plotted by a scenario.
#[derive(Clone, Copy, Debug)]
enum Plotted {
    Catalog(FunctionId),
    Combination(LinearCombination),
    Antiderivative(Antiderivative),
}

impl RealFn for Plotted {
    fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Catalog(f) => f.evaluate(x),
            Self::Combination(c) => c.evaluate(x),
            Self::Antiderivative(a) => a.evaluate(x),
        }
    }
}

struct PlottedSeries<'a>(CurveRole, &'a Plotted);

impl Series for PlottedSeries<'_> {
    fn name(&self) -> &str {
        self.0.series_name()
    }

    fn value_at(&self, x: f64) -> f64 {
        self.1.evaluate(x)
    }
}

/// Fraction of the interval width shown on each side of it.
const VIEW_PADDING: f64 = 0.2;

/// One interactive lesson bound to a drawing surface.
///
/// A scenario owns its surface, its handles, and its model (functions,
/// interval, split point, partition count, coefficients). Every accepted
/// update recomputes the [`ScenarioReport`]; [`Scenario::render`] redraws the
/// whole surface from the current state.
///
/// ```
/// use kurbo::Size;
/// use tangent_calculus::FunctionId;
/// use tangent_imaging::RecordingSurface;
/// use tangent_scenario::{Scenario, ScenarioConfig, ScenarioKind};
///
/// let surface = RecordingSurface::new(Size::new(640.0, 480.0));
/// let mut scenario =
///     Scenario::init(ScenarioKind::DefiniteIntegral, surface, ScenarioConfig::default()).unwrap();
/// scenario.set_function(FunctionId::Square);
/// scenario.set_interval(0.0, 2.0).unwrap();
/// assert!((scenario.report().integral.unwrap() - 8.0 / 3.0).abs() < 1e-3);
///
/// // Unordered bounds are rejected and the previous interval is kept.
/// assert!(scenario.set_interval(3.0, 1.0).is_err());
/// assert_eq!(scenario.interval().upper(), 2.0);
///
/// scenario.render();
/// let surface = scenario.teardown();
/// assert_eq!(surface.frame_count(), 1);
/// ```
pub struct Scenario<S: Surface> {
    kind: ScenarioKind,
    surface: S,
    output: Option<Box<dyn ResultSink>>,
    function: FunctionId,
    secondary: FunctionId,
    interval: Interval,
    split: f64,
    partitions: usize,
    sampling: SamplingPolicy,
    alpha: f64,
    beta: f64,
    integrator: Integrator,
    solver: TheoremSolver,
    engine: RuleEngine,
    transform: CoordinateTransform,
    controller: InteractionController,
    hover: HoverResolver,
    tooltip: Option<Tooltip>,
    pipeline: RenderPipeline,
    curve_samples: usize,
    report: ScenarioReport,
}

impl<S: Surface> fmt::Debug for Scenario<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("kind", &self.kind)
            .field("function", &self.function)
            .field("interval", &self.interval)
            .field("dragging", &self.controller.active())
            .finish_non_exhaustive()
    }
}

impl<S: Surface> Scenario<S> {
    /// Binds a new scenario of `kind` to `surface`.
    ///
    /// Fails if `config` describes an invalid starting state: unordered
    /// bounds, a split point outside them, or a zero count.
    pub fn init(
        kind: ScenarioKind,
        surface: S,
        config: ScenarioConfig,
    ) -> Result<Self, ScenarioError> {
        let interval = Interval::new(config.lower, config.upper)?;
        let split = match config.split {
            Some(b) => SplitInterval::split(interval, b)?.split_point(),
            None => interval.midpoint(),
        };
        check_count(config.partition_count, 1)?;
        check_count(config.curve_samples, ScenarioConfig::MIN_CURVE_SAMPLES)?;
        let integrator = Integrator::new(config.integrator.partitions())?;
        let solver = TheoremSolver::new(integrator, config.theorem)?;
        let engine = RuleEngine::new(integrator, config.verify);

        let geometry = SurfaceGeometry::from_size(surface.size());
        let transform = CoordinateTransform::new(view_for(interval), ValueRange::fit([]), geometry);

        let mut handles = HandleSet::new();
        handles.register(HandleKind::LowerBound, Point::ZERO, config.handle_radius);
        handles.register(HandleKind::UpperBound, Point::ZERO, config.handle_radius);
        if kind == ScenarioKind::Additivity {
            handles.register(HandleKind::Control, Point::ZERO, config.handle_radius);
        }

        let mut scenario = Self {
            kind,
            surface,
            output: None,
            function: config.function,
            secondary: config.secondary_function,
            interval,
            split,
            partitions: config.partition_count,
            sampling: config.sampling,
            alpha: config.alpha,
            beta: config.beta,
            integrator,
            solver,
            engine,
            transform,
            controller: InteractionController::new(handles),
            hover: HoverResolver::new(),
            tooltip: None,
            pipeline: RenderPipeline::new(config.curve_samples),
            curve_samples: config.curve_samples,
            report: ScenarioReport::default(),
        };
        debug!(
            "init {kind:?} scenario with {} on [{}, {}]",
            scenario.function.key(),
            interval.lower(),
            interval.upper()
        );
        scenario.recompute();
        Ok(scenario)
    }

    /// Attaches an auxiliary output and publishes the current report to it.
    #[must_use]
    pub fn with_output(mut self, mut sink: Box<dyn ResultSink>) -> Self {
        sink.publish(&self.report);
        self.output = Some(sink);
        self
    }

    /// Lesson kind.
    #[must_use]
    pub fn kind(&self) -> ScenarioKind {
        self.kind
    }

    /// Latest results.
    #[must_use]
    pub fn report(&self) -> &ScenarioReport {
        &self.report
    }

    /// Current interval.
    #[must_use]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Current additivity split point.
    #[must_use]
    pub fn split(&self) -> f64 {
        self.split
    }

    /// Current math/pixel transform.
    #[must_use]
    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    /// Draggable handles.
    #[must_use]
    pub fn handles(&self) -> &HandleSet {
        self.controller.handles()
    }

    /// Current hover sample.
    #[must_use]
    pub fn hover_sample(&self) -> Option<&HoverSample> {
        self.hover.current()
    }

    /// Current tooltip.
    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// The bound surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The bound surface, mutably. A size change is picked up by the next render.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Selects the primary function.
    pub fn set_function(&mut self, f: FunctionId) {
        debug!("function set to {}", f.key());
        self.function = f;
        self.recompute();
    }

    /// Selects the second function of a linear combination.
    pub fn set_secondary_function(&mut self, g: FunctionId) {
        debug!("secondary function set to {}", g.key());
        self.secondary = g;
        self.recompute();
    }

    /// Sets both bounds.
    ///
    /// Unordered or non-finite bounds are rejected, recorded as an issue, and
    /// leave the previous interval in place. A split point that no longer
    /// lies strictly inside moves to the midpoint.
    pub fn set_interval(&mut self, lower: f64, upper: f64) -> Result<(), Issue> {
        let interval = match Interval::new(lower, upper) {
            Ok(i) => i,
            Err(e) => return self.reject(e.into()),
        };
        self.interval = interval;
        if SplitInterval::split(interval, self.split).is_err() {
            debug!("split point {} left the interval, recentering", self.split);
            self.split = interval.midpoint();
        }
        debug!("interval set to [{lower}, {upper}]");
        self.recompute();
        Ok(())
    }

    /// Moves the additivity split point, which must lie strictly inside the interval.
    pub fn set_split(&mut self, b: f64) -> Result<(), Issue> {
        match SplitInterval::split(self.interval, b) {
            Ok(split) => {
                self.split = split.split_point();
                debug!("split set to {b}");
                self.recompute();
                Ok(())
            }
            Err(e) => self.reject(e.into()),
        }
    }

    /// Sets the number of Riemann rectangles, which must be at least 1.
    pub fn set_partition_count(&mut self, n: usize) -> Result<(), Issue> {
        if let Err(e) = check_count(n, 1) {
            return self.reject(e.into());
        }
        debug!("partition count set to {n}");
        self.partitions = n;
        self.recompute();
        Ok(())
    }

    /// Sets the Riemann sampling policy.
    pub fn set_sampling(&mut self, policy: SamplingPolicy) {
        debug!("sampling set to {policy:?}");
        self.sampling = policy;
        self.recompute();
    }

    /// Sets the coefficients `α` and `β`, which must be finite.
    pub fn set_coefficients(&mut self, alpha: f64, beta: f64) -> Result<(), Issue> {
        if let Some(bad) = [alpha, beta].into_iter().find(|c| !c.is_finite()) {
            return self.reject(Issue::InvalidCoefficient { value: bad });
        }
        debug!("coefficients set to α = {alpha}, β = {beta}");
        self.alpha = alpha;
        self.beta = beta;
        self.recompute();
        Ok(())
    }

    /// Redraws the whole surface.
    pub fn render(&mut self) {
        self.sync_geometry();
        let plotted = self.plotted();
        let curves: Vec<Curve<'_>> = plotted
            .iter()
            .map(|(role, f)| Curve {
                function: f,
                role: *role,
            })
            .collect();
        let shades = self.shades();
        let references = self.references();
        let rectangles = self
            .report
            .riemann_sum
            .as_ref()
            .map_or(&[][..], |sum| &sum.rectangles[..]);
        let frame = Frame {
            transform: &self.transform,
            interval: self.interval,
            curves: &curves,
            shades: &shades,
            rectangles,
            references: &references,
            handles: self.controller.handles(),
            hover: self.hover.current(),
        };
        trace!("render {:?}", self.kind);
        self.pipeline.render(&mut self.surface, &frame);
    }

    /// Pointer-down: starts dragging a handle under the pointer.
    pub fn pointer_down(&mut self, pos: Point) -> Option<HandleId> {
        trace!("pointer down at ({}, {})", pos.x, pos.y);
        let id = self.controller.pointer_down(pos)?;
        debug!("drag started on {id:?}");
        Some(id)
    }

    /// Pointer-move: drags the active handle and updates the hover sample.
    ///
    /// Returns the bound change applied by this move. Returns `None` when no
    /// drag is active, and when the move was rejected; the rejection is then
    /// recorded in the report and the model keeps its previous bounds.
    pub fn pointer_move(&mut self, pos: Point) -> Option<BoundChanged> {
        trace!("pointer move at ({}, {})", pos.x, pos.y);
        let applied = match self.controller.pointer_move(pos, &self.transform) {
            Some(change) => self.apply(change).ok().map(|()| change),
            None => None,
        };
        self.update_hover(pos);
        applied
    }

    /// Pointer-up: ends the drag and refits the view to the new interval.
    pub fn pointer_up(&mut self) -> Option<HandleId> {
        trace!("pointer up");
        let id = self.controller.pointer_up()?;
        debug!("drag ended on {id:?}");
        self.recompute();
        Some(id)
    }

    /// Pointer-leave: ends any drag and clears the hover sample.
    pub fn pointer_leave(&mut self) -> Option<HandleId> {
        trace!("pointer leave");
        self.hover.clear();
        self.set_tooltip(None);
        let id = self.controller.pointer_leave()?;
        debug!("drag cancelled on {id:?}");
        self.recompute();
        Some(id)
    }

    /// Detaches the output, drops interaction state, and returns the surface.
    pub fn teardown(mut self) -> S {
        debug!("teardown {:?} scenario", self.kind);
        self.controller.pointer_up();
        self.hover.clear();
        self.output = None;
        self.surface
    }

    fn apply(&mut self, change: BoundChanged) -> Result<(), Issue> {
        match change.kind {
            HandleKind::LowerBound => self.set_interval(change.value, self.interval.upper()),
            HandleKind::UpperBound => self.set_interval(self.interval.lower(), change.value),
            HandleKind::Control => self.set_split(change.value),
        }
    }

    fn reject(&mut self, issue: Issue) -> Result<(), Issue> {
        warn!("rejected input: {issue}");
        self.report.issues.push(issue);
        self.sync_handles();
        self.publish();
        Err(issue)
    }

    fn publish(&mut self) {
        if let Some(sink) = self.output.as_mut() {
            sink.publish(&self.report);
        }
    }

    fn set_tooltip(&mut self, tooltip: Option<Tooltip>) {
        if self.tooltip == tooltip {
            return;
        }
        self.tooltip = tooltip;
        if let Some(sink) = self.output.as_mut() {
            sink.tooltip(self.tooltip.as_ref());
        }
    }

    fn update_hover(&mut self, pos: Point) {
        let plotted = self.plotted();
        let series: Vec<PlottedSeries<'_>> =
            plotted.iter().map(|(role, f)| PlottedSeries(*role, f)).collect();
        let refs: Vec<&dyn Series> = series.iter().map(|s| s as &dyn Series).collect();
        let bounds = self.transform.geometry().surface_rect();
        let tooltip = self
            .hover
            .update(pos, &self.transform, &refs)
            .map(|sample| Tooltip::new(sample, bounds));
        self.set_tooltip(tooltip);
    }

    fn sync_geometry(&mut self) {
        let geometry = SurfaceGeometry::from_size(self.surface.size())
            .with_margins(self.transform.geometry().margins);
        if geometry != self.transform.geometry() {
            debug!("surface resized to {}x{}", geometry.width, geometry.height);
            self.transform.set_geometry(geometry);
            self.sync_handles();
        }
    }

    /// Rebuilds the report from the current model.
    fn recompute(&mut self) {
        let f = self.function;
        let interval = self.interval;
        let mut report = ScenarioReport {
            kind: self.kind,
            expression: self.expression(),
            lower: interval.lower(),
            upper: interval.upper(),
            ..ScenarioReport::default()
        };

        match self.kind {
            ScenarioKind::LinearCombination => {
                let combo = self.combination();
                let combined = self.checked_integral(&combo, &mut report.issues);
                let from_parts = self.alpha * self.integrator.integrate(&f, interval)
                    + self.beta * self.integrator.integrate(&self.secondary, interval);
                report.integral = Some(combined);
                report.linearity = Some(Linearity {
                    combined,
                    from_parts,
                });
            }
            _ => report.integral = Some(self.checked_integral(&f, &mut report.issues)),
        }

        match self.kind {
            ScenarioKind::MeanValueIntegral | ScenarioKind::MeanValueDerivative => {
                let form = if self.kind == ScenarioKind::MeanValueIntegral {
                    TheoremForm::Integral
                } else {
                    TheoremForm::Derivative
                };
                let result = self.solver.solve(&f, interval, form);
                report.average_value = Some(result.average_value());
                report.point_c = Some(result.point_c());
                report.value_at_c = Some(result.value_at_c());
                report.converged = Some(result.converged());
                if !result.converged() && !result.is_undefined() {
                    report.issues.push(Issue::NonConvergence {
                        residual: result.residual(),
                    });
                }
                report.theorem = Some(result);
            }
            ScenarioKind::RiemannSum => {
                match RiemannSum::new(&f, interval, self.partitions, self.sampling) {
                    Ok(sum) => {
                        report.riemann_error = report.integral.map(|i| sum.error_against(i));
                        report.riemann_sum = Some(sum);
                    }
                    Err(e) => report.issues.push(e.into()),
                }
            }
            ScenarioKind::Antiderivative => {
                let result = self.engine.calculate(f);
                let verification = *result.verification();
                if !verification.verified {
                    report.issues.push(Issue::VerificationFailure {
                        mean_absolute_error: verification.mean_absolute_error,
                    });
                }
                report.verification = Some(verification);
                report.antiderivative = Some(result);
            }
            ScenarioKind::Additivity => match SplitInterval::split(interval, self.split) {
                Ok(split) => report.additivity = Some(self.integrator.additivity(&f, split)),
                Err(e) => report.issues.push(e.into()),
            },
            ScenarioKind::DefiniteIntegral | ScenarioKind::LinearCombination => {}
        }

        for issue in &report.issues {
            debug!("{:?}: {issue}", self.kind);
        }
        self.report = report;

        if !self.controller.is_dragging() {
            self.transform.set_interval(view_for(interval));
        }
        let values = self.fit_values();
        self.transform.set_value_range(values);
        self.sync_handles();
        self.publish();
    }

    fn checked_integral<F: RealFn + ?Sized>(&self, f: &F, issues: &mut Vec<Issue>) -> f64 {
        match self.integrator.integrate_checked(f, self.interval) {
            Ok(v) => v,
            Err(e) => {
                issues.push(e.into());
                self.integrator.integrate(f, self.interval)
            }
        }
    }

    fn combination(&self) -> LinearCombination {
        LinearCombination::new(self.function, self.alpha, self.secondary, self.beta)
    }

    fn expression(&self) -> String {
        match self.kind {
            ScenarioKind::LinearCombination => self.combination().expression(),
            _ => self.function.label().to_owned(),
        }
    }

    /// Curves drawn and hovered for the current kind, bottom to top.
    fn plotted(&self) -> Vec<(CurveRole, Plotted)> {
        let mut out = vec![(CurveRole::Primary, Plotted::Catalog(self.function))];
        match self.kind {
            ScenarioKind::LinearCombination => {
                out.insert(0, (CurveRole::Combination, Plotted::Combination(self.combination())));
                out.push((CurveRole::Secondary, Plotted::Catalog(self.secondary)));
            }
            ScenarioKind::Antiderivative => {
                if let Some(result) = &self.report.antiderivative {
                    out.push((
                        CurveRole::Antiderivative,
                        Plotted::Antiderivative(*result.antiderivative()),
                    ));
                }
            }
            _ => {}
        }
        out
    }

    fn shades(&self) -> Vec<Shade> {
        let (a, b) = (self.interval.lower(), self.interval.upper());
        let area = |curve| Shade {
            curve,
            from: a,
            to: b,
            role: ShadeRole::Area,
        };
        match self.kind {
            ScenarioKind::DefiniteIntegral | ScenarioKind::MeanValueIntegral => vec![area(0)],
            // The combination is plotted first.
            ScenarioKind::LinearCombination => vec![area(0)],
            ScenarioKind::Additivity => vec![
                Shade {
                    curve: 0,
                    from: a,
                    to: self.split,
                    role: ShadeRole::Left,
                },
                Shade {
                    curve: 0,
                    from: self.split,
                    to: b,
                    role: ShadeRole::Right,
                },
            ],
            _ => Vec::new(),
        }
    }

    fn references(&self) -> Vec<Reference> {
        let f = self.function;
        let (a, b) = (self.interval.lower(), self.interval.upper());
        let finite = |v: f64| v.is_finite().then_some(v);
        let mut out = Vec::new();
        match (self.kind, &self.report.theorem) {
            (ScenarioKind::MeanValueIntegral, Some(r)) => {
                if let Some(value) = finite(r.average_value()) {
                    out.push(Reference::AverageLine { value });
                }
                if let (Some(x), Some(y)) = (finite(r.point_c()), finite(r.value_at_c())) {
                    out.push(Reference::PointC { x, y });
                }
            }
            (ScenarioKind::MeanValueDerivative, Some(r)) => {
                let (fa, fb) = (f.evaluate(a), f.evaluate(b));
                if fa.is_finite() && fb.is_finite() {
                    out.push(Reference::Secant {
                        from: (a, fa),
                        to: (b, fb),
                    });
                }
                let c = r.point_c();
                let fc = f.evaluate(c);
                if let (Some(slope), Some(y)) = (finite(r.average_value()), finite(fc)) {
                    out.push(Reference::Tangent { x: c, y, slope });
                    out.push(Reference::PointC { x: c, y });
                }
            }
            (ScenarioKind::Additivity, _) => out.push(Reference::Split { x: self.split }),
            _ => {}
        }
        out
    }

    fn fit_values(&self) -> ValueRange {
        let view = self.transform.interval();
        let last = (self.curve_samples - 1) as f64;
        let plotted = self.plotted();
        let mut values: Vec<f64> = plotted
            .iter()
            .flat_map(|(_, f)| {
                (0..self.curve_samples).map(move |i| f.evaluate(view.lerp(i as f64 / last)))
            })
            .collect();
        if let Some(sum) = &self.report.riemann_sum {
            values.extend(sum.rectangles.iter().map(|r| r.height));
        }
        ValueRange::fit(values)
    }

    /// Places handles on the x-axis at the model's bounds and split point.
    fn sync_handles(&mut self) {
        let t = &self.transform;
        let plot = t.plot_rect();
        let y = t.y_to_screen(0.0).clamp(plot.y0, plot.y1);
        let (a, b, split) = (self.interval.lower(), self.interval.upper(), self.split);
        for handle in self.controller.handles_mut().iter_mut() {
            let x = match handle.id.kind {
                HandleKind::LowerBound => a,
                HandleKind::UpperBound => b,
                HandleKind::Control => split,
            };
            handle.position = Point::new(t.x_to_screen(x), y);
        }
    }
}

fn view_for(interval: Interval) -> Interval {
    let pad = interval.width() * VIEW_PADDING;
    Interval::new(interval.lower() - pad, interval.upper() + pad).unwrap_or(interval)
}

fn check_count(count: usize, min: usize) -> Result<(), CalculusError> {
    if count < min {
        Err(CalculusError::InvalidCount { count, min })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use tangent_imaging::RecordingSurface;

    fn scenario(kind: ScenarioKind, config: ScenarioConfig) -> Scenario<RecordingSurface> {
        Scenario::init(kind, RecordingSurface::new(Size::new(640.0, 480.0)), config).unwrap()
    }

    #[test]
    fn view_pads_interval() {
        let v = view_for(Interval::new(0.0, 10.0).unwrap());
        assert_eq!((v.lower(), v.upper()), (-2.0, 12.0));
    }

    #[test]
    fn invalid_config_is_refused() {
        let surface = RecordingSurface::new(Size::new(10.0, 10.0));
        let config = ScenarioConfig {
            lower: 1.0,
            upper: 1.0,
            ..ScenarioConfig::default()
        };
        assert!(matches!(
            Scenario::init(ScenarioKind::DefiniteIntegral, surface, config),
            Err(ScenarioError::Calculus(CalculusError::InvalidInterval(_)))
        ));

        let surface = RecordingSurface::new(Size::new(10.0, 10.0));
        let config = ScenarioConfig {
            partition_count: 0,
            ..ScenarioConfig::default()
        };
        assert!(matches!(
            Scenario::init(ScenarioKind::RiemannSum, surface, config),
            Err(ScenarioError::Calculus(CalculusError::InvalidCount { count: 0, min: 1 }))
        ));
    }

    #[test]
    fn handles_sit_on_the_bounds() {
        let s = scenario(ScenarioKind::Additivity, ScenarioConfig::default());
        let t = s.transform();
        let xs: Vec<f64> = s.handles().iter().map(|h| t.screen_to_x(h.position.x)).collect();
        assert_eq!(xs.len(), 3);
        assert!((xs[0] + 2.0).abs() < 1e-9);
        assert!((xs[1] - 2.0).abs() < 1e-9);
        assert!(xs[2].abs() < 1e-9);
    }

    #[test]
    fn undefined_samples_are_reported() {
        let mut s = scenario(ScenarioKind::DefiniteIntegral, ScenarioConfig::default());
        s.set_function(FunctionId::SquareRoot);
        assert!(s.report().issues.iter().any(|i| matches!(
            i,
            Issue::Calculus(CalculusError::UndefinedSample { x }) if *x == -2.0
        )));
        assert!(s.report().integral.unwrap().is_nan());
    }

    #[test]
    fn accepted_update_clears_rejections() {
        let mut s = scenario(ScenarioKind::DefiniteIntegral, ScenarioConfig::default());
        assert!(s.set_interval(1.0, -1.0).is_err());
        assert_eq!(s.report().issues.len(), 1);
        assert!(s.report().issues[0].is_rejection());
        s.set_interval(0.0, 1.0).unwrap();
        assert!(s.report().issues.is_empty());
    }

    #[test]
    fn split_recenters_when_interval_excludes_it() {
        let mut s = scenario(ScenarioKind::Additivity, ScenarioConfig::default());
        s.set_split(1.5).unwrap();
        s.set_interval(-2.0, 1.0).unwrap();
        assert_eq!(s.split(), -0.5);
        let add = s.report().additivity.unwrap();
        assert!(add.discrepancy() < 1e-2);
    }

    #[test]
    fn non_finite_coefficients_are_rejected() {
        let mut s = scenario(ScenarioKind::LinearCombination, ScenarioConfig::default());
        assert_eq!(
            s.set_coefficients(f64::INFINITY, 1.0),
            Err(Issue::InvalidCoefficient {
                value: f64::INFINITY
            })
        );
        s.set_coefficients(2.0, -3.0).unwrap();
        let lin = s.report().linearity.unwrap();
        assert!(lin.discrepancy() < 1e-9);
    }
}
