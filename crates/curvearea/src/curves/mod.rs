//! Drawing curves as a closed sum type.
//!
//! Purpose
//! - One enum covers every curve kind a selection may contain, so dispatch is
//!   a `match` instead of runtime type probing.
//! - Each kind knows its endpoints, closure, validity, sampling (`sample`) and,
//!   when closed, its enclosed area.
//!
//! Conventions
//! - Angles in radians, CCW positive. Arcs run CCW from `start_angle` to
//!   `end_angle`; the sweep is normalized to (0, 2π].
//! - Ellipses follow the drawing-database convention: `major_axis` is the
//!   vector from the center to the major-axis endpoint, `ratio` = minor/major,
//!   parameters measured from the major axis.
//! - Polyline bulges are `tan(θ/4)` of the included angle of the segment
//!   starting at the same vertex; positive bulges turn CCW.

mod bulge;
mod hatch;
mod join;
mod nurbs;
mod sample;

use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

use crate::error::CurveError;
use crate::geom2::{shoelace_signed, AreaCfg, Pt2};

pub use bulge::{bulge_arc, bulge_from_sweep, bulge_segment_area, BulgeArc};
pub use hatch::{HatchEdge, HatchLoop};
pub use join::join_open_curves;
pub use nurbs::clamped_uniform_knots;

/// Tolerance for treating a sweep as a full turn.
const FULL_TURN_EPS: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub start: Pt2,
    pub end: Pt2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    pub center: Pt2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub center: Pt2,
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Pt2,
    pub major_axis: Vector2<f64>,
    pub ratio: f64,
    pub start_param: f64,
    pub end_param: f64,
}

/// NURBS curve, or an interpolating polyline when only fit points are known.
///
/// Invariants (checked by `validate`):
/// - With control points: `degree >= 1`, at least `degree + 1` points,
///   `knots` empty (clamped uniform is generated) or of length
///   `points + degree + 1` and non-decreasing, `weights` empty or one
///   positive weight per point.
/// - Without control points: at least 2 fit points.
#[derive(Clone, Debug, PartialEq)]
pub struct Spline {
    pub degree: usize,
    pub control_points: Vec<Pt2>,
    pub knots: Vec<f64>,
    pub weights: Vec<f64>,
    pub fit_points: Vec<Pt2>,
    pub closed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub vertices: Vec<Pt2>,
    /// One bulge per vertex (empty means all straight).
    pub bulges: Vec<f64>,
    pub closed: bool,
}

/// Closed set of curve kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Curve {
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Spline(Spline),
    Polyline(Polyline),
}

/// Sweep from `start` to `end` going CCW, in (0, 2π].
#[inline]
pub(crate) fn ccw_sweep(start: f64, end: f64) -> f64 {
    let s = (end - start).rem_euclid(TAU);
    if s <= FULL_TURN_EPS {
        TAU
    } else {
        s
    }
}

#[inline]
fn is_full_turn(sweep: f64) -> bool {
    (sweep - TAU).abs() <= FULL_TURN_EPS
}

#[inline]
fn finite(p: &Pt2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

impl Arc {
    #[inline]
    pub fn sweep(&self) -> f64 {
        ccw_sweep(self.start_angle, self.end_angle)
    }
    #[inline]
    pub fn point_at(&self, angle: f64) -> Pt2 {
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }
}

impl Circle {
    #[inline]
    pub fn point_at(&self, angle: f64) -> Pt2 {
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }
}

impl Ellipse {
    /// Minor axis vector (major rotated 90° CCW, scaled by `ratio`).
    #[inline]
    pub fn minor_axis(&self) -> Vector2<f64> {
        Vector2::new(-self.major_axis.y, self.major_axis.x) * self.ratio
    }
    #[inline]
    pub fn sweep(&self) -> f64 {
        ccw_sweep(self.start_param, self.end_param)
    }
    #[inline]
    pub fn is_full(&self) -> bool {
        is_full_turn(self.sweep())
    }
    #[inline]
    pub fn point_at(&self, t: f64) -> Pt2 {
        self.center + self.major_axis * t.cos() + self.minor_axis() * t.sin()
    }
}

impl Spline {
    /// Parameter domain `[t0, t1]` of the control-point form.
    pub fn domain(&self) -> Option<(f64, f64)> {
        let p = self.degree;
        let n = self.control_points.len();
        if n == 0 || p == 0 || n <= p {
            return None;
        }
        let knots = self.effective_knots();
        if knots.len() != n + p + 1 {
            return None;
        }
        Some((knots[p], knots[n]))
    }

    pub(crate) fn effective_knots(&self) -> Vec<f64> {
        if self.knots.is_empty() {
            clamped_uniform_knots(self.control_points.len(), self.degree)
        } else {
            self.knots.clone()
        }
    }

    /// Point at parameter `t` (control-point form only).
    pub fn point_at(&self, t: f64) -> Option<Pt2> {
        self.domain()?;
        let knots = self.effective_knots();
        Some(nurbs::de_boor(
            self.degree,
            &knots,
            &self.control_points,
            &self.weights,
            t,
        ))
    }
}

impl Polyline {
    #[inline]
    pub fn bulge(&self, i: usize) -> f64 {
        self.bulges.get(i).copied().unwrap_or(0.0)
    }

    /// Number of segments (including the closing one).
    pub fn segment_count(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            0
        } else if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Signed area of the closed outline, bulged segments included exactly.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut area = shoelace_signed(&self.vertices);
        for i in 0..n {
            let b = self.bulge(i);
            if b != 0.0 {
                area += bulge_segment_area(self.vertices[i], self.vertices[(i + 1) % n], b);
            }
        }
        area
    }
}

impl Curve {
    pub fn kind(&self) -> &'static str {
        match self {
            Curve::Line(_) => "line",
            Curve::Arc(_) => "arc",
            Curve::Circle(_) => "circle",
            Curve::Ellipse(_) => "ellipse",
            Curve::Spline(_) => "spline",
            Curve::Polyline(_) => "polyline",
        }
    }

    pub fn start(&self) -> Option<Pt2> {
        match self {
            Curve::Line(l) => Some(l.start),
            Curve::Arc(a) => Some(a.point_at(a.start_angle)),
            Curve::Circle(c) => Some(c.point_at(0.0)),
            Curve::Ellipse(e) => Some(e.point_at(e.start_param)),
            Curve::Spline(s) => match s.domain() {
                Some((t0, _)) => s.point_at(t0),
                None => s.fit_points.first().copied(),
            },
            Curve::Polyline(p) => p.vertices.first().copied(),
        }
    }

    pub fn end(&self) -> Option<Pt2> {
        match self {
            Curve::Line(l) => Some(l.end),
            Curve::Arc(a) => Some(a.point_at(a.end_angle)),
            Curve::Circle(c) => Some(c.point_at(0.0)),
            Curve::Ellipse(e) => Some(e.point_at(e.start_param + e.sweep())),
            Curve::Spline(s) => match s.domain() {
                Some((_, t1)) => s.point_at(t1),
                None => s.fit_points.last().copied(),
            },
            Curve::Polyline(p) => {
                if p.closed {
                    p.vertices.first().copied()
                } else {
                    p.vertices.last().copied()
                }
            }
        }
    }

    /// Whether the curve bounds an area on its own.
    ///
    /// Polylines and splines also count as closed when their endpoints meet
    /// within `tol`, even without the closed flag.
    pub fn is_closed(&self, tol: f64) -> bool {
        match self {
            Curve::Line(_) => false,
            Curve::Arc(a) => is_full_turn(a.sweep()),
            Curve::Circle(_) => true,
            Curve::Ellipse(e) => e.is_full(),
            Curve::Spline(s) => s.closed || self.endpoints_meet(tol),
            Curve::Polyline(p) => {
                (p.closed && p.vertices.len() >= 2)
                    || (p.vertices.len() >= 3 && self.endpoints_meet(tol))
            }
        }
    }

    fn endpoints_meet(&self, tol: f64) -> bool {
        match (self.start(), self.end()) {
            (Some(a), Some(b)) => (a - b).norm() <= tol,
            _ => false,
        }
    }

    /// Check the curve data; invalid curves are skipped by the area pipeline.
    pub fn validate(&self) -> Result<(), CurveError> {
        match self {
            Curve::Line(l) => {
                if !finite(&l.start) || !finite(&l.end) {
                    return Err(CurveError::NonFinite);
                }
                if (l.end - l.start).norm() == 0.0 {
                    return Err(CurveError::ZeroLength);
                }
                Ok(())
            }
            Curve::Arc(Arc {
                center,
                radius,
                start_angle,
                end_angle,
            }) => {
                if !finite(center) || !start_angle.is_finite() || !end_angle.is_finite() {
                    return Err(CurveError::NonFinite);
                }
                check_radius(*radius)
            }
            Curve::Circle(c) => {
                if !finite(&c.center) {
                    return Err(CurveError::NonFinite);
                }
                check_radius(c.radius)
            }
            Curve::Ellipse(e) => {
                if !finite(&e.center)
                    || !finite(&e.major_axis)
                    || !e.start_param.is_finite()
                    || !e.end_param.is_finite()
                {
                    return Err(CurveError::NonFinite);
                }
                if e.major_axis.norm() == 0.0 {
                    return Err(CurveError::ZeroMajorAxis);
                }
                if !(e.ratio > 0.0 && e.ratio <= 1.0) {
                    return Err(CurveError::BadRadiusRatio(e.ratio));
                }
                Ok(())
            }
            Curve::Spline(s) => validate_spline(s),
            Curve::Polyline(p) => {
                if p.vertices.len() < 2 {
                    return Err(CurveError::TooFewVertices(p.vertices.len()));
                }
                if !p.bulges.is_empty() && p.bulges.len() != p.vertices.len() {
                    return Err(CurveError::BulgeCount {
                        vertices: p.vertices.len(),
                        bulges: p.bulges.len(),
                    });
                }
                if !p.vertices.iter().all(finite) || !p.bulges.iter().all(|b| b.is_finite()) {
                    return Err(CurveError::NonFinite);
                }
                Ok(())
            }
        }
    }

    /// Exact (or best available) area of a closed curve; `None` when open.
    pub fn enclosed_area(&self, cfg: &AreaCfg) -> Option<f64> {
        if !self.is_closed(cfg.join_tolerance) {
            return None;
        }
        let area = match self {
            Curve::Circle(c) => PI * c.radius * c.radius,
            Curve::Arc(a) => PI * a.radius * a.radius,
            Curve::Ellipse(e) => {
                let a = e.major_axis.norm();
                PI * a * a * e.ratio
            }
            Curve::Polyline(p) => {
                let mut ring = p.clone();
                if !ring.closed {
                    // Endpoints meet: drop the duplicate closing vertex.
                    ring.vertices.pop();
                    ring.bulges.truncate(ring.vertices.len());
                    ring.closed = true;
                }
                ring.signed_area().abs()
            }
            Curve::Line(_) | Curve::Spline(_) => {
                let mut pts = self.sample(cfg);
                if pts.len() > 1 && (pts[0] - pts[pts.len() - 1]).norm() <= cfg.join_tolerance {
                    pts.pop();
                }
                shoelace_signed(&pts).abs()
            }
        };
        Some(area)
    }
}

fn check_radius(r: f64) -> Result<(), CurveError> {
    if r.is_finite() && r > 0.0 {
        Ok(())
    } else {
        Err(CurveError::BadRadius(r))
    }
}

fn validate_spline(s: &Spline) -> Result<(), CurveError> {
    if s.control_points.is_empty() {
        if s.fit_points.len() < 2 {
            return Err(CurveError::TooFewVertices(s.fit_points.len()));
        }
        if !s.fit_points.iter().all(finite) {
            return Err(CurveError::NonFinite);
        }
        return Ok(());
    }
    let n = s.control_points.len();
    let p = s.degree;
    // Checked before any `p + ...` so a corrupt degree cannot overflow.
    if p == 0 || p >= n {
        return Err(CurveError::TooFewControlPoints {
            degree: p,
            needed: p.saturating_add(1),
            got: n,
        });
    }
    if !s.control_points.iter().all(finite) {
        return Err(CurveError::NonFinite);
    }
    if !s.knots.is_empty() {
        if s.knots.len() != n + p + 1 {
            return Err(CurveError::KnotCount {
                expected: n + p + 1,
                got: s.knots.len(),
            });
        }
        if s.knots.iter().any(|k| !k.is_finite()) || s.knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(CurveError::KnotOrder);
        }
        if s.knots[n] <= s.knots[p] {
            return Err(CurveError::KnotOrder);
        }
    }
    if !s.weights.is_empty()
        && (s.weights.len() != n || s.weights.iter().any(|w| !(w.is_finite() && *w > 0.0)))
    {
        return Err(CurveError::BadWeights);
    }
    Ok(())
}

impl From<Line> for Curve {
    fn from(v: Line) -> Self {
        Curve::Line(v)
    }
}
impl From<Arc> for Curve {
    fn from(v: Arc) -> Self {
        Curve::Arc(v)
    }
}
impl From<Circle> for Curve {
    fn from(v: Circle) -> Self {
        Curve::Circle(v)
    }
}
impl From<Ellipse> for Curve {
    fn from(v: Ellipse) -> Self {
        Curve::Ellipse(v)
    }
}
impl From<Spline> for Curve {
    fn from(v: Spline) -> Self {
        Curve::Spline(v)
    }
}
impl From<Polyline> for Curve {
    fn from(v: Polyline) -> Self {
        Curve::Polyline(v)
    }
}
