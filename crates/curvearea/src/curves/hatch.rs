//! Hatch boundary loops and their conversion to closed polylines.
//!
//! A loop is either stored as a polyline (vertices + bulges) or as a chain of
//! edges. Circular edges keep their exact shape as bulges; elliptic and spline
//! edges are flattened with the sampler.

use nalgebra::Vector2;

use super::{bulge_from_sweep, ccw_sweep, Curve, Ellipse, Polyline, Spline};
use crate::error::CurveError;
use crate::geom2::{AreaCfg, Pt2};

/// One edge of an edge-defined hatch loop.
#[derive(Clone, Debug, PartialEq)]
pub enum HatchEdge {
    Line {
        start: Pt2,
        end: Pt2,
    },
    CircularArc {
        center: Pt2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    },
    EllipticArc {
        center: Pt2,
        major_axis: Vector2<f64>,
        ratio: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    },
    Spline(Spline),
}

/// Boundary loop of a hatch.
#[derive(Clone, Debug, PartialEq)]
pub enum HatchLoop {
    Polyline { vertices: Vec<Pt2>, bulges: Vec<f64> },
    Edges(Vec<HatchEdge>),
}

/// Signed sweep from `start` to `end` in the given direction.
fn directed_sweep(start: f64, end: f64, ccw: bool) -> f64 {
    if ccw {
        ccw_sweep(start, end)
    } else {
        -ccw_sweep(end, start)
    }
}

impl HatchEdge {
    /// Append this edge's vertices (start included, end excluded) with bulges.
    fn push_vertices(
        &self,
        cfg: &AreaCfg,
        vertices: &mut Vec<Pt2>,
        bulges: &mut Vec<f64>,
    ) -> Result<(), CurveError> {
        match self {
            HatchEdge::Line { start, .. } => {
                vertices.push(*start);
                bulges.push(0.0);
            }
            HatchEdge::CircularArc {
                center,
                radius,
                start_angle,
                end_angle,
                counter_clockwise,
            } => {
                if !(radius.is_finite() && *radius > 0.0) {
                    return Err(CurveError::BadRadius(*radius));
                }
                let sweep = directed_sweep(*start_angle, *end_angle, *counter_clockwise);
                let at = |a: f64| center + Vector2::new(a.cos(), a.sin()) * *radius;
                // A bulge cannot encode a full turn; split into halves.
                let pieces = if sweep.abs() > std::f64::consts::PI { 2 } else { 1 };
                let step = sweep / pieces as f64;
                for k in 0..pieces {
                    vertices.push(at(start_angle + step * k as f64));
                    bulges.push(bulge_from_sweep(step));
                }
            }
            HatchEdge::EllipticArc {
                center,
                major_axis,
                ratio,
                start_angle,
                end_angle,
                counter_clockwise,
            } => {
                let sweep = directed_sweep(*start_angle, *end_angle, *counter_clockwise);
                let e = Ellipse {
                    center: *center,
                    major_axis: *major_axis,
                    ratio: *ratio,
                    start_param: *start_angle,
                    end_param: *end_angle,
                };
                Curve::Ellipse(e.clone()).validate()?;
                let n = cfg.spline_segments.max(1);
                for i in 0..n {
                    vertices.push(e.point_at(start_angle + sweep * i as f64 / n as f64));
                    bulges.push(0.0);
                }
            }
            HatchEdge::Spline(s) => {
                let curve = Curve::Spline(s.clone());
                curve.validate()?;
                let mut pts = curve.sample(cfg);
                pts.pop();
                bulges.extend(std::iter::repeat(0.0).take(pts.len()));
                vertices.extend(pts);
            }
        }
        Ok(())
    }
}

impl HatchLoop {
    /// Closed polyline tracing the loop.
    pub fn to_polyline(&self, cfg: &AreaCfg) -> Result<Polyline, CurveError> {
        let (mut vertices, mut bulges) = match self {
            HatchLoop::Polyline { vertices, bulges } => (vertices.clone(), bulges.clone()),
            HatchLoop::Edges(edges) => {
                let mut vertices = Vec::new();
                let mut bulges = Vec::new();
                for e in edges {
                    e.push_vertices(cfg, &mut vertices, &mut bulges)?;
                }
                (vertices, bulges)
            }
        };
        if bulges.is_empty() {
            bulges = vec![0.0; vertices.len()];
        }
        // Stored loops sometimes repeat the first vertex at the end.
        if vertices.len() > 1 {
            let last = vertices.len() - 1;
            if (vertices[last] - vertices[0]).norm() <= cfg.eps {
                vertices.pop();
                bulges.truncate(vertices.len());
            }
        }
        let poly = Polyline {
            vertices,
            bulges,
            closed: true,
        };
        Curve::Polyline(poly.clone()).validate()?;
        Ok(poly)
    }

    /// The loop as a closed curve, ready for `Curve::enclosed_area`.
    pub fn to_curve(&self, cfg: &AreaCfg) -> Result<Curve, CurveError> {
        self.to_polyline(cfg).map(Curve::Polyline)
    }
}
