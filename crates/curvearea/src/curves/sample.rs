//! Flattening curves into point sequences.
//!
//! Fixed counts, not adaptive to curvature:
//! - line: the two endpoints;
//! - arc (and each bulged polyline segment): start, `arc_segments` interior
//!   points evenly spaced by angle, end;
//! - spline and elliptical arc: `spline_segments + 1` points evenly spaced by
//!   parameter, endpoints included;
//! - circle and full ellipse: a ring of `spline_segments` points (first point
//!   not repeated).

use std::f64::consts::TAU;

use super::{bulge_arc, Arc, Curve, Ellipse, Polyline, Spline};
use crate::geom2::{AreaCfg, Pt2};

impl Curve {
    /// Sample points in traversal order.
    pub fn sample(&self, cfg: &AreaCfg) -> Vec<Pt2> {
        match self {
            Curve::Line(l) => vec![l.start, l.end],
            Curve::Arc(a) => sample_arc(a, cfg.arc_segments),
            Curve::Circle(c) => {
                let n = cfg.spline_segments.max(3);
                (0..n)
                    .map(|i| c.point_at(TAU * i as f64 / n as f64))
                    .collect()
            }
            Curve::Ellipse(e) => sample_ellipse(e, cfg.spline_segments),
            Curve::Spline(s) => sample_spline(s, cfg.spline_segments),
            Curve::Polyline(p) => sample_polyline(p, cfg.arc_segments),
        }
    }
}

fn sample_arc(a: &Arc, interior: usize) -> Vec<Pt2> {
    let sweep = a.sweep();
    let mut out = Vec::with_capacity(interior + 2);
    out.push(a.point_at(a.start_angle));
    let steps = (interior + 1) as f64;
    for i in 1..=interior {
        out.push(a.point_at(a.start_angle + sweep * i as f64 / steps));
    }
    out.push(a.point_at(a.start_angle + sweep));
    out
}

fn sample_ellipse(e: &Ellipse, segments: usize) -> Vec<Pt2> {
    let n = segments.max(1);
    let sweep = e.sweep();
    if e.is_full() {
        let n = n.max(3);
        return (0..n)
            .map(|i| e.point_at(e.start_param + TAU * i as f64 / n as f64))
            .collect();
    }
    (0..=n)
        .map(|i| e.point_at(e.start_param + sweep * i as f64 / n as f64))
        .collect()
}

fn sample_spline(s: &Spline, segments: usize) -> Vec<Pt2> {
    let Some((t0, t1)) = s.domain() else {
        return s.fit_points.clone();
    };
    let n = segments.max(1);
    (0..=n)
        .filter_map(|i| s.point_at(t0 + (t1 - t0) * i as f64 / n as f64))
        .collect()
}

fn sample_polyline(p: &Polyline, interior: usize) -> Vec<Pt2> {
    let n = p.vertices.len();
    let mut out = Vec::with_capacity(n * (interior + 1));
    if n == 0 {
        return out;
    }
    for i in 0..p.segment_count() {
        let a = p.vertices[i];
        let b = p.vertices[(i + 1) % n];
        out.push(a);
        if let Some(arc) = bulge_arc(a, b, p.bulge(i)) {
            let steps = (interior + 1) as f64;
            for k in 1..=interior {
                out.push(arc.point_at_fraction(k as f64 / steps));
            }
        }
    }
    if !p.closed {
        out.push(p.vertices[n - 1]);
    }
    out
}
