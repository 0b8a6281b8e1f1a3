//! Polyline bulge ↔ arc conversion.
//!
//! A bulge `b` on the segment p→q encodes an arc with included angle
//! `θ = 4·atan(b)`; `b > 0` turns CCW, `b < 0` CW, `|b| = 1` is a half circle.

use nalgebra::Vector2;

use crate::geom2::Pt2;

/// Arc recovered from a bulged segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulgeArc {
    pub center: Pt2,
    pub radius: f64,
    pub start_angle: f64,
    /// Signed sweep (negative for CW segments).
    pub sweep: f64,
}

impl BulgeArc {
    #[inline]
    pub fn point_at_fraction(&self, f: f64) -> Pt2 {
        let a = self.start_angle + self.sweep * f;
        self.center + Vector2::new(a.cos(), a.sin()) * self.radius
    }
}

/// Bulge of an arc segment with signed sweep `sweep`.
#[inline]
pub fn bulge_from_sweep(sweep: f64) -> f64 {
    (sweep / 4.0).tan()
}

/// Arc of the segment p→q with bulge `b`; `None` for straight or zero-length segments.
pub fn bulge_arc(p: Pt2, q: Pt2, b: f64) -> Option<BulgeArc> {
    let chord = q - p;
    let c = chord.norm();
    if b.abs() < 1e-12 || c == 0.0 {
        return None;
    }
    let theta = 4.0 * b.atan();
    let half = theta / 2.0;
    let radius = c / (2.0 * half.sin().abs());
    let left = Vector2::new(-chord.y, chord.x) / c;
    // Signed distance from the chord midpoint to the center, toward the left.
    let h = (c / 2.0) / half.tan();
    let center = (p + q) * 0.5 + left * h;
    let d = p - center;
    Some(BulgeArc {
        center,
        radius,
        start_angle: d.y.atan2(d.x),
        sweep: theta,
    })
}

/// Signed area between the chord p→q and its bulged arc.
///
/// Positive bulges (CCW arcs) bulge to the right of p→q, which enlarges a
/// CCW ring, so the value is added to the ring's signed shoelace area.
pub fn bulge_segment_area(p: Pt2, q: Pt2, b: f64) -> f64 {
    match bulge_arc(p, q, b) {
        Some(arc) => {
            let t = arc.sweep.abs();
            let seg = 0.5 * arc.radius * arc.radius * (t - t.sin());
            seg * b.signum()
        }
        None => 0.0,
    }
}
