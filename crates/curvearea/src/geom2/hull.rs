use std::cmp::Ordering;

use super::{ClosedLoop, Pt2};
use crate::error::GeomError;

/// Z component of `(b - a) × (c - a)`; positive for a left turn a→b→c.
#[inline]
pub fn cross(a: Pt2, b: Pt2, c: Pt2) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Graham scan convex hull (returns hull in CCW order).
///
/// Pivot is the lowest point (ties: leftmost). The remaining points are
/// sorted by polar angle about the pivot, ties by squared distance
/// ascending, and the scan pops whenever the last three points fail to turn
/// left (`cross <= 0`), so collinear boundary points are dropped.
///
/// This closes a point cloud visually; for concave targets the hull is
/// larger than the true outline. Fewer than 3 hull points (too few inputs,
/// or all collinear) is `GeomError::DegenerateHull`.
pub fn graham_scan(points: &[Pt2]) -> Result<ClosedLoop, GeomError> {
    if points.len() < 3 {
        return Err(GeomError::DegenerateHull { hull: points.len() });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(GeomError::NonFinite { index });
    }
    let pivot_idx = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| match a.y.partial_cmp(&b.y) {
            Some(Ordering::Equal) | None => a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal),
            Some(o) => o,
        })
        .map(|(i, _)| i)
        .ok_or(GeomError::DegenerateHull { hull: 0 })?;
    let pivot = points[pivot_idx];

    let mut rest: Vec<Pt2> = points
        .iter()
        .enumerate()
        .filter(|&(i, p)| i != pivot_idx && *p != pivot)
        .map(|(_, p)| *p)
        .collect();
    // All candidates lie in the half-plane y >= pivot.y (angle in [0, π)), so
    // the cross-product comparison is a consistent angular order.
    rest.sort_by(|a, b| {
        let c = cross(pivot, *a, *b);
        if c > 0.0 {
            Ordering::Less
        } else if c < 0.0 {
            Ordering::Greater
        } else {
            let da = (a - pivot).norm_squared();
            let db = (b - pivot).norm_squared();
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        }
    });

    let mut hull: Vec<Pt2> = Vec::with_capacity(rest.len() + 1);
    hull.push(pivot);
    for p in rest {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    if hull.len() < 3 {
        return Err(GeomError::DegenerateHull { hull: hull.len() });
    }
    ClosedLoop::new(hull, 0.0)
}
