use super::Pt2;

/// Collapse near-duplicate points, keeping first-seen order.
///
/// A point is accepted only if it lies at least `eps` away from every point
/// accepted before it. Linear scan per point (O(n²)); meant for curve
/// samples, not whole drawings.
pub fn dedup_points(points: &[Pt2], eps: f64) -> Vec<Pt2> {
    let mut out: Vec<Pt2> = Vec::with_capacity(points.len());
    for p in points {
        if out.iter().all(|q| (p - q).norm() >= eps) {
            out.push(*p);
        }
    }
    out
}
