//! B-spline / NURBS evaluation (de Boor, homogeneous coordinates).

use nalgebra::Vector3;

use crate::geom2::Pt2;

/// Clamped uniform knot vector for `n` control points of degree `p`.
pub fn clamped_uniform_knots(n: usize, p: usize) -> Vec<f64> {
    if n <= p {
        return Vec::new();
    }
    let spans = n - p;
    let mut knots = Vec::with_capacity(n + p + 1);
    knots.extend(std::iter::repeat(0.0).take(p + 1));
    for i in 1..spans {
        knots.push(i as f64 / spans as f64);
    }
    knots.extend(std::iter::repeat(1.0).take(p + 1));
    knots
}

/// Knot span index `k` with `knots[k] <= t < knots[k+1]`, clamped to the domain.
fn find_span(n: usize, p: usize, t: f64, knots: &[f64]) -> usize {
    if t >= knots[n] {
        // Last non-empty span.
        let mut k = n - 1;
        while k > p && knots[k] >= knots[k + 1] {
            k -= 1;
        }
        return k;
    }
    if t <= knots[p] {
        return p;
    }
    let mut lo = p;
    let mut hi = n;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if t < knots[mid] {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

/// Evaluate the curve at `t`. `weights` may be empty (non-rational).
///
/// Callers guarantee `points.len() > p` and `knots.len() == points.len() + p + 1`.
pub(crate) fn de_boor(p: usize, knots: &[f64], points: &[Pt2], weights: &[f64], t: f64) -> Pt2 {
    let n = points.len();
    let k = find_span(n, p, t, knots);
    let mut d: Vec<Vector3<f64>> = (0..=p)
        .map(|j| {
            let idx = j + k - p;
            let w = weights.get(idx).copied().unwrap_or(1.0);
            let c = points[idx];
            Vector3::new(c.x * w, c.y * w, w)
        })
        .collect();
    for r in 1..=p {
        for j in (r..=p).rev() {
            let left = knots[j + k - p];
            let right = knots[j + 1 + k - r];
            let denom = right - left;
            let alpha = if denom.abs() < 1e-300 {
                0.0
            } else {
                (t - left) / denom
            };
            d[j] = d[j - 1] * (1.0 - alpha) + d[j] * alpha;
        }
    }
    let h = d[p];
    Pt2::new(h.x / h.z, h.y / h.z)
}
