use std::cmp::Ordering;

use super::{ClosedLoop, Pt2};
use crate::error::GeomError;

/// Loop produced by nearest-neighbour ordering.
#[derive(Clone, Debug, PartialEq)]
pub struct NearestLoop {
    pub ring: ClosedLoop,
    /// Distance from the last visited point back to the start.
    pub closing_gap: f64,
    /// Whether `closing_gap` exceeded the closure tolerance.
    pub gap_exceeded: bool,
}

/// Order a reduced point cloud into a loop by greedy nearest neighbour.
///
/// Starts at the leftmost point (ties: lowest) and keeps appending the
/// closest unvisited point. Exact repeats of the last point are dropped.
/// The result may self-intersect for concave or disconnected input; a
/// closing gap above `closure_tolerance` is logged and flagged but does not
/// stop the caller from using the loop.
pub fn order_nearest_neighbor(
    points: &[Pt2],
    closure_tolerance: f64,
) -> Result<NearestLoop, GeomError> {
    if points.len() < 3 {
        return Err(GeomError::NotEnoughPoints {
            needed: 3,
            got: points.len(),
        });
    }
    let start = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| match a.x.partial_cmp(&b.x) {
            Some(Ordering::Equal) | None => a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal),
            Some(o) => o,
        })
        .map(|(i, _)| i)
        .ok_or(GeomError::NotEnoughPoints { needed: 3, got: 0 })?;

    let mut visited = vec![false; points.len()];
    visited[start] = true;
    let mut order: Vec<Pt2> = Vec::with_capacity(points.len());
    order.push(points[start]);
    let mut last = points[start];
    loop {
        let next = points
            .iter()
            .enumerate()
            .filter(|(i, _)| !visited[*i])
            .map(|(i, p)| (i, (p - last).norm_squared()))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        let Some((idx, d2)) = next else { break };
        visited[idx] = true;
        if d2 == 0.0 {
            continue;
        }
        last = points[idx];
        order.push(last);
    }

    let ring = ClosedLoop::new(order, 0.0)?;
    let closing_gap = ring.closing_gap();
    let gap_exceeded = closing_gap > closure_tolerance;
    if gap_exceeded {
        tracing::warn!(
            closing_gap,
            closure_tolerance,
            points = ring.points().len(),
            "nearest-neighbour loop does not close cleanly"
        );
    }
    Ok(NearestLoop {
        ring,
        closing_gap,
        gap_exceeded,
    })
}
