use super::Curve;
use crate::geom2::{dedup_points, AreaCfg, ClosedLoop, Pt2};

/// Chain open curves end-to-end into one closed loop.
///
/// Starts from the first curve and repeatedly attaches the unused curve with
/// an endpoint closest to the current chain end (within
/// `cfg.join_tolerance`), reversing it when it connects by its end. Succeeds
/// only when every curve is used and the chain returns to its start; the
/// result follows the real outline, unlike the hull fallback.
pub fn join_open_curves(curves: &[&Curve], cfg: &AreaCfg) -> Option<ClosedLoop> {
    let runs: Vec<Vec<Pt2>> = curves
        .iter()
        .map(|c| c.sample(cfg))
        .filter(|r| r.len() >= 2)
        .collect();
    if runs.is_empty() || runs.len() != curves.len() {
        return None;
    }
    let tol = cfg.join_tolerance;
    let mut used = vec![false; runs.len()];
    used[0] = true;
    let mut chain: Vec<Pt2> = runs[0].clone();
    for _ in 1..runs.len() {
        let end = *chain.last()?;
        let mut best: Option<(usize, bool, f64)> = None;
        for (i, run) in runs.iter().enumerate() {
            if used[i] {
                continue;
            }
            let d_start = (run[0] - end).norm();
            let d_end = (run[run.len() - 1] - end).norm();
            let (reversed, d) = if d_end < d_start {
                (true, d_end)
            } else {
                (false, d_start)
            };
            if d <= tol && best.map_or(true, |(_, _, bd)| d < bd) {
                best = Some((i, reversed, d));
            }
        }
        let (i, reversed, _) = best?;
        used[i] = true;
        if reversed {
            chain.extend(runs[i].iter().rev().skip(1));
        } else {
            chain.extend(runs[i].iter().skip(1));
        }
    }
    let first = *chain.first()?;
    let last = *chain.last()?;
    if (last - first).norm() > tol {
        tracing::debug!(gap = (last - first).norm(), "joined chain does not close");
        return None;
    }
    chain.pop();
    let reduced = dedup_points(&chain, cfg.eps);
    ClosedLoop::new(reduced, cfg.eps).ok()
}
