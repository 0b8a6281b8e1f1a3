//! Area request pipeline.
//!
//! Purpose
//! - Turn one selection of curves into a total area and a report of how each
//!   part was obtained.
//!
//! Conventions
//! - Stages run `Idle → CollectingCurves → ClassifyClosed / ClassifyOpen →
//!   JoinOpenCurves → RegionOrFallbackArea → Result | Failed`, each traced at
//!   debug level.
//! - Closed curves contribute their exact area; overlaps are summed, not
//!   unioned.
//! - Open curves are joined into a loop when their ends meet; otherwise their
//!   samples are pooled, deduplicated and closed by convex hull, then by
//!   nearest-neighbour ordering when the hull degenerates.
//! - A bad curve is skipped and recorded; only an empty result is an error.

use serde::Serialize;

use crate::curves::{join_open_curves, Curve};
use crate::entity::{curves_from_descriptors, EntityDescriptor};
use crate::error::{AreaError, EntityIssue, GeomError};
use crate::geom2::{dedup_points, graham_scan, order_nearest_neighbor, AreaCfg, Pt2};


/// Pipeline stage, in visiting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AreaStage {
    Idle,
    CollectingCurves,
    ClassifyClosed,
    ClassifyOpen,
    JoinOpenCurves,
    RegionOrFallbackArea,
    Result,
    Failed,
}

/// How a contribution's area was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AreaMethod {
    /// Exact area of a curve that is closed on its own.
    ClosedCurve,
    /// Open curves chained end-to-end into one loop.
    JoinedLoop,
    /// Convex hull of the pooled open-curve samples.
    ConvexHull,
    /// Nearest-neighbour ordering of the pooled samples.
    NearestNeighbor,
}

/// One summand of the total.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Contribution {
    pub method: AreaMethod,
    pub area: f64,
    /// Selection indices of the curves that produced it.
    pub entities: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaReport {
    pub total: f64,
    pub contributions: Vec<Contribution>,
    pub skipped: Vec<EntityIssue>,
    pub warnings: Vec<String>,
    /// Stages visited, for diagnostics.
    pub stages: Vec<AreaStage>,
}

/// One area calculation with a fixed configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct AreaRequest {
    pub cfg: AreaCfg,
}

struct Run {
    stages: Vec<AreaStage>,
    warnings: Vec<String>,
    contributions: Vec<Contribution>,
}

impl Run {
    fn enter(&mut self, stage: AreaStage) {
        tracing::debug!(stage = ?stage, "area stage");
        self.stages.push(stage);
    }

    fn contribute(&mut self, method: AreaMethod, area: f64, entities: Vec<usize>) {
        tracing::debug!(?method, area, "area contribution");
        self.contributions.push(Contribution {
            method,
            area,
            entities,
        });
    }
}

impl AreaRequest {
    pub fn new(cfg: AreaCfg) -> Self {
        Self { cfg }
    }

    /// Area of `curves`; indices in the report refer to positions in `curves`.
    pub fn run(&self, curves: &[Curve]) -> Result<AreaReport, AreaError> {
        let items: Vec<(usize, &Curve)> = curves.iter().enumerate().collect();
        self.run_indexed(&items, Vec::new(), curves.len())
    }

    /// Area of a stored descriptor list. Descriptors that do not decode are
    /// skipped like invalid curves; each hatch loop counts as a closed curve.
    pub fn run_descriptors(&self, list: &[EntityDescriptor]) -> Result<AreaReport, AreaError> {
        let (curves, skipped) = curves_from_descriptors(list, &self.cfg);
        let items: Vec<(usize, &Curve)> = curves.iter().map(|(i, c)| (*i, c)).collect();
        self.run_indexed(&items, skipped, list.len())
    }

    fn run_indexed(
        &self,
        items: &[(usize, &Curve)],
        mut skipped: Vec<EntityIssue>,
        selected: usize,
    ) -> Result<AreaReport, AreaError> {
        let cfg = &self.cfg;
        let mut run = Run {
            stages: Vec::new(),
            warnings: Vec::new(),
            contributions: Vec::new(),
        };
        run.enter(AreaStage::Idle);
        if selected == 0 {
            run.enter(AreaStage::Failed);
            return Err(AreaError::EmptySelection);
        }

        run.enter(AreaStage::CollectingCurves);
        let mut closed: Vec<(usize, &Curve)> = Vec::new();
        let mut open: Vec<(usize, &Curve)> = Vec::new();
        for &(index, curve) in items {
            if let Err(e) = curve.validate() {
                tracing::warn!(index, kind = curve.kind(), error = %e, "skipping invalid curve");
                skipped.push(EntityIssue::new(index, e.to_string()));
                continue;
            }
            if curve.is_closed(cfg.join_tolerance) {
                closed.push((index, curve));
            } else {
                open.push((index, curve));
            }
        }
        skipped.sort_by_key(|s| s.index);

        if !closed.is_empty() {
            run.enter(AreaStage::ClassifyClosed);
        }
        let mut joined = None;
        if !open.is_empty() {
            run.enter(AreaStage::ClassifyOpen);
            run.enter(AreaStage::JoinOpenCurves);
            let curves: Vec<&Curve> = open.iter().map(|(_, c)| *c).collect();
            joined = join_open_curves(&curves, cfg);
        }

        if !closed.is_empty() || !open.is_empty() {
            run.enter(AreaStage::RegionOrFallbackArea);
        }
        for &(index, curve) in &closed {
            match curve.enclosed_area(cfg) {
                Some(area) => run.contribute(AreaMethod::ClosedCurve, area, vec![index]),
                None => skipped.push(EntityIssue::new(index, "closed curve has no area")),
            }
        }
        if !open.is_empty() {
            let indices: Vec<usize> = open.iter().map(|(i, _)| *i).collect();
            match joined {
                Some(ring) => run.contribute(AreaMethod::JoinedLoop, ring.area(), indices),
                None => self.fallback_area(&open, indices, &mut run),
            }
        }

        if run.contributions.is_empty() {
            run.enter(AreaStage::Failed);
            return Err(AreaError::NoValidGeometry {
                selected,
                skipped: skipped.len(),
            });
        }
        run.enter(AreaStage::Result);
        let total = run.contributions.iter().map(|c| c.area).sum();
        tracing::debug!(total, contributions = run.contributions.len(), "area done");
        Ok(AreaReport {
            total,
            contributions: run.contributions,
            skipped,
            warnings: run.warnings,
            stages: run.stages,
        })
    }

    /// Hull, then nearest-neighbour ordering, over the pooled samples.
    ///
    /// The hull only degenerates on collinear clouds, so a nearest-neighbour
    /// contribution is expected to be near zero.
    fn fallback_area(&self, open: &[(usize, &Curve)], indices: Vec<usize>, run: &mut Run) {
        let cfg = &self.cfg;
        let pooled: Vec<Pt2> = open.iter().flat_map(|(_, c)| c.sample(cfg)).collect();
        let reduced = dedup_points(&pooled, cfg.eps);
        tracing::debug!(pooled = pooled.len(), reduced = reduced.len(), "fallback point cloud");
        if reduced.len() < 3 {
            run.warnings.push(format!(
                "open curves reduce to {} distinct point(s); not enough points for an area",
                reduced.len()
            ));
            return;
        }
        match graham_scan(&reduced) {
            Ok(hull) => run.contribute(AreaMethod::ConvexHull, hull.area(), indices),
            Err(GeomError::DegenerateHull { hull }) => {
                tracing::debug!(hull, "convex hull degenerate; ordering by nearest neighbour");
                match order_nearest_neighbor(&reduced, cfg.closure_tolerance) {
                    Ok(nl) => {
                        if nl.gap_exceeded {
                            run.warnings.push(format!(
                                "nearest-neighbour loop leaves a closing gap of {:.6} (tolerance {})",
                                nl.closing_gap, cfg.closure_tolerance
                            ));
                        }
                        run.contribute(AreaMethod::NearestNeighbor, nl.ring.area(), indices);
                    }
                    Err(e) => run.warnings.push(format!("fallback ordering failed: {e}")),
                }
            }
            Err(e) => run.warnings.push(format!("convex hull failed: {e}")),
        }
    }
}
