//! Point-level 2D geometry for the area pipeline.
//!
//! Purpose
//! - Turn an unordered point cloud (curve samples in traversal order) into a
//!   closed ring and measure it.
//! - Strategies are ordered from shape-preserving to heuristic: the convex
//!   hull is tried first, nearest-neighbour ordering second.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>` (`Pt2`).
//! - Tolerances live in `AreaCfg`; defaults in `cfg`.
//! - Loops are stored open (last point not repeated); the closing edge is implicit.

pub mod cfg;
mod dedup;
mod hull;
mod nearest;
mod shoelace;
mod types;

pub use dedup::dedup_points;
pub use hull::{cross, graham_scan};
pub use nearest::{order_nearest_neighbor, NearestLoop};
pub use shoelace::{shoelace_area, shoelace_signed};
pub use types::{Affine2, AreaCfg, Bounds2, ClosedLoop, Pt2};

#[cfg(test)]
mod tests;
