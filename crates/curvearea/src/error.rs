//! Error kinds, split by how far a failure reaches.
//!
//! - `GeomError`: a point-level strategy failed; callers fall back to the next one.
//! - `CurveError`: one curve carries unusable data.
//! - `EntityIssue`: record of one skipped entity; the batch continues.
//! - `AreaError`: the whole request failed.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Failures of the point-level algorithms in `geom2`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    #[error("not enough points: need at least {needed}, got {got}")]
    NotEnoughPoints { needed: usize, got: usize },
    #[error("convex hull degenerated to {hull} point(s)")]
    DegenerateHull { hull: usize },
    #[error("adjacent loop points {index} and {next} coincide")]
    CoincidentNeighbors { index: usize, next: usize },
    #[error("non-finite coordinate at index {index}")]
    NonFinite { index: usize },
}

/// Invalid curve data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("line has zero length")]
    ZeroLength,
    #[error("radius must be positive and finite, got {0}")]
    BadRadius(f64),
    #[error("ellipse major axis is zero")]
    ZeroMajorAxis,
    #[error("ellipse radius ratio must be in (0, 1], got {0}")]
    BadRadiusRatio(f64),
    #[error("polyline needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("bulge count {bulges} does not match vertex count {vertices}")]
    BulgeCount { vertices: usize, bulges: usize },
    #[error("spline of degree {degree} needs at least {needed} control points, got {got}")]
    TooFewControlPoints {
        degree: usize,
        needed: usize,
        got: usize,
    },
    #[error("spline knot vector has {got} values, expected {expected}")]
    KnotCount { expected: usize, got: usize },
    #[error("spline knots must be non-decreasing")]
    KnotOrder,
    #[error("spline weights must be positive, one per control point")]
    BadWeights,
    #[error("curve has a non-finite coordinate")]
    NonFinite,
}

/// One entity that was skipped while collecting a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityIssue {
    /// Position of the entity in the selection.
    pub index: usize,
    pub reason: String,
}

impl EntityIssue {
    pub fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for EntityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity #{} skipped: {}", self.index, self.reason)
    }
}

/// Request-fatal failures of an area calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AreaError {
    #[error("no curves selected")]
    EmptySelection,
    #[error("no valid geometry among {selected} selected curve(s) ({skipped} skipped)")]
    NoValidGeometry { selected: usize, skipped: usize },
}

/// Failures while decoding stored entity descriptors.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("malformed descriptor JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown entity type {0:?}")]
    UnknownType(String),
    #[error("{kind} descriptor is missing field `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
    #[error("point must have 2 or 3 coordinates, got {0}")]
    BadPoint(usize),
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// A colour string that is not `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid colour {0:?}, expected #rrggbb")]
pub struct ParseRgbError(pub String);
