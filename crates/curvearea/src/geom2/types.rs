//! Basic 2D types and tolerances.
//!
//! - `AreaCfg`: centralizes tolerances and sample counts for one request.
//! - `Affine2`: 2D affine map used for block placement and thumbnail fitting.
//! - `Bounds2`: axis-aligned bounding box of sampled geometry.
//! - `ClosedLoop`: validated ring consumed by the area evaluator.

use nalgebra::{Matrix2, Vector2};

use super::cfg;
use crate::error::GeomError;

/// Point in the drawing plane.
pub type Pt2 = Vector2<f64>;

/// Area request configuration (tolerances and sampling).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaCfg {
    /// Dedup tolerance ε.
    pub eps: f64,
    pub join_tolerance: f64,
    pub closure_tolerance: f64,
    /// Interior samples per arc.
    pub arc_segments: usize,
    /// Segments per spline / elliptical arc; an open curve gets N+1 points.
    pub spline_segments: usize,
}

impl Default for AreaCfg {
    fn default() -> Self {
        Self {
            eps: cfg::EPS,
            join_tolerance: cfg::JOIN_TOLERANCE,
            closure_tolerance: cfg::CLOSURE_TOLERANCE,
            arc_segments: cfg::ARC_SEGMENTS,
            spline_segments: cfg::SPLINE_SEGMENTS,
        }
    }
}

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    #[inline]
    pub fn translation(t: Vector2<f64>) -> Self {
        Self {
            m: Matrix2::identity(),
            t,
        }
    }
    /// Uniform scale by `s` followed by a CCW rotation of `angle` radians.
    #[inline]
    pub fn rotation_scale(angle: f64, s: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            m: Matrix2::new(cos, -sin, sin, cos) * s,
            t: Vector2::zeros(),
        }
    }
    /// Composition `self ∘ other`.
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }
    #[inline]
    pub fn apply(&self, p: Pt2) -> Pt2 {
        self.m * p + self.t
    }
    /// Linear part only (for direction vectors).
    #[inline]
    pub fn apply_vector(&self, v: Vector2<f64>) -> Vector2<f64> {
        self.m * v
    }
}

/// Axis-aligned bounds; `None` until the first point is added.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub min: Pt2,
    pub max: Pt2,
}

impl Bounds2 {
    pub fn from_point(p: Pt2) -> Self {
        Self { min: p, max: p }
    }

    /// Bounds of all points, or `None` for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Pt2>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = Self::from_point(*first);
        for p in it {
            b.include(*p);
        }
        Some(b)
    }

    pub fn include(&mut self, p: Pt2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn merge(&self, other: &Bounds2) -> Bounds2 {
        let mut out = *self;
        out.include(other.min);
        out.include(other.max);
        out
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
    #[inline]
    pub fn center(&self) -> Pt2 {
        (self.min + self.max) * 0.5
    }
}

/// Ordered ring of points; first and last are adjacent.
///
/// Invariants:
/// - At least 3 points.
/// - All coordinates finite.
/// - No two adjacent points (wraparound included) closer than the construction tolerance.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedLoop {
    points: Vec<Pt2>,
}

impl ClosedLoop {
    /// Validate and wrap `points`. A trailing point repeating the first within
    /// `eps` is dropped before checking, so explicitly closed rings are accepted.
    pub fn new(mut points: Vec<Pt2>, eps: f64) -> Result<Self, GeomError> {
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(GeomError::NonFinite { index });
        }
        if points.len() > 1 {
            let last = points.len() - 1;
            if (points[last] - points[0]).norm() < eps {
                points.pop();
            }
        }
        if points.len() < 3 {
            return Err(GeomError::NotEnoughPoints {
                needed: 3,
                got: points.len(),
            });
        }
        let n = points.len();
        for i in 0..n {
            let j = (i + 1) % n;
            let d = (points[j] - points[i]).norm();
            if d < eps || d == 0.0 {
                return Err(GeomError::CoincidentNeighbors { index: i, next: j });
            }
        }
        Ok(Self { points })
    }

    #[inline]
    pub fn points(&self) -> &[Pt2] {
        &self.points
    }

    /// Signed area (positive for CCW).
    pub fn signed_area(&self) -> f64 {
        super::shoelace_signed(&self.points)
    }

    /// Non-negative enclosed area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Distance from the last point back to the first.
    pub fn closing_gap(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => (a - b).norm(),
            _ => 0.0,
        }
    }
}
