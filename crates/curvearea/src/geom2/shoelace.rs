use super::Pt2;
use crate::error::GeomError;

/// Signed shoelace area of the ring `points` (wraparound implied).
///
/// Sums `(x_j + x_i) * (y_j - y_i)` over consecutive pairs and halves it.
/// Positive for CCW rings. Fewer than 3 points → 0.
pub fn shoelace_signed(points: &[Pt2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += (b.x + a.x) * (b.y - a.y);
    }
    0.5 * sum
}

/// Non-negative enclosed area of the ring `points`.
///
/// Fewer than 3 points is the "not enough points" signal; callers treat the
/// area as 0.
pub fn shoelace_area(points: &[Pt2]) -> Result<f64, GeomError> {
    if points.len() < 3 {
        return Err(GeomError::NotEnoughPoints {
            needed: 3,
            got: points.len(),
        });
    }
    Ok(shoelace_signed(points).abs())
}
