use super::*;
use crate::error::GeomError;
use nalgebra::vector;
use proptest::prelude::*;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

fn square(side: f64) -> Vec<Pt2> {
    vec![
        vector![0.0, 0.0],
        vector![side, 0.0],
        vector![side, side],
        vector![0.0, side],
    ]
}

#[test]
fn shoelace_square_example() {
    let area = shoelace_area(&square(4.0)).unwrap();
    assert!((area - 16.0).abs() < 1e-12);
    // CCW input is positive
    assert!(shoelace_signed(&square(4.0)) > 0.0);
}

#[test]
fn shoelace_too_few_points_signals() {
    let pts = vec![vector![0.0, 0.0], vector![1.0, 0.0]];
    assert_eq!(
        shoelace_area(&pts),
        Err(GeomError::NotEnoughPoints { needed: 3, got: 2 })
    );
    assert_eq!(shoelace_signed(&pts), 0.0);
}

#[test]
fn dedup_example_drops_close_point() {
    let pts = vec![vector![0.0, 0.0], vector![0.0005, 0.0005], vector![5.0, 5.0]];
    let out = dedup_points(&pts, 1e-3);
    assert_eq!(out, vec![vector![0.0, 0.0], vector![5.0, 5.0]]);
    assert!(dedup_points(&[], 1e-3).is_empty());
}

#[test]
fn dedup_keeps_first_seen_order() {
    let pts = vec![
        vector![3.0, 0.0],
        vector![1.0, 0.0],
        vector![3.0, 0.0002],
        vector![2.0, 0.0],
    ];
    let out = dedup_points(&pts, 1e-3);
    assert_eq!(
        out,
        vec![vector![3.0, 0.0], vector![1.0, 0.0], vector![2.0, 0.0]]
    );
}

#[test]
fn hull_of_square_with_interior_points() {
    let mut pts = square(4.0);
    pts.push(vector![2.0, 2.0]);
    pts.push(vector![1.0, 3.0]);
    pts.push(vector![0.0, 2.0]); // on the boundary, collinear
    let hull = graham_scan(&pts).unwrap();
    assert_eq!(hull.points().len(), 4);
    assert!((hull.area() - 16.0).abs() < 1e-12);
    assert!(hull.signed_area() > 0.0, "hull must be CCW");
    assert_eq!(hull.points()[0], vector![0.0, 0.0]);
}

#[test]
fn hull_pivot_tie_breaks_on_x() {
    let pts = vec![
        vector![3.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 2.0],
    ];
    let hull = graham_scan(&pts).unwrap();
    assert_eq!(hull.points()[0], vector![1.0, 0.0]);
}

#[test]
fn hull_collinear_is_degenerate() {
    let pts = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]];
    assert!(matches!(
        graham_scan(&pts),
        Err(GeomError::DegenerateHull { hull: 2 })
    ));
    assert!(matches!(
        graham_scan(&pts[..2]),
        Err(GeomError::DegenerateHull { hull: 2 })
    ));
}

#[test]
fn hull_ignores_exact_duplicates() {
    let mut pts = square(1.0);
    pts.extend(square(1.0));
    let hull = graham_scan(&pts).unwrap();
    assert_eq!(hull.points().len(), 4);
}

#[test]
fn nearest_neighbor_reconstructs_unit_square() {
    let pts = vec![
        vector![1.0, 1.0],
        vector![0.0, 0.0],
        vector![0.0, 1.0],
        vector![1.0, 0.0],
    ];
    let nl = order_nearest_neighbor(&pts, 1e-3).unwrap();
    assert!((nl.ring.area() - 1.0).abs() < 1e-6);
    assert_eq!(nl.ring.points()[0], vector![0.0, 0.0]);
    // Last point is a square corner, one unit from the start.
    assert!((nl.closing_gap - 1.0).abs() < 1e-12);
    assert!(nl.gap_exceeded);
}

#[test]
fn nearest_neighbor_follows_dense_samples_of_concave_shape() {
    // L-shape sampled densely along its boundary, then shuffled.
    let corners = [
        vector![0.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 1.0],
        vector![1.0, 1.0],
        vector![1.0, 2.0],
        vector![0.0, 2.0],
    ];
    let mut pts: Vec<Pt2> = Vec::new();
    for k in 0..corners.len() {
        let a = corners[k];
        let b = corners[(k + 1) % corners.len()];
        for s in 0..10 {
            pts.push(a + (b - a) * (s as f64 / 10.0));
        }
    }
    let mut rng = StdRng::seed_from_u64(7);
    pts.shuffle(&mut rng);
    let nl = order_nearest_neighbor(&pts, 0.25).unwrap();
    assert!((nl.ring.area() - 3.0).abs() < 1e-9);
    assert!(!nl.gap_exceeded);
    // The hull over-approximates the concave outline.
    let hull = graham_scan(&pts).unwrap();
    assert!((hull.area() - 3.5).abs() < 1e-9);
}

#[test]
fn nearest_neighbor_needs_three_points() {
    let pts = vec![vector![0.0, 0.0], vector![1.0, 0.0]];
    assert!(matches!(
        order_nearest_neighbor(&pts, 1e-3),
        Err(GeomError::NotEnoughPoints { got: 2, .. })
    ));
}

#[test]
fn closed_loop_rejects_coincident_neighbors_and_drops_repeat() {
    let mut pts = square(1.0);
    pts.push(vector![0.0, 0.0]);
    let ring = ClosedLoop::new(pts, 1e-3).unwrap();
    assert_eq!(ring.points().len(), 4);

    let bad = vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 0.0005],
        vector![0.0, 1.0],
    ];
    assert!(matches!(
        ClosedLoop::new(bad, 1e-3),
        Err(GeomError::CoincidentNeighbors { index: 1, next: 2 })
    ));
    let nan = vec![vector![0.0, 0.0], vector![f64::NAN, 0.0], vector![0.0, 1.0]];
    assert!(matches!(
        ClosedLoop::new(nan, 1e-3),
        Err(GeomError::NonFinite { index: 1 })
    ));
}

#[test]
fn affine_compose_applies_right_first() {
    let a = Affine2::rotation_scale(std::f64::consts::FRAC_PI_2, 2.0);
    let b = Affine2::translation(vector![1.0, 0.0]);
    let ab = a.compose(&b);
    // b first: (1,0) -> (2,0); then rotate 90° and scale 2 -> (0,4)
    let p = ab.apply(vector![1.0, 0.0]);
    assert!((p - vector![0.0, 4.0]).norm() < 1e-12);
    // Directions ignore the translation.
    let v = ab.apply_vector(vector![1.0, 0.0]);
    assert!((v - vector![0.0, 2.0]).norm() < 1e-12);
}

#[test]
fn bounds_merge_and_center() {
    let b = Bounds2::from_points(&square(2.0)).unwrap();
    assert_eq!(b.center(), vector![1.0, 1.0]);
    let other = Bounds2::from_point(vector![-1.0, 5.0]);
    let m = b.merge(&other);
    assert_eq!(m.min, vector![-1.0, 0.0]);
    assert_eq!(m.max, vector![2.0, 5.0]);
    assert!(Bounds2::from_points(&[]).is_none());
}

#[test]
fn random_clouds_every_strategy_uses_reduced_points() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let mut pts: Vec<Pt2> = (0..30)
            .map(|_| vector![rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)])
            .collect();
        // Repeat a few samples the way adjacent curve ends do.
        pts.extend_from_within(0..5);
        let reduced = dedup_points(&pts, 1e-3);
        assert!(reduced.len() <= 30);
        let hull = graham_scan(&reduced).unwrap();
        assert!(hull.points().len() <= reduced.len());
        let nl = order_nearest_neighbor(&reduced, 1e-3).unwrap();
        assert_eq!(nl.ring.points().len(), reduced.len());
        assert!(nl.ring.area() > 0.0);
    }
}

fn arb_point() -> impl Strategy<Value = Pt2> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| vector![x, y])
}

proptest! {
    #[test]
    fn shoelace_invariant_under_rotation_and_reversal(
        pts in prop::collection::vec(arb_point(), 3..20),
        shift in 0usize..20,
    ) {
        let a = shoelace_signed(&pts);
        let mut rotated = pts.clone();
        let k = shift % pts.len();
        rotated.rotate_left(k);
        prop_assert!((shoelace_signed(&rotated) - a).abs() <= 1e-6 * (1.0 + a.abs()));
        let mut reversed = pts.clone();
        reversed.reverse();
        prop_assert!((shoelace_signed(&reversed) + a).abs() <= 1e-6 * (1.0 + a.abs()));
        prop_assert!((shoelace_area(&reversed).unwrap() - a.abs()).abs() <= 1e-6 * (1.0 + a.abs()));
    }

    #[test]
    fn dedup_is_idempotent(
        pts in prop::collection::vec(arb_point(), 0..40),
        eps in 0.0f64..5.0,
    ) {
        let once = dedup_points(&pts, eps);
        let twice = dedup_points(&once, eps);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn hull_contains_every_input_point(pts in prop::collection::vec(arb_point(), 3..40)) {
        if let Ok(hull) = graham_scan(&pts) {
            prop_assert!(hull.points().len() <= pts.len());
            let h = hull.points();
            let n = h.len();
            for p in &pts {
                for i in 0..n {
                    let a = h[i];
                    let b = h[(i + 1) % n];
                    let scale = 1.0 + (b - a).norm() * (p - a).norm();
                    prop_assert!(cross(a, b, *p) >= -1e-9 * scale);
                }
            }
        }
    }
}
