use super::*;
use nalgebra::vector;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

fn square() -> Vec<Vertex> {
    vec![
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 10.0],
        vector![0.0, 10.0],
    ]
}

#[test]
fn square_edges_have_outward_normals() {
    let edges = extract_edges(&square());
    assert_eq!(edges.len(), 4);
    // bottom, right, top, left
    let expected = [-FRAC_PI_2, 0.0, FRAC_PI_2, PI];
    for (e, want) in edges.iter().zip(expected) {
        let got = e.normal_angle();
        // left edge may report -π
        assert!(
            (got - want).abs() < 1e-12 || (got + want).abs() < 1e-12 && want == PI,
            "got {got}, want {want}"
        );
    }
    assert_eq!(edges[3].right, vector![0.0, 0.0]);
    assert!((edges[1].center() - vector![10.0, 5.0]).norm() < 1e-12);
}

#[test]
fn degenerate_loops() {
    assert!(extract_edges(&[]).is_empty());
    let single = extract_edges(&[vector![1.0, 2.0]]);
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].normal(), vector![0.0, 0.0]);
}

#[test]
fn direct_range_contains_bounds_and_rejects_outside() {
    let r = AngleRange::new(-FRAC_PI_4, FRAC_PI_4);
    assert!(r.contains(-FRAC_PI_4));
    assert!(r.contains(FRAC_PI_4));
    assert!(r.contains(0.0));
    assert!(!r.contains(FRAC_PI_2));
    assert!(!r.contains(-PI));
    assert!(!r.contains(f64::NAN));
}

#[test]
fn wrapping_range() {
    let r = AngleRange::new(3.0 * FRAC_PI_4, -3.0 * FRAC_PI_4);
    assert!(r.wraps());
    assert!(r.contains(3.0 * FRAC_PI_4));
    assert!(r.contains(-3.0 * FRAC_PI_4));
    assert!(r.contains(3.0 * FRAC_PI_4 + 1e-3));
    assert!(r.contains(-3.0 * FRAC_PI_4 - 1e-3));
    assert!(r.contains(PI));
    assert!(r.contains(-PI));
    assert!(!r.contains(0.0));
    assert!((r.width() - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn seam_direction_counts_on_both_sides() {
    // Exact leftward normal may come back as -π; a range ending at π still holds it.
    let upper = AngleRange::new(FRAC_PI_2, PI);
    assert!(upper.contains(-PI));
    let lower = AngleRange::new(-PI, -FRAC_PI_2);
    assert!(lower.contains(PI));
    let left_edge = Edge::new(vector![0.0, 10.0], vector![0.0, 0.0]);
    assert!(upper.contains(left_edge.normal_angle()));
}

#[test]
fn full_and_point_ranges_are_distinct() {
    assert!(AngleRange::FULL.is_full(1e-9));
    assert!(AngleRange::FULL.contains(0.0));
    assert!(AngleRange::FULL.contains(PI));
    let p = AngleRange::point(0.5);
    assert!(!p.is_full(1e-9));
    assert!(p.contains(0.5));
    assert!(!p.contains(0.6));
    assert!(p.width().abs() < 1e-12);
}

#[test]
fn signed_angle_and_area() {
    let a = vector![1.0, 0.0];
    let b = vector![0.0, 1.0];
    assert!((signed_angle(a, b) - FRAC_PI_2).abs() < 1e-12);
    assert!((signed_angle(b, a) + FRAC_PI_2).abs() < 1e-12);
    assert!((signed_area(&square()) - 100.0).abs() < 1e-12);
    let mut cw = square();
    cw.reverse();
    assert_eq!(winding(&cw), Winding::Clockwise);
    assert_eq!(winding(&square()), Winding::CounterClockwise);
    assert!(direction(a, a, 1e-12).is_none());
}

#[test]
fn flatten_keeps_loop_ranges() {
    let loops = vec![square(), vec![vector![20.0, 0.0], vector![21.0, 0.0], vector![21.0, 1.0]]];
    let (all, ranges) = flatten_loops(&loops);
    assert_eq!(all.len(), 7);
    assert_eq!(ranges, vec![0..4, 4..7]);
    assert_eq!(all[4], vector![20.0, 0.0]);
}

#[test]
fn anchor_snaps_to_nearest_edge() {
    let sq = square();
    assert!(snap_anchor(vector![1.0, 1.0], &[]).is_none());
    let one = snap_anchor(vector![5.0, 5.0], &sq[..1]).unwrap();
    assert_eq!(one.position, sq[0]);
    assert_eq!(one.rotation, 0.0);

    let a = snap_anchor(vector![12.0, 4.0], &sq).unwrap();
    assert!((a.position - vector![10.0, 4.0]).norm() < 1e-12);
    assert_eq!(a.edge, 1);
    assert!(a.rotation.abs() < 1e-12);

    let b = snap_anchor(vector![5.0, -3.0], &sq).unwrap();
    assert!((b.position - vector![5.0, 0.0]).norm() < 1e-12);
    assert!((b.rotation + FRAC_PI_2).abs() < 1e-12);
}
