use nalgebra::Vector2;

use super::types::{Vertex, Winding};

#[inline]
pub(crate) fn angle_of(v: Vector2<f64>) -> f64 {
    v.y.atan2(v.x)
}

/// Unit direction `from -> to`; `None` when the points coincide (within `eps_len`).
#[inline]
pub fn direction(from: Vertex, to: Vertex, eps_len: f64) -> Option<Vector2<f64>> {
    let d = to - from;
    let len = d.norm();
    if !len.is_finite() || len <= eps_len {
        return None;
    }
    Some(d / len)
}

/// Signed angle turning `a` onto `b`, in (-π, π]. Positive for a left (CCW) turn.
#[inline]
pub fn signed_angle(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let cross = a.x * b.y - a.y * b.x;
    cross.atan2(a.dot(&b))
}

/// Shoelace signed area. Positive for CCW loops.
pub fn signed_area(points: &[Vertex]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        acc += p.x * q.y - q.x * p.y;
    }
    0.5 * acc
}

/// Winding of a loop from its signed area; degenerate loops report CCW.
#[inline]
pub fn winding(points: &[Vertex]) -> Winding {
    if signed_area(points) < 0.0 {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    }
}

/// Closest point to `p` on the closed segment `[a, b]`.
pub fn closest_point_on_segment(p: Vertex, a: Vertex, b: Vertex) -> Vertex {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= 0.0 {
        return a;
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}
