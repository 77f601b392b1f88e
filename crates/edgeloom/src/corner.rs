//! Corner matching: pick at most one corner style per segment vertex.
//!
//! Geometry at vertex `v` with neighbours `p` (before) and `q` (after):
//! - `left = dir(p -> v)`, `right = dir(v -> q)`;
//! - corner angle = signed turn from `left` to `right` (positive = left turn,
//!   convex on a CCW loop);
//! - normal angle = direction of `dir(p -> v) + dir(q -> v)`, the bisector
//!   pointing from both neighbours into the vertex. On a straight run the sum
//!   vanishes and the outward edge normal of `left` is used.
//!
//! Among all candidates that match, the one with the largest
//! `min_corner_angle` wins; ties keep the earliest declared.

use nalgebra::Vector2;

use crate::geom::{angle_of, direction, signed_angle, GeomCfg, Vertex};
use crate::segment::Segment;
use crate::style::CornerStyle;

/// Local shape of the boundary at one vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerGeometry {
    pub position: Vertex,
    /// Signed turning angle in (-π, π].
    pub corner_angle: f64,
    /// Direction of the bisector from both neighbours into the vertex, in [-π, π].
    pub normal_angle: f64,
}

/// Geometry of the corner `prev -> at -> next`; `None` if a neighbour coincides with `at`.
pub fn corner_geometry(prev: Vertex, at: Vertex, next: Vertex, cfg: &GeomCfg) -> Option<CornerGeometry> {
    let left = direction(prev, at, cfg.eps_len)?;
    let right = direction(at, next, cfg.eps_len)?;
    // dir(q -> v) is -right
    let bisector = left - right;
    let normal = if bisector.norm() > cfg.eps_len {
        bisector
    } else {
        Vector2::new(left.y, -left.x)
    };
    Some(CornerGeometry {
        position: at,
        corner_angle: signed_angle(left, right),
        normal_angle: angle_of(normal),
    })
}

/// Corner at `points[i]`. Endpoints of an open sequence have no corner; a closed
/// sequence wraps around.
pub fn corner_at(points: &[Vertex], i: usize, closed: bool, cfg: &GeomCfg) -> Option<CornerGeometry> {
    let n = points.len();
    debug_assert!(i < n, "corner index {i} out of range for {n} points");
    if i >= n || n < 3 {
        return None;
    }
    let (p, q) = if closed {
        ((i + n - 1) % n, (i + 1) % n)
    } else {
        if i == 0 || i == n - 1 {
            return None;
        }
        (i - 1, i + 1)
    };
    corner_geometry(points[p], points[i], points[q], cfg)
}

impl CornerStyle {
    /// Corner-angle threshold for this style's kind, then the bisector zone.
    pub fn test(&self, g: &CornerGeometry, cfg: &GeomCfg) -> bool {
        self.kind
            .admits(g.corner_angle, self.min_corner_angle, cfg.eps_corner)
            && self.normal_range.contains_eps(g.normal_angle, cfg.eps_angle)
    }
}

/// Best matching candidate: largest `min_corner_angle`, earliest on ties.
pub fn select_corner<'a, I>(g: &CornerGeometry, candidates: I, cfg: &GeomCfg) -> Option<(usize, &'a CornerStyle)>
where
    I: IntoIterator<Item = (usize, &'a CornerStyle)>,
{
    let mut best: Option<(usize, &'a CornerStyle)> = None;
    for (idx, style) in candidates {
        if !style.test(g, cfg) {
            continue;
        }
        match best {
            Some((_, b)) if b.min_corner_angle >= style.min_corner_angle => {}
            _ => best = Some((idx, style)),
        }
    }
    best
}

/// A corner style chosen for one segment point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerPlacement {
    pub segment: usize,
    /// Index into the segment's points.
    pub point: usize,
    /// Index into the candidate list.
    pub corner: usize,
    pub geometry: CornerGeometry,
}

/// Run corner matching over every point of `segment`.
pub fn match_corners(
    segment_index: usize,
    segment: &Segment,
    candidates: &[CornerStyle],
    cfg: &GeomCfg,
) -> Vec<CornerPlacement> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let pts = &segment.points;
    (0..pts.len())
        .filter_map(|i| {
            let g = corner_at(pts, i, segment.closed, cfg)?;
            let (corner, _) = select_corner(&g, candidates.iter().enumerate(), cfg)?;
            Some(CornerPlacement {
                segment: segment_index,
                point: i,
                corner,
                geometry: g,
            })
        })
        .collect()
}
