//! Snap free points onto a loop boundary.

use super::types::{Edge, Vertex};
use super::util::closest_point_on_segment;

/// Position on the boundary plus the outward normal angle of the edge it lies on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub position: Vertex,
    pub rotation: f64,
    /// Index of the edge (`v[edge] -> v[edge + 1]`) the anchor sits on.
    pub edge: usize,
}

/// Snap `point` to the closest point of the closed loop.
///
/// No vertices: `None`. One vertex: that vertex with rotation 0.
/// Ties between edges keep the earliest edge.
pub fn snap_anchor(point: Vertex, loop_points: &[Vertex]) -> Option<Anchor> {
    let n = loop_points.len();
    match n {
        0 => None,
        1 => Some(Anchor {
            position: loop_points[0],
            rotation: 0.0,
            edge: 0,
        }),
        _ => {
            let mut best: Option<(f64, Anchor)> = None;
            for i in 0..n {
                let edge = Edge::new(loop_points[i], loop_points[(i + 1) % n]);
                let q = closest_point_on_segment(point, edge.left, edge.right);
                let d2 = (q - point).norm_squared();
                if best.as_ref().map_or(true, |(bd, _)| d2 < *bd) {
                    best = Some((
                        d2,
                        Anchor {
                            position: q,
                            rotation: edge.normal_angle(),
                            edge: i,
                        },
                    ));
                }
            }
            best.map(|(_, a)| a)
        }
    }
}
