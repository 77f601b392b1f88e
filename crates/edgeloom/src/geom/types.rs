//! Basic 2D types and tolerances used by edge classification.
//!
//! - `GeomCfg`: centralizes epsilons for angle bounds, corner thresholds, and
//!   zero-length directions.
//! - `Edge`: directed pair of adjacent loop vertices with its outward normal.
//! - `Winding`: orientation of a vertex loop.

use nalgebra::Vector2;

/// A polygon vertex. Loops are implicitly closed (last connects to first).
pub type Vertex = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Slack on angle-range bounds and on the ±π seam.
    pub eps_angle: f64,
    /// Slack on corner-angle thresholds.
    pub eps_corner: f64,
    /// Directions shorter than this are treated as zero.
    pub eps_len: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_angle: 1e-6,
            eps_corner: 1e-6,
            eps_len: 1e-12,
        }
    }
}

/// Directed edge `left -> right` between adjacent loop vertices.
///
/// Edges are derived data: rebuilt on every refresh, never mutated in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub left: Vertex,
    pub right: Vertex,
}

impl Edge {
    #[inline]
    pub fn new(left: Vertex, right: Vertex) -> Self {
        Self { left, right }
    }

    /// Unit outward normal for a CCW loop: the edge direction turned 90° clockwise,
    /// `(d.y, -d.x)`. Zero for a zero-length edge.
    #[inline]
    pub fn normal(&self) -> Vector2<f64> {
        let d = self.right - self.left;
        let len = d.norm();
        if len > 0.0 && len.is_finite() {
            Vector2::new(d.y, -d.x) / len
        } else {
            Vector2::zeros()
        }
    }

    /// Angle of the outward normal in [-π, π].
    #[inline]
    pub fn normal_angle(&self) -> f64 {
        let n = self.normal();
        n.y.atan2(n.x)
    }

    #[inline]
    pub fn center(&self) -> Vertex {
        self.left.lerp(&self.right, 0.5)
    }
}

/// Orientation of a closed vertex loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
}

impl Winding {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Winding::CounterClockwise => Winding::Clockwise,
            Winding::Clockwise => Winding::CounterClockwise,
        }
    }
}
