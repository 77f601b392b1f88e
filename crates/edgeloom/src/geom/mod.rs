//! Planar loop geometry: edges, outward normals, and angular ranges.
//!
//! Purpose
//! - Turn an ordered vertex loop into directed edges carrying outward normals.
//! - Answer "does this direction fall in that angular zone" robustly across the
//!   ±π seam.
//!
//! Conventions
//! - y-up, CCW loops are positively oriented; outward normal of `a -> b` is
//!   `(d.y, -d.x)` for `d = b - a`.
//! - All closeness checks are eps-aware (`GeomCfg`).

pub mod anchor;
mod angle;
mod edges;
mod types;
mod util;

pub use anchor::{snap_anchor, Anchor};
pub use angle::AngleRange;
pub use edges::{extract_edges, flatten_loops};
pub use types::{Edge, GeomCfg, Vertex, Winding};
pub use util::{closest_point_on_segment, direction, signed_angle, signed_area, winding};

pub(crate) use util::angle_of;

#[cfg(test)]
mod tests;
