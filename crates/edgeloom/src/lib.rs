//! Procedural decoration of polygon boundaries.
//!
//! A refresh turns vertex loops into decorations:
//! loops -> edges with outward normals (`geom`) -> maximal runs per edge style
//! (`segment`) -> corner, cap, and junction placements (`corner`, `layout`) ->
//! pooled host objects (`pool`, `platform`). `fingerprint` lets owners skip
//! refreshes when nothing that affects output changed.
//!
//! Conventions
//! - y-up; loops are CCW for solids. Angles are radians in [-π, π] measured
//!   from +x.
//! - Degenerate geometry (short loops, zero-length edges) yields fewer
//!   decorations, never errors.

pub mod corner;
pub mod fingerprint;
pub mod geom;
pub mod layout;
pub mod platform;
pub mod pool;
pub mod sample;
pub mod segment;
pub mod style;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{AngleRange, Edge, GeomCfg, Vertex};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::corner::{corner_at, match_corners, select_corner, CornerGeometry, CornerPlacement};
    pub use crate::fingerprint::{ChangeDetector, Fingerprint, Fold};
    pub use crate::geom::{
        extract_edges, flatten_loops, snap_anchor, Anchor, AngleRange, Edge, GeomCfg, Vertex, Winding,
    };
    pub use crate::layout::{layout, layout_loop, LoopLayout, StyleLayout};
    pub use crate::platform::{
        DecorationHost, DecorationKey, DecorationKind, LineDecoration, Platform, RefreshReport,
        SceneHost, SourceGeometry, SpriteDecoration,
    };
    pub use crate::pool::{Decoration, PoolDelta, RenderObjectPool, RetirePolicy};
    pub use crate::segment::{find_segments, Segment};
    pub use crate::style::{
        CapStyle, CornerKind, CornerStyle, EdgeFilter, EdgeStyle, JunctionStyle, LineStyle, Profile,
        SpriteStyle,
    };
    pub use nalgebra::Vector2 as Vec2;
}
