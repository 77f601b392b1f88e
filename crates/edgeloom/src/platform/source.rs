use std::ops::Range;

use crate::fingerprint::{Fingerprint, Fold};
use crate::geom::{flatten_loops, winding, Vertex, Winding};

/// The vertex loops one polygon owner decorates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceGeometry {
    /// One loop per source path, each implicitly closed.
    pub loops: Vec<Vec<Vertex>>,
    /// The polygon is a hole in a solid world rather than a solid in empty space.
    pub invert: bool,
}

impl SourceGeometry {
    pub fn new(loops: Vec<Vec<Vertex>>) -> Self {
        Self {
            loops,
            invert: false,
        }
    }

    pub fn single(points: Vec<Vertex>) -> Self {
        Self::new(vec![points])
    }

    pub fn vertex_count(&self) -> usize {
        self.loops.iter().map(Vec::len).sum()
    }

    /// All vertices in one array plus the index range of each loop.
    pub fn flattened(&self) -> (Vec<Vertex>, Vec<Range<usize>>) {
        flatten_loops(&self.loops)
    }

    /// Winding a collision shape mirroring this geometry should use.
    ///
    /// Taken from the first loop's signed area and flipped when `invert` is set.
    pub fn collision_winding(&self) -> Winding {
        let w = self
            .loops
            .first()
            .map_or(Winding::CounterClockwise, |l| winding(l));
        if self.invert {
            w.flipped()
        } else {
            w
        }
    }
}

impl Fingerprint for SourceGeometry {
    fn fold_into(&self, fold: &mut Fold) {
        fold.slice(&self.loops).bool(self.invert);
    }
}
