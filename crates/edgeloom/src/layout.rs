//! One full decoration pass over a set of loops, without any host objects.
//!
//! For every loop and every enabled edge style: find segments, match corner
//! styles along each segment, and place caps at open segment ends. Junction
//! styles are then evaluated at loop vertices where segments begin or end.
//! Output is indexed by `(loop, style)` so hosts can map results onto stable
//! object slots.

use std::collections::BTreeMap;

use tracing::trace;

use crate::corner::{corner_at, match_corners, select_corner, CornerGeometry, CornerPlacement};
use crate::geom::{angle_of, extract_edges, GeomCfg, Vertex};
use crate::segment::{find_segments, Segment};
use crate::style::{EdgeStyle, Profile};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapEnd {
    Begin,
    End,
}

/// A cap sprite at one end of an open segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapPlacement {
    pub segment: usize,
    pub end: CapEnd,
    pub position: Vertex,
    /// Direction of the adjoining sub-edge, pointing along the segment.
    pub direction: f64,
}

/// A junction style chosen for a loop vertex where segments meet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JunctionPlacement {
    /// Loop vertex index.
    pub vertex: usize,
    /// Index into `Profile::junction_styles`.
    pub junction: usize,
    pub geometry: CornerGeometry,
}

/// Everything one edge style contributes to one loop.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StyleLayout {
    pub segments: Vec<Segment>,
    pub corners: Vec<CornerPlacement>,
    pub caps: Vec<CapPlacement>,
}

impl StyleLayout {
    /// Sprites in slot order: caps first, then corners.
    #[inline]
    pub fn sprite_count(&self) -> usize {
        self.caps.len() + self.corners.len()
    }
}

/// Decorations of one loop; `styles[i]` belongs to edge style `i` of the profile.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LoopLayout {
    pub styles: Vec<StyleLayout>,
    pub junctions: Vec<JunctionPlacement>,
}

impl LoopLayout {
    pub fn segment_count(&self) -> usize {
        self.styles.iter().map(|s| s.segments.len()).sum()
    }
}

/// Lay out every loop.
pub fn layout(loops: &[Vec<Vertex>], profile: &Profile, cfg: &GeomCfg) -> Vec<LoopLayout> {
    loops.iter().map(|l| layout_loop(l, profile, cfg)).collect()
}

/// Lay out one loop. Fewer than two vertices: every style slot is empty.
pub fn layout_loop(points: &[Vertex], profile: &Profile, cfg: &GeomCfg) -> LoopLayout {
    let styles_cfg = profile.edge_styles();
    let mut out = LoopLayout {
        styles: vec![StyleLayout::default(); styles_cfg.len()],
        junctions: Vec::new(),
    };
    if points.len() < 2 {
        return out;
    }
    let edges = extract_edges(points);
    for (si, style) in styles_cfg.iter().enumerate() {
        if style.disabled {
            continue;
        }
        let segments = find_segments(&edges, |e| style.test(e, cfg));
        out.styles[si] = layout_style(segments, style, cfg);
        trace!(style = %style.name, segments = out.styles[si].segments.len(), "style laid out");
    }
    out.junctions = place_junctions(points, &out.styles, profile, cfg);
    out
}

fn layout_style(segments: Vec<Segment>, style: &EdgeStyle, cfg: &GeomCfg) -> StyleLayout {
    let mut corners = Vec::new();
    let mut caps = Vec::new();
    for (k, seg) in segments.iter().enumerate() {
        corners.extend(match_corners(k, seg, &style.corners, cfg));
        if style.caps.enabled && !seg.closed && seg.len() >= 2 {
            let pts = &seg.points;
            if style.caps.begin.is_some() {
                caps.push(CapPlacement {
                    segment: k,
                    end: CapEnd::Begin,
                    position: pts[0],
                    direction: angle_of(pts[1] - pts[0]),
                });
            }
            if style.caps.end.is_some() {
                let last = pts.len() - 1;
                caps.push(CapPlacement {
                    segment: k,
                    end: CapEnd::End,
                    position: pts[last],
                    direction: angle_of(pts[last] - pts[last - 1]),
                });
            }
        }
    }
    StyleLayout {
        segments,
        corners,
        caps,
    }
}

fn place_junctions(
    points: &[Vertex],
    styles: &[StyleLayout],
    profile: &Profile,
    cfg: &GeomCfg,
) -> Vec<JunctionPlacement> {
    let junctions = profile.junction_styles();
    if junctions.is_empty() {
        return Vec::new();
    }
    let n = points.len();
    // loop vertex -> edge styles with an open segment starting or ending there
    let mut touching: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (si, sl) in styles.iter().enumerate() {
        for seg in sl.segments.iter().filter(|s| !s.closed && s.len() >= 2) {
            for v in [seg.start, seg.loop_index(seg.len() - 1, n)] {
                let entry = touching.entry(v).or_default();
                if !entry.contains(&si) {
                    entry.push(si);
                }
            }
        }
    }
    let resolved: Vec<Vec<usize>> = junctions
        .iter()
        .map(|j| profile.resolve_filter(&j.edges))
        .collect();
    touching
        .into_iter()
        .filter_map(|(v, touching_styles)| {
            let g = corner_at(points, v, true, cfg)?;
            let candidates = junctions
                .iter()
                .enumerate()
                .filter(|(ji, _)| touching_styles.iter().any(|s| resolved[*ji].binary_search(s).is_ok()))
                .map(|(ji, j)| (ji, &j.corner));
            let (junction, _) = select_corner(&g, candidates, cfg)?;
            Some(JunctionPlacement {
                vertex: v,
                junction,
                geometry: g,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests;
