use super::types::{Edge, Vertex};

/// Edges of the closed loop: edge `i` is `(v[i], v[(i + 1) % n])`.
///
/// Empty input yields no edges. A single vertex yields one zero-length
/// self-edge; callers must not segment such a loop.
pub fn extract_edges(points: &[Vertex]) -> Vec<Edge> {
    let n = points.len();
    (0..n)
        .map(|i| Edge::new(points[i], points[(i + 1) % n]))
        .collect()
}

/// Flatten several loops into one vertex array plus the index range each loop occupies.
pub fn flatten_loops(loops: &[Vec<Vertex>]) -> (Vec<Vertex>, Vec<std::ops::Range<usize>>) {
    let total = loops.iter().map(Vec::len).sum();
    let mut vertices = Vec::with_capacity(total);
    let mut ranges = Vec::with_capacity(loops.len());
    for l in loops {
        let start = vertices.len();
        vertices.extend_from_slice(l);
        ranges.push(start..vertices.len());
    }
    (vertices, ranges)
}
