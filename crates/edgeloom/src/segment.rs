//! Partition a loop boundary into maximal runs of edges that pass a test.
//!
//! A run of `k` passing edges becomes a segment of `k + 1` points: the left
//! vertex of every passing edge, then the left vertex of the first failing edge
//! that ends the run. Runs crossing the array seam (last edge -> first edge)
//! are kept whole. When every edge passes, the whole loop is one closed segment
//! of the `n` left vertices.

use crate::geom::{Edge, Vertex};

/// Index form of a segment: `len` consecutive loop vertices starting at `start` (mod n).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub len: usize,
    pub closed: bool,
}

impl Run {
    /// Loop vertex indices covered by the run, in order.
    pub fn indices(&self, n: usize) -> impl Iterator<Item = usize> + '_ {
        let start = self.start;
        (0..self.len).map(move |k| (start + k) % n)
    }
}

/// Ordered points of one decorated stretch of the boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub points: Vec<Vertex>,
    /// Loop index of `points[0]`.
    pub start: usize,
    /// True only when the segment is the entire loop.
    pub closed: bool,
}

impl Segment {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Loop index of `points[k]`, given the loop size.
    #[inline]
    pub fn loop_index(&self, k: usize, n: usize) -> usize {
        (self.start + k) % n
    }
}

/// Runs of `true` in a circular boolean sequence of length `n`.
pub fn find_runs(n: usize, mut test: impl FnMut(usize) -> bool) -> Vec<Run> {
    if n == 0 {
        return Vec::new();
    }
    let pass: Vec<bool> = (0..n).map(&mut test).collect();

    // A run bridging the seam would otherwise be split in two; start at the first failure.
    let start = if pass[0] && pass[n - 1] {
        match pass.iter().position(|p| !p) {
            Some(i) => i,
            None => {
                return vec![Run {
                    start: 0,
                    len: n,
                    closed: true,
                }]
            }
        }
    } else {
        0
    };

    let mut runs = Vec::new();
    let mut run_start = 0usize;
    let mut buffered = 0usize;
    let mut i = start;
    while i < start + n || buffered > 0 {
        let k = i % n;
        if pass[k] {
            if buffered == 0 {
                run_start = k;
            }
            buffered += 1;
        } else if buffered > 0 {
            // closing point: left vertex of the failing edge
            runs.push(Run {
                start: run_start,
                len: buffered + 1,
                closed: false,
            });
            buffered = 0;
        }
        i += 1;
    }
    runs
}

/// Segments of the loop whose edges satisfy `test`.
pub fn find_segments(edges: &[Edge], mut test: impl FnMut(&Edge) -> bool) -> Vec<Segment> {
    let n = edges.len();
    find_runs(n, |i| test(&edges[i]))
        .into_iter()
        .map(|run| Segment {
            points: run.indices(n).map(|i| edges[i].left).collect(),
            start: run.start,
            closed: run.closed,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{extract_edges, AngleRange, GeomCfg};
    use crate::sample::{draw_star_loop, LoopSize, ReplayToken, StarCfg};
    use crate::style::EdgeStyle;
    use nalgebra::vector;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_4;

    fn runs_of(mask: &[bool]) -> Vec<Run> {
        find_runs(mask.len(), |i| mask[i])
    }

    #[test]
    fn square_right_zone_yields_right_edge() {
        let square = vec![
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
        ];
        let style = EdgeStyle::new("right", AngleRange::new(-FRAC_PI_4, FRAC_PI_4));
        let cfg = GeomCfg::default();
        let segs = find_segments(&extract_edges(&square), |e| style.test(e, &cfg));
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].points, vec![vector![10.0, 0.0], vector![10.0, 10.0]]);
        assert!(!segs[0].closed);
        assert_eq!(segs[0].start, 1);
    }

    #[test]
    fn seam_run_is_not_split() {
        // edges n-2, n-1, 0, 1 pass
        let mask = [true, true, false, false, false, true, true];
        let runs = runs_of(&mask);
        assert_eq!(
            runs,
            vec![Run {
                start: 5,
                len: 5,
                closed: false
            }]
        );
        assert_eq!(runs[0].indices(7).collect::<Vec<_>>(), vec![5, 6, 0, 1, 2]);
    }

    #[test]
    fn single_passing_edge_yields_two_points() {
        assert_eq!(
            runs_of(&[false, false, true, false]),
            vec![Run {
                start: 2,
                len: 2,
                closed: false
            }]
        );
        // last edge closes on vertex 0
        let runs = runs_of(&[false, false, false, true]);
        assert_eq!(runs[0].indices(4).collect::<Vec<_>>(), vec![3, 0]);
    }

    #[test]
    fn all_and_none() {
        assert_eq!(
            runs_of(&[true; 5]),
            vec![Run {
                start: 0,
                len: 5,
                closed: true
            }]
        );
        assert!(runs_of(&[false; 5]).is_empty());
        assert!(runs_of(&[]).is_empty());
    }

    #[test]
    fn several_runs_in_loop_order() {
        let runs = runs_of(&[true, false, true, true, false, false, true, false]);
        let starts: Vec<usize> = runs.iter().map(|r| r.start).collect();
        let lens: Vec<usize> = runs.iter().map(|r| r.len).collect();
        assert_eq!(starts, vec![0, 2, 6]);
        assert_eq!(lens, vec![2, 3, 2]);
    }

    fn circular_true_runs(mask: &[bool]) -> usize {
        let n = mask.len();
        (0..n).filter(|&i| mask[i] && !mask[(i + n - 1) % n]).count()
    }

    proptest! {
        #[test]
        fn runs_match_circular_structure(mask in prop::collection::vec(any::<bool>(), 1..48)) {
            let n = mask.len();
            let runs = runs_of(&mask);
            if mask.iter().all(|&b| b) {
                prop_assert_eq!(runs.len(), 1);
                prop_assert!(runs[0].closed);
                prop_assert_eq!(runs[0].len, n);
            } else {
                prop_assert_eq!(runs.len(), circular_true_runs(&mask));
                let mut covered = 0;
                for r in &runs {
                    prop_assert!(!r.closed);
                    prop_assert!(r.len >= 2);
                    let idx: Vec<usize> = r.indices(n).collect();
                    // every point but the closing one is a passing edge's left vertex
                    for &i in &idx[..idx.len() - 1] {
                        prop_assert!(mask[i]);
                    }
                    prop_assert!(!mask[idx[idx.len() - 1]]);
                    // maximal: the edge before the run fails
                    prop_assert!(!mask[(r.start + n - 1) % n]);
                    covered += r.len - 1;
                }
                prop_assert_eq!(covered, mask.iter().filter(|&&b| b).count());
            }
        }

        #[test]
        fn star_loop_segments_cover_passing_edges(seed in any::<u64>(), n in 3usize..40) {
            let cfg = StarCfg { size: LoopSize::Exact(n), ..StarCfg::default() };
            let points = draw_star_loop(cfg, ReplayToken { seed, index: 0 });
            let edges = extract_edges(&points);
            let geom = GeomCfg::default();
            let top = EdgeStyle::new("top", AngleRange::from_degrees(45.0, 135.0));
            let passing = edges.iter().filter(|e| top.test(e, &geom)).count();
            let segs = find_segments(&edges, |e| top.test(e, &geom));
            let covered: usize = segs.iter().map(|s| s.len() - 1).sum();
            prop_assert_eq!(covered, passing);
            for s in &segs {
                prop_assert!(!s.closed);
                prop_assert_eq!(s.points[0], points[s.start]);
            }

            let everything = EdgeStyle::new("all", AngleRange::from_degrees(-180.0, 180.0));
            let whole = find_segments(&edges, |e| everything.test(e, &geom));
            prop_assert_eq!(whole.len(), 1);
            prop_assert!(whole[0].closed);
            prop_assert_eq!(&whole[0].points, &points);
        }
    }
}
