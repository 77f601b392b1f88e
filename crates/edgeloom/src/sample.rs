//! Seeded star-shaped loops for benches and property tests.
//!
//! Vertices sit at evenly spaced angles around the origin, each nudged in angle
//! and radius. Angular order is kept, so every draw is a simple CCW loop with a
//! mix of convex corners and concave notches. A `(seed, index)` token replays
//! any draw exactly.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::fingerprint::mix64;
use crate::geom::Vertex;

/// How many vertices a drawn loop gets. Loops never have fewer than three.
#[derive(Clone, Copy, Debug)]
pub enum LoopSize {
    Exact(usize),
    Between { min: usize, max: usize },
}

impl LoopSize {
    fn draw<R: Rng>(self, rng: &mut R) -> usize {
        match self {
            LoopSize::Exact(n) => n.max(3),
            LoopSize::Between { min, max } => {
                let min = min.max(3);
                rng.gen_range(min..=max.max(min))
            }
        }
    }
}

/// Shape of the drawn star loops.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub size: LoopSize,
    /// Per-vertex angular wobble, as a share of the even spacing. At most 0.49 so order is kept.
    pub angle_jitter: f64,
    /// Per-vertex radius wobble relative to `radius`; deeper wobble gives sharper concave notches.
    pub radius_jitter: f64,
    pub radius: f64,
    /// Rotate the whole loop by a random angle.
    pub spin: bool,
}

impl Default for StarCfg {
    fn default() -> Self {
        Self {
            size: LoopSize::Exact(24),
            angle_jitter: 0.3,
            radius_jitter: 0.4,
            radius: 100.0,
            spin: true,
        }
    }
}

/// `(seed, index)` pair naming one reproducible draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    fn rng(self) -> StdRng {
        StdRng::seed_from_u64(mix64(self.seed ^ mix64(self.index ^ 0x5eed_1007)))
    }
}

/// Draw a CCW star-shaped loop around the origin.
pub fn draw_star_loop(cfg: StarCfg, tok: ReplayToken) -> Vec<Vertex> {
    let mut rng = tok.rng();
    let n = cfg.size.draw(&mut rng);
    let spacing = std::f64::consts::TAU / n as f64;
    let wobble = cfg.angle_jitter.clamp(0.0, 0.49) * spacing;
    let depth = cfg.radius_jitter.clamp(0.0, 0.95);
    let radius = cfg.radius.max(1e-9);
    let spin = if cfg.spin {
        rng.gen_range(0.0..std::f64::consts::TAU)
    } else {
        0.0
    };
    (0..n)
        .map(|k| {
            let theta = spin + k as f64 * spacing + rng.gen_range(-1.0..=1.0) * wobble;
            let r = radius * (1.0 + rng.gen_range(-1.0..=1.0) * depth);
            Vector2::new(r * theta.cos(), r * theta.sin())
        })
        .collect()
}
