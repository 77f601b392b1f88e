//! Criterion benchmarks for a full platform refresh against the in-memory host.
//! `gated/unchanged` measures the fingerprint check alone.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use edgeloom::geom::AngleRange;
use edgeloom::platform::{Platform, SceneHost, SourceGeometry};
use edgeloom::sample::{draw_star_loop, LoopSize, ReplayToken, StarCfg};
use edgeloom::style::{CornerKind, CornerStyle, EdgeStyle, Profile, SpriteStyle};

fn profile() -> Arc<Profile> {
    let corner = CornerStyle::new(CornerKind::Convex, 25f64.to_radians()).with_sprite(SpriteStyle::default());
    Arc::new(Profile::with_edge_styles([
        EdgeStyle::new("top", AngleRange::from_degrees(45.0, 135.0)).with_corner(corner.clone()),
        EdgeStyle::new("side", AngleRange::from_degrees(135.0, 45.0)).with_corner(corner),
    ]))
}

fn loops(n: usize, count: u64) -> Vec<Vec<edgeloom::Vertex>> {
    let cfg = StarCfg {
        size: LoopSize::Exact(n),
        ..StarCfg::default()
    };
    (0..count)
        .map(|index| draw_star_loop(cfg, ReplayToken { seed: 9, index }))
        .collect()
}

fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh");
    for &n in &[32usize, 128, 512] {
        group.bench_with_input(BenchmarkId::new("full", n), &n, |b, &n| {
            let mut host = SceneHost::new();
            let mut p: Platform<SceneHost> =
                Platform::new(SourceGeometry::new(loops(n, 4))).with_profile(profile());
            b.iter(|| p.refresh(&mut host))
        });

        group.bench_with_input(BenchmarkId::new("gated/unchanged", n), &n, |b, &n| {
            let mut host = SceneHost::new();
            let mut p: Platform<SceneHost> =
                Platform::new(SourceGeometry::new(loops(n, 4))).with_profile(profile());
            p.refresh(&mut host);
            b.iter(|| p.refresh_if_changed(&mut host))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_refresh);
criterion_main!(benches);
