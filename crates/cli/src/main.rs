use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use edgeloom::geom::{AngleRange, GeomCfg};
use edgeloom::layout::layout;
use edgeloom::platform::{Platform, SceneHost};
use edgeloom::pool::RetirePolicy;
use edgeloom::sample::{draw_star_loop, LoopSize, ReplayToken, StarCfg};
use edgeloom::Vec2;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::SubscriberBuilder;

mod output;
mod provenance;
mod scene;

use scene::{CornerDto, CornerKindDto, EdgeStyleDto, ProfileDto, SceneFile, SpriteDto};

#[derive(Parser)]
#[command(name = "edgeloom")]
#[command(about = "Decorate polygon boundaries from JSON scenes")]
struct Cmd {
    /// Optional run label; propagated to provenance and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RetireArg {
    Destroy,
    Hide,
}

impl From<RetireArg> for RetirePolicy {
    fn from(r: RetireArg) -> Self {
        match r {
            RetireArg::Destroy => RetirePolicy::Destroy,
            RetireArg::Hide => RetirePolicy::Hide,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Run one refresh and write the live decorations as JSON
    Decorate {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = RetireArg::Destroy)]
        retire: RetireArg,
        /// Write `<out>.provenance.json` (default)
        #[arg(long = "provenance", overrides_with = "no_provenance")]
        _provenance: bool,
        #[arg(long = "no-provenance")]
        no_provenance: bool,
    },
    /// Print the segments each edge style finds, per loop
    Segments {
        #[arg(long)]
        scene: PathBuf,
    },
    /// Snap a point onto a loop boundary
    Anchor {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long = "loop", default_value_t = 0)]
        loop_index: usize,
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
    /// Write a seeded sample scene of star-shaped loops
    Sample {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 24)]
        vertices: usize,
        #[arg(long, default_value_t = 1)]
        loops: u64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Decorate {
            scene,
            out,
            retire,
            no_provenance,
            ..
        } => decorate(&scene, &out, retire.into(), !no_provenance, cmd.tag),
        Action::Segments { scene } => {
            println!("{}", serde_json::to_string_pretty(&segments(&scene)?)?);
            Ok(())
        }
        Action::Anchor {
            scene,
            loop_index,
            x,
            y,
        } => {
            println!("{}", serde_json::to_string_pretty(&anchor(&scene, loop_index, x, y)?)?);
            Ok(())
        }
        Action::Sample {
            out,
            vertices,
            loops,
            seed,
        } => sample(&out, vertices, loops, seed),
        Action::Report => report(cmd.tag),
    }
}

fn decorate(
    scene_path: &Path,
    out: &Path,
    policy: RetirePolicy,
    write_provenance: bool,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(scene = %scene_path.display(), out = %out.display(), ?policy, tag = ?tag, "decorate");
    let (source, profile) = SceneFile::load(scene_path)?.into_parts()?;
    let mut host = SceneHost::new();
    let mut platform: Platform<SceneHost> = Platform::new(source)
        .with_profile(Arc::new(profile))
        .with_policy(policy);
    let report = platform.refresh(&mut host);
    tracing::info!(
        loops = report.loops,
        segments = report.segments,
        sprites = report.caps + report.corners + report.junctions,
        "refreshed"
    );

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let doc = output::snapshot(&platform, &report);
    fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;

    if write_provenance {
        let payload = provenance::Payload::new(json!({
            "retire": format!("{policy:?}").to_lowercase(),
            "segments": report.segments,
        }))
        .with_input(scene_path)
        .with_tag(tag);
        let path = provenance::write_sidecar(out, payload)?;
        tracing::info!(provenance = %path.display(), "sidecar written");
    }
    Ok(())
}

fn segments(scene_path: &Path) -> Result<serde_json::Value> {
    let (source, profile) = SceneFile::load(scene_path)?.into_parts()?;
    let layouts = layout(&source.loops, &profile, &GeomCfg::default());
    let loops: Vec<_> = layouts
        .iter()
        .enumerate()
        .map(|(li, ll)| {
            let styles: Vec<_> = ll
                .styles
                .iter()
                .zip(profile.edge_styles())
                .map(|(sl, style)| {
                    json!({
                        "name": style.name,
                        "segments": sl.segments.iter().map(|s| json!({
                            "start": s.start,
                            "closed": s.closed,
                            "points": s.points.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
                        })).collect::<Vec<_>>(),
                        "corners": sl.corners.iter().map(|c| json!({
                            "segment": c.segment,
                            "point": c.point,
                            "corner": c.corner,
                        })).collect::<Vec<_>>(),
                    })
                })
                .collect();
            json!({ "loop": li, "styles": styles, "junctions": ll.junctions.len() })
        })
        .collect();
    tracing::info!(scene = %scene_path.display(), loops = loops.len(), "segments");
    Ok(json!({ "loops": loops }))
}

fn anchor(scene_path: &Path, loop_index: usize, x: f64, y: f64) -> Result<serde_json::Value> {
    let (source, _) = SceneFile::load(scene_path)?.into_parts()?;
    let Some(points) = source.loops.get(loop_index) else {
        bail!("scene has {} loops; no loop {loop_index}", source.loops.len());
    };
    let a = edgeloom::geom::snap_anchor(Vec2::new(x, y), points)
        .with_context(|| format!("loop {loop_index} has no vertices"))?;
    tracing::info!(loop_index, edge = a.edge, "anchor");
    Ok(json!({
        "position": [a.position.x, a.position.y],
        "rotation": a.rotation,
        "edge": a.edge,
    }))
}

fn sample(out: &Path, vertices: usize, loops: u64, seed: u64) -> Result<()> {
    tracing::info!(out = %out.display(), vertices, loops, seed, "sample");
    let cfg = StarCfg {
        size: LoopSize::Exact(vertices),
        ..StarCfg::default()
    };
    let corner = |kind| CornerDto {
        kind,
        min_angle_deg: 30.0,
        normal_range_deg: None,
        distort: true,
        sprite: SpriteDto::default(),
    };
    let style = |name: &str, range: AngleRange| EdgeStyleDto {
        name: name.to_string(),
        range_deg: Some([range.begin.to_degrees(), range.end.to_degrees()]),
        disabled: false,
        line: Default::default(),
        caps: None,
        corners: vec![corner(CornerKindDto::Convex), corner(CornerKindDto::Concave)],
    };
    let scene = SceneFile {
        loops: (0..loops)
            .map(|index| {
                draw_star_loop(cfg, ReplayToken { seed, index })
                    .into_iter()
                    .map(|p| [p.x, p.y])
                    .collect()
            })
            .collect(),
        invert: false,
        profile: ProfileDto {
            fill: None,
            edge_styles: vec![
                style("top", AngleRange::from_degrees(45.0, 135.0)),
                style("wall", AngleRange::from_degrees(135.0, 45.0)),
            ],
            junctions: Vec::new(),
        },
    };
    scene.save(out)
}

fn report(tag: Option<String>) -> Result<()> {
    let doc = provenance::document(provenance::Payload::new(json!({})).with_tag(tag), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
