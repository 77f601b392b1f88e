//! Serializable snapshot of the live decorations after a refresh.

use edgeloom::geom::Winding;
use edgeloom::platform::{Platform, RefreshReport, SceneHost, SpriteNode};
use edgeloom::style::SpriteTransform;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Decorations {
    pub crate_version: &'static str,
    pub collision_winding: &'static str,
    pub fill: Option<FillOut>,
    pub summary: Summary,
    pub loops: Vec<LoopOut>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub loops: usize,
    pub segments: usize,
    pub caps: usize,
    pub corners: usize,
    pub junctions: usize,
    pub objects_created: usize,
}

#[derive(Debug, Serialize)]
pub struct FillOut {
    pub texture: Option<String>,
    pub offset: [f64; 2],
    pub scale: [f64; 2],
    pub rotation: f64,
}

#[derive(Debug, Serialize)]
pub struct LoopOut {
    pub index: usize,
    pub styles: Vec<StyleOut>,
    pub junctions: Vec<SpriteOut>,
}

#[derive(Debug, Serialize)]
pub struct StyleOut {
    pub name: String,
    pub lines: Vec<LineOut>,
    pub sprites: Vec<SpriteOut>,
}

#[derive(Debug, Serialize)]
pub struct LineOut {
    pub slot: usize,
    pub points: Vec<[f64; 2]>,
    pub closed: bool,
    pub width: f64,
    pub texture: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SpriteOut {
    pub slot: usize,
    pub texture: Option<String>,
    pub position: [f64; 2],
    pub rotation: f64,
    pub scale: [f64; 2],
    pub flip_h: bool,
    pub flip_v: bool,
}

fn sprite_out(node: &SpriteNode) -> Option<SpriteOut> {
    let SpriteTransform {
        texture,
        position,
        rotation,
        scale,
        flip_h,
        flip_v,
    } = node.transform.as_ref()?;
    Some(SpriteOut {
        slot: node.key.index,
        texture: texture.as_ref().map(|t| t.path.clone()),
        position: [position.x, position.y],
        rotation: *rotation,
        scale: [scale.x, scale.y],
        flip_h: *flip_h,
        flip_v: *flip_v,
    })
}

/// Collect the active (visible) objects of every pool.
pub fn snapshot(platform: &Platform<SceneHost>, report: &RefreshReport) -> Decorations {
    let names: Vec<String> = platform
        .profile()
        .map(|p| p.edge_styles().iter().map(|s| s.name.clone()).collect())
        .unwrap_or_default();
    let loops = platform
        .pools()
        .iter()
        .enumerate()
        .take(report.loops)
        .map(|(index, lp)| LoopOut {
            index,
            styles: lp
                .styles()
                .iter()
                .zip(&names)
                .map(|(sp, name)| StyleOut {
                    name: name.clone(),
                    lines: sp
                        .lines()
                        .active()
                        .iter()
                        .map(|l| LineOut {
                            slot: l.key.index,
                            points: l.points.iter().map(|p| [p.x, p.y]).collect(),
                            closed: l.closed,
                            width: l.width,
                            texture: l.style.texture.as_ref().map(|t| t.path.clone()),
                        })
                        .collect(),
                    sprites: sp.sprites().active().iter().filter_map(sprite_out).collect(),
                })
                .collect(),
            junctions: lp.junctions().active().iter().filter_map(sprite_out).collect(),
        })
        .collect();
    Decorations {
        crate_version: edgeloom::VERSION,
        collision_winding: match platform.collision_winding() {
            Winding::CounterClockwise => "ccw",
            Winding::Clockwise => "cw",
        },
        fill: platform.fill_transform().map(|f| FillOut {
            texture: f.texture.map(|t| t.path),
            offset: [f.offset.x, f.offset.y],
            scale: [f.scale.x, f.scale.y],
            rotation: f.rotation,
        }),
        summary: Summary {
            loops: report.loops,
            segments: report.segments,
            caps: report.caps,
            corners: report.corners,
            junctions: report.junctions,
            objects_created: report.lines.created + report.sprites.created,
        },
        loops,
    }
}
