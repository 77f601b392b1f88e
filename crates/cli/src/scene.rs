//! JSON scene files: vertex loops plus a decoration profile.
//!
//! Angles are authored in degrees (`*_deg`); fill rotation keeps the profile's
//! units of π. Everything optional has a serde default so small scenes stay small.

use anyhow::{Context, Result};
use edgeloom::geom::AngleRange;
use edgeloom::platform::SourceGeometry;
use edgeloom::style::{
    CapStyle, CornerKind, CornerStyle, EdgeFilter, EdgeStyle, FillStyle, JointMode, JunctionStyle,
    LineStyle, Profile, Rgba, SpriteStyle, TextureMode, TextureRef,
};
use edgeloom::{Vec2, Vertex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneFile {
    pub loops: Vec<Vec<[f64; 2]>>,
    #[serde(default)]
    pub invert: bool,
    pub profile: ProfileDto,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileDto {
    #[serde(default)]
    pub fill: Option<FillDto>,
    #[serde(default)]
    pub edge_styles: Vec<EdgeStyleDto>,
    #[serde(default)]
    pub junctions: Vec<JunctionDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextureDto {
    pub path: String,
    pub size: [f64; 2],
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FillDto {
    #[serde(default)]
    pub texture: Option<TextureDto>,
    #[serde(default)]
    pub offset: [f64; 2],
    #[serde(default = "unit_scale")]
    pub scale: [f64; 2],
    /// Units of π.
    #[serde(default)]
    pub rotation: f64,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureModeDto {
    None,
    #[default]
    Tile,
    Stretch,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointModeDto {
    Sharp,
    Bevel,
    #[default]
    Round,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineDto {
    #[serde(default)]
    pub texture: Option<TextureDto>,
    #[serde(default = "one")]
    pub width_multiplier: f64,
    #[serde(default)]
    pub texture_mode: TextureModeDto,
    #[serde(default)]
    pub joint_mode: JointModeDto,
    #[serde(default = "white")]
    pub tint: [f32; 4],
}

impl Default for LineDto {
    fn default() -> Self {
        Self {
            texture: None,
            width_multiplier: 1.0,
            texture_mode: TextureModeDto::default(),
            joint_mode: JointModeDto::default(),
            tint: white(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SpriteDto {
    #[serde(default)]
    pub texture: Option<TextureDto>,
    #[serde(default)]
    pub offset: [f64; 2],
    #[serde(default = "unit_scale")]
    pub scale: [f64; 2],
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub flip_h: bool,
    #[serde(default)]
    pub flip_v: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapsDto {
    #[serde(default)]
    pub begin: Option<SpriteDto>,
    #[serde(default)]
    pub end: Option<SpriteDto>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerKindDto {
    #[default]
    Convex,
    Concave,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CornerDto {
    #[serde(default)]
    pub kind: CornerKindDto,
    #[serde(default = "default_min_corner_deg")]
    pub min_angle_deg: f64,
    /// Omitted: every direction.
    #[serde(default)]
    pub normal_range_deg: Option<[f64; 2]>,
    #[serde(default = "yes")]
    pub distort: bool,
    #[serde(default)]
    pub sprite: SpriteDto,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeStyleDto {
    pub name: String,
    /// Omitted: every direction.
    #[serde(default)]
    pub range_deg: Option<[f64; 2]>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub line: LineDto,
    #[serde(default)]
    pub caps: Option<CapsDto>,
    #[serde(default)]
    pub corners: Vec<CornerDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JunctionDto {
    pub corner: CornerDto,
    /// Edge style names; omitted means every style.
    #[serde(default)]
    pub edges: Option<Vec<String>>,
}

fn unit_scale() -> [f64; 2] {
    [1.0, 1.0]
}

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

fn white() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

fn default_min_corner_deg() -> f64 {
    30.0
}

fn vec2(v: [f64; 2]) -> Vec2<f64> {
    Vec2::new(v[0], v[1])
}

fn range(deg: Option<[f64; 2]>) -> AngleRange {
    deg.map_or(AngleRange::FULL, |[b, e]| AngleRange::from_degrees(b, e))
}

impl From<TextureDto> for TextureRef {
    fn from(t: TextureDto) -> Self {
        TextureRef::new(t.path, vec2(t.size))
    }
}

impl From<SpriteDto> for SpriteStyle {
    fn from(s: SpriteDto) -> Self {
        SpriteStyle {
            texture: s.texture.map(Into::into),
            offset: vec2(s.offset),
            scale: vec2(s.scale),
            rotation: s.rotation_deg.to_radians(),
            flip_h: s.flip_h,
            flip_v: s.flip_v,
        }
    }
}

impl From<CornerDto> for CornerStyle {
    fn from(c: CornerDto) -> Self {
        let kind = match c.kind {
            CornerKindDto::Convex => CornerKind::Convex,
            CornerKindDto::Concave => CornerKind::Concave,
        };
        CornerStyle {
            kind,
            min_corner_angle: c.min_angle_deg.to_radians(),
            normal_range: range(c.normal_range_deg),
            distort: c.distort,
            sprite: c.sprite.into(),
        }
    }
}

impl From<LineDto> for LineStyle {
    fn from(l: LineDto) -> Self {
        LineStyle {
            texture: l.texture.map(Into::into),
            width_multiplier: l.width_multiplier,
            texture_mode: match l.texture_mode {
                TextureModeDto::None => TextureMode::None,
                TextureModeDto::Tile => TextureMode::Tile,
                TextureModeDto::Stretch => TextureMode::Stretch,
            },
            joint_mode: match l.joint_mode {
                JointModeDto::Sharp => JointMode::Sharp,
                JointModeDto::Bevel => JointMode::Bevel,
                JointModeDto::Round => JointMode::Round,
            },
            tint: Rgba {
                r: l.tint[0],
                g: l.tint[1],
                b: l.tint[2],
                a: l.tint[3],
            },
            ..LineStyle::default()
        }
    }
}

impl From<EdgeStyleDto> for EdgeStyle {
    fn from(s: EdgeStyleDto) -> Self {
        let mut style = EdgeStyle::new(s.name, range(s.range_deg));
        style.disabled = s.disabled;
        style.line = s.line.into();
        if let Some(caps) = s.caps {
            style.caps = CapStyle {
                enabled: true,
                begin: caps.begin.map(Into::into),
                end: caps.end.map(Into::into),
            };
        }
        style.corners = s.corners.into_iter().map(Into::into).collect();
        style
    }
}

impl From<FillDto> for FillStyle {
    fn from(f: FillDto) -> Self {
        FillStyle {
            enabled: true,
            texture: f.texture.map(Into::into),
            offset: vec2(f.offset),
            scale: vec2(f.scale),
            rotation: f.rotation,
        }
    }
}

impl From<ProfileDto> for Profile {
    fn from(p: ProfileDto) -> Self {
        let mut profile = Profile::with_edge_styles(p.edge_styles.into_iter().map(EdgeStyle::from));
        if let Some(fill) = p.fill {
            profile.fill = fill.into();
        }
        for j in p.junctions {
            profile.attach_junction_style(JunctionStyle {
                corner: j.corner.into(),
                edges: j.edges.map_or(EdgeFilter::All, EdgeFilter::Named),
            });
        }
        profile
    }
}

impl SceneFile {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading scene {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating scene dir {}", parent.display()))?;
            }
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing scene {}", path.display()))
    }

    /// Split into core geometry and a validated profile.
    pub fn into_parts(self) -> Result<(SourceGeometry, Profile)> {
        let profile = Profile::from(self.profile);
        profile.validate().context("invalid profile")?;
        let loops = self
            .loops
            .into_iter()
            .map(|l| l.into_iter().map(vec2).collect::<Vec<Vertex>>())
            .collect();
        let source = SourceGeometry {
            loops,
            invert: self.invert,
        };
        Ok((source, profile))
    }
}
