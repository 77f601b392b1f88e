//! Edge styles: angular zone, line appearance, caps, and corner candidates.

use nalgebra::Vector2;

use crate::fingerprint::{Fingerprint, Fold};
use crate::geom::{AngleRange, Edge, GeomCfg};

use super::corner::{CornerStyle, SpriteStyle};

/// Width used for untextured lines before the multiplier.
pub const DEFAULT_LINE_WIDTH: f64 = 10.0;

/// Reference to a host texture: resource path plus pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureRef {
    pub path: String,
    pub size: Vector2<f64>,
}

impl TextureRef {
    pub fn new(path: impl Into<String>, size: Vector2<f64>) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TextureMode {
    None,
    #[default]
    Tile,
    Stretch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum JointMode {
    Sharp,
    Bevel,
    #[default]
    Round,
}

/// Linear RGBA tint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Non-geometric line appearance. Opaque to segmentation.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub texture: Option<TextureRef>,
    pub width_multiplier: f64,
    pub texture_mode: TextureMode,
    pub joint_mode: JointMode,
    pub tint: Rgba,
    pub gradient: Option<String>,
    pub material: Option<String>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            texture: None,
            width_multiplier: 1.0,
            texture_mode: TextureMode::Tile,
            joint_mode: JointMode::Round,
            tint: Rgba::WHITE,
            gradient: None,
            material: None,
        }
    }
}

impl LineStyle {
    /// Texture height (or `DEFAULT_LINE_WIDTH` untextured) times the multiplier.
    pub fn width(&self) -> f64 {
        let base = self
            .texture
            .as_ref()
            .map_or(DEFAULT_LINE_WIDTH, |t| t.size.y);
        base * self.width_multiplier
    }
}

/// Sprites placed at the two ends of every open segment.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CapStyle {
    pub enabled: bool,
    pub begin: Option<SpriteStyle>,
    pub end: Option<SpriteStyle>,
}

/// One decorated zone of the boundary: edges whose outward normal lies in `range`.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
    /// Display name; junction styles refer to edge styles by it.
    pub name: String,
    pub range: AngleRange,
    /// Disabled styles are skipped before segmentation.
    pub disabled: bool,
    pub line: LineStyle,
    pub caps: CapStyle,
    /// Candidates evaluated at interior segment points, in declaration order.
    pub corners: Vec<CornerStyle>,
}

impl EdgeStyle {
    pub fn new(name: impl Into<String>, range: AngleRange) -> Self {
        Self {
            name: name.into(),
            range,
            disabled: false,
            line: LineStyle::default(),
            caps: CapStyle::default(),
            corners: Vec::new(),
        }
    }

    pub fn with_corner(mut self, corner: CornerStyle) -> Self {
        self.corners.push(corner);
        self
    }

    /// Does the edge's outward normal fall in this style's zone?
    #[inline]
    pub fn test(&self, edge: &Edge, cfg: &GeomCfg) -> bool {
        self.test_angle(edge.normal_angle(), cfg)
    }

    #[inline]
    pub fn test_angle(&self, normal_angle: f64, cfg: &GeomCfg) -> bool {
        self.range.contains_eps(normal_angle, cfg.eps_angle)
    }

    /// The zone covers every direction.
    #[inline]
    pub fn covers_full_circle(&self, cfg: &GeomCfg) -> bool {
        self.range.is_full(cfg.eps_angle)
    }

    #[inline]
    pub fn line_width(&self) -> f64 {
        self.line.width()
    }
}

impl Fingerprint for TextureRef {
    fn fold_into(&self, fold: &mut Fold) {
        fold.str(&self.path).vec2(self.size);
    }
}

impl Fingerprint for Rgba {
    fn fold_into(&self, fold: &mut Fold) {
        fold.f32(self.r).f32(self.g).f32(self.b).f32(self.a);
    }
}

impl Fingerprint for LineStyle {
    fn fold_into(&self, fold: &mut Fold) {
        fold.option(self.texture.as_ref())
            .f64(self.width_multiplier)
            .word(self.texture_mode as u64)
            .word(self.joint_mode as u64);
        self.tint.fold_into(fold);
        fold.option(self.gradient.as_ref())
            .option(self.material.as_ref());
    }
}

impl Fingerprint for CapStyle {
    fn fold_into(&self, fold: &mut Fold) {
        fold.bool(self.enabled)
            .option(self.begin.as_ref())
            .option(self.end.as_ref());
    }
}

impl Fingerprint for EdgeStyle {
    fn fold_into(&self, fold: &mut Fold) {
        fold.str(&self.name);
        self.range.fold_into(fold);
        fold.bool(self.disabled);
        self.line.fold_into(fold);
        self.caps.fold_into(fold);
        fold.slice(&self.corners);
    }
}
