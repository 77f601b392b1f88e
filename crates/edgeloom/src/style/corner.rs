//! Sprite and corner styles.

use nalgebra::Vector2;

use crate::fingerprint::{Fingerprint, Fold};
use crate::geom::{AngleRange, Vertex};

use super::edge::TextureRef;

/// Transform and texture applied to a placed sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteStyle {
    pub texture: Option<TextureRef>,
    /// Added to the placement position.
    pub offset: Vector2<f64>,
    pub scale: Vector2<f64>,
    pub rotation: f64,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Default for SpriteStyle {
    fn default() -> Self {
        Self {
            texture: None,
            offset: Vector2::zeros(),
            scale: Vector2::new(1.0, 1.0),
            rotation: 0.0,
            flip_h: false,
            flip_v: false,
        }
    }
}

impl SpriteStyle {
    pub fn textured(path: impl Into<String>, size: Vector2<f64>) -> Self {
        Self {
            texture: Some(TextureRef::new(path, size)),
            ..Self::default()
        }
    }

    /// Place this sprite at a boundary point facing `rotation`.
    pub fn transform_at(&self, position: Vertex, rotation: f64) -> SpriteTransform {
        SpriteTransform {
            texture: self.texture.clone(),
            position: position + self.offset,
            rotation: rotation + self.rotation,
            scale: self.scale,
            flip_h: self.flip_h,
            flip_v: self.flip_v,
        }
    }
}

/// Final sprite placement handed to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteTransform {
    pub texture: Option<TextureRef>,
    pub position: Vertex,
    /// Radians.
    pub rotation: f64,
    pub scale: Vector2<f64>,
    pub flip_h: bool,
    pub flip_v: bool,
}

/// Which way a corner must turn to qualify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CornerKind {
    /// Points outward, like the top of a hill (left turn on a CCW loop).
    #[default]
    Convex,
    /// Points inward, like the inside of a bowl (right turn on a CCW loop).
    Concave,
}

impl CornerKind {
    /// Threshold test on the signed turning angle.
    #[inline]
    pub fn admits(self, corner_angle: f64, min_corner_angle: f64, eps: f64) -> bool {
        match self {
            CornerKind::Convex => corner_angle > min_corner_angle - eps,
            CornerKind::Concave => corner_angle < -min_corner_angle + eps,
        }
    }
}

/// Decoration placed at vertices whose corner is sharp enough and faces the right way.
#[derive(Clone, Debug, PartialEq)]
pub struct CornerStyle {
    pub kind: CornerKind,
    /// Minimum turning magnitude in radians, in [0, π].
    pub min_corner_angle: f64,
    /// Allowed directions of the outward corner bisector.
    pub normal_range: AngleRange,
    /// Whether hosts may stretch the sprite to fit the corner.
    pub distort: bool,
    pub sprite: SpriteStyle,
}

impl Default for CornerStyle {
    fn default() -> Self {
        Self {
            kind: CornerKind::Convex,
            min_corner_angle: 30f64.to_radians(),
            normal_range: AngleRange::FULL,
            distort: true,
            sprite: SpriteStyle::default(),
        }
    }
}

impl CornerStyle {
    pub fn new(kind: CornerKind, min_corner_angle: f64) -> Self {
        Self {
            kind,
            min_corner_angle,
            ..Self::default()
        }
    }

    pub fn with_normal_range(mut self, range: AngleRange) -> Self {
        self.normal_range = range;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteStyle) -> Self {
        self.sprite = sprite;
        self
    }
}

impl Fingerprint for SpriteStyle {
    fn fold_into(&self, fold: &mut Fold) {
        fold.option(self.texture.as_ref())
            .vec2(self.offset)
            .vec2(self.scale)
            .f64(self.rotation)
            .bool(self.flip_h)
            .bool(self.flip_v);
    }
}

impl Fingerprint for CornerStyle {
    fn fold_into(&self, fold: &mut Fold) {
        fold.word(match self.kind {
            CornerKind::Convex => 1,
            CornerKind::Concave => 2,
        })
        .f64(self.min_corner_angle);
        self.normal_range.fold_into(fold);
        fold.bool(self.distort);
        self.sprite.fold_into(fold);
    }
}

impl Fingerprint for AngleRange {
    fn fold_into(&self, fold: &mut Fold) {
        fold.f64(self.begin).f64(self.end);
    }
}
