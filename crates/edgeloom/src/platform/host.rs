//! The seam between decoration layout and whatever draws it.
//!
//! A host creates opaque line and sprite objects on request; the platform owns
//! them in pools between refreshes and hands them back for destruction.
//! `SceneHost` is an in-memory host whose objects are plain data.

use crate::geom::Vertex;
use crate::pool::{Decoration, Factory};
use crate::style::{LineStyle, SpriteTransform};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DecorationKind {
    /// One per segment.
    Line,
    /// Caps first, then corners, of one edge style.
    Sprite,
    /// Junction sprites of one loop.
    Junction,
}

/// Stable slot identity of a pooled object across refreshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DecorationKey {
    pub loop_index: usize,
    /// Edge style index; `None` for junctions.
    pub style: Option<usize>,
    pub kind: DecorationKind,
    pub index: usize,
}

/// A host polyline following one segment.
pub trait LineDecoration: Decoration {
    fn apply(&mut self, points: &[Vertex], closed: bool, style: &LineStyle);
}

/// A host sprite placed at a cap, corner, or junction.
pub trait SpriteDecoration: Decoration {
    fn place(&mut self, transform: &SpriteTransform);
}

/// Creates and destroys host objects.
pub trait DecorationHost {
    type Line: LineDecoration;
    type Sprite: SpriteDecoration;

    fn create_line(&mut self, key: DecorationKey) -> Self::Line;
    fn create_sprite(&mut self, key: DecorationKey) -> Self::Sprite;

    fn destroy_line(&mut self, line: Self::Line) {
        drop(line);
    }

    fn destroy_sprite(&mut self, sprite: Self::Sprite) {
        drop(sprite);
    }
}

pub(crate) struct Lines<'a, H> {
    pub host: &'a mut H,
    pub key: DecorationKey,
}

impl<H: DecorationHost> Factory<H::Line> for Lines<'_, H> {
    fn create(&mut self, slot: usize) -> H::Line {
        self.host.create_line(DecorationKey {
            index: slot,
            ..self.key
        })
    }

    fn destroy(&mut self, obj: H::Line) {
        self.host.destroy_line(obj);
    }
}

pub(crate) struct Sprites<'a, H> {
    pub host: &'a mut H,
    pub key: DecorationKey,
}

impl<H: DecorationHost> Factory<H::Sprite> for Sprites<'_, H> {
    fn create(&mut self, slot: usize) -> H::Sprite {
        self.host.create_sprite(DecorationKey {
            index: slot,
            ..self.key
        })
    }

    fn destroy(&mut self, obj: H::Sprite) {
        self.host.destroy_sprite(obj);
    }
}

/// Line object of `SceneHost`.
#[derive(Clone, Debug, PartialEq)]
pub struct LineNode {
    pub key: DecorationKey,
    pub points: Vec<Vertex>,
    pub closed: bool,
    pub width: f64,
    pub style: LineStyle,
    pub visible: bool,
}

impl Decoration for LineNode {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl LineDecoration for LineNode {
    fn apply(&mut self, points: &[Vertex], closed: bool, style: &LineStyle) {
        self.points.clear();
        self.points.extend_from_slice(points);
        self.closed = closed;
        self.width = style.width();
        self.style = style.clone();
    }
}

/// Sprite object of `SceneHost`. `transform` is `None` until first placed.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteNode {
    pub key: DecorationKey,
    pub transform: Option<SpriteTransform>,
    pub visible: bool,
}

impl Decoration for SpriteNode {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl SpriteDecoration for SpriteNode {
    fn place(&mut self, transform: &SpriteTransform) {
        self.transform = Some(transform.clone());
    }
}

/// In-memory host; counts every object it creates and destroys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneHost {
    pub lines_created: usize,
    pub lines_destroyed: usize,
    pub sprites_created: usize,
    pub sprites_destroyed: usize,
}

impl SceneHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects created and not yet destroyed.
    pub fn live(&self) -> usize {
        self.lines_created + self.sprites_created - self.lines_destroyed - self.sprites_destroyed
    }
}

impl DecorationHost for SceneHost {
    type Line = LineNode;
    type Sprite = SpriteNode;

    fn create_line(&mut self, key: DecorationKey) -> LineNode {
        self.lines_created += 1;
        LineNode {
            key,
            points: Vec::new(),
            closed: false,
            width: 0.0,
            style: LineStyle::default(),
            visible: true,
        }
    }

    fn create_sprite(&mut self, key: DecorationKey) -> SpriteNode {
        self.sprites_created += 1;
        SpriteNode {
            key,
            transform: None,
            visible: true,
        }
    }

    fn destroy_line(&mut self, _line: LineNode) {
        self.lines_destroyed += 1;
    }

    fn destroy_sprite(&mut self, _sprite: SpriteNode) {
        self.sprites_destroyed += 1;
    }
}
