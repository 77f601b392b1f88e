//! Reusable style profile: fill settings, edge styles, and junction styles.
//!
//! A profile is shared read-only by every polygon owner that uses it (wrap it in
//! an `Arc`). Its child collections only change through the attach/detach/edit
//! operations below, each of which bumps `revision()`.

use std::f64::consts::PI;
use std::fmt;

use nalgebra::Vector2;

use crate::fingerprint::{Fingerprint, Fold};
use crate::geom::AngleRange;

use super::corner::CornerStyle;
use super::edge::{EdgeStyle, TextureRef};

/// Texture transform override for the polygon fill.
#[derive(Clone, Debug, PartialEq)]
pub struct FillStyle {
    pub enabled: bool,
    pub texture: Option<TextureRef>,
    /// Pixels.
    pub offset: Vector2<f64>,
    pub scale: Vector2<f64>,
    /// In units of π, [0, 2].
    pub rotation: f64,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            enabled: false,
            texture: None,
            offset: Vector2::zeros(),
            scale: Vector2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

/// Effective fill texture transform handed to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct FillTransform {
    pub texture: Option<TextureRef>,
    pub offset: Vector2<f64>,
    /// Reciprocal of the authored scale (texture space shrinks as the fill grows).
    pub scale: Vector2<f64>,
    /// Radians.
    pub rotation: f64,
}

impl FillStyle {
    /// `None` when the override is disabled.
    pub fn texture_transform(&self) -> Option<FillTransform> {
        if !self.enabled {
            return None;
        }
        let inv = |s: f64| if s != 0.0 { 1.0 / s } else { 0.0 };
        Some(FillTransform {
            texture: self.texture.clone(),
            offset: self.offset,
            scale: Vector2::new(inv(self.scale.x), inv(self.scale.y)),
            rotation: self.rotation * PI,
        })
    }
}

/// Which edge styles a junction style applies to.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum EdgeFilter {
    #[default]
    All,
    /// Edge style names; names that match no style are ignored.
    Named(Vec<String>),
}

/// Corner style evaluated where segments of the selected edge styles begin or end.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct JunctionStyle {
    pub corner: CornerStyle,
    pub edges: EdgeFilter,
}

/// Profile validation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    NonFiniteAngle { style: String, field: &'static str },
    AngleOutOfDomain { style: String, field: &'static str, value: f64 },
    NegativeCornerAngle { style: String, value: f64 },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteAngle { style, field } => {
                write!(f, "style '{style}': {field} is not finite")
            }
            Self::AngleOutOfDomain { style, field, value } => {
                write!(f, "style '{style}': {field} = {value} outside [-π, π]")
            }
            Self::NegativeCornerAngle { style, value } => {
                write!(f, "style '{style}': min_corner_angle = {value} is negative")
            }
        }
    }
}

impl std::error::Error for ProfileError {}

/// Ordered edge styles plus fill and junction configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub fill: FillStyle,
    edge_styles: Vec<EdgeStyle>,
    junction_styles: Vec<JunctionStyle>,
    revision: u64,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edge_styles(styles: impl IntoIterator<Item = EdgeStyle>) -> Self {
        let mut p = Self::new();
        for s in styles {
            p.attach_edge_style(s);
        }
        p
    }

    #[inline]
    pub fn edge_styles(&self) -> &[EdgeStyle] {
        &self.edge_styles
    }

    #[inline]
    pub fn junction_styles(&self) -> &[JunctionStyle] {
        &self.junction_styles
    }

    /// Bumped by every attach/detach/edit.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append an edge style; returns its index.
    pub fn attach_edge_style(&mut self, style: EdgeStyle) -> usize {
        self.edge_styles.push(style);
        self.revision += 1;
        self.edge_styles.len() - 1
    }

    /// Insert at `index` (clamped to the current length); returns the actual index.
    pub fn insert_edge_style(&mut self, index: usize, style: EdgeStyle) -> usize {
        let index = index.min(self.edge_styles.len());
        self.edge_styles.insert(index, style);
        self.revision += 1;
        index
    }

    pub fn detach_edge_style(&mut self, index: usize) -> Option<EdgeStyle> {
        if index >= self.edge_styles.len() {
            return None;
        }
        self.revision += 1;
        Some(self.edge_styles.remove(index))
    }

    pub fn edit_edge_style<R>(&mut self, index: usize, f: impl FnOnce(&mut EdgeStyle) -> R) -> Option<R> {
        let style = self.edge_styles.get_mut(index)?;
        let out = f(style);
        self.revision += 1;
        Some(out)
    }

    pub fn attach_junction_style(&mut self, style: JunctionStyle) -> usize {
        self.junction_styles.push(style);
        self.revision += 1;
        self.junction_styles.len() - 1
    }

    pub fn detach_junction_style(&mut self, index: usize) -> Option<JunctionStyle> {
        if index >= self.junction_styles.len() {
            return None;
        }
        self.revision += 1;
        Some(self.junction_styles.remove(index))
    }

    pub fn edit_junction_style<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut JunctionStyle) -> R,
    ) -> Option<R> {
        let style = self.junction_styles.get_mut(index)?;
        let out = f(style);
        self.revision += 1;
        Some(out)
    }

    /// Edge style indices whose name equals `name`.
    pub fn edge_indices_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.edge_styles
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.name == name)
            .map(|(i, _)| i)
    }

    /// Resolve a junction style's filter to edge style indices (sorted, unique).
    pub fn resolve_filter(&self, filter: &EdgeFilter) -> Vec<usize> {
        match filter {
            EdgeFilter::All => (0..self.edge_styles.len()).collect(),
            EdgeFilter::Named(names) => {
                let mut out: Vec<usize> = names
                    .iter()
                    .flat_map(|n| self.edge_indices_named(n))
                    .collect();
                out.sort_unstable();
                out.dedup();
                out
            }
        }
    }

    /// Junction styles applicable to edge style `edge_index`, in declaration order.
    pub fn junctions_for(
        &self,
        edge_index: usize,
    ) -> impl Iterator<Item = (usize, &JunctionStyle)> + '_ {
        self.junction_styles
            .iter()
            .enumerate()
            .filter(move |(_, j)| self.resolve_filter(&j.edges).binary_search(&edge_index).is_ok())
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        for s in &self.edge_styles {
            check_range(&s.name, ["range.begin", "range.end"], &s.range)?;
            for c in &s.corners {
                check_corner(&s.name, c)?;
            }
        }
        for (i, j) in self.junction_styles.iter().enumerate() {
            check_corner(&format!("junction #{i}"), &j.corner)?;
        }
        Ok(())
    }
}

fn check_range(style: &str, fields: [&'static str; 2], r: &AngleRange) -> Result<(), ProfileError> {
    const SLACK: f64 = 1e-9;
    for (field, v) in fields.into_iter().zip([r.begin, r.end]) {
        if !v.is_finite() {
            return Err(ProfileError::NonFiniteAngle {
                style: style.to_string(),
                field,
            });
        }
        if v < -PI - SLACK || v > PI + SLACK {
            return Err(ProfileError::AngleOutOfDomain {
                style: style.to_string(),
                field,
                value: v,
            });
        }
    }
    Ok(())
}

fn check_corner(style: &str, c: &CornerStyle) -> Result<(), ProfileError> {
    check_range(style, ["normal_range.begin", "normal_range.end"], &c.normal_range)?;
    if !c.min_corner_angle.is_finite() {
        return Err(ProfileError::NonFiniteAngle {
            style: style.to_string(),
            field: "min_corner_angle",
        });
    }
    if c.min_corner_angle < 0.0 {
        return Err(ProfileError::NegativeCornerAngle {
            style: style.to_string(),
            value: c.min_corner_angle,
        });
    }
    Ok(())
}

impl Fingerprint for FillStyle {
    fn fold_into(&self, fold: &mut Fold) {
        fold.bool(self.enabled)
            .option(self.texture.as_ref())
            .vec2(self.offset)
            .vec2(self.scale)
            .f64(self.rotation);
    }
}

impl Fingerprint for EdgeFilter {
    fn fold_into(&self, fold: &mut Fold) {
        match self {
            EdgeFilter::All => {
                fold.word(0);
            }
            EdgeFilter::Named(names) => {
                fold.word(1).slice(names);
            }
        }
    }
}

impl Fingerprint for JunctionStyle {
    fn fold_into(&self, fold: &mut Fold) {
        self.corner.fold_into(fold);
        self.edges.fold_into(fold);
    }
}

impl Fingerprint for Profile {
    fn fold_into(&self, fold: &mut Fold) {
        self.fill.fold_into(fold);
        fold.slice(&self.edge_styles).slice(&self.junction_styles);
    }
}
