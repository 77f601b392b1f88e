//! Style model: what to draw along each angular zone of the boundary.
//!
//! Ownership: `Profile` 1..* `EdgeStyle` 1..* `CornerStyle`, plus profile-level
//! `JunctionStyle`s that refer back to edge styles by name. Everything here is
//! read-only during a refresh and participates in change detection through
//! `Fingerprint`.

mod corner;
mod edge;
mod profile;

pub use corner::{CornerKind, CornerStyle, SpriteStyle, SpriteTransform};
pub use edge::{
    CapStyle, EdgeStyle, JointMode, LineStyle, Rgba, TextureMode, TextureRef, DEFAULT_LINE_WIDTH,
};
pub use profile::{EdgeFilter, FillStyle, FillTransform, JunctionStyle, Profile, ProfileError};
