//! Angular intervals over [-π, π] with wraparound.
//!
//! Encoding
//! - `begin <= end`: the direct interval `[begin, end]`.
//! - `begin > end`: wraps through ±π, i.e. `[begin, π] ∪ [-π, end]`.
//! - Whole circle: `end ≈ begin + 2π` (canonically `[-π, π]`, see `AngleRange::FULL`).
//! - `begin == end` is a single direction, never the whole circle.

use std::f64::consts::{PI, TAU};

use super::types::GeomCfg;

/// Closed angular interval in radians, domain [-π, π].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleRange {
    pub begin: f64,
    pub end: f64,
}

impl Default for AngleRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl AngleRange {
    /// Every direction.
    pub const FULL: AngleRange = AngleRange { begin: -PI, end: PI };

    #[inline]
    pub const fn new(begin: f64, end: f64) -> Self {
        Self { begin, end }
    }

    /// Build from degrees (authoring convenience).
    #[inline]
    pub fn from_degrees(begin: f64, end: f64) -> Self {
        Self::new(begin.to_radians(), end.to_radians())
    }

    /// A single direction.
    #[inline]
    pub const fn point(angle: f64) -> Self {
        Self::new(angle, angle)
    }

    #[inline]
    pub fn wraps(&self) -> bool {
        self.begin > self.end
    }

    /// True iff the range spans the whole circle (`end ≈ begin + 2π`).
    #[inline]
    pub fn is_full(&self, eps: f64) -> bool {
        (self.begin + TAU - self.end).abs() <= eps
    }

    /// Angular width in [0, 2π].
    #[inline]
    pub fn width(&self) -> f64 {
        if self.wraps() {
            TAU - (self.begin - self.end)
        } else {
            self.end - self.begin
        }
    }

    /// Membership test with the default tolerances.
    #[inline]
    pub fn contains(&self, angle: f64) -> bool {
        self.contains_eps(angle, GeomCfg::default().eps_angle)
    }

    /// Membership test with slack `eps` on both bounds.
    ///
    /// atan2 reports the exact leftward direction as either +π or -π depending on
    /// the sign of a zero; both are treated as the same direction on the seam.
    pub fn contains_eps(&self, angle: f64, eps: f64) -> bool {
        if !angle.is_finite() {
            return false;
        }
        if self.wraps() {
            return angle <= self.end + eps || angle >= self.begin - eps;
        }
        if self.begin - eps <= angle && angle <= self.end + eps {
            return true;
        }
        (angle + TAU - self.end).abs() <= eps || (angle - TAU - self.begin).abs() <= eps
    }
}
