//! Structural fingerprints and change detection.
//!
//! A fingerprint is an order-sensitive fold over every field that affects the
//! derived geometry. Each word is mixed multiplicatively (SplitMix64 finalizer)
//! before it is combined, so reordering, sign flips, or moving a value between
//! fields changes the result. Collisions remain possible; they would only cause a
//! missed refresh, never a wrong one.

use nalgebra::Vector2;

/// SplitMix64 finalizer.
#[inline]
pub(crate) fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58476d1ce4e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}

/// Running fold state.
#[derive(Clone, Copy, Debug)]
pub struct Fold {
    state: u64,
    len: u64,
}

impl Default for Fold {
    fn default() -> Self {
        Self::new()
    }
}

impl Fold {
    #[inline]
    pub fn new() -> Self {
        Self {
            state: 0x243f6a8885a308d3,
            len: 0,
        }
    }

    #[inline]
    pub fn word(&mut self, w: u64) -> &mut Self {
        self.len = self.len.wrapping_add(1);
        self.state = mix64(self.state ^ mix64(w.wrapping_add(self.len))).wrapping_mul(0x9e3779b97f4a7c15);
        self
    }

    /// Floats fold by bit pattern; `-0.0` folds as `0.0` and every NaN folds alike.
    #[inline]
    pub fn f64(&mut self, x: f64) -> &mut Self {
        let bits = if x == 0.0 {
            0
        } else if x.is_nan() {
            0x7ff8_0000_0000_0000
        } else {
            x.to_bits()
        };
        self.word(bits)
    }

    #[inline]
    pub fn f32(&mut self, x: f32) -> &mut Self {
        self.f64(f64::from(x))
    }

    #[inline]
    pub fn bool(&mut self, b: bool) -> &mut Self {
        self.word(b as u64)
    }

    #[inline]
    pub fn usize(&mut self, n: usize) -> &mut Self {
        self.word(n as u64)
    }

    #[inline]
    pub fn vec2(&mut self, v: Vector2<f64>) -> &mut Self {
        self.f64(v.x).f64(v.y)
    }

    pub fn str(&mut self, s: &str) -> &mut Self {
        self.usize(s.len());
        for chunk in s.as_bytes().chunks(8) {
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            self.word(u64::from_le_bytes(buf));
        }
        self
    }

    pub fn option<T: Fingerprint>(&mut self, v: Option<&T>) -> &mut Self {
        match v {
            Some(inner) => {
                self.word(1);
                inner.fold_into(self);
            }
            None => {
                self.word(0);
            }
        }
        self
    }

    pub fn slice<T: Fingerprint>(&mut self, items: &[T]) -> &mut Self {
        self.usize(items.len());
        for item in items {
            item.fold_into(self);
        }
        self
    }

    #[inline]
    pub fn finish(&self) -> u64 {
        mix64(self.state ^ self.len)
    }
}

/// Types that contribute to a structural fingerprint.
pub trait Fingerprint {
    fn fold_into(&self, fold: &mut Fold);

    fn fingerprint(&self) -> u64 {
        let mut fold = Fold::new();
        self.fold_into(&mut fold);
        fold.finish()
    }
}

impl Fingerprint for Vector2<f64> {
    fn fold_into(&self, fold: &mut Fold) {
        fold.vec2(*self);
    }
}

impl Fingerprint for String {
    fn fold_into(&self, fold: &mut Fold) {
        fold.str(self);
    }
}

impl<T: Fingerprint> Fingerprint for Vec<T> {
    fn fold_into(&self, fold: &mut Fold) {
        fold.slice(self);
    }
}

/// Remembers the last fingerprint and reports when it changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChangeDetector {
    last: Option<u64>,
}

impl ChangeDetector {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last consumed fingerprint, if any.
    #[inline]
    pub fn last(&self) -> Option<u64> {
        self.last
    }

    /// True iff `current` differs from the last consumed value (always true the first time).
    /// The new value is stored, so an immediate repeat returns false.
    #[inline]
    pub fn consume_changes(&mut self, current: &impl Fingerprint) -> bool {
        self.consume_fingerprint(current.fingerprint())
    }

    pub fn consume_fingerprint(&mut self, fp: u64) -> bool {
        if self.last == Some(fp) {
            return false;
        }
        self.last = Some(fp);
        true
    }

    /// Forget the stored value; the next consume reports a change.
    #[inline]
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn fp_of(points: &[Vector2<f64>]) -> u64 {
        points.to_vec().fingerprint()
    }

    #[test]
    fn order_and_sign_sensitive() {
        let a = vector![1.0, 2.0];
        let b = vector![2.0, 1.0];
        assert_ne!(fp_of(&[a, b]), fp_of(&[b, a]));
        assert_ne!(fp_of(&[a]), fp_of(&[-a]));
        assert_ne!(fp_of(&[a]), fp_of(&[a, a]));
        assert_eq!(fp_of(&[vector![0.0, 1.0]]), fp_of(&[vector![-0.0, 1.0]]));
    }

    #[test]
    fn moving_a_value_between_fields_changes_the_fold() {
        // (x=1, y=0) + (x=0, y=1) sums equal; the fold must still differ.
        let p = fp_of(&[vector![1.0, 0.0], vector![0.0, 1.0]]);
        let q = fp_of(&[vector![0.0, 1.0], vector![1.0, 0.0]]);
        assert_ne!(p, q);
        let mut f1 = Fold::new();
        f1.str("ab").str("c");
        let mut f2 = Fold::new();
        f2.str("a").str("bc");
        assert_ne!(f1.finish(), f2.finish());
    }

    #[test]
    fn detector_fires_once_per_state() {
        let mut det = ChangeDetector::new();
        let mut pts = vec![vector![0.0, 0.0], vector![1.0, 0.0]];
        assert!(det.consume_changes(&pts));
        assert!(!det.consume_changes(&pts));
        assert!(!det.consume_changes(&pts));
        pts[1].x = 1.5;
        assert!(det.consume_changes(&pts));
        assert!(!det.consume_changes(&pts));
        det.invalidate();
        assert!(det.consume_changes(&pts));
    }
}
