//! Hypervector primitives: the core algebra.
//!
//! - **bind**: XOR two concepts into a reversible composite
//! - **bundle**: probabilistically absorb one vector's set bits into another
//! - **permute**: rotate bits to encode sequence position
//!
//! All operations are total over [`Hypervector`]; none can fail.

use crate::kernel::hypervector::{Hypervector, DIMENSIONS, TAIL_BITS, TAIL_MASK, WORDS};
use rand::RngCore;

/// Collection of hypervector primitive operations.
pub struct Primitives;

impl Primitives {
    /// Generate a random hypervector (each bit set with probability 0.5).
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Hypervector {
        Hypervector::random(rng)
    }

    /// Bind `b` into `a` in place (XOR).
    ///
    /// Binding is involutive: `bind(bind(a, b), b) == a` bit for bit, so
    /// "RedApple" bound with "Red" recovers "Apple".
    pub fn bind(a: &mut Hypervector, b: &Hypervector) {
        for (x, y) in a.words_mut().iter_mut().zip(b.words().iter()) {
            *x ^= *y;
        }
    }

    /// Non-mutating bind: returns `a XOR b`.
    pub fn bound(a: &Hypervector, b: &Hypervector) -> Hypervector {
        let mut out = a.clone();
        Self::bind(&mut out, b);
        out
    }

    /// Bundle `b` into `a` in place.
    ///
    /// Every bit set in `b` is also set in `a` with independent probability
    /// 0.5. Bits are never cleared, so this is monotonic and asymmetric
    /// rather than a majority vote. Repeated bundling drives `a` toward
    /// all-ones, and its resonance with unrelated vectors drifts away from
    /// 0.5 as density saturates.
    pub fn bundle<R: RngCore + ?Sized>(a: &mut Hypervector, b: &Hypervector, rng: &mut R) {
        for (x, y) in a.words_mut().iter_mut().zip(b.words().iter()) {
            *x |= *y & rng.next_u64();
        }
    }

    /// Rotate all bits one position toward higher indices.
    ///
    /// Bit `i` moves to `i + 1`; the last bit wraps to position 0.
    pub fn permute(a: &mut Hypervector) {
        let mut carry = a.get_bit(DIMENSIONS - 1) as u64;
        let words = a.words_mut();
        for word in words.iter_mut() {
            let out = *word >> 63;
            *word = (*word << 1) | carry;
            carry = out;
        }
        words[WORDS - 1] &= TAIL_MASK;
    }

    /// Inverse of [`Primitives::permute`]: bit `i` moves to `i - 1` and
    /// bit 0 wraps to the last position.
    pub fn unpermute(a: &mut Hypervector) {
        let words = a.words_mut();
        let wrapped = words[0] & 1;
        for i in 0..WORDS {
            let next_low = if i + 1 < WORDS { words[i + 1] & 1 } else { 0 };
            words[i] = (words[i] >> 1) | (next_low << 63);
        }
        words[WORDS - 1] &= TAIL_MASK;
        words[WORDS - 1] |= wrapped << (TAIL_BITS - 1);
    }

    /// Apply [`Primitives::permute`] `k` times (negative `k` unpermutes).
    pub fn permute_by(a: &mut Hypervector, k: i32) {
        let steps = k.rem_euclid(DIMENSIONS as i32);
        // Shorter to walk backwards past the halfway point.
        if steps as usize > DIMENSIONS / 2 {
            for _ in 0..(DIMENSIONS as i32 - steps) {
                Self::unpermute(a);
            }
        } else {
            for _ in 0..steps {
                Self::permute(a);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::similarity::Similarity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_bind_involution() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            let a = Primitives::random(&mut rng);
            let b = Primitives::random(&mut rng);
            let mut ab = a.clone();
            Primitives::bind(&mut ab, &b);
            assert_ne!(ab, a);
            Primitives::bind(&mut ab, &b);
            assert_eq!(ab, a);
        }
    }

    #[test]
    fn test_binding_composition() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let apple = Primitives::random(&mut rng);
        let red = Primitives::random(&mut rng);
        let red_apple = Primitives::bound(&apple, &red);

        let to_apple = Similarity::resonance(&red_apple, &apple);
        let to_red = Similarity::resonance(&red_apple, &red);
        assert!((to_apple - 0.5).abs() <= 0.05, "got {}", to_apple);
        assert!((to_red - 0.5).abs() <= 0.05, "got {}", to_red);

        let recovered = Primitives::bound(&red_apple, &red);
        assert_eq!(recovered, apple);
    }

    #[test]
    fn test_bundle_never_clears() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let a = Primitives::random(&mut rng);
        let b = Primitives::random(&mut rng);
        let mut merged = a.clone();
        Primitives::bundle(&mut merged, &b, &mut rng);

        for i in 0..DIMENSIONS {
            if a.get_bit(i) {
                assert!(merged.get_bit(i), "bit {} was cleared", i);
            }
            if merged.get_bit(i) && !a.get_bit(i) {
                assert!(b.get_bit(i), "bit {} set without source", i);
            }
        }
        assert!(merged.popcount() > a.popcount());
    }

    #[test]
    fn test_bundle_absorbs_about_half() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let b = Primitives::random(&mut rng);
        let mut a = Hypervector::zeros();
        Primitives::bundle(&mut a, &b, &mut rng);

        let ratio = a.popcount() as f64 / b.popcount() as f64;
        assert!((0.45..=0.55).contains(&ratio), "got {}", ratio);
    }

    #[test]
    fn test_bundle_saturates_density() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut a = Primitives::random(&mut rng);
        let start = a.density();
        for _ in 0..30 {
            let other = Primitives::random(&mut rng);
            Primitives::bundle(&mut a, &other, &mut rng);
        }
        assert!(a.density() > start);
        assert!(a.density() > 0.95, "got {}", a.density());
    }

    #[test]
    fn test_permute_wraps_last_bit() {
        let mut v = Hypervector::zeros();
        v.set_bit(DIMENSIONS - 1, true);
        v.set_bit(63, true);
        Primitives::permute(&mut v);
        assert!(v.get_bit(0));
        assert!(v.get_bit(64));
        assert_eq!(v.popcount(), 2);
    }

    #[test]
    fn test_unpermute_inverts_permute() {
        let original = Hypervector::from_seed(6);
        let mut v = original.clone();
        Primitives::permute(&mut v);
        assert_ne!(v, original);
        assert_eq!(v.popcount(), original.popcount());
        Primitives::unpermute(&mut v);
        assert_eq!(v, original);
    }

    #[test]
    fn test_permute_decorrelates() {
        let original = Hypervector::from_seed(8);
        let mut shifted = original.clone();
        Primitives::permute(&mut shifted);
        let sim = Similarity::resonance(&original, &shifted);
        assert!((sim - 0.5).abs() < 0.05, "got {}", sim);
    }

    #[test]
    fn test_permute_by_full_cycle() {
        let original = Hypervector::from_seed(9);
        let mut v = original.clone();
        Primitives::permute_by(&mut v, 3);
        Primitives::permute_by(&mut v, -3);
        assert_eq!(v, original);

        let mut w = original.clone();
        Primitives::permute_by(&mut w, DIMENSIONS as i32);
        assert_eq!(w, original);
    }
}
