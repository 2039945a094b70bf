//! Hypervector type for Holocell.
//!
//! A hypervector is a fixed-length binary vector of [`DIMENSIONS`] bits,
//! packed little-endian into `u64` words. Bit `i` lives in word `i / 64`
//! at position `i % 64`. The high bits of the final word beyond
//! [`DIMENSIONS`] are always zero.

use crate::error::{HolocellError, Result};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// Number of bits in every hypervector.
pub const DIMENSIONS: usize = 10_000;

/// Number of `u64` words backing a hypervector.
pub const WORDS: usize = (DIMENSIONS + 63) / 64;

/// Bits used in the final word.
pub(crate) const TAIL_BITS: usize = DIMENSIONS - (WORDS - 1) * 64;

/// Mask of the valid bits in the final word.
pub(crate) const TAIL_MASK: u64 = if TAIL_BITS == 64 {
    u64::MAX
} else {
    (1u64 << TAIL_BITS) - 1
};

/// A [`DIMENSIONS`]-bit binary hypervector.
///
/// This is the core data structure for all algebra operations. The length
/// is a global constant, so any two hypervectors are always comparable.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Hypervector {
    words: Box<[u64; WORDS]>,
}

impl Hypervector {
    /// Create an all-zero hypervector.
    pub fn zeros() -> Self {
        Self {
            words: Box::new([0u64; WORDS]),
        }
    }

    /// Create a random hypervector: every bit is set independently with
    /// probability 0.5.
    ///
    /// Two independently generated vectors differ in roughly half their bits,
    /// which makes them quasi-orthogonal concept seeds.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut words = Box::new([0u64; WORDS]);
        for word in words.iter_mut() {
            *word = rng.next_u64();
        }
        words[WORDS - 1] &= TAIL_MASK;
        Self { words }
    }

    /// Create a random hypervector from a seed.
    ///
    /// The same seed always produces the same vector.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random(&mut rng)
    }

    /// Create a hypervector from raw packed words.
    ///
    /// Fails if `words` does not hold exactly [`WORDS`] entries. Bits beyond
    /// [`DIMENSIONS`] in the final word are discarded.
    pub fn from_words(words: &[u64]) -> Result<Self> {
        let packed: [u64; WORDS] =
            words
                .try_into()
                .map_err(|_| HolocellError::DimensionMismatch {
                    expected: WORDS,
                    got: words.len(),
                })?;
        let mut words = Box::new(packed);
        words[WORDS - 1] &= TAIL_MASK;
        Ok(Self { words })
    }

    /// Create a hypervector from one bool per dimension.
    pub fn from_bits(bits: &[bool]) -> Result<Self> {
        if bits.len() != DIMENSIONS {
            return Err(HolocellError::DimensionMismatch {
                expected: DIMENSIONS,
                got: bits.len(),
            });
        }
        let mut v = Self::zeros();
        for (i, &bit) in bits.iter().enumerate() {
            v.set_bit(i, bit);
        }
        Ok(v)
    }

    /// Get the dimensionality (always [`DIMENSIONS`]).
    pub const fn dimensions(&self) -> usize {
        DIMENSIONS
    }

    /// Get the packed words.
    pub fn words(&self) -> &[u64; WORDS] {
        &self.words
    }

    /// Mutable access to the packed words.
    ///
    /// Callers must keep the high bits of the final word clear.
    pub(crate) fn words_mut(&mut self) -> &mut [u64; WORDS] {
        &mut self.words
    }

    /// Get bit at position.
    #[inline]
    pub fn get_bit(&self, pos: usize) -> bool {
        assert!(pos < DIMENSIONS, "bit index {} out of range", pos);
        (self.words[pos / 64] >> (pos % 64)) & 1 == 1
    }

    /// Set bit at position.
    #[inline]
    pub fn set_bit(&mut self, pos: usize, value: bool) {
        assert!(pos < DIMENSIONS, "bit index {} out of range", pos);
        let mask = 1u64 << (pos % 64);
        if value {
            self.words[pos / 64] |= mask;
        } else {
            self.words[pos / 64] &= !mask;
        }
    }

    /// Count set bits.
    pub fn popcount(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Fraction of bits set, in [0, 1].
    ///
    /// Fresh random vectors sit near 0.5. Repeated bundling only ever raises
    /// this value.
    pub fn density(&self) -> f64 {
        self.popcount() as f64 / DIMENSIONS as f64
    }
}

impl Default for Hypervector {
    fn default() -> Self {
        Self::zeros()
    }
}

impl fmt::Debug for Hypervector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hypervector")
            .field("popcount", &self.popcount())
            .field("head", &format_args!("{:#018x}", self.words[0]))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_constants() {
        assert_eq!(WORDS, 157);
        assert_eq!(TAIL_BITS, 16);
        assert_eq!(TAIL_MASK, 0xFFFF);
    }

    #[test]
    fn test_zeros() {
        let v = Hypervector::zeros();
        assert_eq!(v.dimensions(), DIMENSIONS);
        assert_eq!(v.popcount(), 0);
    }

    #[test]
    fn test_random_density() {
        let v = Hypervector::from_seed(7);
        let density = v.density();
        assert!(
            (0.47..=0.53).contains(&density),
            "random density should be ~0.5, got {}",
            density
        );
        assert_eq!(v.words()[WORDS - 1] & !TAIL_MASK, 0);
    }

    #[test]
    fn test_from_seed_deterministic() {
        assert_eq!(Hypervector::from_seed(42), Hypervector::from_seed(42));
        assert_ne!(Hypervector::from_seed(42), Hypervector::from_seed(43));
    }

    #[test]
    fn test_from_words_length_checked() {
        let err = Hypervector::from_words(&[0u64; 4]).unwrap_err();
        assert!(matches!(
            err,
            HolocellError::DimensionMismatch {
                expected: WORDS,
                got: 4
            }
        ));

        let v = Hypervector::from_words(&[u64::MAX; WORDS]).unwrap();
        assert_eq!(v.popcount() as usize, DIMENSIONS);
    }

    #[test]
    fn test_from_bits() {
        let mut bits = vec![false; DIMENSIONS];
        bits[0] = true;
        bits[DIMENSIONS - 1] = true;
        let v = Hypervector::from_bits(&bits).unwrap();
        assert!(v.get_bit(0));
        assert!(v.get_bit(DIMENSIONS - 1));
        assert_eq!(v.popcount(), 2);

        assert!(Hypervector::from_bits(&[true; 3]).is_err());
    }

    #[test]
    fn test_set_get_bit() {
        let mut v = Hypervector::zeros();
        v.set_bit(9_999, true);
        v.set_bit(64, true);
        assert!(v.get_bit(9_999));
        assert!(v.get_bit(64));
        v.set_bit(64, false);
        assert!(!v.get_bit(64));
        assert_eq!(v.popcount(), 1);
    }
}
