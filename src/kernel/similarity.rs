//! Similarity metrics for hypervector comparison.
//!
//! Resonance is normalized Hamming agreement:
//! `resonance(a, b) = 1 - hamming(a, b) / DIMENSIONS`.

use crate::kernel::hypervector::{Hypervector, DIMENSIONS};

/// Similarity computation for hypervectors.
pub struct Similarity;

impl Similarity {
    /// Number of differing bits.
    #[inline]
    pub fn hamming(a: &Hypervector, b: &Hypervector) -> u32 {
        a.words()
            .iter()
            .zip(b.words().iter())
            .map(|(x, y)| (x ^ y).count_ones())
            .sum()
    }

    /// Resonance in [0, 1].
    ///
    /// - 1.0 means identical
    /// - ~0.5 means unrelated (independent random vectors)
    /// - 0.0 means bitwise complement
    #[inline]
    pub fn resonance(a: &Hypervector, b: &Hypervector) -> f64 {
        1.0 - Self::hamming(a, b) as f64 / DIMENSIONS as f64
    }

    /// Linear scan for the candidate that resonates most with `target`.
    ///
    /// Returns `None` for an empty candidate set. On ties the first candidate
    /// in iteration order wins, so callers control tie-breaking by ordering.
    pub fn best_match<'a, K, I>(target: &Hypervector, candidates: I) -> Option<(K, f64)>
    where
        I: IntoIterator<Item = (K, &'a Hypervector)>,
    {
        Self::argmax(
            candidates
                .into_iter()
                .map(|(key, candidate)| (key, Self::resonance(target, candidate))),
        )
    }

    /// Highest-scoring entry of a pre-scored sequence; first wins on ties.
    pub fn argmax<K, I>(scored: I) -> Option<(K, f64)>
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut best: Option<(K, f64)> = None;
        for (key, score) in scored {
            if best.as_ref().map_or(true, |(_, top)| score > *top) {
                best = Some((key, score));
            }
        }
        best
    }
}
