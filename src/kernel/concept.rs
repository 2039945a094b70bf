//! Concept encoder: deterministic concept → hypervector mapping.
//!
//! The same concept string under the same seed ALWAYS produces the SAME
//! hypervector, so a concept injected earlier can be recalled by name.

use crate::kernel::hypervector::Hypervector;
use parking_lot::RwLock;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

/// Maps concept strings to hypervectors.
///
/// Uses hash-based seeding so results are reproducible across runs and
/// machines. Computed vectors are cached; clones share the cache.
#[derive(Clone, Debug)]
pub struct ConceptEncoder {
    seed: u64,
    cache: Arc<RwLock<HashMap<String, Hypervector>>>,
}

impl ConceptEncoder {
    /// Create an encoder with the given global seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the global seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the hypervector for a concept, computing and caching it on first use.
    pub fn encode(&self, concept: &str) -> Hypervector {
        if let Some(v) = self.cache.read().get(concept) {
            return v.clone();
        }

        let v = self.compute(concept);
        self.cache
            .write()
            .entry(concept.to_string())
            .or_insert_with(|| v.clone());
        v
    }

    /// SHA-256 of (seed || concept) seeds a ChaCha8 stream that fills the bits.
    fn compute(&self, concept: &str) -> Hypervector {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(concept.as_bytes());
        let hash = hasher.finalize();

        let mut seed = [0u8; 32];
        seed.copy_from_slice(&hash);
        let mut rng = ChaCha8Rng::from_seed(seed);
        Hypervector::random(&mut rng)
    }

    /// Number of cached concepts.
    pub fn cache_size(&self) -> usize {
        self.cache.read().len()
    }

    /// Drop every cached vector.
    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::similarity::Similarity;

    #[test]
    fn test_deterministic() {
        let e1 = ConceptEncoder::new(42);
        let e2 = ConceptEncoder::new(42);
        assert_eq!(e1.encode("apple"), e2.encode("apple"));
    }

    #[test]
    fn test_different_seeds() {
        let e1 = ConceptEncoder::new(42);
        let e2 = ConceptEncoder::new(43);
        assert_ne!(e1.encode("apple"), e2.encode("apple"));
    }

    #[test]
    fn test_different_concepts_are_orthogonal() {
        let enc = ConceptEncoder::new(0);
        let sim = Similarity::resonance(&enc.encode("apple"), &enc.encode("red"));
        assert!((sim - 0.5).abs() < 0.05, "got {}", sim);
    }

    #[test]
    fn test_caching() {
        let enc = ConceptEncoder::new(0);
        assert_eq!(enc.cache_size(), 0);
        enc.encode("apple");
        enc.encode("apple");
        assert_eq!(enc.cache_size(), 1);

        let shared = enc.clone();
        shared.encode("red");
        assert_eq!(enc.cache_size(), 2);

        enc.clear_cache();
        assert_eq!(shared.cache_size(), 0);
    }
}
