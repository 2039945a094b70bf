//! Query results against a population.

use crate::kernel::{Hypervector, Similarity};
use crate::memory::{CellId, Snapshot};
use serde::{Deserialize, Serialize};

/// Result of asking "what resonates with X".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum QueryOutcome {
    /// Best-resonating live cell. No threshold applies, so the score may be
    /// close to chance.
    Match {
        id: CellId,
        concept: String,
        score: f64,
    },
    /// The population was empty.
    NoResonance,
}

impl QueryOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, QueryOutcome::Match { .. })
    }

    pub fn concept(&self) -> Option<&str> {
        match self {
            QueryOutcome::Match { concept, .. } => Some(concept.as_str()),
            QueryOutcome::NoResonance => None,
        }
    }

    /// Match score, or 0.0 for [`QueryOutcome::NoResonance`].
    pub fn score(&self) -> f64 {
        match self {
            QueryOutcome::Match { score, .. } => *score,
            QueryOutcome::NoResonance => 0.0,
        }
    }
}

/// Scan every cell of `snapshot` for the best resonance with `target`.
pub(crate) fn scan(snapshot: &Snapshot, target: &Hypervector) -> QueryOutcome {
    let best = Similarity::argmax(
        snapshot
            .iter()
            .map(|slot| (slot, Similarity::resonance(target, slot.read().vector()))),
    );

    match best {
        Some((slot, score)) => QueryOutcome::Match {
            id: slot.id(),
            concept: slot.read().concept().to_string(),
            score,
        },
        None => QueryOutcome::NoResonance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Cell, Population};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scan_empty() {
        let population = Population::new(4);
        let outcome = scan(&population.snapshot(), &Hypervector::from_seed(1));
        assert_eq!(outcome, QueryOutcome::NoResonance);
        assert_eq!(outcome.score(), 0.0);
        assert!(outcome.concept().is_none());
    }

    #[test]
    fn test_scan_finds_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(40);
        let population = Population::new(4);
        let target = Hypervector::from_seed(2);
        population.insert(Cell::new("noise", &mut rng)).unwrap();
        let id = population
            .insert(Cell::with_vector("apple", target.clone(), &mut rng))
            .unwrap();

        let outcome = scan(&population.snapshot(), &target);
        assert!(outcome.is_match());
        assert_eq!(
            outcome,
            QueryOutcome::Match {
                id,
                concept: "apple".to_string(),
                score: 1.0
            }
        );
    }
}
