//! Memory layer: cells and the population that holds them.
//!
//! - [`Cell`]: a growth unit with one hypervector, diffusing state channels,
//!   energy and age.
//! - [`Population`]: the bounded set of live cells, read through
//!   [`Snapshot`]s and changed through [`Batch`]es.
//!
//! # Usage
//!
//! ```rust
//! use holocell::memory::{Batch, Cell, Population};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let population = Population::new(100);
//! let apple = population.insert(Cell::new("apple", &mut rng)).unwrap();
//!
//! let snapshot = population.snapshot();
//! assert_eq!(snapshot.len(), 1);
//!
//! let mut batch = Batch::new();
//! batch.remove(apple);
//! population.apply(batch);
//! assert!(population.is_empty());
//! ```

pub mod cell;
pub mod population;

pub use cell::{Cell, STATE_CHANNELS};
pub use population::{Applied, Batch, CellId, CellSlot, Population, Snapshot, MAX_CELLS};
