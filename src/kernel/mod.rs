//! Kernel layer: the hypervector algebra.
//!
//! The kernel is pure and stateless:
//! - The fixed-length [`Hypervector`] type
//! - Algebra primitives ([`Primitives`]: `bind`, `bundle`, `permute`)
//! - Resonance and linear best-match search ([`Similarity`])
//! - Deterministic concept encoding ([`ConceptEncoder`])
//!
//! This layer has no dependencies on [`memory`](crate::memory) or
//! [`engine`](crate::engine).
//!
//! # Example
//!
//! ```rust
//! use holocell::kernel::{Hypervector, Primitives, Similarity};
//!
//! let apple = Hypervector::from_seed(1);
//! let red = Hypervector::from_seed(2);
//!
//! let red_apple = Primitives::bound(&apple, &red);
//! assert!(Similarity::resonance(&red_apple, &apple) < 0.6);
//!
//! let recovered = Primitives::bound(&red_apple, &red);
//! assert_eq!(Similarity::resonance(&recovered, &apple), 1.0);
//! ```

pub mod concept;
pub mod hypervector;
pub mod primitives;
pub mod similarity;

pub use concept::ConceptEncoder;
pub use hypervector::{Hypervector, DIMENSIONS, WORDS};
pub use primitives::Primitives;
pub use similarity::Similarity;
