//! # Holocell: hyperdimensional associative memory with cellular growth
//!
//! Holocell keeps a population of cells, each carrying a 10,000-bit binary
//! hypervector. Cells can be queried by similarity and combined into new
//! concepts. They also grow, compete and die on their own under a
//! fixed-rate evolution loop.
//!
//! ## Quick Start
//!
//! ```rust
//! use holocell::{ConceptEncoding, Engine, EngineConfig};
//!
//! let config = EngineConfig {
//!     concept_encoding: ConceptEncoding::Hashed { seed: 7 },
//!     ..EngineConfig::seeded(42)
//! };
//! let engine = Engine::new(config)?;
//!
//! engine.inject("apple")?;
//! engine.inject("red")?;
//!
//! let outcome = engine.query("apple");
//! assert_eq!(outcome.concept(), Some("apple"));
//!
//! engine.start()?;
//! // ... cells evolve at 432 ticks per second ...
//! engine.stop();
//! # Ok::<(), holocell::HolocellError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Hypervector**: fixed-length binary vector representing a concept
//! - **Bind**: XOR, self-inverse composition of two concepts
//! - **Bundle**: probabilistic, set-only absorption of one vector into another
//! - **Resonance**: `1 - hamming / DIMENSIONS`, in [0, 1]
//! - **Cell**: hypervector plus diffusing state channels, energy and age
//! - **Tick**: one evolution step over a snapshot of the population
//!
//! ## Layers
//!
//! - [`kernel`]: pure hypervector algebra
//! - [`memory`]: cells and the bounded population
//! - [`engine`]: the evolution loop, inject and query

pub mod engine;
pub mod error;
pub mod kernel;
pub mod memory;

// Re-exports for convenience
pub use engine::{
    ConceptEncoding, Engine, EngineConfig, EngineState, EngineStats, EventSink, GrowthRules,
    QueryOutcome, TickReport, TracingSink,
};
pub use error::{HolocellError, Result};
pub use kernel::{ConceptEncoder, Hypervector, Primitives, Similarity, DIMENSIONS};
pub use memory::{Cell, CellId, Population, MAX_CELLS};
