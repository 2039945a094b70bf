//! Engine layer: the evolution loop and the public inject/query surface.
//!
//! - [`Engine`]: owns a [`Population`](crate::memory::Population), ticks it
//!   at a fixed rate on a background thread, and answers queries.
//! - [`EngineConfig`]: capacity, frequency, seeding, concept encoding and
//!   [`GrowthRules`].
//! - [`EventSink`]: where lifecycle events go ([`TracingSink`] by default).
//!
//! This layer builds on [`kernel`](crate::kernel) and [`memory`](crate::memory).

pub mod config;
pub mod evolution;
pub mod query;
pub mod sink;
pub mod stats;

pub use config::{ConceptEncoding, EngineConfig, GrowthRules, DEFAULT_FREQUENCY_HZ};
pub use evolution::{Engine, EngineState};
pub use query::QueryOutcome;
pub use sink::{EventSink, TracingSink};
pub use stats::{EngineStats, TickReport};
