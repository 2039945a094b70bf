//! Evolution engine: the fixed-rate growth loop plus the inject/query surface.
//!
//! # Tick
//!
//! Each tick works against a snapshot of population membership taken at the
//! start of the tick. For every cell in snapshot order:
//!
//! 1. Find its best-resonating partner by full linear scan (O(n²) per tick;
//!    no index, ties go to the earliest inserted cell).
//! 2. Act on the resonance band:
//!    - `> 0.8`: bundle the partner in, gain energy, maybe queue a clone
//!    - `(0.4, 0.6)`: queue a bound child of the pair
//!    - `< 0.3`: pay the competition penalty
//! 3. Diffuse state with up to 5 spatial neighbors within radius 20.
//! 4. Queue the cell for removal if its energy fell to the death threshold.
//!
//! Births and deaths are applied as one batch after the scan. Cell state
//! changes (bundling, energy, channels) land in place as each cell is
//! processed, so later cells in the same tick see them.
//!
//! # Threads
//!
//! [`Engine::start`] spawns one background thread that ticks at the
//! configured frequency until [`Engine::stop`]. [`Engine::inject`],
//! [`Engine::query`] and [`Engine::stats`] are safe from any thread at any
//! time and never wait for a tick to finish.

use crate::engine::config::{ConceptEncoding, EngineConfig};
use crate::engine::query::{self, QueryOutcome};
use crate::engine::sink::{EventSink, TracingSink};
use crate::engine::stats::{EngineStats, TickReport};
use crate::error::Result;
use crate::kernel::{ConceptEncoder, Hypervector, Primitives, Similarity};
use crate::memory::{Batch, Cell, CellId, CellSlot, Population, Snapshot};
use parking_lot::Mutex;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Lifecycle state of an [`Engine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Stopped,
    Running,
}

enum Fate {
    Lives,
    Dies,
}

/// State shared between the engine handle and its evolution thread.
struct Shared {
    config: EngineConfig,
    population: Population,
    encoder: Option<ConceptEncoder>,
    rng: Mutex<ChaCha8Rng>,
    sink: Arc<dyn EventSink>,
    running: AtomicBool,
    /// Serializes ticks so the engine stays the sole structural writer.
    tick_lock: Mutex<()>,
    ticks: AtomicU64,
    births: AtomicU64,
    deaths: AtomicU64,
    faults: AtomicU64,
}

/// A population of cells and the loop that evolves it.
///
/// Counters start at zero and belong to this instance only; independent
/// engines never share state.
///
/// # Example
///
/// ```rust
/// use holocell::{Engine, EngineConfig};
///
/// let engine = Engine::new(EngineConfig::seeded(42)).unwrap();
/// engine.inject("apple").unwrap();
/// engine.inject("red").unwrap();
///
/// let report = engine.tick();
/// assert_eq!(report.scanned, 2);
///
/// let outcome = engine.query("apple");
/// assert!(outcome.is_match());
/// ```
pub struct Engine {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Engine {
    /// Create a stopped engine that logs events through `tracing`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_sink(config, TracingSink)
    }

    /// Create a stopped engine with a custom event sink.
    pub fn with_sink<S: EventSink + 'static>(config: EngineConfig, sink: S) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let encoder = match config.concept_encoding {
            ConceptEncoding::Random => None,
            ConceptEncoding::Hashed { seed } => Some(ConceptEncoder::new(seed)),
        };

        let shared = Shared {
            population: Population::new(config.max_cells),
            config,
            encoder,
            rng: Mutex::new(rng),
            sink: Arc::new(sink),
            running: AtomicBool::new(false),
            tick_lock: Mutex::new(()),
            ticks: AtomicU64::new(0),
            births: AtomicU64::new(0),
            deaths: AtomicU64::new(0),
            faults: AtomicU64::new(0),
        };

        Ok(Self {
            shared: Arc::new(shared),
            worker: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    /// The live population.
    pub fn population(&self) -> &Population {
        &self.shared.population
    }

    pub fn state(&self) -> EngineState {
        if self.is_running() {
            EngineState::Running
        } else {
            EngineState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Spawn the evolution thread. A no-op if already running.
    pub fn start(&self) -> Result<()> {
        let mut worker = self.worker.lock();
        if self.shared.running.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("holocell-evolution".to_string())
            .spawn(move || shared.run());

        match spawned {
            Ok(handle) => {
                *worker = Some(handle);
                self.shared
                    .sink
                    .log("started", &self.shared.config.to_string());
                Ok(())
            }
            Err(err) => {
                self.shared.running.store(false, Ordering::Release);
                Err(err.into())
            }
        }
    }

    /// Stop the evolution thread after its current tick completes.
    ///
    /// Blocks until the thread exits. Counters are kept. A no-op if already
    /// stopped.
    pub fn stop(&self) {
        let mut worker = self.worker.lock();
        if !self.shared.running.swap(false, Ordering::AcqRel) {
            return;
        }

        if let Some(handle) = worker.take() {
            if handle.join().is_err() {
                tracing::error!("evolution thread panicked");
            }
        }
        self.shared.sink.log("stopped", &self.stats().to_string());
    }

    /// Run one tick on the calling thread.
    ///
    /// Safe to call while the background loop is running; ticks never
    /// overlap.
    pub fn tick(&self) -> TickReport {
        self.shared.tick()
    }

    // =========================================================================
    // Inject / Query
    // =========================================================================

    /// Add a new cell for `concept` to the live population.
    ///
    /// The cell joins the next tick's snapshot. Fails with
    /// [`HolocellError::PopulationFull`](crate::HolocellError::PopulationFull)
    /// at capacity.
    pub fn inject(&self, concept: &str) -> Result<CellId> {
        let vector = self.shared.concept_vector(concept);
        self.insert(concept, vector)
    }

    /// Add a new cell carrying a caller-supplied hypervector.
    pub fn inject_vector(&self, concept: &str, vector: Hypervector) -> Result<CellId> {
        self.insert(concept, vector)
    }

    fn insert(&self, concept: &str, vector: Hypervector) -> Result<CellId> {
        let cell = {
            let mut rng = self.shared.rng.lock();
            Cell::with_vector(concept, vector, &mut *rng)
        };
        let id = self.shared.population.insert(cell)?;
        self.shared.sink.log("inject", concept);
        Ok(id)
    }

    /// Find the live cell that resonates most with `concept`.
    ///
    /// The probe vector is built like an injected cell's but never added.
    /// Returns [`QueryOutcome::NoResonance`] if the population is empty.
    pub fn query(&self, concept: &str) -> QueryOutcome {
        let probe = self.shared.concept_vector(concept);
        self.query_vector(&probe)
    }

    /// Find the live cell that resonates most with `probe`.
    pub fn query_vector(&self, probe: &Hypervector) -> QueryOutcome {
        query::scan(&self.shared.population.snapshot(), probe)
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            ticks: self.tick_count(),
            births: self.birth_count(),
            deaths: self.death_count(),
            faults: self.fault_count(),
            population: self.shared.population.len(),
            running: self.is_running(),
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.shared.ticks.load(Ordering::Acquire)
    }

    pub fn birth_count(&self) -> u64 {
        self.shared.births.load(Ordering::Acquire)
    }

    pub fn death_count(&self) -> u64 {
        self.shared.deaths.load(Ordering::Acquire)
    }

    pub fn fault_count(&self) -> u64 {
        self.shared.faults.load(Ordering::Acquire)
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Shared {
    fn concept_vector(&self, concept: &str) -> Hypervector {
        match &self.encoder {
            Some(encoder) => encoder.encode(concept),
            None => Hypervector::random(&mut *self.rng.lock()),
        }
    }

    /// Fixed-rate loop. Overruns start the next tick immediately with no
    /// catch-up.
    fn run(&self) {
        let period = self.config.tick_period();
        while self.running.load(Ordering::Acquire) {
            let started = Instant::now();
            self.tick();
            let elapsed = started.elapsed();
            match period.checked_sub(elapsed) {
                Some(rest) => thread::sleep(rest),
                None => tracing::trace!(?elapsed, ?period, "tick overran its period"),
            }
        }
    }

    fn tick(&self) -> TickReport {
        let _serial = self.tick_lock.lock();

        let snapshot = self.population.snapshot();
        // Per-tick stream so inject() never waits on a running scan.
        let mut rng = ChaCha8Rng::seed_from_u64(self.rng.lock().next_u64());
        let mut batch = Batch::new();
        let mut deaths = 0;
        let mut faults = 0;

        for index in 0..snapshot.len() {
            let slot = &snapshot.slots()[index];
            match self.evolve(&snapshot, index, &mut batch, &mut rng) {
                Ok(Fate::Lives) => {}
                Ok(Fate::Dies) => {
                    batch.remove(slot.id());
                    deaths += 1;
                }
                Err(err) => {
                    tracing::warn!(cell = %slot.id(), error = %err, "dropping faulted cell");
                    batch.remove(slot.id());
                    faults += 1;
                }
            }
        }

        let applied = self.population.apply(batch);
        self.births.fetch_add(applied.added as u64, Ordering::AcqRel);
        self.deaths.fetch_add(deaths as u64, Ordering::AcqRel);
        self.faults.fetch_add(faults as u64, Ordering::AcqRel);
        let tick = self.ticks.fetch_add(1, Ordering::AcqRel) + 1;

        let report = TickReport {
            tick,
            scanned: snapshot.len(),
            births: applied.added,
            deaths,
            faults,
            dropped: applied.dropped,
            population: self.population.len(),
        };
        if report.births > 0 || report.deaths > 0 || report.faults > 0 {
            tracing::debug!(
                tick,
                births = report.births,
                deaths = report.deaths,
                faults = report.faults,
                population = report.population,
                "tick applied"
            );
        }
        report
    }

    /// Steps 1–4 for the cell at `index`.
    fn evolve(
        &self,
        snapshot: &Snapshot,
        index: usize,
        batch: &mut Batch,
        rng: &mut ChaCha8Rng,
    ) -> Result<Fate> {
        let rules = &self.config.rules;
        let slots = snapshot.slots();
        let slot = &slots[index];

        let best = {
            let cell = slot.read();
            cell.validate()?;
            let scored = others(slots, index).map(|(i, other)| {
                (i, Similarity::resonance(cell.vector(), other.read().vector()))
            });
            Similarity::argmax(scored)
        };

        if let Some((partner_index, sim)) = best {
            let partner = &slots[partner_index];
            if sim > rules.high_resonance {
                let mut cell = slot.write();
                Primitives::bundle(cell.vector_mut(), partner.read().vector(), rng);
                cell.adjust_energy(rules.bundle_bonus);
                if cell.should_reproduce() && self.has_room(batch) {
                    batch.add(cell.clone_cell(rng));
                }
            } else if sim > rules.synthesis_low && sim < rules.synthesis_high {
                if self.has_room(batch) {
                    let child = Cell::spawn_child(&slot.read(), &partner.read(), rng);
                    batch.add(child);
                }
            } else if sim < rules.competition_threshold {
                slot.write().adjust_energy(-rules.competition_penalty);
            }
        }

        let center = slot.read().position();
        let neighbors: Vec<_> = others(slots, index)
            .map(|(_, other)| other.read())
            .filter(|other| other.distance_to(center) <= rules.neighbor_radius)
            .take(rules.max_neighbors)
            .collect();
        let neighbor_refs: Vec<&Cell> = neighbors.iter().map(|guard| &**guard).collect();

        let mut cell = slot.write();
        cell.nca_update(&neighbor_refs);
        cell.validate()?;

        Ok(if cell.is_alive() { Fate::Lives } else { Fate::Dies })
    }

    fn has_room(&self, batch: &Batch) -> bool {
        self.population.len() + batch.pending_additions() < self.population.capacity()
    }
}

/// Every snapshot slot except the one at `skip`, with its index.
fn others(slots: &[Arc<CellSlot>], skip: usize) -> impl Iterator<Item = (usize, &Arc<CellSlot>)> {
    slots
        .iter()
        .enumerate()
        .filter(move |(i, _)| *i != skip)
}
