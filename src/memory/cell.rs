//! Cell: the growth unit of the population.
//!
//! A cell owns one [`Hypervector`] (its concept), a small bank of continuous
//! state channels that diffuse between spatial neighbors, an energy budget,
//! an age, and a 3D position used only to pick diffusion neighbors.

use crate::error::{HolocellError, Result};
use crate::kernel::{Hypervector, Primitives};
use rand::{Rng, RngCore};

/// Number of continuous state channels per cell.
pub const STATE_CHANNELS: usize = 16;

/// Energy of a freshly injected cell.
pub const INITIAL_ENERGY: f64 = 1.0;

/// A cell is dead once its energy falls to or below this.
pub const DEATH_THRESHOLD: f64 = 0.1;

/// Minimum energy (exclusive) for reproduction.
pub const REPRODUCE_ENERGY: f64 = 0.8;

/// Minimum age (exclusive) for reproduction.
pub const REPRODUCE_AGE: u64 = 10;

/// Half-width of the cube cells are placed in.
pub const WORLD_EXTENT: f64 = 50.0;

const DIFFUSION_RATE: f64 = 0.1;
const ENERGY_GAIN: f64 = 0.01;
const ENERGY_DECAY: f64 = 0.995;
const CLONE_JITTER: f64 = 5.0;
const CHILD_JITTER: f64 = 1.0;

/// Channel layout of [`Cell::state`].
pub mod channel {
    /// Perceptual channels, seeded uniformly at random.
    pub const PERCEPT: std::ops::Range<usize> = 0..3;
    /// Alive/opaque flag, seeded to 1.0.
    pub const ALIVE: usize = 3;
}

/// A unit of the growth population.
#[derive(Clone, Debug)]
pub struct Cell {
    concept: String,
    vector: Hypervector,
    state: [f64; STATE_CHANNELS],
    energy: f64,
    age: u64,
    position: [f64; 3],
}

impl Cell {
    /// Create a cell for `concept` with a fresh random hypervector.
    pub fn new<R: RngCore + ?Sized>(concept: impl Into<String>, rng: &mut R) -> Self {
        let vector = Hypervector::random(rng);
        Self::with_vector(concept, vector, rng)
    }

    /// Create a cell for `concept` that carries a supplied hypervector.
    ///
    /// Channels, position, energy and age are initialized as in [`Cell::new`].
    pub fn with_vector<R: RngCore + ?Sized>(
        concept: impl Into<String>,
        vector: Hypervector,
        rng: &mut R,
    ) -> Self {
        let mut state = [0.0; STATE_CHANNELS];
        for i in channel::PERCEPT {
            state[i] = rng.gen::<f64>();
        }
        state[channel::ALIVE] = 1.0;

        let position = [
            rng.gen_range(-WORLD_EXTENT..=WORLD_EXTENT),
            rng.gen_range(-WORLD_EXTENT..=WORLD_EXTENT),
            rng.gen_range(-WORLD_EXTENT..=WORLD_EXTENT),
        ];

        Self {
            concept: concept.into(),
            vector,
            state,
            energy: INITIAL_ENERGY,
            age: 0,
            position,
        }
    }

    /// Synthesize a child from two parents.
    ///
    /// The child's hypervector is the bind of both parents, so binding it
    /// with either parent recovers the other. Position is the midpoint plus
    /// a small jitter; energy and state channels are the parents' mean.
    pub fn spawn_child<R: RngCore + ?Sized>(a: &Cell, b: &Cell, rng: &mut R) -> Cell {
        let vector = Primitives::bound(&a.vector, &b.vector);

        let mut position = [0.0; 3];
        for (axis, p) in position.iter_mut().enumerate() {
            let mid = (a.position[axis] + b.position[axis]) / 2.0;
            *p = mid + rng.gen_range(-CHILD_JITTER..=CHILD_JITTER);
        }

        let mut state = [0.0; STATE_CHANNELS];
        for (i, s) in state.iter_mut().enumerate() {
            *s = (a.state[i] + b.state[i]) / 2.0;
        }

        Cell {
            concept: format!("{}+{}", a.concept, b.concept),
            vector,
            state,
            energy: (a.energy + b.energy) / 2.0,
            age: 0,
            position,
        }
    }

    /// Reproduce: a near-copy with half the energy and a jittered position.
    ///
    /// The hypervector and state channels are copied verbatim; age resets.
    pub fn clone_cell<R: RngCore + ?Sized>(&self, rng: &mut R) -> Cell {
        let mut position = self.position;
        for p in position.iter_mut() {
            *p += rng.gen_range(-CLONE_JITTER..=CLONE_JITTER);
        }

        Cell {
            concept: self.concept.clone(),
            vector: self.vector.clone(),
            state: self.state,
            energy: self.energy / 2.0,
            age: 0,
            position,
        }
    }

    /// One neural-cellular-automaton step.
    ///
    /// With neighbors, each channel moves 10% toward the neighborhood mean
    /// and energy gains a little from the perceptual channels. With none,
    /// the state is left alone. Decay, clamping and aging always happen.
    pub fn nca_update(&mut self, neighbors: &[&Cell]) {
        if !neighbors.is_empty() {
            let n = neighbors.len() as f64;
            for i in 0..STATE_CHANNELS {
                let mean = neighbors.iter().map(|c| c.state[i]).sum::<f64>() / n;
                self.state[i] = self.state[i] * (1.0 - DIFFUSION_RATE) + mean * DIFFUSION_RATE;
            }

            let percept = channel::PERCEPT
                .map(|i| self.state[i])
                .sum::<f64>()
                / channel::PERCEPT.len() as f64;
            self.energy += percept * ENERGY_GAIN;
        }

        self.energy *= ENERGY_DECAY;
        self.energy = self.energy.clamp(0.0, 1.0);
        self.age += 1;
    }

    /// `energy > 0.1`.
    pub fn is_alive(&self) -> bool {
        self.energy > DEATH_THRESHOLD
    }

    /// `energy > 0.8` and `age > 10`.
    pub fn should_reproduce(&self) -> bool {
        self.energy > REPRODUCE_ENERGY && self.age > REPRODUCE_AGE
    }

    /// Fail if any continuous quantity went NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        let finite = self.energy.is_finite()
            && self.state.iter().all(|s| s.is_finite())
            && self.position.iter().all(|p| p.is_finite());
        if finite {
            Ok(())
        } else {
            Err(HolocellError::NonFiniteState {
                concept: self.concept.clone(),
            })
        }
    }

    /// Euclidean distance between two cells' positions.
    pub fn distance(&self, other: &Cell) -> f64 {
        self.distance_to(other.position)
    }

    /// Euclidean distance from this cell to a point.
    pub fn distance_to(&self, point: [f64; 3]) -> f64 {
        self.position
            .iter()
            .zip(point.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    pub fn concept(&self) -> &str {
        &self.concept
    }

    pub fn vector(&self) -> &Hypervector {
        &self.vector
    }

    pub fn state(&self) -> &[f64; STATE_CHANNELS] {
        &self.state
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    pub(crate) fn vector_mut(&mut self) -> &mut Hypervector {
        &mut self.vector
    }

    pub(crate) fn adjust_energy(&mut self, delta: f64) {
        self.energy += delta;
    }

    #[cfg(test)]
    pub(crate) fn set_energy(&mut self, energy: f64) {
        self.energy = energy;
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, position: [f64; 3]) {
        self.position = position;
    }
}
