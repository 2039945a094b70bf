//! Population: the bounded, concurrently accessed set of live cells.
//!
//! Every cell lives in a [`CellSlot`] tagged with a [`CellId`] drawn from a
//! monotonically increasing sequence, so iteration order is insertion order
//! and ties in a best-match scan resolve the same way every run.
//!
//! Structural access follows a snapshot-and-defer discipline:
//!
//! 1. A reader copies the slot list under a short read lock ([`Population::snapshot`]).
//! 2. It scans the snapshot with no list lock held.
//! 3. Structural changes are collected into a [`Batch`] and applied under one
//!    short write lock ([`Population::apply`]).
//!
//! Inserts from other threads therefore never wait on a scan, and a scan
//! never sees membership change under it.

use crate::error::{HolocellError, Result};
use crate::memory::cell::Cell;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default population bound.
pub const MAX_CELLS: usize = 1000;

/// Stable identity of a cell within one population (insertion sequence).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(u64);

impl CellId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A live cell and its identity.
#[derive(Debug)]
pub struct CellSlot {
    id: CellId,
    cell: RwLock<Cell>,
}

impl CellSlot {
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Shared access to the cell.
    pub fn read(&self) -> RwLockReadGuard<'_, Cell> {
        self.cell.read()
    }

    /// Exclusive access; only the evolution engine mutates live cells.
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Cell> {
        self.cell.write()
    }
}

/// A frozen view of population membership at one instant.
///
/// Holding a snapshot keeps its cells reachable even if they are removed
/// from the live population meanwhile.
#[derive(Clone, Debug)]
pub struct Snapshot {
    generation: u64,
    slots: Vec<Arc<CellSlot>>,
}

impl Snapshot {
    /// Population generation the snapshot was taken at.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in insertion order.
    pub fn slots(&self) -> &[Arc<CellSlot>] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CellSlot>> {
        self.slots.iter()
    }
}

/// Deferred structural changes, applied in one step.
#[derive(Debug, Default)]
pub struct Batch {
    additions: Vec<Cell>,
    removals: HashSet<CellId>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, cell: Cell) {
        self.additions.push(cell);
    }

    pub fn remove(&mut self, id: CellId) {
        self.removals.insert(id);
    }

    pub fn pending_additions(&self) -> usize {
        self.additions.len()
    }

    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }
}

/// Outcome of [`Population::apply`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    /// Cells actually inserted.
    pub added: usize,
    /// Queued additions dropped because the population was full.
    pub dropped: usize,
    /// Cells actually removed.
    pub removed: usize,
}

/// The bounded set of live cells.
#[derive(Debug)]
pub struct Population {
    slots: RwLock<Vec<Arc<CellSlot>>>,
    capacity: usize,
    next_id: AtomicU64,
    generation: AtomicU64,
}

impl Population {
    /// Create an empty population holding at most `capacity` cells.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: RwLock::new(Vec::new()),
            capacity,
            next_id: AtomicU64::new(0),
            generation: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// Counter advanced by every structural change.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Insert a cell directly into the live population.
    ///
    /// Refused with [`HolocellError::PopulationFull`] at capacity.
    pub fn insert(&self, cell: Cell) -> Result<CellId> {
        let mut slots = self.slots.write();
        if slots.len() >= self.capacity {
            return Err(HolocellError::PopulationFull {
                capacity: self.capacity,
            });
        }
        let slot = self.make_slot(cell);
        let id = slot.id;
        slots.push(slot);
        self.generation.fetch_add(1, Ordering::AcqRel);
        Ok(id)
    }

    /// Copy current membership.
    pub fn snapshot(&self) -> Snapshot {
        let slots = self.slots.read();
        Snapshot {
            generation: self.generation(),
            slots: slots.clone(),
        }
    }

    /// Apply a batch: removals first, then additions up to capacity.
    pub fn apply(&self, batch: Batch) -> Applied {
        if batch.is_empty() {
            return Applied::default();
        }

        let mut slots = self.slots.write();

        let before = slots.len();
        if !batch.removals.is_empty() {
            slots.retain(|slot| !batch.removals.contains(&slot.id));
        }
        let removed = before - slots.len();

        let room = self.capacity.saturating_sub(slots.len());
        let queued = batch.additions.len();
        let added = queued.min(room);
        for cell in batch.additions.into_iter().take(added) {
            let slot = self.make_slot(cell);
            slots.push(slot);
        }

        self.generation.fetch_add(1, Ordering::AcqRel);
        Applied {
            added,
            dropped: queued - added,
            removed,
        }
    }

    /// Look up a live cell by id.
    pub fn get(&self, id: CellId) -> Option<Arc<CellSlot>> {
        self.slots.read().iter().find(|slot| slot.id == id).cloned()
    }

    /// Concept keys of all live cells, in insertion order.
    pub fn concepts(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|slot| slot.read().concept().to_string())
            .collect()
    }

    fn make_slot(&self, cell: Cell) -> Arc<CellSlot> {
        let id = CellId(self.next_id.fetch_add(1, Ordering::Relaxed));
        Arc::new(CellSlot {
            id,
            cell: RwLock::new(cell),
        })
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::new(MAX_CELLS)
    }
}
