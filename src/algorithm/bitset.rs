//! Fixed-capacity set of tile ids backing cell superpositions
//!
//! Uses the catalogue's 1-based ids, storing id `n` at bit `n-1`. Iteration
//! is always in ascending id order, which keeps weighted draws and history
//! rewinds deterministic for a given seed.

use bitvec::prelude::{BitVec, bitvec};
use std::fmt;

use crate::catalog::tile::TileId;

/// Set of catalogue ids with O(1) membership testing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSet {
    bits: BitVec,
    capacity: usize,
}

impl TileSet {
    /// Create an empty set sized for ids `1..=capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
            capacity,
        }
    }

    /// Create a set from the given ids
    pub fn from_ids(capacity: usize, ids: impl IntoIterator<Item = TileId>) -> Self {
        let mut set = Self::new(capacity);
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Insert an id; ids outside the capacity are ignored
    pub fn insert(&mut self, id: TileId) {
        let raw = id.get() as usize;
        if raw >= 1 && raw <= self.capacity {
            self.bits.set(raw - 1, true);
        }
    }

    /// Remove an id
    pub fn remove(&mut self, id: TileId) {
        let raw = id.get() as usize;
        if raw >= 1 && raw <= self.capacity {
            self.bits.set(raw - 1, false);
        }
    }

    /// Test membership
    pub fn contains(&self, id: TileId) -> bool {
        let raw = id.get() as usize;
        raw >= 1 && self.bits.get(raw - 1).as_deref() == Some(&true)
    }

    /// Keep only ids present in both sets
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Keep only ids satisfying the predicate
    pub fn retain(&mut self, mut keep: impl FnMut(TileId) -> bool) {
        for id in self.ids() {
            if !keep(id) {
                self.remove(id);
            }
        }
    }

    /// Whether no ids are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of ids in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// All ids in ascending order
    pub fn ids(&self) -> Vec<TileId> {
        self.bits
            .iter_ones()
            .map(|index| TileId::new(index as u16 + 1))
            .collect()
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileSet({} ids: {:?})", self.len(), self.ids())
    }
}
