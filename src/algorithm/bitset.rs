use bitvec::prelude::{BitVec, bitvec};

use crate::rules::TileId;

/// Fixed-size bitset tracking which declared tile types remain admissible
///
/// Indexed by `TileId`, sized to the rule table. Provides O(1) membership
/// testing and cheap intersection while the candidate evaluator narrows a
/// cell's possibilities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeBitset {
    bits: BitVec,
}

impl TypeBitset {
    /// Create a bitset with no tile types present
    pub fn empty(type_count: usize) -> Self {
        Self {
            bits: bitvec![0; type_count],
        }
    }

    /// Create a bitset containing every declared tile type
    pub fn all(type_count: usize) -> Self {
        Self {
            bits: bitvec![1; type_count],
        }
    }

    /// Insert a tile type
    pub fn insert(&mut self, tile: TileId) {
        if tile.index() < self.bits.len() {
            self.bits.set(tile.index(), true);
        }
    }

    /// Test tile type membership
    pub fn contains(&self, tile: TileId) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Test if no tile types are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tile types in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate members in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.bits.iter_ones().map(TileId::from_index)
    }
}
