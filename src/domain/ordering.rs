//! Deterministic ordering of a block collection.
//!
//! `position` values are not required to be contiguous or unique at the
//! data layer; rendering must still be order-preserving, so ties are broken
//! by creation time and finally by id. Sorting the same stored state twice
//! always yields the same sequence.

use crate::domain::entities::BlockRecord;

pub fn sort_blocks(blocks: &mut [BlockRecord]) {
    blocks.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Position assigned to a create when the caller supplies none: strictly
/// greater than the current maximum, or 0 for an empty collection. Always
/// appending past the max is what keeps sibling positions collision-free
/// without a uniqueness constraint.
pub fn next_position(blocks: &[BlockRecord]) -> i32 {
    blocks
        .iter()
        .map(|block| block.position)
        .max()
        .map_or(0, |max| max.saturating_add(1))
}
