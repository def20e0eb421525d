//! Fixed-width block group with LRU bookkeeping.
//!
//! Recency is kept as an explicit counter on every block rather than a
//! usage stack: promoting a block to MRU increments every strictly more
//! recent block and zeroes the promoted one, which preserves the
//! permutation of `0..associativity` and yields exact LRU order.

use super::block::Block;
use crate::common::Address;

/// A group of `associativity` blocks sharing one index.
#[derive(Debug, Clone)]
pub struct Set {
    blocks: Vec<Block>,
}

impl Set {
    /// Creates a set of `associativity` empty blocks.
    ///
    /// Block `i` starts with `recency == i`, so position
    /// `associativity - 1` is the first eviction candidate and fresh sets
    /// fill from the back.
    pub fn new(associativity: usize) -> Self {
        let blocks = (0..associativity)
            .map(|i| Block {
                recency: i as u32,
                ..Block::default()
            })
            .collect();
        Self { blocks }
    }

    pub fn associativity(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_mut(&mut self, pos: usize) -> &mut Block {
        &mut self.blocks[pos]
    }

    /// Position of the valid block holding `tag`, if any.
    ///
    /// Valid tags within a set are unique (the fill path guarantees it),
    /// so scan order does not matter.
    pub fn find(&self, tag: Address) -> Option<usize> {
        self.blocks.iter().position(|b| b.valid && b.tag == tag)
    }

    /// Position of the least-recently-used block.
    pub fn lru_index(&self) -> usize {
        let lru = self.blocks.len() as u32 - 1;
        self.blocks
            .iter()
            .position(|b| b.recency == lru)
            .expect("recency values form a permutation")
    }

    /// Promotes the block at `pos` to most-recently-used.
    pub fn touch(&mut self, pos: usize) {
        let promoted = self.blocks[pos].recency;
        if promoted == 0 {
            return;
        }
        for (i, block) in self.blocks.iter_mut().enumerate() {
            if i != pos && block.recency < promoted {
                block.recency += 1;
            }
        }
        self.blocks[pos].recency = 0;
    }

    /// The blocks ordered MRU to LRU, for the contents dump.
    pub fn blocks_by_recency(&self) -> Vec<Block> {
        let mut ordered = self.blocks.clone();
        ordered.sort_by_key(|b| b.recency);
        ordered
    }
}
