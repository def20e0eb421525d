//! One level of the memory hierarchy.
//!
//! `CacheLevel` implements a write-back, write-allocate set-associative
//! cache. Misses recurse into the exclusively-owned next level; displaced
//! lines may first pass through an attached victim cache. `MainMemory` is
//! the terminal sink where every access hits and only traffic counters
//! advance.

use super::set::Set;
use super::victim::VictimCache;
use crate::common::{log2, Address};
use crate::stats::LevelStats;

/// Which cache level a `CacheLevel` models.
///
/// Governs report headers only; the access algorithm is identical for
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    L1,
    L2,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Role::L1 => "L1",
            Role::L2 => "L2",
        }
    }
}

/// The terminal level. Holds no sets and never misses.
#[derive(Debug, Default)]
pub struct MainMemory {
    pub stats: LevelStats,
}

impl MainMemory {
    pub fn read(&mut self, _addr: Address) {
        self.stats.reads += 1;
    }

    pub fn write(&mut self, _addr: Address) {
        self.stats.writes += 1;
    }
}

/// A level of the hierarchy below L1: another cache or main memory.
#[derive(Debug)]
pub enum Level {
    Cache(Box<CacheLevel>),
    MainMemory(MainMemory),
}

impl Level {
    pub fn read(&mut self, addr: Address) {
        match self {
            Level::Cache(cache) => cache.read(addr),
            Level::MainMemory(memory) => memory.read(addr),
        }
    }

    pub fn write(&mut self, addr: Address) {
        match self {
            Level::Cache(cache) => cache.write(addr),
            Level::MainMemory(memory) => memory.write(addr),
        }
    }

    /// Traffic counters of the terminal main memory below this level.
    pub fn main_memory_stats(&self) -> &LevelStats {
        match self {
            Level::Cache(cache) => cache.next.main_memory_stats(),
            Level::MainMemory(memory) => &memory.stats,
        }
    }
}

/// One set-associative cache level.
#[derive(Debug)]
pub struct CacheLevel {
    pub role: Role,
    index_len: u32,
    offset_len: u32,
    pub sets: Vec<Set>,
    pub stats: LevelStats,
    /// Victim cache, attached to L1 only.
    pub victim: Option<VictimCache>,
    /// The level every miss and writeback is forwarded to.
    pub next: Box<Level>,
}

impl CacheLevel {
    /// Builds a level from its geometry.
    ///
    /// Parameters must already satisfy `CacheParams::validate`; the set
    /// count derived here is `size / (associativity * block_size)`.
    pub fn new(
        role: Role,
        block_size: u32,
        size: u32,
        associativity: u32,
        victim: Option<VictimCache>,
        next: Level,
    ) -> Self {
        let num_sets = size / (associativity * block_size);
        let sets = (0..num_sets)
            .map(|_| Set::new(associativity as usize))
            .collect();
        Self {
            role,
            index_len: log2(num_sets),
            offset_len: log2(block_size),
            sets,
            stats: LevelStats::default(),
            victim,
            next: Box::new(next),
        }
    }

    fn split_address(&self, addr: Address) -> (Address, usize) {
        let tag = addr >> (self.index_len + self.offset_len);
        let index = (addr >> self.offset_len) & ((1 << self.index_len) - 1);
        (tag, index as usize)
    }

    fn rebuild_address(&self, tag: Address, index: usize) -> Address {
        ((tag << self.index_len) | index as Address) << self.offset_len
    }

    /// Resolves a read at this level, recursing on a miss.
    pub fn read(&mut self, addr: Address) {
        let (tag, index) = self.split_address(addr);
        if let Some(pos) = self.sets[index].find(tag) {
            log::trace!("{} read {addr:#x}: hit", self.role.name());
            self.stats.read_hits += 1;
            self.sets[index].touch(pos);
            self.stats.reads += 1;
            return;
        }

        log::trace!("{} read {addr:#x}: miss", self.role.name());
        self.stats.read_misses += 1;
        let slot = self.sets[index].lru_index();
        if self.attempt_vc_swap(addr, index, slot) {
            self.sets[index].touch(slot);
            self.stats.reads += 1;
            return;
        }

        self.evict_and_fill(addr, tag, index, slot, false);
        self.stats.reads += 1;
    }

    /// Resolves a write at this level: write-back, write-allocate.
    pub fn write(&mut self, addr: Address) {
        let (tag, index) = self.split_address(addr);
        if let Some(pos) = self.sets[index].find(tag) {
            log::trace!("{} write {addr:#x}: hit", self.role.name());
            self.stats.write_hits += 1;
            self.sets[index].block_mut(pos).dirty = true;
            self.sets[index].touch(pos);
            self.stats.writes += 1;
            return;
        }

        log::trace!("{} write {addr:#x}: miss", self.role.name());
        self.stats.write_misses += 1;
        let slot = self.sets[index].lru_index();
        if self.attempt_vc_swap(addr, index, slot) {
            self.sets[index].block_mut(slot).dirty = true;
            self.sets[index].touch(slot);
            self.stats.writes += 1;
            return;
        }

        self.evict_and_fill(addr, tag, index, slot, true);
        self.stats.writes += 1;
    }

    /// Evicts the block at `slot` (writing it back if dirty) and fills the
    /// slot with the line for `addr` fetched from the next level.
    fn evict_and_fill(&mut self, addr: Address, tag: Address, index: usize, slot: usize, dirty: bool) {
        let displaced = self.sets[index].blocks()[slot];
        if displaced.valid && displaced.dirty {
            let evicted_addr = self.rebuild_address(displaced.tag, index);
            self.stats.writebacks += 1;
            self.next.write(evicted_addr);
        }

        self.next.read(addr);

        let block = self.sets[index].block_mut(slot);
        block.valid = true;
        block.tag = tag;
        block.dirty = dirty;
        self.sets[index].touch(slot);
    }

    /// Tries to service a miss from the victim cache.
    ///
    /// On a VC hit the line at `slot` and the requested line change places
    /// and the slot is ready for use (`true`). On a VC miss with a valid
    /// victim, the victim is pushed into the VC, whatever the VC gave up
    /// is written back if dirty, and the slot is left free for a fill from
    /// the next level (`false`). A miss with an invalid victim leaves the
    /// VC untouched.
    fn attempt_vc_swap(&mut self, addr: Address, index: usize, slot: usize) -> bool {
        let Some(victim_cache) = self.victim.as_mut() else {
            return false;
        };

        let block = self.sets[index].block_mut(slot);
        let sent_addr = ((block.tag << self.index_len) | index as Address) << self.offset_len;
        match victim_cache.lookup(addr) {
            Some(pos) => {
                victim_cache.swap(pos, block, sent_addr);
                block.tag >>= self.index_len;
                self.stats.vc_swap_requests += 1;
                self.stats.vc_swaps += 1;
                log::trace!("VC hit for {addr:#x}: swapped");
                true
            }
            None if block.valid => {
                victim_cache.insert(block, sent_addr);
                if block.valid && block.dirty {
                    let evicted_addr = block.tag << self.offset_len;
                    block.dirty = false;
                    self.stats.writebacks += 1;
                    self.next.write(evicted_addr);
                }
                block.tag >>= self.index_len;
                self.stats.vc_swap_requests += 1;
                false
            }
            None => false,
        }
    }
}
