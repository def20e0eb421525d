//! Hierarchy construction.
//!
//! Builds the ownership chain L1 -> (victim cache?) -> (L2?) -> main
//! memory from a validated parameter record. The chain is built once,
//! never rewired, and dropped in reverse ownership order at the end of a
//! run.

use super::level::{CacheLevel, Level, MainMemory, Role};
use super::victim::VictimCache;
use crate::common::{Address, ConfigError};
use crate::config::CacheParams;
use crate::stats::LevelStats;

/// The complete memory hierarchy, entered through L1.
#[derive(Debug)]
pub struct Hierarchy {
    pub l1: CacheLevel,
}

impl Hierarchy {
    /// Builds the chain described by `params`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any parameter fails validation; no
    /// simulation state is constructed in that case.
    pub fn new(params: &CacheParams) -> Result<Self, ConfigError> {
        params.validate()?;

        let memory = Level::MainMemory(MainMemory::default());
        let next = if params.l2_size > 0 {
            Level::Cache(Box::new(CacheLevel::new(
                Role::L2,
                params.block_size,
                params.l2_size,
                params.l2_assoc,
                None,
                memory,
            )))
        } else {
            memory
        };

        let victim = (params.vc_num_blocks > 0)
            .then(|| VictimCache::new(params.vc_num_blocks, params.block_size));
        let l1 = CacheLevel::new(
            Role::L1,
            params.block_size,
            params.l1_size,
            params.l1_assoc,
            victim,
            next,
        );
        Ok(Self { l1 })
    }

    /// Issues a read to the top of the hierarchy.
    pub fn read(&mut self, addr: Address) {
        self.l1.read(addr);
    }

    /// Issues a write to the top of the hierarchy.
    pub fn write(&mut self, addr: Address) {
        self.l1.write(addr);
    }

    /// The L2 level, when the hierarchy has one.
    pub fn l2(&self) -> Option<&CacheLevel> {
        match &*self.l1.next {
            Level::Cache(l2) => Some(l2),
            Level::MainMemory(_) => None,
        }
    }

    /// Traffic counters of the terminal main memory.
    pub fn main_memory_stats(&self) -> &LevelStats {
        self.l1.next.main_memory_stats()
    }
}
