//! Statistics collection and report rendering.
//!
//! Tracks per-level access counters and renders the cache contents dump
//! and the lettered simulation-results block in the reference layout:
//! integer values right-aligned in 12 columns, rates rounded to four
//! decimal places and truncated to six characters.

use std::fmt;

use crate::cache::{CacheLevel, Hierarchy, Set};

/// Access counters for one level of the hierarchy.
///
/// The victim-cache swap counters live on the owning L1, not on the
/// victim cache itself.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LevelStats {
    pub reads: u64,
    pub read_misses: u64,
    pub read_hits: u64,
    pub writes: u64,
    pub write_misses: u64,
    pub write_hits: u64,
    pub writebacks: u64,
    pub vc_swap_requests: u64,
    pub vc_swaps: u64,
}

impl LevelStats {
    /// Total demand accesses observed at this level.
    pub fn accesses(&self) -> u64 {
        self.reads + self.writes
    }
}

/// Contents dump of every cache level: L1, then the victim cache, then
/// L2. Main memory holds no tags and prints nothing.
pub struct ContentsReport<'a> {
    pub hierarchy: &'a Hierarchy,
}

impl fmt::Display for ContentsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cache_contents(f, &self.hierarchy.l1)?;
        if let Some(victim_cache) = &self.hierarchy.l1.victim {
            writeln!(f, "===== VC contents =====")?;
            write_set_line(f, 0, victim_cache.set(), true)?;
            writeln!(f)?;
        }
        if let Some(l2) = self.hierarchy.l2() {
            write_cache_contents(f, l2)?;
        }
        Ok(())
    }
}

fn write_cache_contents(f: &mut fmt::Formatter<'_>, level: &CacheLevel) -> fmt::Result {
    writeln!(f, "===== {} contents =====", level.role.name())?;
    for (number, set) in level.sets.iter().enumerate() {
        write_set_line(f, number, set, false)?;
    }
    writeln!(f)
}

/// One `  set   N: ` line, blocks ordered MRU to LRU.
///
/// Valid blocks render as the tag in bare hex followed by `D` when dirty;
/// invalid blocks render as a dash cell. The victim cache uses a single
/// space between cells where the set-associative levels use two.
fn write_set_line(
    f: &mut fmt::Formatter<'_>,
    number: usize,
    set: &Set,
    victim: bool,
) -> fmt::Result {
    write!(f, "  set {number:>3}: ")?;
    for block in set.blocks_by_recency() {
        write!(f, "{}", if victim { " " } else { "  " })?;
        if block.valid {
            write!(f, "{:x} {}", block.tag, if block.dirty { "D" } else { " " })?;
        } else {
            write!(f, "   -     ")?;
        }
    }
    writeln!(f)
}

/// The lettered statistics block, lines (a) through (p).
pub struct SimulationResults<'a> {
    pub hierarchy: &'a Hierarchy,
}

impl fmt::Display for SimulationResults<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l1 = &self.hierarchy.l1.stats;
        let memory = self.hierarchy.main_memory_stats();

        writeln!(f, "===== Simulation results =====")?;
        writeln!(f, "  a. number of L1 reads:                {:>12}", l1.reads)?;
        writeln!(f, "  b. number of L1 read misses:          {:>12}", l1.read_misses)?;
        writeln!(f, "  c. number of L1 writes:               {:>12}", l1.writes)?;
        writeln!(f, "  d. number of L1 write misses:         {:>12}", l1.write_misses)?;
        writeln!(f, "  e. number of swap requests:           {:>12}", l1.vc_swap_requests)?;
        writeln!(
            f,
            "  f. swap request rate:                 {:>12}",
            rate(l1.vc_swap_requests, l1.accesses())
        )?;
        writeln!(f, "  g. number of swaps:                   {:>12}", l1.vc_swaps)?;
        writeln!(
            f,
            "  h. combined L1+VC miss rate:          {:>12}",
            rate(
                l1.read_misses + l1.write_misses - l1.vc_swaps,
                l1.accesses()
            )
        )?;
        writeln!(f, "  i. number writebacks from L1/VC:      {:>12}", l1.writebacks)?;

        match self.hierarchy.l2() {
            Some(l2) => {
                let stats = &l2.stats;
                writeln!(f, "  j. number of L2 reads:                {:>12}", stats.reads)?;
                writeln!(f, "  k. number of L2 read misses:          {:>12}", stats.read_misses)?;
                writeln!(f, "  l. number of L2 writes:               {:>12}", stats.writes)?;
                writeln!(f, "  m. number of L2 write misses:         {:>12}", stats.write_misses)?;
                writeln!(
                    f,
                    "  n. L2 miss rate:                      {:>12}",
                    rate(stats.read_misses, stats.reads)
                )?;
                writeln!(f, "  o. number of writebacks from L2:      {:>12}", stats.writebacks)?;
            }
            None => {
                writeln!(f, "  j. number of L2 reads:                {:>12}", 0)?;
                writeln!(f, "  k. number of L2 read misses:          {:>12}", 0)?;
                writeln!(f, "  l. number of L2 writes:               {:>12}", 0)?;
                writeln!(f, "  m. number of L2 write misses:         {:>12}", 0)?;
                writeln!(f, "  n. L2 miss rate:                      {:>12}", rate(0, 0))?;
                writeln!(f, "  o. number of writebacks from L2:      {:>12}", 0)?;
            }
        }
        writeln!(
            f,
            "  p. total memory traffic:              {:>12}",
            memory.accesses()
        )
    }
}

/// Renders a rate the way the reference does: round to four decimal
/// places, format with six, then keep only the first six characters.
/// A zero denominator reports `0.0000`.
fn rate(numerator: u64, denominator: u64) -> String {
    let value = if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    };
    let rounded = (value * 10_000.0).round() / 10_000.0;
    let mut rendered = format!("{rounded:.6}");
    rendered.truncate(6);
    rendered
}
