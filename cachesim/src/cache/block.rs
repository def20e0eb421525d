//! A single tracked cache line.

use crate::common::Address;

/// One cache line. Only the tag is modeled, never the data.
///
/// `recency` orders the blocks of a set from 0 (most recently used) to
/// `associativity - 1` (least recently used). The recency values within
/// one set form a permutation of `0..associativity` at all times; invalid
/// blocks participate in that permutation like any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Block {
    pub tag: Address,
    pub valid: bool,
    pub dirty: bool,
    pub recency: u32,
}
