//! Error types for hierarchy construction.
//!
//! All failures are detected while validating the parameter record, before
//! any simulation state exists. Once a hierarchy has been built, every
//! access resolves to a deterministic hit or miss and simulation itself
//! cannot fail.

use std::error::Error;
use std::fmt;

/// A rejected hierarchy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A parameter that must be a power of two is not.
    NotPowerOfTwo {
        /// Which parameter or derived quantity was rejected.
        what: &'static str,
        value: u32,
    },
    /// A cache level was configured with zero ways.
    ZeroAssociativity {
        level: &'static str,
    },
    /// A cache size is not a positive multiple of `assoc * block_size`.
    SizeNotMultiple {
        level: &'static str,
        size: u32,
        assoc: u32,
        block_size: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPowerOfTwo { what, value } => {
                write!(f, "{what} must be a power of two, got {value}")
            }
            ConfigError::ZeroAssociativity { level } => {
                write!(f, "{level} associativity must be nonzero")
            }
            ConfigError::SizeNotMultiple {
                level,
                size,
                assoc,
                block_size,
            } => {
                write!(
                    f,
                    "{level} size {size} is not a positive multiple of \
                     {assoc} ways x {block_size}-byte blocks"
                )
            }
        }
    }
}

impl Error for ConfigError {}
