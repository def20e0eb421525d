//! Simulator configuration.
//!
//! The parameter record describing the memory hierarchy. It is populated
//! either from the seven positional command-line arguments or from a TOML
//! file, validated once, and then handed to the hierarchy builder.

use serde::Deserialize;
use std::fmt;

use crate::common::ConfigError;

/// Parameters of the complete memory hierarchy.
///
/// `vc_num_blocks == 0` means no victim cache; `l2_size == 0` means no L2.
/// Sizes are in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheParams {
    pub block_size: u32,
    pub l1_size: u32,
    pub l1_assoc: u32,

    #[serde(default)]
    pub vc_num_blocks: u32,

    #[serde(default)]
    pub l2_size: u32,

    #[serde(default)]
    pub l2_assoc: u32,
}

impl CacheParams {
    /// Checks every construction-time constraint.
    ///
    /// Block size and the derived set count of each level must be powers of
    /// two, and each level's size must be a positive multiple of
    /// `assoc * block_size`. The victim cache is fully associative and has
    /// no geometry constraints of its own.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_power_of_two("BLOCKSIZE", self.block_size)?;
        validate_level(
            "L1",
            "number of L1 sets",
            self.l1_size,
            self.l1_assoc,
            self.block_size,
        )?;
        if self.l2_size > 0 {
            validate_level(
                "L2",
                "number of L2 sets",
                self.l2_size,
                self.l2_assoc,
                self.block_size,
            )?;
        }
        Ok(())
    }
}

fn validate_level(
    level: &'static str,
    sets_name: &'static str,
    size: u32,
    assoc: u32,
    block_size: u32,
) -> Result<(), ConfigError> {
    if assoc == 0 {
        return Err(ConfigError::ZeroAssociativity { level });
    }
    let line_capacity = assoc * block_size;
    if size == 0 || size % line_capacity != 0 {
        return Err(ConfigError::SizeNotMultiple {
            level,
            size,
            assoc,
            block_size,
        });
    }
    require_power_of_two(sets_name, size / line_capacity)
}

fn require_power_of_two(what: &'static str, value: u32) -> Result<(), ConfigError> {
    if value.is_power_of_two() {
        Ok(())
    } else {
        Err(ConfigError::NotPowerOfTwo { what, value })
    }
}

/// Configuration echo block printed ahead of the simulation reports.
///
/// Reproduces the reference layout byte for byte: two-space indentation,
/// labels padded so values start in column 36, and a trailing blank line.
pub struct ConfigurationEcho<'a> {
    pub params: &'a CacheParams,
    pub trace_file: &'a str,
}

impl fmt::Display for ConfigurationEcho<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.params;
        writeln!(f, "  ===== Simulator configuration =====")?;
        writeln!(f, "  L1_BLOCKSIZE:                     {}", p.block_size)?;
        writeln!(f, "  L1_SIZE:                          {}", p.l1_size)?;
        writeln!(f, "  L1_ASSOC:                         {}", p.l1_assoc)?;
        writeln!(f, "  VC_NUM_BLOCKS:                    {}", p.vc_num_blocks)?;
        writeln!(f, "  L2_SIZE:                          {}", p.l2_size)?;
        writeln!(f, "  L2_ASSOC:                         {}", p.l2_assoc)?;
        writeln!(f, "  trace_file:                       {}", self.trace_file)?;
        writeln!(f, "  ===================================")?;
        writeln!(f)
    }
}
