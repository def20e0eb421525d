//! Cache Hierarchy Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line
//! argument parsing, hierarchy construction, the trace loop, and report
//! emission.
//!
//! # Usage
//!
//! Two invocation forms are supported:
//! 1. **Positional**: the seven classic arguments, in this exact order:
//!    `sim_cache <BLOCKSIZE> <L1_SIZE> <L1_ASSOC> <VC_NUM_BLOCKS> <L2_SIZE> <L2_ASSOC> <TRACE_FILE>`
//! 2. **Config file**: `sim_cache --config <FILE.toml> <TRACE_FILE>`,
//!    loading the hierarchy parameters from TOML instead.

use clap::Parser;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::process;

use cachesim::config::{CacheParams, ConfigurationEcho};
use cachesim::sim::Simulator;
use cachesim::stats::{ContentsReport, SimulationResults};

/// Command-line arguments for the cache hierarchy simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Trace-driven multi-level cache hierarchy simulator")]
struct Args {
    /// Load the hierarchy parameters from a TOML file instead of the six
    /// positional numbers.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// BLOCKSIZE L1_SIZE L1_ASSOC VC_NUM_BLOCKS L2_SIZE L2_ASSOC TRACE_FILE,
    /// or TRACE_FILE alone when --config is given.
    #[arg(value_name = "ARG")]
    operands: Vec<String>,
}

/// Main entry point.
///
/// # Behavior
///
/// 1. **Arguments**: resolves the parameter record from the positional
///    arguments or a TOML file; any argument problem is a one-line
///    diagnostic on stderr and exit code 1.
/// 2. **Validation**: rejects mis-parameterized hierarchies before any
///    simulation state is constructed.
/// 3. **Simulation**: echoes the configuration, then pulls the trace
///    through the hierarchy event by event until EOF.
/// 4. **Reports**: prints the contents dump and the simulation results.
fn main() {
    env_logger::init();

    let args = Args::parse();
    let (params, trace_file) = resolve_parameters(&args);

    if let Err(e) = params.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let trace = File::open(&trace_file).unwrap_or_else(|_| {
        eprintln!("Error: Unable to open file {trace_file}");
        process::exit(1);
    });

    print!(
        "{}",
        ConfigurationEcho {
            params: &params,
            trace_file: &trace_file,
        }
    );

    let mut simulator = Simulator::new(&params).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    if let Err(e) = simulator.run(BufReader::new(trace)) {
        eprintln!("Error: failed reading trace {trace_file}: {e}");
        process::exit(1);
    }

    print!(
        "{}",
        ContentsReport {
            hierarchy: &simulator.hierarchy,
        }
    );
    print!(
        "{}",
        SimulationResults {
            hierarchy: &simulator.hierarchy,
        }
    );
}

/// Resolves the parameter record and trace path from the command line.
fn resolve_parameters(args: &Args) -> (CacheParams, String) {
    match &args.config {
        Some(path) => {
            if args.operands.len() != 1 {
                eprintln!("Error: Expected inputs:1 Given inputs:{}", args.operands.len());
                process::exit(1);
            }
            let contents = fs::read_to_string(path).unwrap_or_else(|_| {
                eprintln!("Error: Unable to open file {}", path.display());
                process::exit(1);
            });
            let params = toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Error: invalid configuration {}: {e}", path.display());
                process::exit(1);
            });
            (params, args.operands[0].clone())
        }
        None => {
            if args.operands.len() != 7 {
                eprintln!("Error: Expected inputs:7 Given inputs:{}", args.operands.len());
                process::exit(1);
            }
            let params = CacheParams {
                block_size: parse_u32("BLOCKSIZE", &args.operands[0]),
                l1_size: parse_u32("L1_SIZE", &args.operands[1]),
                l1_assoc: parse_u32("L1_ASSOC", &args.operands[2]),
                vc_num_blocks: parse_u32("VC_NUM_BLOCKS", &args.operands[3]),
                l2_size: parse_u32("L2_SIZE", &args.operands[4]),
                l2_assoc: parse_u32("L2_ASSOC", &args.operands[5]),
            };
            (params, args.operands[6].clone())
        }
    }
}

fn parse_u32(name: &str, token: &str) -> u32 {
    token.parse().unwrap_or_else(|_| {
        eprintln!("Error: {name} must be a non-negative integer, got {token}");
        process::exit(1);
    })
}
