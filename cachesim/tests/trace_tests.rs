//! Trace parsing and tolerance tests.

use std::io::Cursor;

use cachesim::config::CacheParams;
use cachesim::sim::trace::{parse_line, Op, TraceEvent};
use cachesim::sim::Simulator;

fn simulator() -> Simulator {
    Simulator::new(&CacheParams {
        block_size: 16,
        l1_size: 1024,
        l1_assoc: 2,
        vc_num_blocks: 0,
        l2_size: 0,
        l2_assoc: 0,
    })
    .unwrap()
}

/// Well-formed lines parse into events.
#[test]
fn test_parse_valid_lines() {
    assert_eq!(
        parse_line("r ff"),
        Some(TraceEvent {
            op: Op::Read,
            addr: 0xff
        })
    );
    assert_eq!(
        parse_line("w 10"),
        Some(TraceEvent {
            op: Op::Write,
            addr: 0x10
        })
    );
    assert_eq!(
        parse_line("r 7fffffff"),
        Some(TraceEvent {
            op: Op::Read,
            addr: 0x7fff_ffff
        })
    );
}

/// Leading/trailing whitespace, tabs, upper-case hex digits, and a 0x
/// prefix are all tolerated.
#[test]
fn test_parse_lenient_forms() {
    assert_eq!(parse_line("  r\t1f  ").unwrap().addr, 0x1f);
    assert_eq!(parse_line("r ABCD").unwrap().addr, 0xabcd);
    assert_eq!(parse_line("w 0x400").unwrap().addr, 0x400);
    assert_eq!(parse_line("w 0X400").unwrap().addr, 0x400);
}

/// Everything else is rejected, not mis-read.
#[test]
fn test_parse_rejects_garbage() {
    assert_eq!(parse_line(""), None);
    assert_eq!(parse_line("   "), None);
    assert_eq!(parse_line("r"), None);
    assert_eq!(parse_line("w"), None);
    assert_eq!(parse_line("x deadbeef"), None);
    assert_eq!(parse_line("R 10"), None);
    assert_eq!(parse_line("read 10"), None);
    assert_eq!(parse_line("r zz"), None);
    assert_eq!(parse_line("r 10q"), None);
}

/// Unrecognized lines in a trace are skipped: neither read nor write
/// counters advance, and the surrounding events still count.
#[test]
fn test_run_skips_unrecognized_lines() {
    let trace = "r 100\n\
                 x deadbeef\n\
                 \n\
                 w 200\n\
                 bogus line entirely\n\
                 r 100\n";
    let mut sim = simulator();
    let events = sim.run(Cursor::new(trace)).unwrap();

    assert_eq!(events, 3);
    let l1 = &sim.hierarchy.l1.stats;
    assert_eq!(l1.reads, 2);
    assert_eq!(l1.writes, 1);
    assert_eq!(l1.read_hits, 1);
}

/// An empty trace leaves every counter at zero.
#[test]
fn test_run_empty_trace() {
    let mut sim = simulator();
    let events = sim.run(Cursor::new("")).unwrap();

    assert_eq!(events, 0);
    assert_eq!(sim.hierarchy.l1.stats.accesses(), 0);
    assert_eq!(sim.hierarchy.main_memory_stats().accesses(), 0);
}

/// A trace is consumed to EOF even without a trailing newline.
#[test]
fn test_run_no_trailing_newline() {
    let mut sim = simulator();
    let events = sim.run(Cursor::new("r 0\nw 40")).unwrap();
    assert_eq!(events, 2);
    assert_eq!(sim.hierarchy.l1.stats.reads, 1);
    assert_eq!(sim.hierarchy.l1.stats.writes, 1);
}
