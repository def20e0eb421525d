//! Trace-file parsing.
//!
//! Traces are plain text with one event per line: an operation character
//! (`r` or `w`) and a hexadecimal address, whitespace-separated. Lines
//! that do not parse are skipped rather than aborting the run, so one
//! degenerate line cannot kill a multi-million-event trace.

use std::io::{self, BufRead};

use crate::common::Address;

/// Operation requested by a trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read,
    Write,
}

/// A single trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent {
    pub op: Op,
    pub addr: Address,
}

/// Parses one trace line.
///
/// Returns `None` for blank lines, unrecognized operation characters, and
/// addresses that are not valid hex. A `0x`/`0X` prefix on the address is
/// tolerated and stripped.
pub fn parse_line(line: &str) -> Option<TraceEvent> {
    let mut fields = line.split_whitespace();
    let op = match fields.next()? {
        "r" => Op::Read,
        "w" => Op::Write,
        _ => return None,
    };
    let token = fields.next()?;
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    let addr = Address::from_str_radix(digits, 16).ok()?;
    Some(TraceEvent { op, addr })
}

/// Iterator over the events of a trace stream, skipping unparsable lines.
pub struct TraceReader<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            lines: input.lines(),
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = io::Result<TraceEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next()? {
                Ok(line) => match parse_line(&line) {
                    Some(event) => return Some(Ok(event)),
                    None => {
                        if !line.trim().is_empty() {
                            log::debug!("skipping unrecognized trace line {line:?}");
                        }
                    }
                },
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
