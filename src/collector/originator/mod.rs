//! Sampling pass over the originator table.
//!
//! One pass opens the query command, parses every data line, runs each
//! entry through the hop tracker, and dispatches one sample per entry to
//! the metric sink. A pass either completes fully or aborts on the first
//! malformed line; samples dispatched before the abort are not retracted.

pub mod parser;
pub mod tracker;

use std::fmt;
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::collector::traits::{TableSource, TableStream};
use crate::sink::{MetricSink, OriginatorSample};
use parser::{HEADER_LINES, ParseError, parse_entry_line};
use tracker::{HopTracker, Stability};

/// Error type for a failed sampling pass.
#[derive(Debug)]
pub enum CollectError {
    /// The query command could not be started.
    StreamOpen(io::Error),
    /// The command output broke off mid-read.
    StreamRead(io::Error),
    /// A data line did not match the expected table layout.
    Parse {
        /// 1-based line number within the command output.
        line: usize,
        source: ParseError,
    },
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectError::StreamOpen(e) => write!(f, "cannot run query command: {}", e),
            CollectError::StreamRead(e) => write!(f, "query output read failed: {}", e),
            CollectError::Parse { line, source } => write!(f, "line {}: {}", line, source),
        }
    }
}

impl std::error::Error for CollectError {}

/// Counters describing one completed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Entries parsed and dispatched.
    pub originators: usize,
    /// Entries seen for the first time.
    pub new: usize,
    /// Entries whose next hop moved since the previous pass.
    pub changed: usize,
    /// Entries with a stable next hop.
    pub unchanged: usize,
    /// Entries the tracker failed to remember (table growth failure).
    pub untracked: usize,
}

/// Collector for the batman-adv originator table.
///
/// Owns the hop tracker for the life of the process; the table source is
/// opened afresh for every pass, and the stream handle never outlives the
/// pass that opened it.
pub struct OriginatorCollector<S: TableSource> {
    source: S,
    tracker: HopTracker,
}

impl<S: TableSource> OriginatorCollector<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            tracker: HopTracker::new(),
        }
    }

    /// Number of originators tracked so far.
    pub fn tracked_nodes(&self) -> usize {
        self.tracker.len()
    }

    /// Runs one sampling pass, dispatching one sample per table entry.
    ///
    /// All samples of a pass share the timestamp taken at pass start. On
    /// a parse or read failure the pass aborts; samples already
    /// dispatched this pass stand. Close failures are logged and never
    /// fail the pass. Tracker state accumulated before a failure survives
    /// into the next pass.
    pub fn collect_pass(&mut self, sink: &mut dyn MetricSink) -> Result<PassStats, CollectError> {
        let timestamp = unix_now();
        let mut stream = self.source.open().map_err(CollectError::StreamOpen)?;

        let mut stats = PassStats::default();
        let mut line_no = 0usize;

        let result = loop {
            let line = match stream.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => break Ok(()),
                Err(e) => break Err(CollectError::StreamRead(e)),
            };
            line_no += 1;

            // The first two lines carry the interface banner and the
            // column headers; only the lines after them carry entries.
            if line_no <= HEADER_LINES {
                continue;
            }

            let entry = match parse_entry_line(&line) {
                Ok(entry) => entry,
                Err(source) => {
                    break Err(CollectError::Parse {
                        line: line_no,
                        source,
                    });
                }
            };

            let stability = self.tracker.observe(entry.originator, entry.next_hop);
            match stability {
                Stability::New => stats.new += 1,
                Stability::Changed => stats.changed += 1,
                Stability::Unchanged => stats.unchanged += 1,
                Stability::AllocationFailure => {
                    stats.untracked += 1;
                    warn!(
                        "hop tracker cannot grow; originator {} stays untracked this pass",
                        entry.originator
                    );
                }
            }

            sink.dispatch(&OriginatorSample {
                node: entry.originator.to_string(),
                timestamp,
                freshness: entry.last_seen_secs,
                quality: u64::from(entry.quality),
                hop_stability: stability.signal(),
            });
            stats.originators += 1;
        };

        if let Err(e) = stream.close() {
            warn!("closing query stream failed (ignored): {}", e);
        }

        result.map(|()| {
            debug!(
                "pass done: {} originators, {} tracked total",
                stats.originators,
                self.tracker.len()
            );
            stats
        })
    }
}

/// Seconds since the unix epoch, the shared capture time of one pass.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
