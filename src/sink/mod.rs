//! Metric dispatch.
//!
//! The collector hands one `OriginatorSample` per table entry to a
//! `MetricSink`; what happens to it (collectd text protocol, JSON lines,
//! a test buffer) is the sink's concern. Dispatch never fails a sampling
//! pass: sinks report their own I/O problems and move on.

mod jsonl;
mod putval;

pub use jsonl::JsonSink;
pub use putval::PutvalSink;

use serde::Serialize;

/// The metric triple dispatched for one originator.
///
/// All samples of one pass share `timestamp`, taken at pass start.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginatorSample {
    /// Canonical node id: the originator address as lowercase hex.
    pub node: String,
    /// Capture time, seconds since the unix epoch.
    pub timestamp: u64,
    /// Seconds since the originator was last seen (gauge).
    pub freshness: f64,
    /// Link quality count out of 255 (counter).
    pub quality: u64,
    /// Next-hop stability signal, 1.0 stable / 0.0 changed (gauge).
    pub hop_stability: f64,
}

/// Destination for dispatched samples.
pub trait MetricSink {
    fn dispatch(&mut self, sample: &OriginatorSample);
}

/// Sink that keeps samples in memory, for tests and pass inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub samples: Vec<OriginatorSample>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricSink for MemorySink {
    fn dispatch(&mut self, sample: &OriginatorSample) {
        self.samples.push(sample.clone());
    }
}
