//! collectd plain-text protocol sink.
//!
//! Emits one `PUTVAL` line per sample, keeping the value-list identity
//! the batman-adv collectd plugin used: plugin `batman_adv`, type
//! `batman_adv_origt`, the node id as type instance, and the triple
//! freshness:quality:hop_stability as the values. The output can be fed
//! straight to collectd's exec plugin.

use std::io::Write;

use tracing::warn;

use super::{MetricSink, OriginatorSample};

/// Sink speaking the collectd exec-plugin text protocol.
pub struct PutvalSink<W: Write> {
    writer: W,
    host: String,
    interval: u64,
}

impl<W: Write> PutvalSink<W> {
    /// Creates a sink writing to `writer`, labeling value lists with
    /// `host` and announcing `interval` seconds between passes.
    pub fn new(writer: W, host: impl Into<String>, interval: u64) -> Self {
        Self {
            writer,
            host: host.into(),
            interval,
        }
    }
}

impl<W: Write> MetricSink for PutvalSink<W> {
    fn dispatch(&mut self, sample: &OriginatorSample) {
        let result = writeln!(
            self.writer,
            "PUTVAL \"{}/batman_adv/batman_adv_origt-{}\" interval={} {}:{}:{}:{}",
            self.host,
            sample.node,
            self.interval,
            sample.timestamp,
            sample.freshness,
            sample.quality,
            sample.hop_stability,
        );
        if let Err(e) = result {
            warn!("putval write failed: {}", e);
        }
    }
}
