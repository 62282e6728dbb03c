//! batman-adv originator-table collector.
//!
//! This module samples the mesh routing daemon's originator table (the
//! output of the `batctl o` neighbor-table query) and turns each routing
//! entry into per-node metrics: link freshness, link quality, and next-hop
//! stability.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   OriginatorCollector                     │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────────┐   │
//! │  │ line parser │ → │ HopTracker  │ → │ sample triple  │   │
//! │  └──────▲──────┘   └─────────────┘   └───────┬────────┘   │
//! │         │                                    │            │
//! │  ┌──────┴──────┐                      ┌──────▼────────┐   │
//! │  │ TableSource │ (trait)              │  MetricSink   │   │
//! │  └──────┬──────┘                      └───────────────┘   │
//! └─────────┼─────────────────────────────────────────────────┘
//!           │
//!    ┌──────┴─────────┐
//!    │                │
//! ┌──▼────────────┐ ┌─▼──────────┐
//! │ BatctlCommand │ │ MockTable  │
//! │ (production)  │ │ (testing)  │
//! └───────────────┘ └────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production
//!
//! ```ignore
//! use batmon::collector::{BatctlCommand, OriginatorCollector};
//! use batmon::sink::PutvalSink;
//!
//! let source = BatctlCommand::from_command_line("batctl o")?;
//! let mut collector = OriginatorCollector::new(source);
//! let mut sink = PutvalSink::new(std::io::stdout(), "localhost", 10);
//! let stats = collector.collect_pass(&mut sink)?;
//! ```
//!
//! ## Testing (with MockTable)
//!
//! ```
//! use batmon::collector::{MockTable, OriginatorCollector};
//! use batmon::sink::MemorySink;
//!
//! let mut collector = OriginatorCollector::new(MockTable::small_mesh());
//! let mut sink = MemorySink::new();
//! let stats = collector.collect_pass(&mut sink).unwrap();
//! assert_eq!(stats.originators, sink.samples.len());
//! ```

pub mod mock;
pub mod originator;
pub mod traits;

pub use mock::MockTable;
pub use originator::parser::{OriginatorEntry, ParseError};
pub use originator::tracker::{HopTracker, Stability};
pub use originator::{CollectError, OriginatorCollector, PassStats};
pub use traits::{BatctlCommand, TableSource, TableStream};
