//! batmon — batman-adv originator-table telemetry.
//!
//! Provides:
//! - `collector` — originator-table sampling: query command seam, line
//!   parser, next-hop stability tracking, sampling pass
//! - `mac` — 48-bit originator address codec
//! - `sink` — metric dispatch (collectd text protocol, JSON lines,
//!   in-memory for tests)

pub mod collector;
pub mod mac;
pub mod sink;
